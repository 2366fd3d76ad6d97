//! Arabic numeral-word and dual-form lookup tables used to resolve how many
//! individuals a matched heir pattern contributes.
//!
//! The cardinal numbers 1-10 each have masculine and feminine spellings in
//! Arabic (gender agreement with the counted noun runs inverted for 3-10),
//! plus the oft-used "ة" elision variants. The table below is intentionally
//! permissive — it maps every spelling variant seen in ordinary prose to its
//! integer value rather than trying to enforce strict grammatical agreement,
//! since the detector's job is extraction, not grammar checking.

/// `(spelling, value)` pairs for the words "one" through "ten".
pub const NUMERAL_WORDS: &[(&str, u32)] = &[
    ("واحد", 1),
    ("واحدة", 1),
    ("اثنان", 2),
    ("اثنين", 2),
    ("ثنان", 2),
    ("ثلاثة", 3),
    ("ثلاث", 3),
    // Hamza-bearing "أربعة"/"أربع" are written here in their bare-alef form
    // because `detect` normalizes hamza-alef variants before matching (see
    // `detector::normalize`) — the captured numeral-word text this table is
    // looked up against is always already folded to plain alef.
    ("اربعة", 4),
    ("اربع", 4),
    ("خمسة", 5),
    ("خمس", 5),
    ("ستة", 6),
    ("ست", 6),
    ("سبعة", 7),
    ("سبع", 7),
    ("ثمانية", 8),
    ("ثماني", 8),
    ("ثمان", 8),
    ("تسعة", 9),
    ("تسع", 9),
    ("عشرة", 10),
    ("عشر", 10),
];

/// Dual suffixes that, attached to a relation noun, mean "two of them"
/// regardless of case ending (nominative "-ān" / accusative-genitive "-ayn").
pub const DUAL_SUFFIXES: &[&str] = &["ان", "ين"];

/// Looks a numeral word up in [`NUMERAL_WORDS`], returning its integer value.
///
/// The conjunction "و" ("and") commonly attaches directly to the following
/// word with no intervening space ("وثلاثة" = "wa-thalātha"), so a leading
/// "و" is stripped before lookup — otherwise a numeral captured straight off
/// the token boundary would never match the bare table spellings.
pub fn word_to_count(word: &str) -> Option<u32> {
    let word = word.strip_prefix('و').unwrap_or(word);
    NUMERAL_WORDS
        .iter()
        .find(|(spelling, _)| *spelling == word)
        .map(|(_, value)| *value)
}

/// Parses a run of Western or Arabic-Indic digits into a count.
pub fn digits_to_count(digits: &str) -> Option<u32> {
    let normalized: String = digits
        .chars()
        .map(|c| match c {
            '٠'..='٩' => char::from_digit(c as u32 - '٠' as u32, 10).unwrap_or(c),
            other => other,
        })
        .collect();
    normalized.parse().ok()
}
