//! The Heir Detector: a deterministic text-pattern extractor that resolves
//! a free-form Arabic sentence into a decedent-gender inference plus a
//! canonical multiset of [`Heir`] records.
//!
//! Patterns are encoded as data (a [`PatternRule`] table per [`Relation`]
//! kind), not as control flow, following `legalis_dsl::nl_to_dsl`'s
//! `NLPattern`/`NLTranslator` design: a `Vec` of compiled regexes plus a
//! count-resolution strategy, so new phrasings are added by appending table
//! rows rather than branching code. The `regex` crate has no lookbehind, so
//! every disambiguation rule from the specification is implemented as a
//! post-match context filter rather than a lookbehind assertion.

use crate::heir::{DecedentGender, Heir, Relation};
use crate::numerals::{digits_to_count, word_to_count};
use regex::Regex;
use std::sync::OnceLock;

/// How many individuals a successful match of a [`PatternRule`] contributes.
#[derive(Debug, Clone, Copy)]
enum CountKind {
    /// The pattern itself implies a fixed count (bare singular = 1, dual = 2).
    Literal(u32),
    /// The `num` capture group holds an Arabic numeral word to look up.
    NumericWord,
    /// The `num` capture group holds a run of digits (Western or Arabic-Indic).
    Digit,
}

/// One regex plus the semantics for how many heirs a match contributes, and
/// an optional context filter that rejects matches which are really a
/// different (morphologically similar) relation.
struct PatternRule {
    regex: Regex,
    count: CountKind,
    /// If a match is immediately followed (after whitespace) by any of
    /// these words, the match is rejected — the disambiguation mechanism
    /// described in the specification (e.g. "ibn" followed by "al-akh").
    reject_if_followed_by: &'static [&'static str],
    /// Symmetric check on the word immediately before the match — needed
    /// because a compound like "بنت بنت" (daughter's daughter) contains a
    /// second "بنت" token that the bare-daughter pattern would otherwise
    /// also match, with nothing after it left to reject on.
    reject_if_preceded_by: &'static [&'static str],
}

fn rx(pattern: String) -> Regex {
    Regex::new(&pattern).unwrap_or_else(|e| panic!("invalid heir pattern {pattern:?}: {e}"))
}

/// Returns true if, after skipping whitespace from `end`, the remaining
/// text starts with one of `words`.
fn followed_by_any(text: &str, end: usize, words: &[&str]) -> bool {
    if words.is_empty() {
        return false;
    }
    let rest = text[end..].trim_start();
    words.iter().any(|w| rest.starts_with(w))
}

/// Returns true if, after skipping whitespace before `start`, the
/// preceding text ends with one of `words`.
fn preceded_by_any(text: &str, start: usize, words: &[&str]) -> bool {
    if words.is_empty() {
        return false;
    }
    let before = text[..start].trim_end();
    words.iter().any(|w| before.ends_with(w))
}

/// Runs every pattern in `rules` over `text` and returns the maximum
/// contributed count across all non-overlapping matches of all rules —
/// never the sum, so overlapping patterns for the same kind cannot
/// double-count the same individuals.
fn resolve_count(text: &str, rules: &[PatternRule]) -> u32 {
    let mut best = 0u32;
    for rule in rules {
        for caps in rule.regex.captures_iter(text) {
            let whole = caps.get(0).expect("group 0 always matches");
            if followed_by_any(text, whole.end(), rule.reject_if_followed_by) {
                continue;
            }
            if preceded_by_any(text, whole.start(), rule.reject_if_preceded_by) {
                continue;
            }
            let count = match rule.count {
                CountKind::Literal(n) => Some(n),
                CountKind::NumericWord => caps.name("num").and_then(|g| word_to_count(g.as_str())),
                CountKind::Digit => caps.name("num").and_then(|g| digits_to_count(g.as_str())),
            };
            if let Some(n) = count {
                best = best.max(n);
            }
        }
    }
    best
}

/// Builds the four-pattern family shared by simple (non-compound) kinds:
/// bare singular, dual, "<numeral word> <plural>", "<digit> <plural>".
fn simple_family(
    bare: &str,
    dual_forms: &[&str],
    plural: &str,
    reject: &'static [&'static str],
) -> Vec<PatternRule> {
    simple_family_with_preceding(bare, dual_forms, plural, reject, &[])
}

/// Like [`simple_family`], but also rejects the bare-singular match when it
/// is immediately preceded by one of `reject_before` — needed for kinds
/// whose bare noun also occurs as the second token of a compound relation
/// ("بنت بنت", "ابن الابن"), where nothing follows the embedded token to
/// reject on but its predecessor is diagnostic.
fn simple_family_with_preceding(
    bare: &str,
    dual_forms: &[&str],
    plural: &str,
    reject: &'static [&'static str],
    reject_before: &'static [&'static str],
) -> Vec<PatternRule> {
    vec![
        // The trailing `(?:ا)?` absorbs the accusative case ending
        // ("ابنا" for "ابن", etc.) without colliding with the dual forms,
        // which are four letters longer and matched by their own rule.
        PatternRule {
            regex: rx(format!(r"\b(?:و)?(?:ال)?{bare}(?:ا)?\b")),
            count: CountKind::Literal(1),
            reject_if_followed_by: reject,
            reject_if_preceded_by: reject_before,
        },
        PatternRule {
            regex: rx(format!(r"\b(?:و)?(?:ال)?(?:{})\b", dual_forms.join("|"))),
            count: CountKind::Literal(2),
            reject_if_followed_by: reject,
            reject_if_preceded_by: &[],
        },
        PatternRule {
            regex: rx(format!(r"(?P<num>\S+)\s+(?:و)?(?:ال)?{plural}\b")),
            count: CountKind::NumericWord,
            reject_if_followed_by: reject,
            reject_if_preceded_by: &[],
        },
        PatternRule {
            regex: rx(format!(r"(?P<num>[0-9\u{{0660}}-\u{{0669}}]+)\s+(?:و)?(?:ال)?{plural}\b")),
            count: CountKind::Digit,
            reject_if_followed_by: reject,
            reject_if_preceded_by: &[],
        },
    ]
}

/// Builds the pattern family for a sibling kind. `qualifier` is `None` for
/// the full (unqualified) sibling — which rejects a match qualified by
/// either "li-ab" or "li-umm" — or `Some(qualifier)` for a paternal/maternal
/// sibling, which requires that exact qualifier immediately after the noun.
fn sibling_family(
    bare: &str,
    dual_forms: &[&str],
    plural: &str,
    qualifier: Option<&str>,
) -> Vec<PatternRule> {
    const QUALIFIERS: &[&str] = &["لاب", "لام"];
    match qualifier {
        None => simple_family(bare, dual_forms, plural, QUALIFIERS),
        Some(q) => {
            let q = q.to_string();
            vec![
                PatternRule {
                    regex: rx(format!(r"\b(?:و)?(?:ال)?{bare}(?:ا)?\s*{q}\b")),
                    count: CountKind::Literal(1),
                    reject_if_followed_by: &[],
                    reject_if_preceded_by: &[],
                },
                PatternRule {
                    regex: rx(format!(r"\b(?:و)?(?:ال)?(?:{})\s*{q}\b", dual_forms.join("|"))),
                    count: CountKind::Literal(2),
                    reject_if_followed_by: &[],
                    reject_if_preceded_by: &[],
                },
                PatternRule {
                    regex: rx(format!(r"(?P<num>\S+)\s+(?:و)?(?:ال)?{plural}\s*{q}\b")),
                    count: CountKind::NumericWord,
                    reject_if_followed_by: &[],
                    reject_if_preceded_by: &[],
                },
                PatternRule {
                    regex: rx(format!(
                        r"(?P<num>[0-9\u{{0660}}-\u{{0669}}]+)\s+(?:و)?(?:ال)?{plural}\s*{q}\b"
                    )),
                    count: CountKind::Digit,
                    reject_if_followed_by: &[],
                    reject_if_preceded_by: &[],
                },
            ]
        }
    }
}

/// Builds the pattern family for a grandchild-through-a-named-parent kind
/// ("son's daughter", "daughter's daughter"): a two-word compound noun.
fn compound_family(first: &str, second: &str) -> Vec<PatternRule> {
    vec![
        PatternRule {
            regex: rx(format!(r"\b(?:و)?{first}\s+(?:و)?(?:ال)?{second}\b")),
            count: CountKind::Literal(1),
            reject_if_followed_by: &[],
            reject_if_preceded_by: &[],
        },
        PatternRule {
            regex: rx(format!(r"(?P<num>\S+)\s+بنات\s+(?:و)?(?:ال)?{second}\b")),
            count: CountKind::NumericWord,
            reject_if_followed_by: &[],
            reject_if_preceded_by: &[],
        },
        PatternRule {
            regex: rx(format!(
                r"(?P<num>[0-9\u{{0660}}-\u{{0669}}]+)\s+بنات\s+(?:و)?(?:ال)?{second}\b"
            )),
            count: CountKind::Digit,
            reject_if_followed_by: &[],
            reject_if_preceded_by: &[],
        },
    ]
}

struct PatternTable {
    wife: Vec<PatternRule>,
    husband: Vec<PatternRule>,
    son: Vec<PatternRule>,
    daughter: Vec<PatternRule>,
    sons_daughter: Vec<PatternRule>,
    daughters_daughter: Vec<PatternRule>,
    grandfather: Vec<PatternRule>,
    father: Vec<PatternRule>,
    mother: Vec<PatternRule>,
    full_brother: Vec<PatternRule>,
    full_sister: Vec<PatternRule>,
    paternal_brother: Vec<PatternRule>,
    paternal_sister: Vec<PatternRule>,
    maternal_brother: Vec<PatternRule>,
    maternal_sister: Vec<PatternRule>,
}

fn build_table() -> PatternTable {
    PatternTable {
        wife: vec![PatternRule {
            regex: rx(r"\b(?:و)?(?:ال)?زوجة\b".to_string()),
            count: CountKind::Literal(1),
            reject_if_followed_by: &[],
            reject_if_preceded_by: &[],
        }],
        husband: vec![PatternRule {
            regex: rx(r"\b(?:و)?(?:ال)?زوج(?:ا)?\b".to_string()),
            count: CountKind::Literal(1),
            reject_if_followed_by: &[],
            reject_if_preceded_by: &[],
        }],
        // "ابن" preceded by "ابن" catches the embedded token inside "الابن"
        // when it surfaces on its own after "ابن الابن" is rejected by the
        // reject_if_followed_by filter for the first occurrence.
        son: simple_family_with_preceding(
            "ابن",
            &["ابنان", "ابنين"],
            "ابناء",
            &["الاخ", "العم", "الابن"],
            &["ابن"],
        ),
        // "بنت" preceded by "بنت" catches the second token of "بنت بنت"
        // once the first "بنت" is rejected for being followed by "بنت".
        // The followed-by list carries both the indefinite and definite
        // forms of "ابن"/"بنت" — "بنت الابن"/"بنت البنت" are the ordinary
        // definite spellings of "son's daughter"/"daughter's daughter",
        // and without "الابن"/"البنت" here the bare-daughter pattern would
        // still fire alongside the compound one, emitting a phantom
        // bare Daughter.
        daughter: simple_family_with_preceding(
            "بنت",
            &["بنتان", "بنتين"],
            "بنات",
            &["ابن", "بنت", "الابن", "البنت"],
            &["بنت"],
        ),
        sons_daughter: compound_family("بنت", "ابن"),
        daughters_daughter: compound_family("بنت", "بنت"),
        grandfather: vec![PatternRule {
            regex: rx(r"\b(?:و)?(?:ال)?جد(?:ا)?\b".to_string()),
            count: CountKind::Literal(1),
            reject_if_followed_by: &[],
            reject_if_preceded_by: &[],
        }],
        father: vec![PatternRule {
            regex: rx(r"\b(?:و)?(?:ال)?اب(?:ا)?\b".to_string()),
            count: CountKind::Literal(1),
            reject_if_followed_by: &[],
            reject_if_preceded_by: &[],
        }],
        mother: vec![PatternRule {
            regex: rx(r"\b(?:و)?(?:ال)?ام(?:ا)?\b".to_string()),
            count: CountKind::Literal(1),
            reject_if_followed_by: &[],
            reject_if_preceded_by: &[],
        }],
        full_brother: sibling_family("اخ", &["اخوان", "اخوين"], "اخوة", None),
        full_sister: sibling_family("اخت", &["اختان", "اختين"], "اخوات", None),
        paternal_brother: sibling_family("اخ", &["اخوان", "اخوين"], "اخوة", Some("لاب")),
        paternal_sister: sibling_family("اخت", &["اختان", "اختين"], "اخوات", Some("لاب")),
        maternal_brother: sibling_family("اخ", &["اخوان", "اخوين"], "اخوة", Some("لام")),
        maternal_sister: sibling_family("اخت", &["اختان", "اختين"], "اخوات", Some("لام")),
    }
}

fn table() -> &'static PatternTable {
    static TABLE: OnceLock<PatternTable> = OnceLock::new();
    TABLE.get_or_init(build_table)
}

/// Folds hamza-bearing alef variants to a bare alef and strips the tatweel
/// (kashida) elongation character. This is orthographic normalization, not
/// diacritic stripping: tashkeel marks are left untouched, since the
/// specification requires patterns to match the undiacritized input as-is.
fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{0640}' => {} // tatweel/kashida, drop
            '\u{0623}' | '\u{0625}' | '\u{0622}' | '\u{0671}' => out.push('\u{0627}'), // -> bare alef
            _ => out.push(ch),
        }
    }
    out
}

const FEMALE_DECEDENT_MARKERS: &[&str] = &["توفيت", "ماتت", "توفت", "تاركة", "امراة"];
const MALE_DECEDENT_MARKERS: &[&str] = &[
    "توفي", "مات", "توفى", "تاركا", "وترك", "رجل", "عن",
];

/// Infers the decedent's gender from verb and noun markers, stopping at the
/// first rule that fires (§4.1).
fn infer_gender(text: &str) -> DecedentGender {
    if FEMALE_DECEDENT_MARKERS.iter().any(|m| text.contains(m)) {
        return DecedentGender::Female;
    }
    if MALE_DECEDENT_MARKERS.iter().any(|m| text.contains(m)) {
        return DecedentGender::Male;
    }
    if text.contains("زوجة") {
        return DecedentGender::Male;
    }
    if text.contains("زوج") {
        return DecedentGender::Female;
    }
    DecedentGender::Male
}

fn push_heirs(out: &mut Vec<Heir>, kind: Relation, count: u32) {
    if count == 0 {
        return;
    }
    if count == 1 {
        out.push(Heir::new(kind, kind.arabic_label()));
    } else {
        for i in 1..=count {
            out.push(Heir::new(kind, format!("{} {}", kind.arabic_label(), i)));
        }
    }
}

/// Resolves `text` into a decedent gender and a canonical, ordered multiset
/// of heirs. Pure, deterministic, and total: on a string with no
/// recognizable relative the returned list is simply empty.
pub fn detect(text: &str) -> (DecedentGender, Vec<Heir>) {
    let text = normalize(text);
    let gender = infer_gender(&text);
    let t = table();

    let mut heirs = Vec::new();

    // Spouse: the detector never emits both kinds from one input (§3).
    if resolve_count(&text, &t.wife) >= 1 {
        push_heirs(&mut heirs, Relation::Wife, 1);
    } else if resolve_count(&text, &t.husband) >= 1 {
        push_heirs(&mut heirs, Relation::Husband, 1);
    }

    push_heirs(&mut heirs, Relation::Son, resolve_count(&text, &t.son));
    push_heirs(&mut heirs, Relation::Daughter, resolve_count(&text, &t.daughter));
    push_heirs(
        &mut heirs,
        Relation::SonsDaughter,
        resolve_count(&text, &t.sons_daughter),
    );
    push_heirs(
        &mut heirs,
        Relation::DaughtersDaughter,
        resolve_count(&text, &t.daughters_daughter),
    );

    // A grandfather is only reported when "jadda" (grandmother) does not
    // appear anywhere in the input, per the disambiguation rule.
    if !text.contains("جدة") {
        push_heirs(&mut heirs, Relation::Grandfather, resolve_count(&text, &t.grandfather));
    }

    push_heirs(&mut heirs, Relation::Father, resolve_count(&text, &t.father));
    push_heirs(&mut heirs, Relation::Mother, resolve_count(&text, &t.mother));
    push_heirs(
        &mut heirs,
        Relation::FullBrother,
        resolve_count(&text, &t.full_brother),
    );
    push_heirs(
        &mut heirs,
        Relation::FullSister,
        resolve_count(&text, &t.full_sister),
    );
    push_heirs(
        &mut heirs,
        Relation::PaternalBrother,
        resolve_count(&text, &t.paternal_brother),
    );
    push_heirs(
        &mut heirs,
        Relation::PaternalSister,
        resolve_count(&text, &t.paternal_sister),
    );
    push_heirs(
        &mut heirs,
        Relation::MaternalBrother,
        resolve_count(&text, &t.maternal_brother),
    );
    push_heirs(
        &mut heirs,
        Relation::MaternalSister,
        resolve_count(&text, &t.maternal_sister),
    );

    (gender, heirs)
}
