//! The relative data model: relation kinds, sex, and heir records.

use crate::rational::Rational;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Biological sex, derived mechanically from [`Relation`] — never stored
/// independently, so it can never drift out of sync with `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sex {
    Male,
    Female,
}

/// The closed enumeration of family roles the calculator understands.
///
/// Kinds the detector may recognize but the calculator does not act on
/// (e.g. uncles, cousins) are simply never constructed here; callers that
/// extend the detector with such kinds get inert pass-through behavior for
/// free because the calculator only ever matches on these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Relation {
    Wife,
    Husband,
    Son,
    Daughter,
    Father,
    Mother,
    /// Paternal grandfather; classical maternal/paternal grandmothers and
    /// the great-grandparent chain are an acknowledged gap (see DESIGN.md).
    Grandfather,
    SonsDaughter,
    DaughtersDaughter,
    FullBrother,
    FullSister,
    PaternalBrother,
    PaternalSister,
    MaternalBrother,
    MaternalSister,
}

impl Relation {
    /// Sex is a pure function of kind; this is the single place that
    /// mapping is defined, so `Heir::sex` can never disagree with it.
    pub fn sex(&self) -> Sex {
        use Relation::*;
        match self {
            Husband | Son | Father | Grandfather | FullBrother | PaternalBrother
            | MaternalBrother => Sex::Male,
            Wife | Daughter | Mother | SonsDaughter | DaughtersDaughter | FullSister
            | PaternalSister | MaternalSister => Sex::Female,
        }
    }

    /// The stable wire identifier for this kind (§6 "Kind tags").
    pub fn tag(&self) -> &'static str {
        use Relation::*;
        match self {
            Wife => "wife",
            Husband => "husband",
            Son => "son",
            Daughter => "daughter",
            Father => "father",
            Mother => "mother",
            Grandfather => "grandfather",
            SonsDaughter => "sons_daughter",
            DaughtersDaughter => "daughters_daughter",
            FullBrother => "full_brother",
            FullSister => "full_sister",
            PaternalBrother => "paternal_brother",
            PaternalSister => "paternal_sister",
            MaternalBrother => "maternal_brother",
            MaternalSister => "maternal_sister",
        }
    }

    /// Arabic label used to build a display name when a kind has a single
    /// bearer (no numeric suffix) or to prefix `"{label} {n}"` for N>1.
    pub fn arabic_label(&self) -> &'static str {
        use Relation::*;
        match self {
            Wife => "الزوجة",
            Husband => "الزوج",
            Son => "الابن",
            Daughter => "البنت",
            Father => "الأب",
            Mother => "الأم",
            Grandfather => "الجد",
            SonsDaughter => "بنت الابن",
            DaughtersDaughter => "بنت البنت",
            FullBrother => "الأخ الشقيق",
            FullSister => "الأخت الشقيقة",
            PaternalBrother => "الأخ لأب",
            PaternalSister => "الأخت لأب",
            MaternalBrother => "الأخ لأم",
            MaternalSister => "الأخت لأم",
        }
    }

    pub fn is_sibling(&self) -> bool {
        use Relation::*;
        matches!(
            self,
            FullBrother | FullSister | PaternalBrother | PaternalSister | MaternalBrother
                | MaternalSister
        )
    }

    pub fn is_full_sibling(&self) -> bool {
        matches!(self, Relation::FullBrother | Relation::FullSister)
    }

    pub fn is_paternal_sibling(&self) -> bool {
        matches!(self, Relation::PaternalBrother | Relation::PaternalSister)
    }
}

/// One living individual of a given [`Relation`] kind.
///
/// Siblings and multiple children are represented as distinct records with
/// the same `kind`, never collapsed into a count field, so each one's
/// `display_name` and `share` can be reported and assigned independently.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Heir {
    pub kind: Relation,
    pub display_name: String,
    pub sex: Sex,
    pub blocked: bool,
    pub share: Rational,
}

impl Heir {
    /// Constructs a fresh, unblocked, zero-share heir record. `sex` is
    /// derived from `kind` rather than taken as a parameter, preserving the
    /// "sex is a function of kind" invariant at construction time.
    pub fn new(kind: Relation, display_name: impl Into<String>) -> Self {
        Heir {
            kind,
            display_name: display_name.into(),
            sex: kind.sex(),
            blocked: false,
            share: Rational::ZERO,
        }
    }
}

/// The decedent's inferred gender, resolved once by the detector and held
/// for the remainder of the computation to disambiguate the spouse role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DecedentGender {
    Male,
    Female,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sex_is_a_function_of_kind() {
        assert_eq!(Relation::Father.sex(), Sex::Male);
        assert_eq!(Relation::Mother.sex(), Sex::Female);
        assert_eq!(Relation::FullBrother.sex(), Sex::Male);
        assert_eq!(Relation::FullSister.sex(), Sex::Female);
    }

    #[test]
    fn new_heir_starts_unblocked_with_zero_share() {
        let h = Heir::new(Relation::Son, "الابن");
        assert!(!h.blocked);
        assert!(h.share.is_zero());
        assert_eq!(h.sex, Sex::Male);
    }

    #[test]
    fn tags_are_stable_identifiers() {
        assert_eq!(Relation::SonsDaughter.tag(), "sons_daughter");
        assert_eq!(Relation::MaternalSister.tag(), "maternal_sister");
    }

    #[test]
    fn sibling_classification() {
        assert!(Relation::FullBrother.is_sibling());
        assert!(Relation::FullBrother.is_full_sibling());
        assert!(!Relation::FullBrother.is_paternal_sibling());
        assert!(Relation::PaternalSister.is_paternal_sibling());
        assert!(!Relation::Son.is_sibling());
    }
}
