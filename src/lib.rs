//! `mawarith`: classical Islamic inheritance (fiqh al-mawārīth) share
//! computation from a free-form Arabic description of a decedent and
//! surviving relatives.
//!
//! Two components, composed linearly by [`compute_inheritance`]:
//!
//! ```text
//! Arabic string  ──►  detect()  ──►  relative list + decedent gender
//!                                       │
//!                                       ▼
//!                               calculate()  ──►  { shares, trace }
//! ```
//!
//! - [`detector::detect`] is a deterministic text-pattern extractor: no
//!   exceptions, no panics on ill-formed input, an empty relative list on
//!   total failure.
//! - [`calculator::calculate`] applies exclusion (ḥijāb), the two
//!   ʿUmariyyatān special cases, the fixed furūḍ fractions, and ʿaṣaba
//!   residue distribution, building a human-readable trace as it goes.
//!
//! Both stages are pure, synchronous, and allocate only their own
//! arguments; nothing outlives one [`compute_inheritance`] call, and
//! concurrent calls share no mutable state beyond the detector's
//! lazily-built, immutable pattern table.
//!
//! This crate never aborts: every input yields a well-formed
//! [`InheritanceResult`]. Configurations this implementation cannot fully
//! resolve (ʿawl, radd, maternal-sibling furūḍ) are surfaced through
//! [`Outcome`], not panics — see its variants for the exact taxonomy.

pub mod calculator;
pub mod detector;
pub mod error;
pub mod heir;
pub mod numerals;
pub mod rational;
pub mod trace;

use heir::{DecedentGender, Heir, Relation};
use rational::Rational;
use trace::TraceStep;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One entry of the `results` mapping: either the heir was excluded, or it
/// was assigned a concrete fraction of the estate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", rename_all = "snake_case"))]
pub enum ShareEntry {
    /// The heir was excluded (ḥijāb) by a closer relative; no share assigned.
    Blocked,
    /// The heir's final share, computed exactly.
    Assigned {
        fraction: String,
        percent: f64,
        relation: &'static str,
    },
}

/// The three failure modes the core can report without ever aborting (§7).
/// All three still carry a fully-populated `results`/`reasoning` envelope;
/// this is informational, not an error channel.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Outcome {
    /// The calculation resolved to a classical solution summing to unity.
    Resolved,
    /// The detector found no recognizable relative in the input.
    EmptyHeirList,
    /// Shares were assigned but their sum differs from 1; ʿawl/radd would
    /// be needed to reconcile this and are not implemented (§9c).
    DistributionNotUnity { total: String },
    /// The relative set includes a kind the calculator does not assign a
    /// furūḍ/ʿaṣaba share to (maternal siblings; see DESIGN.md).
    UnsupportedConfiguration { reason: String },
}

/// The full output contract: ordered results, a reserved structured-step
/// slot, and the rendered derivation trace (§6).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InheritanceResult {
    pub decedent_gender: DecedentGender,
    /// Ordered mapping from heir display name to its outcome; order matches
    /// the detector's emission order, which is part of the output contract.
    pub results: Vec<(String, ShareEntry)>,
    /// Structured trace steps, reserved for callers that want to render
    /// their own localization instead of `reasoning`. `TraceStep` carries
    /// `&'static str` label fields that cannot implement `Deserialize`
    /// (no borrowed data is `'static` on the wire), so this slot is
    /// excluded from the wire format rather than given its own derive.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub steps: Vec<TraceStep>,
    /// Human-readable Arabic derivation trace, one line per rule firing.
    pub reasoning: Vec<String>,
    pub outcome: Outcome,
}

const MATERNAL_SIBLING_GAP: &str =
    "الإخوة لأم لا تُحسب لهم فروض في هذا الإصدار (راجع DESIGN.md)";

fn classify_outcome(heirs: &[Heir]) -> Outcome {
    if heirs.is_empty() {
        return Outcome::EmptyHeirList;
    }
    let has_unsupported_maternal_sibling = heirs.iter().any(|h| {
        !h.blocked && matches!(h.kind, Relation::MaternalBrother | Relation::MaternalSister)
    });
    if has_unsupported_maternal_sibling {
        return Outcome::UnsupportedConfiguration {
            reason: MATERNAL_SIBLING_GAP.to_string(),
        };
    }
    let total = calculator::total_share(heirs);
    if total == Rational::ONE {
        Outcome::Resolved
    } else {
        Outcome::DistributionNotUnity {
            total: total.as_fraction_string(),
        }
    }
}

/// Runs the full pipeline — detection, then calculation — over one input
/// string. Total and infallible: every input, however malformed, produces
/// a well-formed [`InheritanceResult`].
pub fn compute_inheritance(text: &str) -> InheritanceResult {
    let (gender, mut heirs) = detector::detect(text);
    let trace = calculator::calculate(&mut heirs);
    let outcome = classify_outcome(&heirs);

    let results = heirs
        .iter()
        .map(|h| {
            let entry = if h.blocked {
                ShareEntry::Blocked
            } else {
                ShareEntry::Assigned {
                    fraction: h.share.as_fraction_string(),
                    percent: h.share.as_percent(),
                    relation: h.kind.tag(),
                }
            };
            (h.display_name.clone(), entry)
        })
        .collect();

    InheritanceResult {
        decedent_gender: gender,
        results,
        steps: trace.structured().to_vec(),
        reasoning: trace.render_all(),
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_reports_empty_heir_list() {
        let result = compute_inheritance("");
        assert_eq!(result.outcome, Outcome::EmptyHeirList);
        assert!(result.results.is_empty());
    }

    #[test]
    fn e1_wife_two_sons_two_daughters_resolves_to_unity() {
        let result = compute_inheritance("توفي رجل عن زوجة وابنين وبنتين");
        assert_eq!(result.outcome, Outcome::Resolved);
        assert_eq!(result.results.len(), 5);
    }

    #[test]
    fn e6_husband_mother_daughter_flags_non_unity() {
        let result = compute_inheritance("توفيت امراة وتركت زوجا وام وبنت");
        match result.outcome {
            Outcome::DistributionNotUnity { total } => assert_eq!(total, "11/12"),
            other => panic!("expected DistributionNotUnity, got {other:?}"),
        }
    }

    #[test]
    fn determinism_across_calls() {
        let input = "توفي رجل عن زوجة وثلاثة ابناء وبنت";
        let first = compute_inheritance(input);
        let second = compute_inheritance(input);
        assert_eq!(first, second);
    }

    #[test]
    fn blocked_heirs_report_as_blocked_not_a_fraction() {
        let result = compute_inheritance("توفي رجل وترك ابا وجدا");
        let grandfather = result
            .results
            .iter()
            .find(|(name, _)| name.contains("جد"))
            .expect("grandfather present");
        assert_eq!(grandfather.1, ShareEntry::Blocked);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn json_round_trip_skips_the_reserved_steps_slot() {
        let result = compute_inheritance("توفي رجل عن زوجة وابنين وبنتين");
        assert!(!result.steps.is_empty());
        let json = serde_json::to_string(&result).expect("serializes under the default feature");
        assert!(!json.contains("\"steps\""));
        let back: InheritanceResult = serde_json::from_str(&json).expect("deserializes back");
        assert!(back.steps.is_empty());
        assert_eq!(back.decedent_gender, result.decedent_gender);
        assert_eq!(back.results, result.results);
    }
}
