//! The Share Calculator: ḥijāb exclusion, ʿUmariyyatān special cases, furūḍ
//! fixed-fraction assignment, and ʿaṣaba residue distribution.
//!
//! Each pass mutates the `blocked`/`share` fields of the heir list it is
//! given and appends structured [`TraceStep`]s to a [`Trace`] as a
//! byproduct, mirroring the way `legalis_core::explanation` keeps rule
//! firing and rendering separate.

use crate::heir::{Heir, Relation};
use crate::rational::Rational;
use crate::trace::{Trace, TraceStep};

fn has_kind(heirs: &[Heir], kind: Relation) -> bool {
    heirs.iter().any(|h| h.kind == kind && !h.blocked)
}

fn find_mut(heirs: &mut [Heir], kind: Relation) -> Option<&mut Heir> {
    heirs.iter_mut().find(|h| h.kind == kind)
}

fn label_of(heirs: &[Heir], kind: Relation) -> String {
    heirs
        .iter()
        .find(|h| h.kind == kind)
        .map(|h| h.display_name.clone())
        .unwrap_or_else(|| kind.arabic_label().to_string())
}

/// Pass 1: exclusion. Grandfather is blocked by father; all siblings are
/// blocked by father, son, or a grandfather standing in for an absent
/// father; paternal siblings are additionally blocked by any full brother.
fn apply_hijab(heirs: &mut [Heir], trace: &mut Trace) {
    let father_present = has_kind(heirs, Relation::Father);
    let mut any_blocked = false;

    if father_present {
        if let Some(gf) = find_mut(heirs, Relation::Grandfather) {
            if !gf.blocked {
                gf.blocked = true;
                let name = gf.display_name.clone();
                trace.push(TraceStep::Excluded {
                    blocked: name,
                    blocker: label_of(heirs, Relation::Father),
                    rule: "الجد محجوب بالأب",
                });
                any_blocked = true;
            }
        }
    }

    let son_present = has_kind(heirs, Relation::Son);
    let grandfather_covers_father = !father_present && has_kind(heirs, Relation::Grandfather);
    let sibling_blocker = if father_present {
        Some((Relation::Father, "الإخوة محجوبون بالأب"))
    } else if son_present {
        Some((Relation::Son, "الإخوة محجوبون بالابن"))
    } else if grandfather_covers_father {
        Some((Relation::Grandfather, "الإخوة محجوبون بالجد عند غياب الأب"))
    } else {
        None
    };

    if let Some((blocker_kind, rule)) = sibling_blocker {
        let blocker_label = label_of(heirs, blocker_kind);
        for h in heirs.iter_mut() {
            if h.kind.is_sibling() && !h.blocked {
                h.blocked = true;
                trace.push(TraceStep::Excluded {
                    blocked: h.display_name.clone(),
                    blocker: blocker_label.clone(),
                    rule,
                });
                any_blocked = true;
            }
        }
    }

    let full_brother_present = has_kind(heirs, Relation::FullBrother);
    if full_brother_present {
        let blocker_label = label_of(heirs, Relation::FullBrother);
        for h in heirs.iter_mut() {
            if h.kind.is_paternal_sibling() && !h.blocked {
                h.blocked = true;
                trace.push(TraceStep::Excluded {
                    blocked: h.display_name.clone(),
                    blocker: blocker_label.clone(),
                    rule: "الإخوة لأب محجوبون بالأخ الشقيق",
                });
                any_blocked = true;
            }
        }
    }

    if !any_blocked {
        trace.push(TraceStep::NoExclusion);
    }
}

/// Pass 2: the two ʿUmariyyatān configurations. Returns `true` if one fired,
/// in which case Pass 3/4 must not run (the three shares already sum to 1).
fn apply_umariyyatan(heirs: &mut [Heir], trace: &mut Trace) -> bool {
    let non_blocked: Vec<Relation> = heirs.iter().filter(|h| !h.blocked).map(|h| h.kind).collect();
    if non_blocked.len() != 3 {
        return false;
    }
    let has = |k: Relation| non_blocked.contains(&k);
    let with_wife = has(Relation::Wife) && has(Relation::Father) && has(Relation::Mother);
    let with_husband = has(Relation::Husband) && has(Relation::Father) && has(Relation::Mother);
    if !with_wife && !with_husband {
        return false;
    }

    let (spouse_kind, spouse_share, mother_share, father_share, spouse_label) = if with_wife {
        (
            Relation::Wife,
            Rational::new(1, 4),
            Rational::new(1, 4),
            Rational::new(1, 2),
            "الزوجة",
        )
    } else {
        (
            Relation::Husband,
            Rational::new(1, 2),
            Rational::new(1, 6),
            Rational::new(1, 3),
            "الزوج",
        )
    };

    if let Some(h) = find_mut(heirs, spouse_kind) {
        h.share = spouse_share;
    }
    if let Some(h) = find_mut(heirs, Relation::Mother) {
        h.share = mother_share;
    }
    if let Some(h) = find_mut(heirs, Relation::Father) {
        h.share = father_share;
    }

    trace.push(TraceStep::Umariyya { spouse_label });
    trace.push(TraceStep::FardAssigned {
        heir: label_of(heirs, spouse_kind),
        fraction: spouse_share.as_fraction_string(),
        verse: Some("النساء 12"),
    });
    trace.push(TraceStep::FardAssigned {
        heir: label_of(heirs, Relation::Mother),
        fraction: mother_share.as_fraction_string(),
        verse: Some("النساء 11"),
    });
    trace.push(TraceStep::FardAssigned {
        heir: label_of(heirs, Relation::Father),
        fraction: father_share.as_fraction_string(),
        verse: Some("النساء 11"),
    });
    true
}

/// Pass 3: the fixed furūḍ table. Returns the sum of every share assigned
/// here, which Pass 4 subtracts from unity to find the residue.
fn apply_furud(heirs: &mut [Heir], trace: &mut Trace) -> Rational {
    let mut total = Rational::ZERO;
    let has_children = has_kind(heirs, Relation::Son) || has_kind(heirs, Relation::Daughter);

    if has_kind(heirs, Relation::Wife) {
        let share = if has_children {
            Rational::new(1, 8)
        } else {
            Rational::new(1, 4)
        };
        assign_fard(heirs, trace, Relation::Wife, share, Some("النساء 12"));
        total = total + share;
    }

    if has_kind(heirs, Relation::Husband) {
        let share = if has_children {
            Rational::new(1, 4)
        } else {
            Rational::new(1, 2)
        };
        assign_fard(heirs, trace, Relation::Husband, share, Some("النساء 12"));
        total = total + share;
    }

    if !has_kind(heirs, Relation::Son) {
        let daughter_count = heirs
            .iter()
            .filter(|h| h.kind == Relation::Daughter && !h.blocked)
            .count();
        if daughter_count == 1 {
            let share = Rational::new(1, 2);
            assign_fard(heirs, trace, Relation::Daughter, share, Some("النساء 11"));
            total = total + share;
        } else if daughter_count >= 2 {
            let each = Rational::new(2, 3) / Rational::from_int(daughter_count as i64);
            for h in heirs.iter_mut() {
                if h.kind == Relation::Daughter && !h.blocked {
                    h.share = each;
                }
            }
            trace.push(TraceStep::FardAssigned {
                heir: format!("كل بنت (من {daughter_count})"),
                fraction: each.as_fraction_string(),
                verse: Some("النساء 11"),
            });
            total = total + each * Rational::from_int(daughter_count as i64);
        }
    }

    if has_kind(heirs, Relation::Father) {
        if has_children {
            let share = Rational::new(1, 6);
            assign_fard(heirs, trace, Relation::Father, share, Some("النساء 11"));
            total = total + share;
        }
    } else if has_kind(heirs, Relation::Grandfather) && has_children {
        let share = Rational::new(1, 6);
        assign_fard(heirs, trace, Relation::Grandfather, share, Some("النساء 11"));
        total = total + share;
    }

    if has_kind(heirs, Relation::Mother) {
        let sibling_count = heirs.iter().filter(|h| h.kind.is_sibling()).count();
        let share = if has_children || sibling_count >= 2 {
            Rational::new(1, 6)
        } else {
            Rational::new(1, 3)
        };
        assign_fard(heirs, trace, Relation::Mother, share, Some("النساء 11"));
        total = total + share;
    }

    total
}

fn assign_fard(
    heirs: &mut [Heir],
    trace: &mut Trace,
    kind: Relation,
    share: Rational,
    verse: Option<&'static str>,
) {
    let label = heirs
        .iter()
        .find(|h| h.kind == kind)
        .map(|h| h.display_name.clone())
        .unwrap_or_default();
    if let Some(h) = find_mut(heirs, kind) {
        h.share = share;
    }
    trace.push(TraceStep::FardAssigned {
        heir: label,
        fraction: share.as_fraction_string(),
        verse,
    });
}

/// Pass 4: distribute a positive residue among the first non-empty group in
/// the exclusive ʿaṣaba priority list. At most one group is touched.
fn apply_asaba(heirs: &mut [Heir], trace: &mut Trace, residue: Rational) {
    if !residue.is_positive() {
        return;
    }
    trace.push(TraceStep::ResidueComputed {
        fraction: residue.as_fraction_string(),
    });

    // Group 1: sons plus daughters who received no fard (i.e. a son exists).
    let sons: Vec<usize> = heirs
        .iter()
        .enumerate()
        .filter(|(_, h)| h.kind == Relation::Son && !h.blocked)
        .map(|(i, _)| i)
        .collect();
    if !sons.is_empty() {
        let daughters: Vec<usize> = heirs
            .iter()
            .enumerate()
            .filter(|(_, h)| h.kind == Relation::Daughter && !h.blocked)
            .map(|(i, _)| i)
            .collect();
        distribute_two_to_one(heirs, trace, "الأبناء والبنات", &sons, &daughters, residue);
        return;
    }

    // Group 2: father, augmenting his fard or taking the whole residue.
    if let Some(h) = heirs
        .iter_mut()
        .find(|h| h.kind == Relation::Father && !h.blocked)
    {
        h.share = h.share + residue;
        let name = h.display_name.clone();
        trace.push(TraceStep::AsabaDistributed {
            group: "الأب بالتعصيب",
            heirs: vec![name],
        });
        return;
    }

    // Group 3: grandfather, only reached when the father is absent.
    if let Some(h) = heirs
        .iter_mut()
        .find(|h| h.kind == Relation::Grandfather && !h.blocked)
    {
        h.share = h.share + residue;
        let name = h.display_name.clone();
        trace.push(TraceStep::AsabaDistributed {
            group: "الجد بالتعصيب",
            heirs: vec![name],
        });
        return;
    }

    // Group 4: full brothers plus uncovered full sisters.
    let full_brothers: Vec<usize> = heirs
        .iter()
        .enumerate()
        .filter(|(_, h)| h.kind == Relation::FullBrother && !h.blocked)
        .map(|(i, _)| i)
        .collect();
    let uncovered_full_sisters: Vec<usize> = heirs
        .iter()
        .enumerate()
        .filter(|(_, h)| h.kind == Relation::FullSister && !h.blocked && h.share.is_zero())
        .map(|(i, _)| i)
        .collect();
    if !full_brothers.is_empty() || !uncovered_full_sisters.is_empty() {
        distribute_two_to_one(
            heirs,
            trace,
            "الإخوة والأخوات الأشقاء",
            &full_brothers,
            &uncovered_full_sisters,
            residue,
        );
        return;
    }

    // Group 5: paternal brothers plus uncovered paternal sisters.
    let paternal_brothers: Vec<usize> = heirs
        .iter()
        .enumerate()
        .filter(|(_, h)| h.kind == Relation::PaternalBrother && !h.blocked)
        .map(|(i, _)| i)
        .collect();
    let uncovered_paternal_sisters: Vec<usize> = heirs
        .iter()
        .enumerate()
        .filter(|(_, h)| h.kind == Relation::PaternalSister && !h.blocked && h.share.is_zero())
        .map(|(i, _)| i)
        .collect();
    if !paternal_brothers.is_empty() || !uncovered_paternal_sisters.is_empty() {
        distribute_two_to_one(
            heirs,
            trace,
            "الإخوة والأخوات لأب",
            &paternal_brothers,
            &uncovered_paternal_sisters,
            residue,
        );
        return;
    }

    trace.push(TraceStep::ResidueUnabsorbed {
        fraction: residue.as_fraction_string(),
    });
}

/// Splits `residue` across two index groups at a 2:1 ratio (first group
/// double-weighted), mutating each heir's `share` and appending one
/// [`TraceStep::AsabaDistributed`] naming every participant.
fn distribute_two_to_one(
    heirs: &mut [Heir],
    trace: &mut Trace,
    group: &'static str,
    double_weighted: &[usize],
    single_weighted: &[usize],
    residue: Rational,
) {
    let total_units =
        Rational::from_int(2 * double_weighted.len() as i64 + single_weighted.len() as i64);
    let unit = residue / total_units;
    let mut names = Vec::new();
    for &i in double_weighted {
        heirs[i].share = heirs[i].share + unit * Rational::from_int(2);
        names.push(heirs[i].display_name.clone());
    }
    for &i in single_weighted {
        heirs[i].share = heirs[i].share + unit;
        names.push(heirs[i].display_name.clone());
    }
    trace.push(TraceStep::AsabaDistributed { group, heirs: names });
}

/// Runs all four passes over `heirs` in place, returning the trace produced.
///
/// Mutates `blocked` and `share`; never removes or reorders records, so the
/// detector's emission order survives into the output contract.
pub fn calculate(heirs: &mut [Heir]) -> Trace {
    let mut trace = Trace::new();

    apply_hijab(heirs, &mut trace);

    if apply_umariyyatan(heirs, &mut trace) {
        return trace;
    }

    let furud_total = apply_furud(heirs, &mut trace);
    let residue = Rational::ONE - furud_total;
    apply_asaba(heirs, &mut trace, residue);

    trace
}

/// Sum of every non-blocked heir's share; the orchestrator compares this to
/// unity to decide whether to report "distribution-not-unity" (§7).
pub fn total_share(heirs: &[Heir]) -> Rational {
    heirs
        .iter()
        .filter(|h| !h.blocked)
        .fold(Rational::ZERO, |acc, h| acc + h.share)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heir::Heir;

    fn heir(kind: Relation) -> Heir {
        Heir::new(kind, kind.arabic_label())
    }

    #[test]
    fn grandfather_blocked_by_father() {
        let mut heirs = vec![heir(Relation::Father), heir(Relation::Grandfather)];
        calculate(&mut heirs);
        assert!(heirs[1].blocked);
        assert!(heirs[1].share.is_zero());
    }

    #[test]
    fn siblings_blocked_by_son() {
        let mut heirs = vec![heir(Relation::Son), heir(Relation::FullBrother)];
        calculate(&mut heirs);
        assert!(heirs[1].blocked);
    }

    #[test]
    fn paternal_sibling_blocked_by_full_brother() {
        let mut heirs = vec![heir(Relation::FullBrother), heir(Relation::PaternalSister)];
        calculate(&mut heirs);
        assert!(heirs[1].blocked);
        assert!(!heirs[0].blocked);
    }

    #[test]
    fn umariyya_with_wife() {
        let mut heirs = vec![heir(Relation::Wife), heir(Relation::Father), heir(Relation::Mother)];
        calculate(&mut heirs);
        assert_eq!(heirs[0].share, Rational::new(1, 4));
        assert_eq!(heirs[1].share, Rational::new(1, 2));
        assert_eq!(heirs[2].share, Rational::new(1, 4));
        assert_eq!(total_share(&heirs), Rational::ONE);
    }

    #[test]
    fn umariyya_with_husband() {
        let mut heirs = vec![heir(Relation::Husband), heir(Relation::Father), heir(Relation::Mother)];
        calculate(&mut heirs);
        assert_eq!(heirs[0].share, Rational::new(1, 2));
        assert_eq!(heirs[1].share, Rational::new(1, 3));
        assert_eq!(heirs[2].share, Rational::new(1, 6));
    }

    // E1: wife + two sons + two daughters. Each son takes a double share of
    // the residue against each daughter's single share: 7/24 and 7/48,
    // which sum to unity together with the wife's 1/8.
    #[test]
    fn e1_wife_two_sons_two_daughters() {
        let mut heirs = vec![
            heir(Relation::Wife),
            heir(Relation::Son),
            heir(Relation::Son),
            heir(Relation::Daughter),
            heir(Relation::Daughter),
        ];
        calculate(&mut heirs);
        assert_eq!(heirs[0].share, Rational::new(1, 8));
        assert_eq!(heirs[1].share, Rational::new(7, 24));
        assert_eq!(heirs[2].share, Rational::new(7, 24));
        assert_eq!(heirs[3].share, Rational::new(7, 48));
        assert_eq!(heirs[4].share, Rational::new(7, 48));
        assert_eq!(total_share(&heirs), Rational::ONE);
    }

    // E4: wife + three full brothers.
    #[test]
    fn e4_wife_three_full_brothers() {
        let mut heirs = vec![
            heir(Relation::Wife),
            heir(Relation::FullBrother),
            heir(Relation::FullBrother),
            heir(Relation::FullBrother),
        ];
        calculate(&mut heirs);
        assert_eq!(heirs[0].share, Rational::new(1, 4));
        for b in &heirs[1..] {
            assert_eq!(b.share, Rational::new(1, 4));
        }
        assert_eq!(total_share(&heirs), Rational::ONE);
    }

    // E5: wife + one full brother + one daughter.
    #[test]
    fn e5_wife_brother_daughter() {
        let mut heirs = vec![
            heir(Relation::Wife),
            heir(Relation::FullBrother),
            heir(Relation::Daughter),
        ];
        calculate(&mut heirs);
        assert_eq!(heirs[0].share, Rational::new(1, 8));
        assert_eq!(heirs[2].share, Rational::new(1, 2));
        assert_eq!(heirs[1].share, Rational::new(3, 8));
        assert_eq!(total_share(&heirs), Rational::ONE);
    }

    // E6: husband + mother + one daughter — a known distribution gap (no
    // ʿawl/radd), left unrebalanced on purpose.
    #[test]
    fn e6_husband_mother_daughter_is_not_unity() {
        let mut heirs = vec![
            heir(Relation::Husband),
            heir(Relation::Mother),
            heir(Relation::Daughter),
        ];
        calculate(&mut heirs);
        assert_eq!(heirs[0].share, Rational::new(1, 4));
        assert_eq!(heirs[1].share, Rational::new(1, 6));
        assert_eq!(heirs[2].share, Rational::new(1, 2));
        assert_eq!(total_share(&heirs), Rational::new(11, 12));
    }

    #[test]
    fn blocked_heir_keeps_zero_share_through_every_pass() {
        let mut heirs = vec![
            heir(Relation::Father),
            heir(Relation::Grandfather),
            heir(Relation::Son),
        ];
        calculate(&mut heirs);
        assert!(heirs[1].blocked);
        assert!(heirs[1].share.is_zero());
    }

    #[test]
    fn count_monotonicity_equal_sons_share_equally() {
        let mut heirs = vec![heir(Relation::Father), heir(Relation::Son), heir(Relation::Son)];
        calculate(&mut heirs);
        assert_eq!(heirs[1].share, heirs[2].share);
    }
}
