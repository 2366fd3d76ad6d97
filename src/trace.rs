//! Derivation trace: structured rule-firing records plus their rendering
//! to the human-readable Arabic strings the output contract exposes.
//!
//! Mirrors `legalis_core::explanation`'s separation of structured content
//! (here [`TraceStep`]) from a render step ([`TraceStep::render`]), so the
//! pass logic can be tested against structured data without depending on
//! the exact wording of the rendered strings.

/// One rule firing, recorded by a calculator pass.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceStep {
    /// No heir was excluded during the ḥijāb pass.
    NoExclusion,
    /// `blocked` was excluded by `blocker` under `rule`.
    Excluded {
        blocked: String,
        blocker: String,
        rule: &'static str,
    },
    /// One of the two ʿUmariyyatān configurations fired.
    Umariyya { spouse_label: &'static str },
    /// A fard (prescribed fraction) was assigned, optionally citing a verse.
    FardAssigned {
        heir: String,
        fraction: String,
        verse: Option<&'static str>,
    },
    /// The residue was computed before ʿaṣaba distribution.
    ResidueComputed { fraction: String },
    /// The residue was distributed among an ʿaṣaba group.
    AsabaDistributed { group: &'static str, heirs: Vec<String> },
    /// No heir could absorb a non-zero residue.
    ResidueUnabsorbed { fraction: String },
    /// The final distribution does not sum to unity.
    DistributionNotUnity { total: String },
}

impl TraceStep {
    /// Renders this step into the Arabic-language line the output contract
    /// expects in `reasoning`. Emoji markers are cosmetic, as §6 notes.
    pub fn render(&self) -> String {
        match self {
            TraceStep::NoExclusion => "✅ لا يوجد حجب في هذه الحالة".to_string(),
            TraceStep::Excluded {
                blocked,
                blocker,
                rule,
            } => format!("🚫 {blocked} محجوب بسبب وجود {blocker} ({rule})"),
            TraceStep::Umariyya { spouse_label } => {
                format!("⭐ حالة عمرية: الأم تأخذ ثلث الباقي بعد نصيب {spouse_label}")
            }
            TraceStep::FardAssigned {
                heir,
                fraction,
                verse,
            } => match verse {
                Some(v) => format!("📖 {heir}: فرضه {fraction} ({v})"),
                None => format!("📖 {heir}: فرضه {fraction}"),
            },
            TraceStep::ResidueComputed { fraction } => {
                format!("➗ الباقي بعد الفروض: {fraction}")
            }
            TraceStep::AsabaDistributed { group, heirs } => {
                format!("👥 توزيع الباقي بالتعصيب على {group}: {}", heirs.join("، "))
            }
            TraceStep::ResidueUnabsorbed { fraction } => {
                format!("⚠️ تبقى {fraction} من التركة بلا وارث يستحقها")
            }
            TraceStep::DistributionNotUnity { total } => {
                format!("⚠️ مجموع الأنصبة {total} ولا يساوي الواحد الصحيح (لم يُطبَّق الرد أو العول)")
            }
        }
    }
}

/// An append-only ordered buffer of [`TraceStep`]s, built during one
/// `calculate` call and rendered to strings only at the edge.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    steps: Vec<TraceStep>,
}

impl Trace {
    pub fn new() -> Self {
        Trace { steps: Vec::new() }
    }

    pub fn push(&mut self, step: TraceStep) {
        self.steps.push(step);
    }

    pub fn structured(&self) -> &[TraceStep] {
        &self.steps
    }

    /// Renders every step, in order, to the `reasoning` sequence.
    pub fn render_all(&self) -> Vec<String> {
        self.steps.iter().map(TraceStep::render).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_in_append_order() {
        let mut trace = Trace::new();
        trace.push(TraceStep::NoExclusion);
        trace.push(TraceStep::FardAssigned {
            heir: "الزوجة".to_string(),
            fraction: "1/4".to_string(),
            verse: Some("النساء 12"),
        });
        let rendered = trace.render_all();
        assert_eq!(rendered.len(), 2);
        assert!(rendered[0].contains("لا يوجد حجب"));
        assert!(rendered[1].contains("1/4"));
    }

    #[test]
    fn fard_without_verse_omits_citation() {
        let step = TraceStep::FardAssigned {
            heir: "الأخ".to_string(),
            fraction: "3/8".to_string(),
            verse: None,
        };
        assert!(!step.render().contains("("));
    }
}
