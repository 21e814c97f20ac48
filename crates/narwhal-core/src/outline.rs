use crate::model::{Domain, Step};
use crate::view::View;
use serde::Serialize;
use std::fmt;

/// Numbered narrative of the visible part of a story.
///
/// `Display` renders it as plain text: a `# Title` line per domain, `n. Title` per flow and one
/// indented `n.m Sentence.` line per step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Outline {
    pub domains: Vec<OutlineDomain>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineDomain {
    pub title: String,
    pub color: String,
    pub flows: Vec<OutlineFlow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineFlow {
    pub number: usize,
    pub title: String,
    pub steps: Vec<OutlineStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutlineStep {
    /// `"<flow>.<step>"`, both 1-based.
    pub number: String,
    pub sentence: String,
}

impl Outline {
    pub fn build(domains: &[Domain], view: View) -> Self {
        let view = view.clamp(domains.len());
        let domains = view
            .visible_indices(domains.len())
            .map(|i| outline_domain(&domains[i]))
            .collect();
        Self { domains }
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

fn outline_domain(domain: &Domain) -> OutlineDomain {
    let mut flows = domain.flows.iter().collect::<Vec<_>>();
    flows.sort_by_key(|f| f.number);
    OutlineDomain {
        title: domain.title.clone(),
        color: domain.color.clone(),
        flows: flows
            .into_iter()
            .map(|flow| OutlineFlow {
                number: flow.number,
                title: flow.title.clone(),
                steps: flow
                    .steps
                    .iter()
                    .enumerate()
                    .map(|(i, step)| OutlineStep {
                        number: format!("{}.{}", flow.number, i + 1),
                        sentence: sentence(step),
                    })
                    .collect(),
            })
            .collect(),
    }
}

/// `From action To[. WorkObject][. Annotation].`
pub fn sentence(step: &Step) -> String {
    let mut out = step.from.clone();
    if !step.action.is_empty() {
        out.push(' ');
        out.push_str(&step.action);
    }
    out.push(' ');
    out.push_str(&step.to);
    for extra in [&step.work_object, &step.annotation].into_iter().flatten() {
        out.push_str(". ");
        out.push_str(extra);
    }
    out.push('.');
    out
}

impl fmt::Display for Outline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, domain) in self.domains.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "# {}", domain.title)?;
            for flow in &domain.flows {
                writeln!(f, "{}. {}", flow.number, flow.title)?;
                for step in &flow.steps {
                    writeln!(f, "  {} {}", step.number, step.sentence)?;
                }
            }
        }
        Ok(())
    }
}
