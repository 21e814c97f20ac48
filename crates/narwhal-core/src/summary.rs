use crate::compose::WorkingGraph;
use crate::model::{ParseError, ParsedStory};
use std::fmt;

/// One-line validation status of an editing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorySummary {
    /// The source text is blank.
    Empty,
    Clean {
        domains: usize,
        actors: usize,
        steps: usize,
    },
    Failing {
        first: ParseError,
        count: usize,
    },
}

impl StorySummary {
    /// Actor and step counts come from `graph`, i.e. the current view.
    pub fn new(source: &str, story: &ParsedStory, graph: &WorkingGraph) -> Self {
        if source.trim().is_empty() {
            return Self::Empty;
        }
        match story.errors.first() {
            Some(first) => Self::Failing {
                first: first.clone(),
                count: story.errors.len(),
            },
            None => Self::Clean {
                domains: story.domains.len(),
                actors: graph.actors.len(),
                steps: graph.step_count(),
            },
        }
    }

    pub fn error_count(&self) -> usize {
        match self {
            Self::Failing { count, .. } => *count,
            _ => 0,
        }
    }

    pub fn is_failing(&self) -> bool {
        matches!(self, Self::Failing { .. })
    }
}

impl fmt::Display for StorySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Clean {
                domains,
                actors,
                steps,
            } => {
                let plural = if *domains == 1 { "" } else { "s" };
                write!(f, "{domains} domain{plural}, {actors} actors, {steps} steps")
            }
            Self::Failing { first, count } => {
                let plural = if *count == 1 { "" } else { "s" };
                write!(
                    f,
                    "Line {}: {} {} ({count} error{plural})",
                    first.line, first.msg, first.hint
                )
            }
        }
    }
}
