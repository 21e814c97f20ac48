#![forbid(unsafe_code)]

//! Domain story parser + semantic model + view compositor (headless).
//!
//! A domain story is a line-oriented text describing actors, numbered flows and the steps in
//! which actors exchange work objects. This crate turns such text into a [`ParsedStory`],
//! never failing: malformed lines become [`ParseError`] values next to whatever could be
//! salvaged. [`compose`] then merges the visible domains into a [`WorkingGraph`] that layout and
//! routing (see `narwhal-layout`) operate on.
//!
//! Everything here is synchronous and performs no I/O.

pub mod compose;
pub mod config;
pub mod error;
pub mod geom;
pub mod model;
pub mod outline;
pub mod parse;
pub mod summary;
pub mod view;

pub use compose::{
    Composition, ControlPoints, DEFAULT_ACTOR_SIZE, StepKey, WorkingActor, WorkingEdge,
    WorkingFlow, WorkingGraph, compose,
};
pub use config::StoryConfig;
pub use error::{Error, Result};
pub use geom::{Point, Size, Vector, point};
pub use model::{
    ActorDecl, ActorKind, Domain, Flow, Note, NoteKind, ParseError, ParsedStory, Step,
};
pub use outline::Outline;
pub use summary::StorySummary;
pub use view::View;

/// Entry point holding the effective configuration.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: StoryConfig,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `overrides` onto the defaults; keys it does not name keep their default value.
    pub fn with_config(mut self, overrides: StoryConfig) -> Self {
        self.config.deep_merge(overrides.as_value());
        self
    }

    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    pub fn parse_story(&self, text: &str) -> ParsedStory {
        let start = std::time::Instant::now();
        let story = parse::parse_story(text, &self.config);
        tracing::debug!(
            domains = story.domains.len(),
            steps = story.step_count(),
            errors = story.errors.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "parsed story"
        );
        story
    }

    /// Parses `text` and composes `view` in one go, for callers without an editing session.
    pub fn compose_story(&self, text: &str, view: View) -> (ParsedStory, WorkingGraph) {
        let story = self.parse_story(text);
        let composition = compose(&story.domains, view, None);
        (story, composition.graph)
    }
}
