//! Line-oriented domain story compiler.
//!
//! `classify` sorts each line into a [`LineKind`], `matcher` resolves actor names at either end
//! of a step, `step` owns the step triple grammar and `story` drives the single top-to-bottom
//! pass that builds the domain model.

mod classify;
mod lexer;
mod matcher;
mod step;
mod story;

pub use classify::{LineKind, classify_line, mentions_any_actor, parse_actor_decl};
pub use matcher::{ActorNameMatcher, NameMatch};
pub use step::{MSG_EMPTY_STEP, MSG_END_NOT_FOUND, MSG_START_NOT_FOUND, parse_step};
pub use story::parse_story;
