#![forbid(unsafe_code)]

//! `narwhal` turns short domain-story texts into positioned actor/flow diagrams.
//!
//! The parser, model and view compositor come from `narwhal-core` and are re-exported at the
//! crate root.
//!
//! # Features
//!
//! - `layout` (default): layout algorithms, edge routing and the [`Workspace`] editing session

pub use narwhal_core::*;

#[cfg(feature = "layout")]
pub mod layout {
    pub use narwhal_layout::{
        Algorithm, Bounds, FitOptions, ForceOptions, LayoutOptions, RouteOptions, RoutedEdge,
        Viewport, apply_layout, place_unplaced, route_edges,
    };
}

#[cfg(feature = "layout")]
mod workspace;

#[cfg(feature = "layout")]
pub use workspace::{Workspace, WorkspaceError};
