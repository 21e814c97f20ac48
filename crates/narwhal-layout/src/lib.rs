#![forbid(unsafe_code)]

//! Headless actor layout, edge routing and viewport fitting for domain stories.
//!
//! The algorithms here are pure geometry over a [`Graph`] snapshot; [`apply_layout`] is the
//! convenience that runs one against a [`WorkingGraph`] and writes the positions back.

pub mod algo;
pub mod error;
pub mod graph;
pub mod model;
pub mod placement;
pub mod route;
pub mod viewport;

pub use algo::{Algorithm, ForceOptions, LayoutOptions};
pub use error::{Error, Result};
pub use graph::{Edge, Graph, LayoutResult, Node};
pub use model::Bounds;
pub use placement::place_unplaced;
pub use route::{RouteOptions, RoutedEdge, route_edges};
pub use viewport::{FitOptions, Viewport};

use narwhal_core::{ControlPoints, Size, WorkingGraph};

/// Headless layout entry point.
pub fn layout(graph: &Graph, algorithm: &Algorithm, opts: &LayoutOptions) -> Result<LayoutResult> {
    match algorithm {
        Algorithm::Radial => algo::radial::layout(graph, opts),
        Algorithm::Grid => algo::grid::layout(graph, opts),
        Algorithm::Flow => algo::flow::layout(graph, opts),
        Algorithm::Force(force) => algo::force::layout(graph, opts, force),
    }
}

/// Runs `algorithm` over every working actor and writes the new positions back.
///
/// Unplaced actors are seeded first. Every stored control point is dropped, since routing
/// geometry computed for the old positions no longer fits. A graph without actors is left
/// untouched.
pub fn apply_layout(
    graph: &mut WorkingGraph,
    control_points: &mut ControlPoints,
    algorithm: &Algorithm,
    opts: &LayoutOptions,
    fallback_size: Size,
) -> Result<()> {
    if graph.actors.is_empty() {
        return Ok(());
    }

    let start = std::time::Instant::now();
    place_unplaced(graph, opts);
    let snapshot = Graph::from_working(graph, fallback_size);
    let result = layout(&snapshot, algorithm, opts)?;

    for (key, at) in result.positions {
        if let Some(actor) = graph.actors.get_mut(&key) {
            actor.position = Some(at);
        }
    }
    control_points.clear();

    tracing::debug!(
        algorithm = algorithm.name(),
        actors = snapshot.nodes.len(),
        edges = snapshot.edges.len(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "applied layout"
    );
    Ok(())
}
