use crate::algo::LayoutOptions;
use crate::algo::radial::ring;
use narwhal_core::WorkingGraph;

/// Seeds every unplaced actor on a circle of radius `seed_radius_factor × min(cx, cy)` around
/// the canvas center, in actor order, first one at the top. Placed actors are left alone.
///
/// Returns the number of actors placed.
pub fn place_unplaced(graph: &mut WorkingGraph, opts: &LayoutOptions) -> usize {
    let unplaced = graph.unplaced_keys();
    if unplaced.is_empty() {
        return 0;
    }

    let center = opts.center();
    let radius = center.x.min(center.y) * opts.seed_radius_factor;
    for (key, at) in unplaced.iter().zip(ring(center, radius, unplaced.len())) {
        if let Some(actor) = graph.actors.get_mut(key) {
            actor.position = Some(at);
        }
    }
    tracing::debug!(count = unplaced.len(), "seeded unplaced actors");
    unplaced.len()
}
