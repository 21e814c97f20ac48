use crate::algo::LayoutOptions;
use crate::error::Result;
use crate::graph::{Graph, LayoutResult};
use narwhal_core::Point;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Spreads `n` points evenly on a circle, the first one at the top (−90°).
pub fn ring(center: Point, radius: f64, n: usize) -> impl Iterator<Item = Point> {
    (0..n).map(move |i| {
        let angle = (i as f64 / n as f64) * TAU - FRAC_PI_2;
        Point::new(
            center.x + angle.cos() * radius,
            center.y + angle.sin() * radius,
        )
    })
}

pub fn layout(graph: &Graph, opts: &LayoutOptions) -> Result<LayoutResult> {
    graph.validate()?;

    let center = opts.center();
    let radius = center.x.min(center.y) - opts.padding;
    let mut points = ring(center, radius, graph.nodes.len());
    Ok(LayoutResult::from_nodes(&graph.nodes, |_| {
        points.next().unwrap_or(center)
    }))
}
