use crate::algo::LayoutOptions;
use crate::error::Result;
use crate::graph::{Graph, LayoutResult};
use narwhal_core::Point;

/// `ceil(sqrt(n))` columns, filled row by row in node order; cells split the padded canvas.
pub fn layout(graph: &Graph, opts: &LayoutOptions) -> Result<LayoutResult> {
    graph.validate()?;

    let n = graph.nodes.len();
    if n == 0 {
        return Ok(LayoutResult::default());
    }
    let cols = (n as f64).sqrt().ceil() as usize;
    let rows = n.div_ceil(cols);
    let inner = opts.inner();
    let cell_w = inner.width / cols as f64;
    let cell_h = inner.height / rows as f64;

    Ok(LayoutResult::from_nodes(&graph.nodes, |i| {
        let (row, col) = (i / cols, i % cols);
        Point::new(
            opts.padding + col as f64 * cell_w + cell_w / 2.0,
            opts.padding + row as f64 * cell_h + cell_h / 2.0,
        )
    }))
}
