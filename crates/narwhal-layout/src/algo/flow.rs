use crate::algo::LayoutOptions;
use crate::error::Result;
use crate::graph::{Graph, LayoutResult};
use narwhal_core::Point;
use std::collections::VecDeque;

/// Level per node plus the order nodes were assigned in (roots, then BFS discovery, then the
/// unreached ones).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Levels {
    pub level: Vec<usize>,
    pub order: Vec<usize>,
}

impl Levels {
    pub fn count(&self) -> usize {
        self.level.iter().max().map_or(0, |m| m + 1)
    }

    /// Node indices per level, each in assignment order.
    pub fn columns(&self) -> Vec<Vec<usize>> {
        let mut cols = vec![Vec::new(); self.count()];
        for &i in &self.order {
            cols[self.level[i]].push(i);
        }
        cols
    }
}

/// Breadth-first levels over `edges` (node index pairs).
///
/// Roots are the nodes without incoming edges; when there are none (every node sits on a cycle)
/// the first node is the only root. Nodes still unreached afterwards each get their own new
/// level past the deepest one, in node order.
pub fn assign_levels(n: usize, edges: &[(usize, usize)]) -> Levels {
    let mut outgoing = vec![Vec::new(); n];
    let mut has_incoming = vec![false; n];
    for &(from, to) in edges {
        outgoing[from].push(to);
        has_incoming[to] = true;
    }

    let mut roots = (0..n).filter(|&i| !has_incoming[i]).collect::<Vec<_>>();
    if roots.is_empty() && n > 0 {
        roots.push(0);
    }

    let mut level: Vec<Option<usize>> = vec![None; n];
    let mut order = Vec::with_capacity(n);
    let mut queue = VecDeque::new();
    for &r in &roots {
        level[r] = Some(0);
        order.push(r);
        queue.push_back(r);
    }
    while let Some(cur) = queue.pop_front() {
        let next_level = level[cur].unwrap_or(0) + 1;
        for &to in &outgoing[cur] {
            if level[to].is_none() {
                level[to] = Some(next_level);
                order.push(to);
                queue.push_back(to);
            }
        }
    }

    let mut next_free = level.iter().flatten().max().map_or(0, |m| m + 1);
    for i in 0..n {
        if level[i].is_none() {
            level[i] = Some(next_free);
            order.push(i);
            next_free += 1;
        }
    }

    Levels {
        level: level.into_iter().map(|l| l.unwrap_or(0)).collect(),
        order,
    }
}

/// Columns left to right by level; each column spreads its nodes evenly top to bottom.
pub fn layout(graph: &Graph, opts: &LayoutOptions) -> Result<LayoutResult> {
    graph.validate()?;

    let levels = assign_levels(graph.nodes.len(), &graph.edge_indices());
    let columns = levels.columns();
    let inner = opts.inner();
    let level_w = inner.width / columns.len().max(1) as f64;

    let mut placed = vec![opts.center(); graph.nodes.len()];
    for (lvl, column) in columns.iter().enumerate() {
        let level_h = inner.height / column.len() as f64;
        for (row, &node) in column.iter().enumerate() {
            placed[node] = Point::new(
                opts.padding + lvl as f64 * level_w + level_w / 2.0,
                opts.padding + row as f64 * level_h + level_h / 2.0,
            );
        }
    }

    tracing::trace!(levels = columns.len(), "flow levels assigned");
    Ok(LayoutResult::from_nodes(&graph.nodes, |i| placed[i]))
}
