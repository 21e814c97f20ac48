use crate::error::{Error, Result};
use indexmap::IndexMap;
use narwhal_core::{Point, Size, WorkingGraph};
use rustc_hash::FxHashSet;

/// Layout input: actors as boxes, resolved steps as directed edges.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn validate(&self) -> Result<()> {
        let mut node_exists: FxHashSet<&str> = FxHashSet::default();
        for n in &self.nodes {
            node_exists.insert(n.id.as_str());
        }
        for e in &self.edges {
            if !node_exists.contains(e.source.as_str()) || !node_exists.contains(e.target.as_str())
            {
                return Err(Error::MissingEndpoint {
                    edge_id: e.id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Snapshot of a working graph. Unplaced actors start at the origin, so callers normally seed
    /// them first (see [`crate::placement::place_unplaced`]).
    pub fn from_working(graph: &WorkingGraph, fallback_size: Size) -> Self {
        let nodes = graph
            .actors
            .values()
            .map(|a| {
                let at = a.position.unwrap_or_default();
                let size = a.box_size(fallback_size);
                Node {
                    id: a.key.clone(),
                    x: at.x,
                    y: at.y,
                    width: size.width,
                    height: size.height,
                }
            })
            .collect();
        let edges = graph
            .edges()
            .into_iter()
            .map(|e| Edge {
                id: format!("{}.{}.{}", e.step.domain, e.step.flow, e.step.step),
                source: e.from,
                target: e.to,
            })
            .collect();
        Self { nodes, edges }
    }

    pub fn node_index(&self) -> rustc_hash::FxHashMap<&str, usize> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect()
    }

    /// Edges as `(source, target)` node indices, in edge order.
    pub(crate) fn edge_indices(&self) -> Vec<(usize, usize)> {
        let index = self.node_index();
        self.edges
            .iter()
            .filter_map(|e| Some((*index.get(e.source.as_str())?, *index.get(e.target.as_str())?)))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    /// Center.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Node {
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Clone)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutResult {
    /// Actor centers, in node order.
    pub positions: IndexMap<String, Point>,
}

impl LayoutResult {
    pub(crate) fn from_nodes<'a>(
        nodes: impl IntoIterator<Item = &'a Node>,
        mut place: impl FnMut(usize) -> Point,
    ) -> Self {
        let positions = nodes
            .into_iter()
            .enumerate()
            .map(|(i, n)| (n.id.clone(), place(i)))
            .collect();
        Self { positions }
    }
}
