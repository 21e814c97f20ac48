use crate::algo::{ForceOptions, LayoutOptions};
use crate::error::Result;
use crate::graph::{Graph, LayoutResult};
use narwhal_core::Point;
use narwhal_core::geom::{Vector, vector};

pub fn layout(graph: &Graph, opts: &LayoutOptions, force: &ForceOptions) -> Result<LayoutResult> {
    graph.validate()?;

    let mut sim = ForceSim::from_graph(graph);
    sim.run(opts, force);
    Ok(LayoutResult::from_nodes(&graph.nodes, |i| sim.pos[i]))
}

#[derive(Debug, Clone)]
struct ForceSim {
    pos: Vec<Point>,
    vel: Vec<Vector>,
    edges: Vec<(usize, usize)>,
}

impl ForceSim {
    fn from_graph(graph: &Graph) -> Self {
        Self {
            pos: graph.nodes.iter().map(|n| n.center()).collect(),
            vel: vec![vector(0.0, 0.0); graph.nodes.len()],
            edges: graph.edge_indices(),
        }
    }

    fn run(&mut self, opts: &LayoutOptions, force: &ForceOptions) {
        for _ in 0..force.iterations {
            self.step(opts, force);
        }
    }

    fn step(&mut self, opts: &LayoutOptions, force: &ForceOptions) {
        let n = self.pos.len();

        for i in 0..n {
            for j in (i + 1)..n {
                let (dir, dist) = direction(self.pos[i], self.pos[j]);
                let f = dir * (force.repulsion / (dist * dist));
                self.vel[i] -= f;
                self.vel[j] += f;
            }
        }

        for &(a, b) in &self.edges {
            let d = self.pos[a].delta_to(self.pos[b]);
            let dist = match d.length() {
                l if l > 0.0 => l,
                _ => 1.0,
            };
            let f = d / dist * (dist * force.attraction);
            self.vel[a] += f;
            self.vel[b] -= f;
        }

        for (p, v) in self.pos.iter_mut().zip(self.vel.iter_mut()) {
            *p = opts.clamp(p.offset(*v));
            *v *= force.damping;
        }
    }
}

/// Unit vector from `a` to `b` and their distance. Coincident points repel along +x at
/// distance 1 so stacked actors still separate.
fn direction(a: Point, b: Point) -> (Vector, f64) {
    let d = a.delta_to(b);
    let dist = d.length();
    if dist > 0.0 {
        (d / dist, dist)
    } else {
        (vector(1.0, 0.0), 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Edge, Node};

    fn node(id: &str, x: f64, y: f64) -> Node {
        Node {
            id: id.to_string(),
            x,
            y,
            width: 90.0,
            height: 70.0,
        }
    }

    #[test]
    fn coincident_actors_separate() {
        let graph = Graph {
            nodes: vec![node("a", 800.0, 600.0), node("b", 800.0, 600.0)],
            edges: Vec::new(),
        };
        let out = layout(&graph, &LayoutOptions::default(), &ForceOptions::default()).unwrap();
        let a = out.positions["a"];
        let b = out.positions["b"];
        assert!(a.distance_to(b) > 100.0, "{a:?} {b:?}");
    }

    #[test]
    fn self_loops_do_not_move_anything() {
        let graph = Graph {
            nodes: vec![node("a", 700.0, 500.0)],
            edges: vec![Edge {
                id: "0.0.0".to_string(),
                source: "a".to_string(),
                target: "a".to_string(),
            }],
        };
        let out = layout(&graph, &LayoutOptions::default(), &ForceOptions::default()).unwrap();
        assert_eq!(out.positions["a"], Point::new(700.0, 500.0));
    }
}
