//! View compositing: merges the visible domains into one working graph of actors and flows.

use crate::geom::{Point, Size};
use crate::model::{ActorKind, Domain, Step};
use crate::view::View;
use crate::{Error, Result};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Box size assumed for actors nobody has measured yet.
pub const DEFAULT_ACTOR_SIZE: Size = Size::new(90.0, 70.0);

/// Stable identity of a step: domain index, flow index within the domain, step index within
/// the flow. Survives view switches because domain indices do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StepKey {
    pub domain: usize,
    pub flow: usize,
    pub step: usize,
}

/// Side table of sticky per-step curve control points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlPoints(FxHashMap<StepKey, Point>);

impl ControlPoints {
    pub fn get(&self, key: StepKey) -> Option<Point> {
        self.0.get(&key).copied()
    }

    /// Stores a control point, replacing any previous one (manual drag).
    pub fn set(&mut self, key: StepKey, point: Point) {
        self.0.insert(key, point);
    }

    /// Returns the stored control point, computing and storing it on first use.
    pub fn get_or_insert_with(&mut self, key: StepKey, compute: impl FnOnce() -> Point) -> Point {
        *self.0.entry(key).or_insert_with(compute)
    }

    pub fn remove(&mut self, key: StepKey) -> Option<Point> {
        self.0.remove(&key)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingActor {
    pub key: String,
    pub display_name: String,
    pub icon: String,
    pub kind: ActorKind,
    pub annotation: Option<String>,
    /// `None` in the merged view, where an actor belongs to no single domain.
    pub domain_index: Option<usize>,
    /// `None` until placed.
    pub position: Option<Point>,
    /// Last positive measurement reported by the size collaborator.
    pub measured: Option<Size>,
}

impl WorkingActor {
    pub fn is_placed(&self) -> bool {
        self.position.is_some()
    }

    pub fn box_size(&self, fallback: Size) -> Size {
        self.measured.unwrap_or(fallback)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingFlow {
    pub domain_index: usize,
    pub domain_title: String,
    pub domain_color: String,
    /// Index of the flow inside its domain.
    pub flow_index: usize,
    pub number: usize,
    pub title: String,
    pub steps: Vec<Step>,
}

/// A step resolved against the current working actors. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingEdge {
    pub step: StepKey,
    pub from: String,
    pub to: String,
    /// Position of the owning flow among the visible flows.
    pub flow_ordinal: usize,
    pub index_in_flow: usize,
    pub flow_len: usize,
}

/// Output of [`compose`].
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub graph: WorkingGraph,
    /// Keys of actors that existed before and are gone now; callers release whatever they
    /// attached to them.
    pub released: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkingGraph {
    pub view: View,
    pub actors: IndexMap<String, WorkingActor>,
    pub flows: Vec<WorkingFlow>,
}

/// Builds the working graph for `view`, carrying positions and measurements over from `prior`
/// for every actor key that survives.
///
/// Actors are keyed by name in both view kinds; in the merged view the first declaration seen
/// wins for icon and annotation. Flows are rebuilt from scratch.
pub fn compose(domains: &[Domain], view: View, prior: Option<&WorkingGraph>) -> Composition {
    let view = view.clamp(domains.len());
    let visible = view.visible_indices(domains.len());

    let mut actors: IndexMap<String, WorkingActor> = IndexMap::new();
    for domain_index in visible.clone() {
        for decl in &domains[domain_index].participants {
            if actors.contains_key(&decl.name) {
                continue;
            }
            actors.insert(
                decl.name.clone(),
                WorkingActor {
                    key: decl.name.clone(),
                    display_name: decl.name.clone(),
                    icon: decl.icon.clone(),
                    kind: decl.kind(),
                    annotation: decl.annotation.clone(),
                    domain_index: (!view.is_all()).then_some(domain_index),
                    position: None,
                    measured: None,
                },
            );
        }
    }

    let mut released = Vec::new();
    if let Some(prior) = prior {
        for (key, old) in &prior.actors {
            match actors.get_mut(key) {
                Some(actor) => {
                    actor.position = old.position;
                    actor.measured = old.measured;
                }
                None => released.push(key.clone()),
            }
        }
    }

    let mut flows = Vec::new();
    for domain_index in visible {
        let domain = &domains[domain_index];
        for (flow_index, flow) in domain.flows.iter().enumerate() {
            flows.push(WorkingFlow {
                domain_index,
                domain_title: domain.title.clone(),
                domain_color: domain.color.clone(),
                flow_index,
                number: flow.number,
                title: flow.title.clone(),
                steps: flow.steps.clone(),
            });
        }
    }

    tracing::debug!(
        view = %view,
        actors = actors.len(),
        flows = flows.len(),
        released = released.len(),
        "composed view"
    );

    Composition {
        graph: WorkingGraph {
            view,
            actors,
            flows,
        },
        released,
    }
}

impl WorkingGraph {
    pub fn actor(&self, key: &str) -> Option<&WorkingActor> {
        self.actors.get(key)
    }

    /// Drag entry point: overwrites an actor's logical position.
    pub fn move_actor(&mut self, key: &str, to: Point) -> Result<()> {
        let actor = self.actors.get_mut(key).ok_or_else(|| Error::UnknownActor {
            key: key.to_string(),
        })?;
        actor.position = Some(to);
        Ok(())
    }

    /// Size collaborator entry point. A measurement with a non-positive side (a hidden box)
    /// keeps the previous value. Returns whether the cache changed.
    pub fn record_size(&mut self, key: &str, width: f64, height: f64) -> Result<bool> {
        let actor = self.actors.get_mut(key).ok_or_else(|| Error::UnknownActor {
            key: key.to_string(),
        })?;
        if !(width > 0.0 && height > 0.0) {
            return Ok(false);
        }
        actor.measured = Some(Size::new(width, height));
        Ok(true)
    }

    pub fn unplaced_keys(&self) -> Vec<String> {
        self.actors
            .values()
            .filter(|a| !a.is_placed())
            .map(|a| a.key.clone())
            .collect()
    }

    pub fn step_count(&self) -> usize {
        self.flows.iter().map(|f| f.steps.len()).sum()
    }

    pub fn step(&self, key: StepKey) -> Option<&Step> {
        self.flows
            .iter()
            .find(|f| f.domain_index == key.domain && f.flow_index == key.flow)?
            .steps
            .get(key.step)
    }

    fn resolve_actor(&self, name: &str, flow: &WorkingFlow) -> Option<&WorkingActor> {
        self.actors
            .get(name)
            .filter(|a| self.view.is_all() || a.domain_index == Some(flow.domain_index))
    }

    /// Resolves every visible step against the working actors. Steps whose endpoints are not
    /// present in this view are skipped.
    pub fn edges(&self) -> Vec<WorkingEdge> {
        let mut out = Vec::with_capacity(self.step_count());
        for (flow_ordinal, flow) in self.flows.iter().enumerate() {
            for (index_in_flow, step) in flow.steps.iter().enumerate() {
                let (Some(from), Some(to)) = (
                    self.resolve_actor(&step.from, flow),
                    self.resolve_actor(&step.to, flow),
                ) else {
                    continue;
                };
                out.push(WorkingEdge {
                    step: StepKey {
                        domain: flow.domain_index,
                        flow: flow.flow_index,
                        step: index_in_flow,
                    },
                    from: from.key.clone(),
                    to: to.key.clone(),
                    flow_ordinal,
                    index_in_flow,
                    flow_len: flow.steps.len(),
                });
            }
        }
        out
    }
}
