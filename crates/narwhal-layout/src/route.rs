//! Quadratic-curve geometry for resolved steps.
//!
//! Each step is drawn as a quadratic Bézier from the edge of the source actor's box, through a
//! control point, to the edge of the target actor's box. Control points are computed once and
//! then kept in [`ControlPoints`] until a layout run or an explicit reset clears them.

use narwhal_core::config::{FLOW_COLORS, cycle_color};
use narwhal_core::geom::vector;
use narwhal_core::{
    ControlPoints, DEFAULT_ACTOR_SIZE, Point, Size, StepKey, StoryConfig, WorkingGraph,
};
use serde::Serialize;

pub const BADGE_T: f64 = 0.15;
pub const LABEL_T: f64 = 0.5;
pub const WORK_OBJECT_T: f64 = 0.8;
pub const ANNOTATION_T: f64 = 0.65;
pub const ANNOTATION_ALONE_T: f64 = 0.75;

#[derive(Debug, Clone, PartialEq)]
pub struct RouteOptions {
    /// Perpendicular distance between neighbouring steps of one flow.
    pub fan_spacing: f64,
    /// Screen-space gap kept between an arrow tip and the actor box.
    pub edge_clearance: f64,
    /// Box size of actors without a measurement.
    pub default_size: Size,
    /// Current viewport zoom. Actor boxes have a fixed screen size, so their logical extent
    /// shrinks as the zoom grows.
    pub zoom: f64,
    pub flow_colors: Vec<String>,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            fan_spacing: 50.0,
            edge_clearance: 6.0,
            default_size: DEFAULT_ACTOR_SIZE,
            zoom: 1.0,
            flow_colors: FLOW_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl RouteOptions {
    pub fn from_config(config: &StoryConfig) -> Self {
        let d = Self::default();
        Self {
            fan_spacing: config.f64_or("routing.fanSpacing", d.fan_spacing),
            edge_clearance: config.f64_or("actor.edgeClearance", d.edge_clearance),
            default_size: Size::new(
                config.f64_or("actor.defaultWidth", d.default_size.width),
                config.f64_or("actor.defaultHeight", d.default_size.height),
            ),
            zoom: d.zoom,
            flow_colors: config.get_str_list("palette.flows").unwrap_or(d.flow_colors),
        }
    }

    pub fn with_zoom(mut self, zoom: f64) -> Self {
        self.zoom = zoom;
        self
    }

    /// Logical half extent used for clipping against a box of `size` screen pixels.
    pub fn half_extent(&self, size: Size) -> Size {
        let zoom = if self.zoom > 0.0 { self.zoom } else { 1.0 };
        Size::new(
            (size.width / 2.0 + self.edge_clearance) / zoom,
            (size.height / 2.0 + self.edge_clearance) / zoom,
        )
    }

    /// Colour of the visible flow at `ordinal`, cycling through `flow_colors`.
    pub fn flow_color(&self, ordinal: usize) -> String {
        cycle_color(&self.flow_colors, ordinal, FLOW_COLORS)
    }
}

/// Midpoint of `from → to`, pushed perpendicular to the line by
/// `(index − (len − 1) / 2) × spacing` so the steps of one flow fan out symmetrically.
pub fn default_control_point(
    from: Point,
    to: Point,
    index_in_flow: usize,
    flow_len: usize,
    spacing: f64,
) -> Point {
    let d = from.delta_to(to);
    let len = match d.length() {
        l if l > 0.0 => l,
        _ => 1.0,
    };
    let offset = (index_in_flow as f64 - (flow_len as f64 - 1.0) / 2.0) * spacing;
    from.midpoint(to)
        .offset(vector(-d.y / len, d.x / len) * offset)
}

/// Point where the ray from `center` towards `toward` leaves the box of half extent `half`.
pub fn clip_to_box(center: Point, half: Size, toward: Point) -> Point {
    let d = center.delta_to(toward);
    if d.x == 0.0 && d.y == 0.0 {
        return center;
    }
    let ax = if d.x == 0.0 { 0.001 } else { d.x.abs() };
    let ay = if d.y == 0.0 { 0.001 } else { d.y.abs() };
    let scale = (half.width / ax).min(half.height / ay);
    center.offset(d * scale)
}

pub fn bezier_point(t: f64, p0: Point, p1: Point, p2: Point) -> Point {
    let mt = 1.0 - t;
    Point::new(
        mt * mt * p0.x + 2.0 * mt * t * p1.x + t * t * p2.x,
        mt * mt * p0.y + 2.0 * mt * t * p1.y + t * t * p2.y,
    )
}

/// Render-ready geometry and labels of one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutedEdge {
    pub step: StepKey,
    pub from: String,
    pub to: String,
    pub action: String,
    pub work_object: Option<String>,
    pub annotation: Option<String>,
    /// `"<flow number>.<step number>"`.
    pub badge_label: String,
    pub color: String,
    pub start: Point,
    pub control: Point,
    pub end: Point,
    pub badge: Point,
    pub label_anchor: Point,
    pub work_object_anchor: Option<Point>,
    pub annotation_anchor: Option<Point>,
}

/// Routes every resolved step whose actors are both placed.
///
/// Missing control points are computed and stored; stored ones (including manually dragged
/// ones) are used as they are.
pub fn route_edges(
    graph: &WorkingGraph,
    control_points: &mut ControlPoints,
    opts: &RouteOptions,
) -> Vec<RoutedEdge> {
    let mut out = Vec::new();
    for edge in graph.edges() {
        let (Some(from), Some(to)) = (graph.actor(&edge.from), graph.actor(&edge.to)) else {
            continue;
        };
        let (Some(from_at), Some(to_at)) = (from.position, to.position) else {
            tracing::trace!(from = %edge.from, to = %edge.to, "skipping step with unplaced actor");
            continue;
        };
        let flow = &graph.flows[edge.flow_ordinal];
        let step = &flow.steps[edge.index_in_flow];

        let control = control_points.get_or_insert_with(edge.step, || {
            let c = default_control_point(
                from_at,
                to_at,
                edge.index_in_flow,
                edge.flow_len,
                opts.fan_spacing,
            );
            tracing::trace!(step = ?edge.step, x = c.x, y = c.y, "computed control point");
            c
        });

        let start = clip_to_box(
            from_at,
            opts.half_extent(from.box_size(opts.default_size)),
            control,
        );
        let end = clip_to_box(
            to_at,
            opts.half_extent(to.box_size(opts.default_size)),
            control,
        );
        let at = |t: f64| bezier_point(t, start, control, end);
        let annotation_t = if step.work_object.is_some() {
            ANNOTATION_T
        } else {
            ANNOTATION_ALONE_T
        };

        out.push(RoutedEdge {
            step: edge.step,
            from: edge.from.clone(),
            to: edge.to.clone(),
            action: step.action.clone(),
            work_object: step.work_object.clone(),
            annotation: step.annotation.clone(),
            badge_label: format!("{}.{}", flow.number, edge.index_in_flow + 1),
            color: opts.flow_color(edge.flow_ordinal),
            start,
            control,
            end,
            badge: at(BADGE_T),
            label_anchor: at(LABEL_T),
            work_object_anchor: step.work_object.as_ref().map(|_| at(WORK_OBJECT_T)),
            annotation_anchor: step.annotation.as_ref().map(|_| at(annotation_t)),
        });
    }
    out
}
