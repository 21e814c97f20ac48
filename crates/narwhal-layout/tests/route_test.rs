use narwhal_core::{ControlPoints, Engine, Point, Size, StepKey, View, WorkingGraph};
use narwhal_layout::route::{bezier_point, clip_to_box, default_control_point};
use narwhal_layout::{LayoutOptions, RouteOptions, place_unplaced, route_edges};

fn approx_pt(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6
}

#[test]
fn default_control_points_fan_out_symmetrically() {
    let from = Point::new(0.0, 0.0);
    let to = Point::new(100.0, 0.0);
    let cps = (0..3)
        .map(|i| default_control_point(from, to, i, 3, 50.0))
        .collect::<Vec<_>>();
    assert!(approx_pt(cps[0], Point::new(50.0, -50.0)), "{cps:?}");
    assert!(approx_pt(cps[1], Point::new(50.0, 0.0)), "{cps:?}");
    assert!(approx_pt(cps[2], Point::new(50.0, 50.0)), "{cps:?}");

    // Coincident actors fall back to a unit length instead of dividing by zero.
    let same = default_control_point(from, from, 0, 2, 50.0);
    assert!(same.x.is_finite() && same.y.is_finite());
}

#[test]
fn clip_lands_on_the_nearest_box_side() {
    let center = Point::new(0.0, 0.0);
    let half = RouteOptions::default().half_extent(Size::new(90.0, 70.0));
    assert_eq!(half, Size::new(51.0, 41.0));

    assert!(approx_pt(
        clip_to_box(center, half, Point::new(100.0, 0.0)),
        Point::new(51.0, 0.0)
    ));
    assert!(approx_pt(
        clip_to_box(center, half, Point::new(100.0, 100.0)),
        Point::new(41.0, 41.0)
    ));
    assert_eq!(clip_to_box(center, half, center), center);
}

#[test]
fn half_extent_shrinks_with_zoom() {
    let opts = RouteOptions::default().with_zoom(2.0);
    assert_eq!(opts.half_extent(Size::new(90.0, 70.0)), Size::new(25.5, 20.5));
}

#[test]
fn bezier_endpoints_and_midpoint() {
    let (p0, p1, p2) = (
        Point::new(0.0, 0.0),
        Point::new(50.0, 100.0),
        Point::new(100.0, 0.0),
    );
    assert_eq!(bezier_point(0.0, p0, p1, p2), p0);
    assert_eq!(bezier_point(1.0, p0, p1, p2), p2);
    assert!(approx_pt(bezier_point(0.5, p0, p1, p2), Point::new(50.0, 50.0)));
}

const STORY: &str = "\
# Post
@Sender (person)
@Office (settings)
## Send
Sender drops off Office {parcel} \"fragile\"
Sender pays Office \"stamps\"
## Track
Office notifies Sender
";

fn placed_graph() -> WorkingGraph {
    let (_, mut g) = Engine::new().compose_story(STORY, View::All);
    g.move_actor("Sender", Point::new(200.0, 400.0)).unwrap();
    g.move_actor("Office", Point::new(800.0, 400.0)).unwrap();
    g
}

#[test]
fn route_edges_labels_and_colors() {
    let g = placed_graph();
    let mut cps = ControlPoints::default();
    let edges = route_edges(&g, &mut cps, &RouteOptions::default());
    assert_eq!(edges.len(), 3);
    assert_eq!(cps.len(), 3);

    let labels = edges.iter().map(|e| e.badge_label.as_str()).collect::<Vec<_>>();
    assert_eq!(labels, ["1.1", "1.2", "2.1"]);
    assert_eq!(edges[0].color, "#6366f1");
    assert_eq!(edges[2].color, "#ef4444");

    let first = &edges[0];
    assert_eq!(first.work_object.as_deref(), Some("parcel"));
    assert!(first.work_object_anchor.is_some());
    assert!(approx_pt(
        first.annotation_anchor.unwrap(),
        bezier_point(0.65, first.start, first.control, first.end)
    ));
    assert!(approx_pt(
        edges[1].annotation_anchor.unwrap(),
        bezier_point(0.75, edges[1].start, edges[1].control, edges[1].end)
    ));
    assert!(edges[2].work_object_anchor.is_none());
    assert!(edges[2].annotation_anchor.is_none());

    // Two steps between the same pair bend to opposite sides.
    assert!(edges[0].control.y < 400.0 && edges[1].control.y > 400.0);
    // Endpoints sit on the box edges facing the curve.
    assert!(first.start.x > 200.0 && first.end.x < 800.0);
}

#[test]
fn control_points_are_sticky_across_actor_moves() {
    let mut g = placed_graph();
    let mut cps = ControlPoints::default();
    let before = route_edges(&g, &mut cps, &RouteOptions::default());

    g.move_actor("Office", Point::new(900.0, 700.0)).unwrap();
    let after = route_edges(&g, &mut cps, &RouteOptions::default());
    for (b, a) in before.iter().zip(&after) {
        assert_eq!(b.control, a.control);
    }
    assert_ne!(before[0].end, after[0].end);
}

#[test]
fn measured_size_moves_the_clip_point() {
    let mut g = placed_graph();
    let mut cps = ControlPoints::default();
    let opts = RouteOptions::default().with_zoom(2.0);

    // "Office notifies Sender" bends through the midpoint, so the end lands on Sender's right side.
    let before = route_edges(&g, &mut cps, &opts);
    assert!(approx_pt(before[2].end, Point::new(200.0 + 51.0 / 2.0, 400.0)), "{:?}", before[2]);

    assert!(g.record_size("Sender", 200.0, 70.0).unwrap());
    let after = route_edges(&g, &mut cps, &opts);
    assert!(approx_pt(after[2].end, Point::new(200.0 + 106.0 / 2.0, 400.0)), "{:?}", after[2]);
    assert_eq!(before[2].control, after[2].control);
    assert_eq!(before[2].start, after[2].start);
}

#[test]
fn manual_control_point_is_used_verbatim() {
    let g = placed_graph();
    let mut cps = ControlPoints::default();
    let key = StepKey {
        domain: 0,
        flow: 1,
        step: 0,
    };
    cps.set(key, Point::new(123.0, -45.0));
    let edges = route_edges(&g, &mut cps, &RouteOptions::default());
    let tracked = edges.iter().find(|e| e.step == key).unwrap();
    assert_eq!(tracked.control, Point::new(123.0, -45.0));
}

#[test]
fn unplaced_actors_are_not_routed() {
    let (_, mut g) = Engine::new().compose_story(STORY, View::All);
    let mut cps = ControlPoints::default();
    assert!(route_edges(&g, &mut cps, &RouteOptions::default()).is_empty());
    assert!(cps.is_empty());

    place_unplaced(&mut g, &LayoutOptions::default());
    assert_eq!(route_edges(&g, &mut cps, &RouteOptions::default()).len(), 3);
}

#[test]
fn routed_edge_serializes_camel_case() {
    let g = placed_graph();
    let mut cps = ControlPoints::default();
    let edges = route_edges(&g, &mut cps, &RouteOptions::default());
    let v = serde_json::to_value(&edges[0]).unwrap();
    assert_eq!(v["badgeLabel"], "1.1");
    assert_eq!(v["workObject"], "parcel");
    assert_eq!(v["step"]["flow"], 0);
    assert!(v["labelAnchor"]["x"].is_number());
}
