use narwhal_core::geom::vector;
use narwhal_core::{Point, Size};
use narwhal_layout::{Bounds, FitOptions, Viewport};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn fit_without_points_is_none() {
    let none = Viewport::fit(
        Vec::<Point>::new(),
        Size::new(800.0, 600.0),
        &FitOptions::default(),
    );
    assert!(none.is_none());
}

#[test]
fn fit_centers_the_padded_box() {
    let points = [Point::new(100.0, 100.0), Point::new(500.0, 300.0)];
    let view = Size::new(1000.0, 800.0);
    let vp = Viewport::fit(points, view, &FitOptions::default()).unwrap();

    // Box with 100 padding: 600 x 400; available 920 x 720.
    let expected_zoom = (920.0_f64 / 600.0).min(720.0 / 400.0).min(1.5);
    assert!(approx(vp.zoom, expected_zoom));
    let center = vp.to_screen(Point::new(300.0, 200.0));
    assert!(approx(center.x, 500.0) && approx(center.y, 400.0), "{center:?}");
}

#[test]
fn fit_caps_zoom_and_survives_a_single_actor() {
    let vp = Viewport::fit(
        [Point::new(40.0, 40.0)],
        Size::new(2000.0, 2000.0),
        &FitOptions::default(),
    )
    .unwrap();
    assert_eq!(vp.zoom, 1.5);
    assert!(vp.pan.x.is_finite() && vp.pan.y.is_finite());

    let opts = FitOptions {
        logical_padding: 0.0,
        ..FitOptions::default()
    };
    let vp = Viewport::fit(
        [Point::new(3.0, 3.0), Point::new(3.0, 3.0)],
        Size::new(100.0, 100.0),
        &opts,
    )
    .unwrap();
    assert!(vp.zoom.is_finite() && vp.zoom > 0.0);
}

#[test]
fn zoom_to_clamps() {
    let opts = FitOptions::default();
    let mut vp = Viewport::default();
    vp.zoom_to(10.0, &opts);
    assert_eq!(vp.zoom, 2.0);
    vp.zoom_to(0.01, &opts);
    assert_eq!(vp.zoom, 0.2);
}

#[test]
fn screen_and_logical_conversions_invert() {
    let vp = Viewport {
        zoom: 0.5,
        pan: Point::new(30.0, -20.0),
    };
    let p = Point::new(250.0, 120.0);
    let s = vp.to_screen(p);
    assert_eq!(s, Point::new(155.0, 40.0));
    let back = vp.to_logical(s);
    assert!(approx(back.x, p.x) && approx(back.y, p.y));
    assert_eq!(vp.screen_delta_to_logical(vector(10.0, -4.0)), vector(20.0, -8.0));
}

#[test]
fn bounds_from_points() {
    let b = Bounds::from_points([Point::new(1.0, 5.0), Point::new(-3.0, 2.0)]).unwrap();
    assert_eq!(b.size(), Size::new(4.0, 3.0));
    assert_eq!(b.center(), Point::new(-1.0, 3.5));
    assert!(b.inflate(1.0).contains(Point::new(2.0, 6.0)));
    assert!(Bounds::from_points(std::iter::empty::<Point>()).is_none());
}
