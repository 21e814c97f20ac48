use crate::model::Bounds;
use narwhal_core::geom::Vector;
use narwhal_core::{Point, Size, StoryConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub struct FitOptions {
    /// Added around the actor centers before fitting, in logical units.
    pub logical_padding: f64,
    /// Kept free on every side of the view, in screen pixels.
    pub screen_padding: f64,
    /// Fitting never zooms in past this.
    pub max_fit_zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            logical_padding: 100.0,
            screen_padding: 40.0,
            max_fit_zoom: 1.5,
            min_zoom: 0.2,
            max_zoom: 2.0,
        }
    }
}

impl FitOptions {
    pub fn from_config(config: &StoryConfig) -> Self {
        let d = Self::default();
        Self {
            logical_padding: config.f64_or("viewport.logicalPadding", d.logical_padding),
            screen_padding: config.f64_or("viewport.screenPadding", d.screen_padding),
            max_fit_zoom: config.f64_or("viewport.maxFitZoom", d.max_fit_zoom),
            min_zoom: config.f64_or("viewport.minZoom", d.min_zoom),
            max_zoom: config.f64_or("viewport.maxZoom", d.max_zoom),
        }
    }
}

/// Logical → screen mapping: `screen = logical × zoom + pan`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub zoom: f64,
    pub pan: Point,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Point::new(0.0, 0.0),
        }
    }
}

impl Viewport {
    /// Zoom and pan that center all `points` inside a `view`-sized screen rectangle.
    ///
    /// Returns `None` without points. A zero-area box is treated as at least 1×1.
    pub fn fit(
        points: impl IntoIterator<Item = Point>,
        view: Size,
        opts: &FitOptions,
    ) -> Option<Self> {
        let bounds = Bounds::from_points(points)?.inflate(opts.logical_padding);
        let size = bounds.size();
        let (w, h) = (size.width.max(1.0), size.height.max(1.0));
        let avail_w = (view.width - opts.screen_padding * 2.0).max(1.0);
        let avail_h = (view.height - opts.screen_padding * 2.0).max(1.0);

        let zoom = (avail_w / w).min(avail_h / h).min(opts.max_fit_zoom);
        let center = bounds.center();
        Some(Self {
            zoom,
            pan: Point::new(
                view.width / 2.0 - center.x * zoom,
                view.height / 2.0 - center.y * zoom,
            ),
        })
    }

    /// Sets the zoom, clamped to `[min_zoom, max_zoom]`. Pan is left unchanged.
    pub fn zoom_to(&mut self, zoom: f64, opts: &FitOptions) {
        self.zoom = zoom.max(opts.min_zoom).min(opts.max_zoom);
    }

    pub fn to_screen(&self, p: Point) -> Point {
        Point::new(p.x * self.zoom + self.pan.x, p.y * self.zoom + self.pan.y)
    }

    pub fn to_logical(&self, p: Point) -> Point {
        Point::new((p.x - self.pan.x) / self.zoom, (p.y - self.pan.y) / self.zoom)
    }

    /// Converts a pointer movement in screen pixels into a logical displacement.
    pub fn screen_delta_to_logical(&self, delta: Vector) -> Vector {
        delta / self.zoom
    }
}
