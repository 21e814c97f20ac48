pub mod flow;
pub mod force;
pub mod grid;
pub mod radial;

use crate::error::{Error, Result};
use narwhal_core::{Point, Size, StoryConfig};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum Algorithm {
    /// Every actor on one circle, first actor at the top.
    Radial,
    /// Row-major grid over the padded canvas.
    Grid,
    /// Columns by breadth-first level from the actors nobody points at.
    Flow,
    /// Fixed-iteration spring/repulsion simulation. Deterministic.
    Force(ForceOptions),
}

impl Algorithm {
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Radial => "radial",
            Algorithm::Grid => "grid",
            Algorithm::Flow => "flow",
            Algorithm::Force(_) => "force",
        }
    }

    /// Like [`FromStr`], but force parameters come from `layout.force.*`.
    pub fn from_name(name: &str, config: &StoryConfig) -> Result<Self> {
        match name.parse::<Algorithm>()? {
            Algorithm::Force(_) => Ok(Algorithm::Force(ForceOptions::from_config(config))),
            other => Ok(other),
        }
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "radial" | "circular" => Ok(Algorithm::Radial),
            "grid" => Ok(Algorithm::Grid),
            "flow" | "hierarchical" => Ok(Algorithm::Flow),
            "force" | "force-directed" => Ok(Algorithm::Force(ForceOptions::default())),
            _ => Err(Error::UnknownAlgorithm {
                name: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForceOptions {
    pub iterations: usize,
    /// Pairwise push: `repulsion / distance²`.
    pub repulsion: f64,
    /// Spring pull per edge: `distance × attraction`.
    pub attraction: f64,
    /// Velocity multiplier applied after every step.
    pub damping: f64,
}

impl Default for ForceOptions {
    fn default() -> Self {
        Self {
            iterations: 80,
            repulsion: 18000.0,
            attraction: 0.04,
            damping: 0.85,
        }
    }
}

impl ForceOptions {
    pub fn from_config(config: &StoryConfig) -> Self {
        let d = Self::default();
        Self {
            iterations: config
                .get_usize("layout.force.iterations")
                .unwrap_or(d.iterations),
            repulsion: config.f64_or("layout.force.repulsion", d.repulsion),
            attraction: config.f64_or("layout.force.attraction", d.attraction),
            damping: config.f64_or("layout.force.damping", d.damping),
        }
    }
}

/// Canvas geometry shared by every algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    pub canvas: Size,
    /// Margin kept free on every side of the canvas.
    pub padding: f64,
    /// Seed circle radius as a fraction of the half canvas (initial placement only).
    pub seed_radius_factor: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            canvas: Size::new(1600.0, 1200.0),
            padding: 150.0,
            seed_radius_factor: 0.6,
        }
    }
}

impl LayoutOptions {
    pub fn from_config(config: &StoryConfig) -> Self {
        let d = Self::default();
        Self {
            canvas: Size::new(
                config.f64_or("canvas.width", d.canvas.width),
                config.f64_or("canvas.height", d.canvas.height),
            ),
            padding: config.f64_or("layout.padding", d.padding),
            seed_radius_factor: config.f64_or("layout.seedRadiusFactor", d.seed_radius_factor),
        }
    }

    pub fn with_canvas(mut self, canvas: Size) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn center(&self) -> Point {
        self.canvas.center()
    }

    /// Width and height of the canvas minus the padding on both sides.
    pub(crate) fn inner(&self) -> Size {
        Size::new(
            self.canvas.width - self.padding * 2.0,
            self.canvas.height - self.padding * 2.0,
        )
    }

    /// Keeps `p` inside the padded canvas. Never panics, even when the padding exceeds the canvas.
    pub(crate) fn clamp(&self, p: Point) -> Point {
        let max_x = self.canvas.width - self.padding;
        let max_y = self.canvas.height - self.padding;
        Point::new(
            self.padding.max(max_x.min(p.x)),
            self.padding.max(max_y.min(p.y)),
        )
    }
}
