use serde::{Deserialize, Serialize};

pub type Vector = euclid::default::Vector2D<f64>;

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

/// A point in logical (canvas) space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector from `self` to `other`.
    pub fn delta_to(self, other: Point) -> Vector {
        vector(other.x - self.x, other.y - self.y)
    }

    pub fn offset(self, v: Vector) -> Point {
        Point::new(self.x + v.x, self.y + v.y)
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    pub fn distance_to(self, other: Point) -> f64 {
        self.delta_to(other).length()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

pub fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}
