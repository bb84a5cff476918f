//! Toroidal plane math used by the search heuristic, the obstruction
//! scanner, and the pursuit tracker.

use serde::{Deserialize, Serialize};

/// A position in arena space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn translate(self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y)
    }
}

/// A displacement in arena space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

/// A rectangular arena with wrap-around boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Torus {
    pub width: f64,
    pub height: f64,
}

impl Torus {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Shortest displacement from `a` to `b`. Components land in
    /// `(-width/2, width/2]` and `(-height/2, height/2]`; a displacement of
    /// exactly half an axis keeps the positive direction.
    pub fn shortest_delta(self, a: Point, b: Point) -> Vec2 {
        let half_width = self.width / 2.0;
        let half_height = self.height / 2.0;
        let mut dx = b.x - a.x;
        let mut dy = b.y - a.y;
        if dx > half_width {
            dx -= self.width;
        } else if dx <= -half_width {
            dx += self.width;
        }
        if dy > half_height {
            dy -= self.height;
        } else if dy <= -half_height {
            dy += self.height;
        }
        Vec2::new(dx, dy)
    }

    /// Magnitude of the shortest displacement from `a` to `b`.
    #[inline]
    pub fn shortest_distance(self, a: Point, b: Point) -> f64 {
        self.shortest_delta(a, b).magnitude()
    }

    /// Normalize a position into `[0, width) x [0, height)`.
    pub fn wrap(self, p: Point) -> Point {
        Point::new(p.x.rem_euclid(self.width), p.y.rem_euclid(self.height))
    }
}
