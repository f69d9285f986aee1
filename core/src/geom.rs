//! Continuous 2D geometry for presentation layers: vector math over pixel
//! coordinates and the pointer-to-cell mapping. Everything here is pure;
//! grid positions stay integral and only cross into `Vec2` explicitly.

use std::iter::Sum;
use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::types::{Axis, CellIndex, GridPos, cell_index};

/// Continuous 2D point or extent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both components set to `n`.
    pub const fn splat(n: f64) -> Self {
        Self { x: n, y: n }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Vec2) -> f64 {
        let (dx, dy) = (self.x - other.x, self.y - other.y);
        (dx * dx + dy * dy).sqrt()
    }

    /// Heading from `self` toward `target`, in degrees within `[0, 360)`.
    pub fn angle_to(self, target: Vec2) -> f64 {
        let degrees = (target.y - self.y).atan2(target.x - self.x).to_degrees();
        if degrees < 0.0 { degrees + 360.0 } else { degrees }
    }

    /// Component-wise clamp into the box spanned by `min` and `max`.
    pub fn clamp(self, min: Vec2, max: Vec2) -> Self {
        Self::new(self.x.clamp(min.x, max.x), self.y.clamp(min.y, max.y))
    }

    /// Each component truncated toward zero.
    pub fn trunc(self) -> Self {
        Self::new(self.x.trunc(), self.y.trunc())
    }
}

impl From<GridPos> for Vec2 {
    fn from((x, y): GridPos) -> Self {
        Self::new(f64::from(x), f64::from(y))
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl Div for Vec2 {
    type Output = Vec2;

    fn div(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x / rhs.x, self.y / rhs.y)
    }
}

/// Uniform scale.
impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, s: f64) -> Vec2 {
        Vec2::new(self.x * s, self.y * s)
    }
}

impl Sum for Vec2 {
    fn sum<I: Iterator<Item = Vec2>>(iter: I) -> Self {
        iter.fold(Vec2::ZERO, Add::add)
    }
}

/// Axis-aligned rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Strict containment: points on the boundary are outside.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.origin.x
            && point.x < self.origin.x + self.size.x
            && point.y > self.origin.y
            && point.y < self.origin.y + self.size.y
    }
}

/// Pixel layout of a rendered grid; translates pointer positions to cells
/// and cell positions back to pixels.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridMetrics {
    pub origin: Vec2,
    pub cell_size: f64,
    pub size: GridPos,
}

impl GridMetrics {
    pub const fn new(origin: Vec2, cell_size: f64, size: GridPos) -> Self {
        Self { origin, cell_size, size }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.origin, Vec2::from(self.size) * self.cell_size)
    }

    /// Cell under `pointer`, when the pointer is strictly inside the grid.
    pub fn cell_at(&self, pointer: Vec2) -> Option<CellIndex> {
        if !self.bounds().contains(pointer) {
            return None;
        }
        let cell = ((pointer - self.origin) / Vec2::splat(self.cell_size)).trunc();
        Some(cell_index((cell.x as Axis, cell.y as Axis), self.size.0))
    }

    /// Pixel origin of the cell at `pos`.
    pub fn cell_origin(&self, pos: GridPos) -> Vec2 {
        self.origin + Vec2::from(pos) * self.cell_size
    }
}
