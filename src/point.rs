use std::{fmt, ops::{Add, Div, Mul, Sub}};

/// Tolerance, per coordinate, under which two points are considered the same.
pub const POINT_EPSILON: f64 = 1e-4;

/// A 2D point (or vector) with `f64` coordinates.
///
/// Equality is approximate: two points are equal when both coordinates differ by less than [POINT_EPSILON].
/// This is what allows coordinates coming back from a triangulator to be resolved to their index.
#[derive(Clone, Copy, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Same as `==`, but with a custom tolerance.
    #[inline]
    pub fn approx_eq(&self, other: &Point, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }

    #[inline]
    pub fn dot(&self, other: &Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z component of the 3D cross product of `self` and `other`.
    #[inline]
    pub fn cross(&self, other: &Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn norm2(&self) -> f64 {
        self.dot(self)
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm2().sqrt()
    }

    /// Moves `self` towards `target` by a fraction `step` of the distance between them.
    /// A `step` of 1 lands on `target`, 0 does not move.
    #[inline]
    pub fn lerp(&self, target: &Point, step: f64) -> Point {
        Point {
            x: (1.0 - step) * self.x + step * target.x,
            y: (1.0 - step) * self.y + step * target.y,
        }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, POINT_EPSILON)
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point { x: self.x * rhs, y: self.y * rhs }
    }
}

impl Div<f64> for Point {
    type Output = Point;

    fn div(self, rhs: f64) -> Point {
        Point { x: self.x / rhs, y: self.y / rhs }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

impl From<&delaunator::Point> for Point {
    fn from(p: &delaunator::Point) -> Self {
        Point { x: p.x, y: p.y }
    }
}

impl From<&Point> for delaunator::Point {
    fn from(p: &Point) -> Self {
        delaunator::Point { x: p.x, y: p.y }
    }
}
