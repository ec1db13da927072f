use tracing::warn;

use crate::{Point, utils::{abs_diff_eq, determinant3x3, distance}};

/// Denominators below this value make a circle through 3 points undefined (collinear points).
pub(crate) const DEGENERATE_EPSILON: f64 = 1e-9;

/// A circle given by its center and a non-negative radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Default for Circle {
    fn default() -> Self {
        Self::NULL
    }
}

impl Circle {
    /// Sentinel for "no circle": zero radius centered at the origin.
    ///
    /// Returned for degenerate triangles and empty point sets. Callers must check [Circle::is_null].
    pub const NULL: Circle = Circle { center: Point::ORIGIN, radius: 0.0 };

    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius: radius.max(0.0) }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.center == Point::ORIGIN && abs_diff_eq(self.radius, 0.0, f64::EPSILON)
    }

    /// Whether `point` is inside the circle or on its boundary, with `epsilon` slack on the radius.
    #[inline]
    pub fn contains(&self, point: &Point, epsilon: f64) -> bool {
        distance(&self.center, point) <= self.radius + epsilon
    }

    /// Whether `point` is strictly inside the circle, by more than `epsilon`.
    #[inline]
    pub fn strictly_contains(&self, point: &Point, epsilon: f64) -> bool {
        distance(&self.center, point) < self.radius - epsilon
    }

    /// Circumscribed circle of the triangle `a`, `b`, `c`.
    ///
    /// Solved with determinants: with `w = det[1, x, y]`, `x = -det[1, y, (x²+y²)/2] / w` and `y = det[1, x, (x²+y²)/2] / w`.
    /// Collinear (or repeated) vertices have no circumcircle, [Circle::NULL] is returned and the triangle is logged.
    pub fn circumscribed(a: &Point, b: &Point, c: &Point) -> Circle {
        let half_norm = |p: &Point| (p.x * p.x + p.y * p.y) / 2.0;

        let w = determinant3x3(&[
            [1.0, a.x, a.y],
            [1.0, b.x, b.y],
            [1.0, c.x, c.y],
        ]);

        if abs_diff_eq(w, 0.0, DEGENERATE_EPSILON) {
            warn!("Degenerate triangle {:?} {:?} {:?} has no circumcircle", a, b, c);
            return Circle::NULL;
        }

        let x = -determinant3x3(&[
            [1.0, a.y, half_norm(a)],
            [1.0, b.y, half_norm(b)],
            [1.0, c.y, half_norm(c)],
        ]);

        let y = determinant3x3(&[
            [1.0, a.x, half_norm(a)],
            [1.0, b.x, half_norm(b)],
            [1.0, c.x, half_norm(c)],
        ]);

        let center = Point { x: x / w, y: y / w };
        Circle { center, radius: distance(&center, a) }
    }

    /// Smallest circle passing through all of `points`, for up to 3 points.
    ///
    /// 0 points gives [Circle::NULL], 1 point a zero radius circle on it, 2 points the circle with the segment as diameter,
    /// and 3 points their circumcircle (or [Circle::NULL] if they are collinear).
    pub fn through(points: &[Point]) -> Circle {
        match points {
            [] => Circle::NULL,
            [a] => Circle { center: *a, radius: 0.0 },
            [a, b] => {
                let center = Point { x: (a.x + b.x) / 2.0, y: (a.y + b.y) / 2.0 };
                Circle { center, radius: distance(a, &center) }
            },
            [a, b, c] => {
                let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
                if d.abs() < DEGENERATE_EPSILON {
                    return Circle::NULL;
                }

                let (na, nb, nc) = (a.norm2(), b.norm2(), c.norm2());
                let center = Point {
                    x: (na * (b.y - c.y) + nb * (c.y - a.y) + nc * (a.y - b.y)) / d,
                    y: (na * (c.x - b.x) + nb * (a.x - c.x) + nc * (b.x - a.x)) / d,
                };

                Circle { center, radius: distance(&center, a) }
            },
            _ => {
                warn!("A circle can be defined by at most 3 points, {} given", points.len());
                Circle::NULL
            }
        }
    }
}
