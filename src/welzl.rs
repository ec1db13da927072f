//! Minimum enclosing circle, after Welzl's randomized recursive algorithm.
//!
//! The recursion works on sub-slices of the (shuffled) input and on a boundary passed by value,
//! so every recursive call sees exactly the state its caller had: nothing needs to be restored on return.

use rand::{Rng, seq::SliceRandom};

use crate::{Circle, Point};

/// Slack used when testing if a point is outside the current circle.
pub const WELZL_EPSILON: f64 = 1e-7;

/// Up to 3 points known to be on the boundary of the enclosing circle.
#[derive(Clone, Copy, Default)]
struct Boundary {
    points: [Point; 3],
    len: usize,
}

impl Boundary {
    fn with(mut self, point: Point) -> Self {
        debug_assert!(self.len < 3, "A boundary holds at most 3 points.");
        self.points[self.len] = point;
        self.len += 1;
        self
    }

    fn is_full(&self) -> bool {
        self.len == 3
    }

    /// Circle through the boundary points. Three collinear points have no circumcircle; the circle on their
    /// farthest pair is used instead, which encloses the third one.
    fn circle(&self) -> Circle {
        let circle = Circle::through(&self.points[..self.len]);
        if !(self.is_full() && circle.is_null()) {
            return circle;
        }

        let [a, b, c] = self.points;
        let mut widest = Circle::through(&[a, b]);
        for pair in &[[b, c], [a, c]] {
            let candidate = Circle::through(pair);
            if candidate.radius > widest.radius {
                widest = candidate;
            }
        }

        widest
    }
}

fn welzl(points: &[Point], boundary: Boundary) -> Circle {
    let (pt, rest) = match points.split_last() {
        Some(split) if !boundary.is_full() => split,
        _ => return boundary.circle(),
    };

    let circle = welzl(rest, boundary);
    if circle.contains(pt, WELZL_EPSILON) {
        circle
    } else {
        welzl(rest, boundary.with(*pt))
    }
}

/// Smallest circle enclosing all `points`, in the order given.
///
/// Expected linear time requires the points to be in random order, see [minimum_enclosing_circle].
/// An empty input returns [Circle::NULL].
pub fn minimum_enclosing_circle_ordered(points: &[Point]) -> Circle {
    welzl(points, Boundary::default())
}

/// Smallest circle enclosing all `points`.
///
/// Points are shuffled with `rng` before running the recursion.
/// An empty input returns [Circle::NULL].
pub fn minimum_enclosing_circle<R: Rng + ?Sized>(points: &[Point], rng: &mut R) -> Circle {
    let mut shuffled = points.to_vec();
    shuffled.shuffle(rng);
    minimum_enclosing_circle_ordered(&shuffled)
}
