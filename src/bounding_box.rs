use nalgebra::{Matrix2, Vector2};
use tracing::warn;

use crate::{Point, utils::calculate_approximated_centroid};

/// Cross products of edge directions below this value are treated as parallel edges.
pub const PARALLEL_EPSILON: f64 = 1e-12;

/// An axis aligned box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    /// The center point of a rectangle.
    center: Point,

    /// The top right point of a rectangle.
    top_right: Point,
}

impl BoundingBox {
    /// Smallest axis aligned box containing all `points`, or None if there are no points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((*first, *first), |(min, max), p| {
            (
                Point { x: min.x.min(p.x), y: min.y.min(p.y) },
                Point { x: max.x.max(p.x), y: max.y.max(p.y) },
            )
        });

        Some(Self {
            center: Point { x: (min.x + max.x) / 2.0, y: (min.y + max.y) / 2.0 },
            top_right: max,
        })
    }

    pub fn center(&self) -> &Point {
        &self.center
    }

    fn bottom_left(&self) -> Point {
        Point { x: 2.0 * self.center.x - self.top_right.x, y: 2.0 * self.center.y - self.top_right.y }
    }

    /// Corners counter-clockwise, starting at the bottom left one.
    pub fn corners(&self) -> [Point; 4] {
        let bottom_left = self.bottom_left();
        [
            bottom_left,
            Point { x: self.top_right.x, y: bottom_left.y },
            self.top_right,
            Point { x: bottom_left.x, y: self.top_right.y },
        ]
    }
}

/// Intersects the line through `a` with direction `da` and the line through `b` with direction `db`.
///
/// Parallel (or zero length) directions have no single intersection: the case is logged and None is returned.
pub fn compute_intersection(a: &Point, da: &Point, b: &Point, db: &Point) -> Option<Point> {
    let denominator = da.cross(db);
    if denominator.abs() < PARALLEL_EPSILON {
        warn!("Lines through {:?} and {:?} are parallel, no intersection", a, b);
        return None;
    }

    let t = (*b - *a).cross(db) / denominator;
    Some(*a + *da * t)
}

/// Principal axes of a point cloud, as the columns of a rotation matrix, and its mean.
fn principal_axes(points: &[Point]) -> (Matrix2<f64>, Point) {
    let centroid = calculate_approximated_centroid(points.iter()).unwrap_or_default();

    let covariance = points.iter().fold(Matrix2::<f64>::zeros(), |acc, p| {
        let v = Vector2::new(p.x - centroid.x, p.y - centroid.y);
        acc + v * v.transpose()
    }) / points.len() as f64;

    let rotation = covariance.svd(true, false).u.unwrap_or_else(Matrix2::identity);
    (rotation, centroid)
}

fn to_frame(rotation: &Matrix2<f64>, centroid: &Point, p: &Point) -> Vector2<f64> {
    rotation.transpose() * Vector2::new(p.x - centroid.x, p.y - centroid.y)
}

fn from_frame(rotation: &Matrix2<f64>, centroid: &Point, v: Vector2<f64>) -> Point {
    let world = rotation * v;
    Point { x: world.x + centroid.x, y: world.y + centroid.y }
}

/// Min and max of each coordinate of `vectors`.
fn extent(vectors: impl Iterator<Item = Vector2<f64>>) -> (Vector2<f64>, Vector2<f64>) {
    vectors.fold(
        (Vector2::repeat(f64::MAX), Vector2::repeat(-f64::MAX)),
        |(min, max), v| (min.inf(&v), max.sup(&v)),
    )
}

/// Box aligned to the principal axes (covariance SVD) of `points`.
///
/// Returns its 4 corners in order. With less than 2 points there is no box and `points` is returned as is.
pub fn oriented_bounding_box(points: &[Point]) -> Vec<Point> {
    if points.len() < 2 {
        return points.to_vec();
    }

    let (rotation, centroid) = principal_axes(points);
    let (min, max) = extent(points.iter().map(|p| to_frame(&rotation, &centroid, p)));

    [
        Vector2::new(min.x, min.y),
        Vector2::new(max.x, min.y),
        Vector2::new(max.x, max.y),
        Vector2::new(min.x, max.y),
    ]
    .iter()
    .map(|&corner| from_frame(&rotation, &centroid, corner))
    .collect()
}

/// Octagon obtained by cutting the corners of the [oriented_bounding_box] with the same box rotated by 45°.
///
/// Each vertex is the intersection of an edge of the principal box with the neighboring edge of the diamond,
/// going around counter-clockwise starting on the right edge. Less than 2 points gives an empty octagon,
/// as does a degenerate intersection.
pub fn oriented_octagon(points: &[Point]) -> Vec<Point> {
    if points.len() < 2 {
        return vec![];
    }

    let (rotation, centroid) = principal_axes(points);
    let framed: Vec<Vector2<f64>> = points.iter().map(|p| to_frame(&rotation, &centroid, p)).collect();
    let (min, max) = extent(framed.iter().copied());

    // the 45° frame: u along the first diagonal, v along the second
    let s = std::f64::consts::FRAC_1_SQRT_2;
    let (min_d, max_d) = extent(framed.iter().map(|v| Vector2::new(s * (v.x + v.y), s * (v.y - v.x))));

    let vertical = Point::new(0.0, 1.0);
    let horizontal = Point::new(1.0, 0.0);
    let first_diagonal = Point::new(1.0, 1.0);
    let second_diagonal = Point::new(-1.0, 1.0);

    // edges as (point on line, direction), counter-clockwise starting at the right box edge
    let edges = [
        (Point::new(max.x, 0.0), vertical),
        (Point::new(s * max_d.x, s * max_d.x), second_diagonal),
        (Point::new(0.0, max.y), horizontal),
        (Point::new(-s * max_d.y, s * max_d.y), first_diagonal),
        (Point::new(min.x, 0.0), vertical),
        (Point::new(s * min_d.x, s * min_d.x), second_diagonal),
        (Point::new(0.0, min.y), horizontal),
        (Point::new(-s * min_d.y, s * min_d.y), first_diagonal),
    ];

    let mut octagon = Vec::with_capacity(edges.len());
    for (a, b) in edges.iter().zip(edges.iter().cycle().skip(1)) {
        match compute_intersection(&a.0, &a.1, &b.0, &b.1) {
            Some(p) => octagon.push(from_frame(&rotation, &centroid, Vector2::new(p.x, p.y))),
            None => return vec![],
        }
    }

    octagon
}
