use std::cmp::Ordering;

use rand::Rng;

use crate::{
    bounding_box::{oriented_bounding_box, oriented_octagon},
    utils::{calculate_approximated_centroid, dist2, polygon_centroid, sort_points_ccw},
    BoundingBox, Circle, Point, Triangulation, VoronoiCells,
};

/// Number of neighbors used by [CenteringStrategy::KNearest] when not specified.
pub const DEFAULT_K_NEAREST: usize = 8;

/// How the relaxation target of a point is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CenteringStrategy {
    /// Area centroid of the Voronoi cell polygon.
    Centroid,
    /// Center of the minimum enclosing circle of the adjacent points.
    MinEnclosingCircle,
    /// Center of the axis aligned bounding box of the adjacent points.
    BoundingBox,
    /// Mean of the corners of the oriented bounding box of the adjacent points.
    OrientedBox,
    /// Mean of the vertices of the oriented octagon of the adjacent points.
    OrientedOctagon,
    /// Mean of the `k` nearest points.
    KNearest { k: usize },
    /// Mean of the Voronoi cell corners.
    Mean,
}

impl Default for CenteringStrategy {
    fn default() -> Self {
        CenteringStrategy::Centroid
    }
}

/// Read-only view of the geometry around a point, used to look up what a strategy centers on.
#[derive(Clone, Copy)]
pub struct CellContext<'a> {
    pub points: &'a [Point],
    pub triangulation: &'a Triangulation,
    pub cells: &'a VoronoiCells,
}

/// Result of centering a point.
#[derive(Debug, Clone, PartialEq)]
pub enum Center {
    Point(Point),
    /// Minimum enclosing circle. A [Circle::NULL] here means the neighborhood was degenerate.
    EnclosingCircle(Circle),
    /// Center of an outline (axis aligned box, oriented box or octagon), together with the outline.
    Outline { center: Point, outline: Vec<Point> },
    /// Nothing to center on (no neighbors, zero area cell).
    Undefined,
}

impl Center {
    /// Point to move towards, if any.
    pub fn target(&self) -> Option<Point> {
        match self {
            Center::Point(p) => Some(*p),
            Center::EnclosingCircle(c) if !c.is_null() => Some(c.center),
            Center::Outline { center, .. } => Some(*center),
            _ => None,
        }
    }

    /// Whether this is the degenerate enclosing circle, which pins the point.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Center::EnclosingCircle(c) if c.is_null())
    }
}

impl CenteringStrategy {
    /// Points the strategy centers `index` on.
    ///
    /// Cell corners for [CenteringStrategy::Centroid] and [CenteringStrategy::Mean], the `k` nearest other points for
    /// [CenteringStrategy::KNearest] and the triangulation neighbors for every other strategy.
    pub fn neighbors(&self, index: usize, context: &CellContext) -> Vec<Point> {
        match self {
            CenteringStrategy::Centroid | CenteringStrategy::Mean => context.cells.corners(index),
            CenteringStrategy::KNearest { k } => k_nearest(context.points, index, *k),
            CenteringStrategy::MinEnclosingCircle
            | CenteringStrategy::BoundingBox
            | CenteringStrategy::OrientedBox
            | CenteringStrategy::OrientedOctagon => context
                .triangulation
                .neighbors(index)
                .iter()
                .map(|&n| context.points[n])
                .collect(),
        }
    }

    /// Center of `neighbors`, as this strategy defines it.
    ///
    /// `rng` shuffles the points before the minimum enclosing circle recursion.
    pub fn center_of<R: Rng + ?Sized>(&self, neighbors: &[Point], rng: &mut R) -> Center {
        let center = match self {
            CenteringStrategy::Centroid => {
                let mut polygon = neighbors.to_vec();
                sort_points_ccw(&mut polygon);
                polygon_centroid(&polygon).map(Center::Point)
            },
            CenteringStrategy::MinEnclosingCircle => {
                return Center::EnclosingCircle(crate::minimum_enclosing_circle(neighbors, rng));
            },
            CenteringStrategy::BoundingBox => BoundingBox::from_points(neighbors).map(|b| Center::Outline {
                center: *b.center(),
                outline: b.corners().to_vec(),
            }),
            CenteringStrategy::OrientedBox => outline_center(oriented_bounding_box(neighbors)),
            CenteringStrategy::OrientedOctagon => {
                let octagon = oriented_octagon(neighbors);
                if octagon.is_empty() {
                    outline_center(oriented_bounding_box(neighbors))
                } else {
                    outline_center(octagon)
                }
            },
            CenteringStrategy::KNearest { .. } | CenteringStrategy::Mean => {
                calculate_approximated_centroid(neighbors.iter()).map(Center::Point)
            },
        };

        center.unwrap_or(Center::Undefined)
    }

    /// Looks up the neighbors of `index` and centers on them.
    pub fn compute_center<R: Rng + ?Sized>(&self, index: usize, context: &CellContext, rng: &mut R) -> Center {
        self.center_of(&self.neighbors(index, context), rng)
    }
}

fn outline_center(outline: Vec<Point>) -> Option<Center> {
    calculate_approximated_centroid(outline.iter()).map(|center| Center::Outline { center, outline })
}

/// The `k` points closest to `points[index]`, excluding itself, closest first.
///
/// Brute force over every point. Equidistant points keep their index order.
pub fn k_nearest(points: &[Point], index: usize, k: usize) -> Vec<Point> {
    let origin = match points.get(index) {
        Some(p) => *p,
        None => return Vec::new(),
    };

    let mut candidates: Vec<(f64, usize)> = points
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != index)
        .map(|(i, p)| (dist2(&origin, p), i))
        .collect();

    candidates.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    candidates.into_iter().take(k).map(|(_, i)| points[i]).collect()
}
