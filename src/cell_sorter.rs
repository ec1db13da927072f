//! Polygon boundary of a Voronoi cell from its unordered corners.
//!
//! Each corner is joined to the corner reached by the smallest counter-clockwise turn around the site.
//! Sorting the corners by angle would give the same polygon on exact input, but the segment construction
//! does not depend on a global order, so jitter between nearly aligned corners only affects their own segment.

use std::f64::consts::TAU;

use crate::{BorderSet, Point, VoronoiCells};

/// A boundary segment of a cell, from a corner to the next one counter-clockwise.
pub type Segment = [Point; 2];

/// Counter-clockwise angle, in `[0, 2π)`, to turn from `from` to `to`.
fn ccw_angle(from: &Point, to: &Point) -> f64 {
    let angle = from.cross(to).atan2(from.dot(to));
    if angle < 0.0 {
        angle + TAU
    } else {
        angle
    }
}

/// Builds the boundary segments of the cell of `site` from its `corners`.
///
/// Repeated corners (cocircular triangles share a circumcenter) and corners on the site are dropped first.
/// For every remaining corner (the pivot), the segment goes to the other corner with the smallest counter-clockwise
/// turn from the pivot, as seen from `site`; on a tie the first such corner wins.
/// A cell with less than 2 distinct corners has no segment.
pub fn sort_cell_boundary(site: &Point, corners: &[Point]) -> Vec<Segment> {
    let mut distinct: Vec<Point> = Vec::with_capacity(corners.len());
    for corner in corners {
        if (*corner - *site).norm2() != 0.0 && !distinct.contains(corner) {
            distinct.push(*corner);
        }
    }

    let mut segments = Vec::with_capacity(distinct.len());
    for (i, pivot) in distinct.iter().enumerate() {
        let direction = *pivot - *site;

        let mut next: Option<(f64, &Point)> = None;
        for (j, corner) in distinct.iter().enumerate() {
            if i == j {
                continue;
            }

            let angle = ccw_angle(&direction, &(*corner - *site));
            if next.map_or(true, |(min, _)| angle < min) {
                next = Some((angle, corner));
            }
        }

        if let Some((_, corner)) = next {
            segments.push([*pivot, *corner]);
        }
    }

    segments
}

/// Boundary segments of every cell. Border points get an empty boundary.
pub fn sort_cell_boundaries(points: &[Point], cells: &VoronoiCells, border: &BorderSet) -> Vec<Vec<Segment>> {
    points
        .iter()
        .enumerate()
        .map(|(i, site)| {
            if border.contains(i) {
                Vec::new()
            } else {
                sort_cell_boundary(site, &cells.corners(i))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rand::{seq::SliceRandom, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::utils::test::regular_polygon;

    fn orient(a: &Point, b: &Point, c: &Point) -> f64 {
        robust::orient2d(
            robust::Coord { x: a.x, y: a.y },
            robust::Coord { x: b.x, y: b.y },
            robust::Coord { x: c.x, y: c.y },
        )
    }

    #[test]
    fn segments_follow_the_polygon() {
        let site = Point::new(1.0, -2.0);
        let polygon = regular_polygon(7, 2.0, site);
        let mut corners = polygon.clone();
        corners.shuffle(&mut ChaCha8Rng::seed_from_u64(8));

        let segments = sort_cell_boundary(&site, &corners);
        assert_eq!(7, segments.len());

        for [from, to] in &segments {
            let i = polygon.iter().position(|p| p == from).unwrap();
            assert_eq!(polygon[(i + 1) % polygon.len()], *to, "Segment from corner {} goes to the next corner", i);
            assert!(orient(&site, from, to) > 0.0, "Segments turn counter-clockwise around the site");
        }
    }

    #[test]
    fn every_edge_appears_once() {
        let site = Point::new(0.3, 0.1);
        let corners = [Point::new(2.0, 0.0), Point::new(-1.0, 1.5), Point::new(0.5, 2.0), Point::new(-1.0, -1.0), Point::new(1.5, -1.8)];
        let segments = sort_cell_boundary(&site, &corners);

        assert_eq!(corners.len(), segments.len());
        for corner in &corners {
            assert_eq!(1, segments.iter().filter(|[from, _]| from == corner).count());
            assert_eq!(1, segments.iter().filter(|[_, to]| to == corner).count());
        }
    }

    #[test]
    fn degenerate_cells() {
        let site = Point::ORIGIN;
        assert!(sort_cell_boundary(&site, &[]).is_empty());
        assert!(sort_cell_boundary(&site, &[Point::new(1.0, 0.0)]).is_empty());
        assert!(sort_cell_boundary(&site, &[Point::new(1.0, 0.0), Point::new(1.0, 0.0)]).is_empty(), "Repeated corner is the pivot itself");

        let pair = sort_cell_boundary(&site, &[Point::new(1.0, 0.0), Point::new(0.0, 1.0)]);
        assert_eq!(vec![[Point::new(1.0, 0.0), Point::new(0.0, 1.0)], [Point::new(0.0, 1.0), Point::new(1.0, 0.0)]], pair);

        let with_site = sort_cell_boundary(&site, &[Point::ORIGIN, Point::new(1.0, 0.0), Point::new(0.0, 1.0)]);
        assert_eq!(2, with_site.len(), "A corner on the site is skipped");
    }

    #[test]
    fn border_cells_are_empty() {
        let points = vec![Point::new(-1.0, -1.0), Point::new(1.0, -1.0), Point::new(1.0, 1.0), Point::new(-1.0, 1.0), Point::ORIGIN];
        let triangulation = crate::Triangulation::triangulate(&points, &crate::DelaunatorTriangulator);
        let cells = VoronoiCells::build(&triangulation, points.len());
        let mut border = BorderSet::with_capacity(points.len());
        (0..4).for_each(|i| { border.insert(i); });

        let boundaries = sort_cell_boundaries(&points, &cells, &border);
        assert_eq!(points.len(), boundaries.len());
        assert!(boundaries[..4].iter().all(Vec::is_empty));
        assert_eq!(4, boundaries[4].len(), "Center cell is a diamond");
    }

    #[test]
    fn shared_circumcenters_give_one_segment() {
        let points: Vec<Point> = (-3..=3)
            .flat_map(|x| (-3..=3).map(move |y| Point::new(x as f64, y as f64)))
            .collect();
        let site = points.iter().position(|p| *p == Point::ORIGIN).unwrap();

        let triangulation = crate::Triangulation::triangulate(&points, &crate::DelaunatorTriangulator);
        let cells = VoronoiCells::build(&triangulation, points.len());
        let corners = cells.corners(site);
        assert!(corners.len() > 4, "Lattice squares are split in two triangles sharing a circumcenter");

        let segments = sort_cell_boundary(&points[site], &corners);
        assert_eq!(4, segments.len(), "Unit square cell");
        for [from, to] in &segments {
            assert_abs_diff_eq!(from.x.abs(), 0.5, epsilon = 1e-9);
            assert_abs_diff_eq!(from.y.abs(), 0.5, epsilon = 1e-9);
            assert!(orient(&points[site], from, to) > 0.0);
        }

        assert_abs_diff_eq!(crate::cell_energy(&points[site], &segments), 1.0 / 6.0, epsilon = 1e-9);
    }

    #[test]
    fn repeated_corners_are_dropped() {
        let site = Point::ORIGIN;
        let corners = [Point::new(1.0, 0.0), Point::new(0.0, 1.0), Point::new(0.0, 1.0), Point::new(-1.0, 0.0), Point::new(1.0, 0.0)];
        let segments = sort_cell_boundary(&site, &corners);
        assert_eq!(3, segments.len());
        assert_eq!([Point::new(0.0, 1.0), Point::new(-1.0, 0.0)], segments[1]);
    }
}
