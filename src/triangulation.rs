use std::collections::HashMap;

use tracing::{debug, error, warn};

use crate::{Circle, Point};

/// Slack used by the empty circumcircle test, so cocircular points do not flip back and forth.
pub const FLIP_EPSILON: f64 = 1e-9;

/// Something that can compute a triangulation of a point set.
///
/// Triangles are returned as vertex coordinates. They are resolved back to point indices
/// by [Triangulation::from_coordinate_triangles], so coordinates must round trip (up to [crate::POINT_EPSILON]).
pub trait Triangulator {
    fn triangulate(&self, points: &[Point]) -> Vec<[Point; 3]>;
}

/// [Triangulator] backed by the [delaunator](https://docs.rs/delaunator) crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct DelaunatorTriangulator;

impl Triangulator for DelaunatorTriangulator {
    fn triangulate(&self, points: &[Point]) -> Vec<[Point; 3]> {
        let sites: Vec<delaunator::Point> = points.iter().map(Into::into).collect();
        let triangulation = delaunator::triangulate(&sites);

        triangulation.triangles
            .chunks_exact(3)
            .map(|t| [points[t[0]], points[t[1]], points[t[2]]])
            .collect()
    }
}

impl<F> Triangulator for F where F: Fn(&[Point]) -> Vec<[Point; 3]> {
    fn triangulate(&self, points: &[Point]) -> Vec<[Point; 3]> {
        self(points)
    }
}

/// Returns the index of the first point equal (see [crate::POINT_EPSILON]) to `point`.
pub fn index_of_point(points: &[Point], point: &Point) -> Option<usize> {
    points.iter().position(|p| p == point)
}

/// Index based triangulation of a point set.
///
/// Holds the triangles (as point indices), the circumcircle of each triangle and, for each point, the indices of
/// the points it shares a triangle edge with. All of it is only valid for the point positions it was built with.
#[derive(Debug, Clone, Default)]
pub struct Triangulation {
    triangles: Vec<[usize; 3]>,
    circles: Vec<Circle>,
    adjacency: Vec<Vec<usize>>,
}

fn add_neighbor(adjacency: &mut [Vec<usize>], a: usize, b: usize) {
    if !adjacency[a].contains(&b) {
        adjacency[a].push(b);
    }
}

fn build_adjacency(triangles: &[[usize; 3]], num_of_points: usize) -> Vec<Vec<usize>> {
    let mut adjacency = vec![Vec::new(); num_of_points];
    for &[a, b, c] in triangles {
        add_neighbor(&mut adjacency, a, b);
        add_neighbor(&mut adjacency, a, c);
        add_neighbor(&mut adjacency, b, a);
        add_neighbor(&mut adjacency, b, c);
        add_neighbor(&mut adjacency, c, a);
        add_neighbor(&mut adjacency, c, b);
    }

    adjacency
}

#[inline]
fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a < b { (a, b) } else { (b, a) }
}

/// Whether the quadrilateral with diagonal `a`-`b` and opposite vertices `c` and `d` is strictly convex,
/// i.e. whether its diagonal can be flipped to `c`-`d`.
fn is_flippable(a: &Point, b: &Point, c: &Point, d: &Point) -> bool {
    let side = |p: &Point, q: &Point, r: &Point| (*q - *p).cross(&(*r - *p));
    side(a, b, c) * side(a, b, d) < 0.0 && side(c, d, a) * side(c, d, b) < 0.0
}

impl Triangulation {
    /// Runs `triangulator` over `points` and resolves its output, see [Triangulation::from_coordinate_triangles].
    pub fn triangulate(points: &[Point], triangulator: &dyn Triangulator) -> Self {
        let triangles = triangulator.triangulate(points);
        debug!("Triangulator produced {} triangles for {} points", triangles.len(), points.len());
        Self::from_coordinate_triangles(points, &triangles)
    }

    /// Builds the triangulation from triangles given by vertex coordinates.
    ///
    /// Each vertex is resolved to the index of the matching point. A triangle with a vertex that does not match any point,
    /// or that resolves to the same index twice, is logged and skipped.
    pub fn from_coordinate_triangles(points: &[Point], triangles: &[[Point; 3]]) -> Self {
        let mut resolved = Vec::with_capacity(triangles.len());

        for triangle in triangles {
            let indices = [
                index_of_point(points, &triangle[0]),
                index_of_point(points, &triangle[1]),
                index_of_point(points, &triangle[2]),
            ];

            match indices {
                [Some(a), Some(b), Some(c)] => {
                    if a == b || b == c || a == c {
                        warn!("Triangle {:?} has repeated vertices ({}, {}, {}). Skipping it.", triangle, a, b, c);
                    } else {
                        resolved.push([a, b, c]);
                    }
                },
                _ => error!("A vertex of triangle {:?} is not in the point set. Skipping it.", triangle),
            }
        }

        Self::from_index_triangles(points, resolved)
    }

    /// Builds the triangulation from triangles given by point indices.
    pub fn from_index_triangles(points: &[Point], triangles: Vec<[usize; 3]>) -> Self {
        let circles = triangles.iter().map(|&t| Self::circle_of(points, t)).collect();
        let adjacency = build_adjacency(&triangles, points.len());

        Self {
            triangles,
            circles,
            adjacency,
        }
    }

    fn circle_of(points: &[Point], [a, b, c]: [usize; 3]) -> Circle {
        Circle::circumscribed(&points[a], &points[b], &points[c])
    }

    /// Triangles as indices to the point set.
    pub fn triangles(&self) -> &[[usize; 3]] {
        &self.triangles
    }

    /// Circumcircle of each triangle, same indexing as [Triangulation::triangles].
    /// Degenerate triangles have a [Circle::NULL].
    pub fn circles(&self) -> &[Circle] {
        &self.circles
    }

    pub fn adjacency(&self) -> &[Vec<usize>] {
        &self.adjacency
    }

    /// Indices of the points sharing an edge with `point`. Empty for a point that is in no triangle.
    pub fn neighbors(&self, point: usize) -> &[usize] {
        self.adjacency.get(point).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Recomputes every circumcircle from the current `points` positions, keeping the connectivity.
    pub fn refresh_circles(&mut self, points: &[Point]) {
        for (circle, &triangle) in self.circles.iter_mut().zip(self.triangles.iter()) {
            *circle = Self::circle_of(points, triangle);
        }
    }

    /// One pass of local Delaunay repair over the current connectivity, with `points` at their current positions.
    ///
    /// For each edge, if the vertex opposite to it in the neighboring triangle is strictly inside the triangle's circumcircle,
    /// the shared edge is flipped. A triangle takes part in at most one flip per pass.
    /// Returns the number of flips: zero means every edge satisfies the empty circumcircle property.
    pub fn flip_repair(&mut self, points: &[Point]) -> usize {
        self.refresh_circles(points);

        let mut edges: HashMap<(usize, usize), Vec<usize>> = HashMap::with_capacity(self.triangles.len() * 3 / 2);
        for (t, &[a, b, c]) in self.triangles.iter().enumerate() {
            edges.entry(edge_key(a, b)).or_default().push(t);
            edges.entry(edge_key(b, c)).or_default().push(t);
            edges.entry(edge_key(c, a)).or_default().push(t);
        }

        let mut touched = vec![false; self.triangles.len()];
        let mut flips = 0;

        for t in 0..self.triangles.len() {
            if touched[t] || self.circles[t].is_null() {
                continue;
            }

            let triangle = self.triangles[t];
            for k in 0..3 {
                // c is opposite to edge a-b
                let (a, b, c) = (triangle[(k + 1) % 3], triangle[(k + 2) % 3], triangle[k]);

                let other = edges
                    .get(&edge_key(a, b))
                    .and_then(|shared| shared.iter().copied().find(|&u| u != t));

                let u = match other {
                    Some(u) if !touched[u] => u,
                    _ => continue,
                };

                let d = match self.triangles[u].iter().copied().find(|&v| v != a && v != b) {
                    Some(d) => d,
                    None => continue,
                };

                if self.circles[t].strictly_contains(&points[d], FLIP_EPSILON)
                    && is_flippable(&points[a], &points[b], &points[c], &points[d])
                {
                    self.triangles[t] = [c, a, d];
                    self.triangles[u] = [c, d, b];
                    self.circles[t] = Self::circle_of(points, self.triangles[t]);
                    self.circles[u] = Self::circle_of(points, self.triangles[u]);
                    touched[t] = true;
                    touched[u] = true;
                    flips += 1;
                    break;
                }
            }
        }

        if flips > 0 {
            self.adjacency = build_adjacency(&self.triangles, points.len());
        }

        debug!("Flip repair pass: {} flips over {} triangles", flips, self.triangles.len());
        flips
    }

    /// Runs [Triangulation::flip_repair] until no flip happens, or `max_passes` is reached.
    ///
    /// Returns the number of passes run and whether the last one had no flips.
    pub fn flip_repair_until_stable(&mut self, points: &[Point], max_passes: usize) -> (usize, bool) {
        for pass in 1..=max_passes {
            if self.flip_repair(points) == 0 {
                return (pass, true);
            }
        }

        warn!("Flip repair did not stabilize after {} passes", max_passes);
        (max_passes, false)
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::utils::generate_disc_sites;

    fn assert_symmetric(triangulation: &Triangulation) {
        for (a, neighbors) in triangulation.adjacency().iter().enumerate() {
            for &b in neighbors {
                assert_ne!(a, b, "A point is not its own neighbor");
                assert!(triangulation.neighbors(b).contains(&a), "{} is adjacent to {}, but not the opposite", b, a);
            }
        }
    }

    fn assert_delaunay(triangulation: &Triangulation, points: &[Point]) {
        for (t, circle) in triangulation.triangles().iter().zip(triangulation.circles()) {
            for (i, p) in points.iter().enumerate() {
                if !t.contains(&i) {
                    assert!(!circle.strictly_contains(p, 1e-6), "Point {} is inside the circumcircle of {:?}", i, t);
                }
            }
        }
    }

    /// Diagonal a-b of the quad a, c, b, d is not Delaunay, c-d is.
    fn illegal_quad() -> (Vec<Point>, Vec<[usize; 3]>) {
        let points = vec![Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(2.0, 1.0), Point::new(2.0, -1.0)];
        (points, vec![[0, 1, 2], [0, 3, 1]])
    }

    #[test]
    fn delaunator_adjacency_is_symmetric() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let points = generate_disc_sites(300, 10.0, &mut rng);
        let triangulation = Triangulation::triangulate(&points, &DelaunatorTriangulator);

        assert!(!triangulation.is_empty());
        assert_eq!(triangulation.len(), triangulation.circles().len());
        assert_symmetric(&triangulation);
        assert!(points.iter().enumerate().all(|(i, _)| !triangulation.neighbors(i).is_empty()), "All points are triangulated");
    }

    #[test]
    fn delaunator_output_needs_no_flip() {
        let mut rng = ChaCha8Rng::seed_from_u64(10);
        let points = generate_disc_sites(100, 10.0, &mut rng);
        let mut triangulation = Triangulation::triangulate(&points, &DelaunatorTriangulator);
        assert_eq!(0, triangulation.flip_repair(&points));
    }

    #[test]
    fn unknown_vertex_skips_triangle() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0), Point::new(1.0, 1.0)];
        let triangles = [
            [points[0], points[1], points[2]],
            [points[1], points[3], Point::new(7.0, 7.0)],
            [points[1], points[1], points[2]],
        ];

        let triangulation = Triangulation::from_coordinate_triangles(&points, &triangles);
        assert_eq!(&[[0, 1, 2]], triangulation.triangles());
        assert!(triangulation.neighbors(3).is_empty(), "Point 3 is only in the skipped triangles");
        assert_eq!(&[1, 2], triangulation.neighbors(0));
        assert_symmetric(&triangulation);
    }

    #[test]
    fn closure_triangulator() {
        let points = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
        let single = |p: &[Point]| vec![[p[0], p[1], p[2]]];
        let triangulation = Triangulation::triangulate(&points, &single);
        assert_eq!(1, triangulation.len());
        assert_eq!(Point::new(0.5, 0.5), triangulation.circles()[0].center);
    }

    #[test]
    fn flip_repair_fixes_illegal_edge() {
        let (points, triangles) = illegal_quad();
        let mut triangulation = Triangulation::from_index_triangles(&points, triangles);
        assert!(!triangulation.neighbors(2).contains(&3));

        assert_eq!(1, triangulation.flip_repair(&points), "One illegal edge");
        assert!(triangulation.neighbors(2).contains(&3), "Diagonal is now 2-3");
        assert!(!triangulation.neighbors(0).contains(&1), "Diagonal 0-1 is gone");
        assert_symmetric(&triangulation);
        assert_delaunay(&triangulation, &points);

        assert_eq!(0, triangulation.flip_repair(&points), "Repair is idempotent once legal");
    }

    #[test]
    fn flip_repair_terminates_from_fan_triangulation() {
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut angles: Vec<f64> = (0..16).map(|_| rng.gen_range(0.0..std::f64::consts::TAU)).collect();
        angles.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let points: Vec<Point> = angles.iter().map(|a| Point::new(3.0 * a.cos(), a.sin())).collect();

        // fan from the first vertex of a convex polygon: valid, but far from Delaunay
        let fan = (1..points.len() - 1).map(|i| [0, i, i + 1]).collect();
        let mut triangulation = Triangulation::from_index_triangles(&points, fan);

        let (passes, stable) = triangulation.flip_repair_until_stable(&points, 200);
        assert!(stable, "Flip repair must not cycle");
        assert!(passes <= 200);
        assert_eq!(points.len() - 2, triangulation.len(), "Flips keep the number of triangles");
        assert_symmetric(&triangulation);
        assert_delaunay(&triangulation, &points);
    }

    #[test]
    fn refresh_circles_follows_points() {
        let (mut points, triangles) = illegal_quad();
        let mut triangulation = Triangulation::from_index_triangles(&points, triangles);
        points.iter_mut().for_each(|p| *p = *p + Point::new(10.0, 0.0));
        triangulation.refresh_circles(&points);
        assert_eq!(Point::new(12.0, -1.5), triangulation.circles()[0].center);
    }
}
