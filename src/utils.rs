use std::cmp::Ordering;

use crate::Point;

/// Tolerance under which a signed polygon area is considered zero.
pub(crate) const AREA_EPSILON: f64 = 1e-12;

/// Calculates the euclidean distance between a and b
#[inline]
pub fn distance(a: &Point, b: &Point) -> f64 {
    dist2(a, b).sqrt()
}

/// Calculates the squared distance between a and b
#[inline]
pub fn dist2(a: &Point, b: &Point) -> f64 {
    let x = a.x - b.x;
    let y = a.y - b.y;
    (x * x) + (y * y)
}

#[inline]
pub fn abs_diff_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (if a > b {
        a - b
    } else {
        b - a
    }) <= epsilon
}

/// Determinant of a 3x3 matrix given in row-major order.
pub fn determinant3x3(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Arithmetic mean of the points. `None` if there are no points.
pub fn calculate_approximated_centroid<'a>(points: impl Iterator<Item = &'a Point>) -> Option<Point> {
    let mut r = Point { x: 0.0, y: 0.0 };
    let mut n = 0;
    for p in points {
        r.x += p.x;
        r.y += p.y;
        n += 1;
    }

    if n == 0 {
        return None;
    }

    let n = n as f64;
    r.x /= n;
    r.y /= n;

    Some(r)
}

/// Sorts `points` counter-clockwise by `atan2` around their own mean.
///
/// Good enough to give a star-shaped set a consistent winding before computing a polygon centroid,
/// but it is not how a Voronoi cell boundary is built, see [crate::sort_cell_boundary].
pub fn sort_points_ccw(points: &mut [Point]) {
    let center = match calculate_approximated_centroid(points.iter()) {
        Some(center) => center,
        None => return,
    };

    points.sort_by(|a, b| {
        let angle_a = (a.y - center.y).atan2(a.x - center.x);
        let angle_b = (b.y - center.y).atan2(b.x - center.x);
        angle_a.partial_cmp(&angle_b).unwrap_or(Ordering::Equal)
    });
}

/// Signed area of a polygon given by its vertices in order. Positive when counter-clockwise.
pub fn polygon_signed_area(vertices: &[Point]) -> f64 {
    vertices.iter().zip(vertices.iter().cycle().skip(1)).fold(0.0, |acc, (a, b)| acc + a.cross(b)) * 0.5
}

/// Area weighted centroid of a simple polygon whose `vertices` are given in a consistent winding order.
///
/// The result is undefined for self-intersecting polygons: the formula still produces a point, but not the centroid.
/// Polygons with less than 3 vertices, or with (close to) zero area, have no centroid and `None` is returned.
pub fn polygon_centroid(vertices: &[Point]) -> Option<Point> {
    if vertices.len() < 3 {
        return None;
    }

    let mut area = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;

    for (p0, p1) in vertices.iter().zip(vertices.iter().cycle().skip(1)) {
        let cross = p0.cross(p1);
        area += cross;
        cx += (p0.x + p1.x) * cross;
        cy += (p0.y + p1.y) * cross;
    }

    area *= 0.5;
    if area.abs() < AREA_EPSILON {
        return None;
    }

    Some(Point { x: cx / (6.0 * area), y: cy / (6.0 * area) })
}

/// Generates `size` points evenly spaced on a circle of radius `radius` centered at the origin.
pub fn generate_ring_sites(size: usize, radius: f64) -> Vec<Point> {
    (0..size)
        .map(|i| {
            let a = i as f64 * std::f64::consts::TAU / size as f64;
            Point { x: radius * a.cos(), y: radius * a.sin() }
        })
        .collect()
}

/// Generates `size` random points inside a disc of radius `radius` centered at the origin.
///
/// Radius and angle are both sampled uniformly, so points are denser towards the center.
pub fn generate_disc_sites<R: rand::Rng + ?Sized>(size: usize, radius: f64, rng: &mut R) -> Vec<Point> {
    let r_range = rand::distributions::Uniform::new_inclusive(0.0, radius.max(0.0));
    let a_range = rand::distributions::Uniform::new(0.0, std::f64::consts::TAU);
    (0..size)
        .map(|_| {
            let r = rng.sample(r_range);
            let a = rng.sample(a_range);
            Point { x: r * a.cos(), y: r * a.sin() }
        })
        .collect()
}
