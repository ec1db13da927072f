use tracing::debug;

use crate::Point;

/// Set of point indices pinned against relaxation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BorderSet {
    flags: Vec<bool>,
    len: usize,
}

impl BorderSet {
    pub fn with_capacity(num_of_points: usize) -> Self {
        Self {
            flags: vec![false; num_of_points],
            len: 0,
        }
    }

    /// Adds `index` to the set. Returns `true` if it was not already there.
    pub fn insert(&mut self, index: usize) -> bool {
        if index >= self.flags.len() {
            self.flags.resize(index + 1, false);
        }

        if self.flags[index] {
            false
        } else {
            self.flags[index] = true;
            self.len += 1;
            true
        }
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Border indices in increasing order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.flags.iter().enumerate().filter_map(|(i, &b)| if b { Some(i) } else { None })
    }

    pub fn clear(&mut self) {
        self.flags.iter_mut().for_each(|f| *f = false);
        self.len = 0;
    }
}

/// Finds the points on the boundary of the disc of radius `radius` centered at the origin.
///
/// A point is on the border if its distance to the origin is more than `radius - epsilon`.
/// Border points are projected back onto the circle, keeping their angle.
/// Points already on the circle stay there, so classifying twice gives the same set.
pub fn classify_border(points: &mut [Point], radius: f64, epsilon: f64) -> BorderSet {
    let mut border = BorderSet::with_capacity(points.len());

    for (i, point) in points.iter_mut().enumerate() {
        if point.norm() > radius - epsilon {
            let angle = point.y.atan2(point.x);
            *point = Point { x: radius * angle.cos(), y: radius * angle.sin() };
            border.insert(i);
        }
    }

    debug!("{} of {} points are on the border", border.len(), points.len());
    border
}
