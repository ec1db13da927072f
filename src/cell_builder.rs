use tracing::debug;

use crate::{Point, Triangulation};

/// Unsorted Voronoi cell corners of every point, derived from a [Triangulation].
///
/// The corners of the cell of point `i` are the circumcenters of the triangles incident to `i`.
/// They come in triangle order, which is not a polygon order; see [crate::sort_cell_boundary].
#[derive(Debug, Clone, Default)]
pub struct VoronoiCells {
    circumcenters: Vec<Point>,
    cell_triangles: Vec<Vec<usize>>,
}

impl VoronoiCells {
    /// Builds the cells of `num_of_points` points from the cached circumcircles of `triangulation`.
    pub fn build(triangulation: &Triangulation, num_of_points: usize) -> Self {
        let mut cells = Self::default();
        cells.rebuild(triangulation, num_of_points);
        cells
    }

    /// Clears the cells and builds them again from `triangulation`.
    pub fn rebuild(&mut self, triangulation: &Triangulation, num_of_points: usize) {
        self.circumcenters.clear();
        self.cell_triangles.clear();
        self.cell_triangles.resize(num_of_points, Vec::new());

        for (t, (triangle, circle)) in triangulation.triangles().iter().zip(triangulation.circles()).enumerate() {
            self.circumcenters.push(circle.center);

            // a degenerate triangle has no circumcenter to give
            if circle.is_null() {
                continue;
            }

            for &vertex in triangle {
                self.cell_triangles[vertex].push(t);
            }
        }

        debug!("Built {} cells with {} vertices", self.cell_triangles.len(), self.circumcenters.len());
    }

    /// Flat list of circumcenters, one per triangle in triangulation order. Degenerate triangles give [crate::Circle::NULL]'s center.
    pub fn circumcenters(&self) -> &[Point] {
        &self.circumcenters
    }

    /// Indices (into [VoronoiCells::circumcenters]) of the corners of the cell of `site`.
    pub fn cell_triangles(&self, site: usize) -> &[usize] {
        self.cell_triangles.get(site).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterator over the corners of the cell of `site`.
    pub fn cell_vertices(&self, site: usize) -> impl Iterator<Item = &Point> + '_ {
        self.cell_triangles(site).iter().map(move |&t| &self.circumcenters[t])
    }

    /// Corners of the cell of `site`, copied.
    pub fn corners(&self, site: usize) -> Vec<Point> {
        self.cell_vertices(site).copied().collect()
    }

    pub fn len(&self) -> usize {
        self.cell_triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cell_triangles.is_empty()
    }
}
