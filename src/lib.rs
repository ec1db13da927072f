//! Lloyd relaxation of 2D points inside a disc, towards a centroidal Voronoi tessellation.
//!
//! Each iteration triangulates the points (with [delaunator](https://docs.rs/delaunator) by default),
//! derives the Voronoi cells from the triangle circumcenters, moves every interior point towards a center of its
//! neighborhood chosen by a [CenteringStrategy], and measures the CVT energy of the result.
//!
//! ```
//! use lloyd_cvt::{CenteringStrategy, RelaxationBuilder};
//!
//! let mut relaxation = RelaxationBuilder::default()
//!     .set_radius(10.0)
//!     .set_strategy(Some(CenteringStrategy::Centroid))
//!     .generate_random_sites(100, 9.0)
//!     .add_ring_sites(50)
//!     .build()
//!     .expect("Valid configuration and sites");
//!
//! relaxation.run(20);
//! assert_eq!(21, relaxation.energy().len());
//! ```

mod border;
mod bounding_box;
mod cell_builder;
mod cell_sorter;
mod circle;
mod energy;
mod error;
pub mod io;
mod point;
mod relaxation;
mod relaxation_builder;
mod strategy;
mod triangulation;
pub mod utils;
mod welzl;

pub use border::{classify_border, BorderSet};
pub use bounding_box::{compute_intersection, oriented_bounding_box, oriented_octagon, BoundingBox};
pub use cell_builder::VoronoiCells;
pub use cell_sorter::{sort_cell_boundaries, sort_cell_boundary, Segment};
pub use circle::Circle;
pub use energy::{cell_energy, total_energy, EnergySeries};
pub use error::{LloydError, Result};
pub use point::{Point, POINT_EPSILON};
pub use relaxation::{
    relax_points, PassReport, RelaxationConfig, RelaxationState, RelaxedPoints, Relaxation, TriangulationMode,
};
pub use relaxation_builder::RelaxationBuilder;
pub use strategy::{k_nearest, Center, CellContext, CenteringStrategy, DEFAULT_K_NEAREST};
pub use triangulation::{index_of_point, DelaunatorTriangulator, Triangulation, Triangulator};
pub use welzl::{minimum_enclosing_circle, minimum_enclosing_circle_ordered};
