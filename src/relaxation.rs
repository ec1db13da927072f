use std::time::Instant;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::{
    border::classify_border,
    cell_sorter::{sort_cell_boundaries, Segment},
    energy::{cell_energy, total_energy},
    error::{LloydError, Result},
    BorderSet, Center, CellContext, CenteringStrategy, Circle, EnergySeries, Point, Triangulation, Triangulator,
    VoronoiCells,
};

/// How the triangulation follows the points after they moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangulationMode {
    /// Triangulates from scratch with the [Triangulator].
    Full,
    /// Keeps the connectivity and restores the Delaunay property with edge flips, see [Triangulation::flip_repair].
    FlipRepair,
}

impl Default for TriangulationMode {
    fn default() -> Self {
        TriangulationMode::Full
    }
}

/// Parameters of a [Relaxation]. See [crate::RelaxationBuilder] for how to set them.
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxationConfig {
    /// Radius of the domain disc, centered at the origin.
    pub radius: f64,
    /// Points further than `radius - border_epsilon` from the origin are border points.
    pub border_epsilon: f64,
    /// Damping of each move, in `[0, 1]`. 1 moves the point to its target.
    pub step: f64,
    /// `None` leaves every point in place.
    pub strategy: Option<CenteringStrategy>,
    pub triangulation_mode: TriangulationMode,
    /// Maximum flip repair passes after a relaxation, in [TriangulationMode::FlipRepair].
    pub max_flip_passes: usize,
    /// Only cells with their site within `energy_radius_factor * radius` of the origin add to the total energy.
    pub energy_radius_factor: f64,
    /// Energy totals more than `spike_factor` times the previous one are clamped, see [EnergySeries].
    pub spike_factor: f64,
    /// A pass whose largest move is under this distance converges the relaxation. 0 disables it.
    pub convergence_threshold: f64,
    pub seed: u64,
}

impl Default for RelaxationConfig {
    fn default() -> Self {
        Self {
            radius: 10.0,
            border_epsilon: 1e-4,
            step: 1.0,
            strategy: Some(CenteringStrategy::Centroid),
            triangulation_mode: TriangulationMode::Full,
            max_flip_passes: 64,
            energy_radius_factor: 0.8,
            spike_factor: 2.0,
            convergence_threshold: 0.0,
            seed: 42,
        }
    }
}

impl RelaxationConfig {
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(LloydError::InvalidConfig(message));

        if !(self.radius.is_finite() && self.radius > 0.0) {
            return invalid(format!("radius must be positive, got {}", self.radius));
        }

        if !(self.border_epsilon >= 0.0 && self.border_epsilon < self.radius) {
            return invalid(format!("border epsilon must be in [0, radius), got {}", self.border_epsilon));
        }

        if !(0.0..=1.0).contains(&self.step) {
            return invalid(format!("step must be in [0, 1], got {}", self.step));
        }

        if let Some(CenteringStrategy::KNearest { k: 0 }) = self.strategy {
            return invalid("k nearest strategy needs k > 0".to_string());
        }

        if self.triangulation_mode == TriangulationMode::FlipRepair && self.max_flip_passes == 0 {
            return invalid("flip repair needs at least one pass".to_string());
        }

        if !(self.energy_radius_factor.is_finite() && self.energy_radius_factor >= 0.0) {
            return invalid(format!("energy radius factor must be non-negative, got {}", self.energy_radius_factor));
        }

        if !(self.spike_factor.is_finite() && self.spike_factor >= 1.0) {
            return invalid(format!("spike factor must be at least 1, got {}", self.spike_factor));
        }

        if !(self.convergence_threshold.is_finite() && self.convergence_threshold >= 0.0) {
            return invalid(format!("convergence threshold must be non-negative, got {}", self.convergence_threshold));
        }

        Ok(())
    }
}

/// Where a [Relaxation] is in its iteration cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelaxationState {
    /// Geometry is up to date with the points.
    Idle,
    /// Points moved, the triangulation and the cells are stale.
    AwaitingTriangulation,
    /// A pass is running.
    Relaxing,
    /// The last pass moved no point further than the convergence threshold.
    Converged,
}

/// Summary of one relaxation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PassReport {
    /// Points that got a new position.
    pub moved: usize,
    /// Interior points left in place because they had nothing to center on.
    pub skipped: usize,
    /// Points pinned as border during this pass.
    pub newly_pinned: usize,
    /// Largest distance moved by a point.
    pub max_displacement: f64,
}

/// Output of [relax_points].
#[derive(Debug, Clone, Default)]
pub struct RelaxedPoints {
    pub points: Vec<Point>,
    /// Points whose neighborhood was degenerate, to be pinned as border.
    pub pinned: Vec<usize>,
    /// Minimum enclosing circles computed during the pass.
    pub circles: Vec<Circle>,
    /// Oriented boxes (or octagons) computed during the pass.
    pub outlines: Vec<Vec<Point>>,
    pub report: PassReport,
}

/// One relaxation pass: moves every non border point of `context` towards the center `strategy` gives it.
///
/// Targets are computed from the positions in `context`, and the moved points are returned, the input is left untouched.
/// A point with a degenerate minimum enclosing circle (see [Center::is_degenerate]) does not move and is reported
/// in [RelaxedPoints::pinned]. Without a strategy no point moves.
pub fn relax_points<R: Rng + ?Sized>(
    context: &CellContext,
    border: &BorderSet,
    strategy: Option<CenteringStrategy>,
    step: f64,
    rng: &mut R,
) -> RelaxedPoints {
    let mut relaxed = RelaxedPoints {
        points: context.points.to_vec(),
        ..Default::default()
    };

    let strategy = match strategy {
        Some(strategy) => strategy,
        None => {
            let interior = (0..context.points.len()).filter(|&i| !border.contains(i)).count();
            warn!("No centering strategy selected, {} points left in place", interior);
            relaxed.report.skipped = interior;
            return relaxed;
        }
    };

    for (i, point) in context.points.iter().enumerate() {
        if border.contains(i) {
            continue;
        }

        let center = strategy.compute_center(i, context, rng);
        let target = match &center {
            Center::EnclosingCircle(circle) => {
                if center.is_degenerate() {
                    warn!("Degenerate enclosing circle for point {} at {:?}, pinning it as border", i, point);
                    relaxed.pinned.push(i);
                    relaxed.report.newly_pinned += 1;
                    continue;
                }

                relaxed.circles.push(*circle);
                circle.center
            },
            Center::Outline { center, outline } => {
                relaxed.outlines.push(outline.clone());
                *center
            },
            Center::Point(center) => *center,
            Center::Undefined => {
                debug!("Point {} at {:?} has nothing to center on, skipping it", i, point);
                relaxed.report.skipped += 1;
                continue;
            },
        };

        let new_position = point.lerp(&target, step);
        let displacement = crate::utils::distance(point, &new_position);
        relaxed.report.max_displacement = relaxed.report.max_displacement.max(displacement);
        relaxed.report.moved += 1;
        relaxed.points[i] = new_position;
    }

    relaxed
}

/// Lloyd relaxation of a point set inside a disc.
///
/// Owns the points and everything derived from them. Each [Relaxation::iterate] runs one pass, triangulates
/// the moved points, rebuilds the cells and records the energy. Build it with [crate::RelaxationBuilder].
pub struct Relaxation {
    config: RelaxationConfig,
    points: Vec<Point>,
    triangulator: Box<dyn Triangulator>,
    triangulation: Triangulation,
    cells: VoronoiCells,
    border: BorderSet,
    border_is_valid: bool,
    boundaries: Vec<Vec<Segment>>,
    energy: EnergySeries,
    enclosing_circles: Vec<Circle>,
    outlines: Vec<Vec<Point>>,
    state: RelaxationState,
    iterations: usize,
    rng: ChaCha8Rng,
}

impl std::fmt::Debug for Relaxation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Relaxation")
            .field("config", &self.config)
            .field("points", &self.points.len())
            .field("triangles", &self.triangulation.len())
            .field("border", &self.border.len())
            .field("state", &self.state)
            .field("iterations", &self.iterations)
            .finish()
    }
}

impl Relaxation {
    pub(crate) fn new(config: RelaxationConfig, points: Vec<Point>, triangulator: Box<dyn Triangulator>, rng: ChaCha8Rng) -> Self {
        let mut relaxation = Self {
            energy: EnergySeries::new(config.spike_factor),
            config,
            points,
            triangulator,
            triangulation: Triangulation::default(),
            cells: VoronoiCells::default(),
            border: BorderSet::default(),
            border_is_valid: false,
            boundaries: Vec::new(),
            enclosing_circles: Vec::new(),
            outlines: Vec::new(),
            state: RelaxationState::AwaitingTriangulation,
            iterations: 0,
            rng,
        };

        relaxation.update_geometry();
        relaxation.record_energy();
        relaxation
    }

    /// Replaces the point set. The border, the geometry and the energy series all start over.
    pub fn set_points(&mut self, points: Vec<Point>) -> Result<()> {
        validate_points(&points)?;

        self.points = points;
        self.triangulation = Triangulation::default();
        self.border_is_valid = false;
        self.energy.clear();
        self.enclosing_circles.clear();
        self.outlines.clear();
        self.iterations = 0;
        self.state = RelaxationState::AwaitingTriangulation;

        self.update_geometry();
        self.record_energy();
        Ok(())
    }

    /// Runs one relaxation pass. The geometry is rebuilt first if the points moved since it was last built.
    ///
    /// Leaves the relaxation in [RelaxationState::AwaitingTriangulation].
    pub fn relax(&mut self) -> PassReport {
        if self.state == RelaxationState::AwaitingTriangulation {
            self.update_geometry();
        }

        self.state = RelaxationState::Relaxing;

        let context = CellContext {
            points: &self.points,
            triangulation: &self.triangulation,
            cells: &self.cells,
        };

        let relaxed = relax_points(&context, &self.border, self.config.strategy, self.config.step, &mut self.rng);

        for &i in &relaxed.pinned {
            self.border.insert(i);
        }

        if !relaxed.pinned.is_empty() {
            debug!("{} points pinned this pass, {} border points", relaxed.pinned.len(), self.border.len());
        }

        self.points = relaxed.points;
        self.enclosing_circles = relaxed.circles;
        self.outlines = relaxed.outlines;
        self.state = RelaxationState::AwaitingTriangulation;

        relaxed.report
    }

    /// Brings the triangulation, the cells and the cell boundaries up to date with the points.
    ///
    /// Border points are classified (and clamped onto the domain circle) first, unless already done.
    pub fn update_geometry(&mut self) {
        if !self.border_is_valid {
            self.border = classify_border(&mut self.points, self.config.radius, self.config.border_epsilon);
            self.border_is_valid = true;
        }

        let reuse_connectivity = self.config.triangulation_mode == TriangulationMode::FlipRepair
            && !self.triangulation.is_empty()
            && self.triangulation.adjacency().len() == self.points.len();

        if reuse_connectivity {
            let (passes, stable) = self.triangulation.flip_repair_until_stable(&self.points, self.config.max_flip_passes);
            debug!("Flip repair ran {} passes, stable: {}", passes, stable);
        } else {
            self.triangulation = Triangulation::triangulate(&self.points, self.triangulator.as_ref());
        }

        self.cells.rebuild(&self.triangulation, self.points.len());
        self.boundaries = sort_cell_boundaries(&self.points, &self.cells, &self.border);

        if self.state != RelaxationState::Converged {
            self.state = RelaxationState::Idle;
        }
    }

    /// Computes the total energy of the current geometry and appends it to the energy series.
    ///
    /// Returns the value kept, which differs from the total if it was clamped.
    pub fn record_energy(&mut self) -> f64 {
        let radius = self.config.radius * self.config.energy_radius_factor;
        let energy = total_energy(&self.points, &self.boundaries, radius);
        self.energy.push(energy)
    }

    /// One full iteration: relax, update the geometry and record the energy.
    pub fn iterate(&mut self) -> PassReport {
        let start = Instant::now();

        let report = self.relax();
        self.update_geometry();
        let energy = self.record_energy();
        self.iterations += 1;

        let threshold = self.config.convergence_threshold;
        self.state = if threshold > 0.0 && report.max_displacement < threshold {
            RelaxationState::Converged
        } else {
            RelaxationState::Idle
        };

        info!(
            "Iteration {}: moved {}, skipped {}, pinned {}, max displacement {:.6}, energy {:.6} ({:?})",
            self.iterations,
            report.moved,
            report.skipped,
            report.newly_pinned,
            report.max_displacement,
            energy,
            start.elapsed()
        );

        report
    }

    /// Iterates up to `iterations` times, stopping early once converged. Returns the number of iterations run.
    pub fn run(&mut self, iterations: usize) -> usize {
        for i in 0..iterations {
            if self.state == RelaxationState::Converged {
                return i;
            }

            self.iterate();
        }

        iterations
    }

    /// Classifies the border again when the geometry is next updated. Points pinned during passes are released.
    pub fn invalidate_border(&mut self) {
        self.border_is_valid = false;
        self.state = RelaxationState::AwaitingTriangulation;
    }

    /// Clears the energy series, keeping the geometry.
    pub fn reset_energy(&mut self) {
        self.energy.clear();
    }

    /// Energy of the cell of point `index`, from its current boundary. `None` if there is no such point.
    pub fn cell_energy(&self, index: usize) -> Option<f64> {
        let site = self.points.get(index)?;
        self.boundaries.get(index).map(|segments| cell_energy(site, segments))
    }

    pub fn config(&self) -> &RelaxationConfig {
        &self.config
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn triangulation(&self) -> &Triangulation {
        &self.triangulation
    }

    pub fn cells(&self) -> &VoronoiCells {
        &self.cells
    }

    /// Circumcenters of every triangle, i.e. the Voronoi vertices.
    pub fn circumcenters(&self) -> &[Point] {
        self.cells.circumcenters()
    }

    /// Circumcircles of every triangle.
    pub fn circumcircles(&self) -> &[Circle] {
        self.triangulation.circles()
    }

    /// Sorted boundary segments of each cell. Empty for border points.
    pub fn boundaries(&self) -> &[Vec<Segment>] {
        &self.boundaries
    }

    /// Minimum enclosing circles computed by the last pass.
    pub fn enclosing_circles(&self) -> &[Circle] {
        &self.enclosing_circles
    }

    /// Oriented boxes or octagons computed by the last pass.
    pub fn outlines(&self) -> &[Vec<Point>] {
        &self.outlines
    }

    pub fn border(&self) -> &BorderSet {
        &self.border
    }

    pub fn energy(&self) -> &EnergySeries {
        &self.energy
    }

    pub fn state(&self) -> RelaxationState {
        self.state
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

/// Rejects point sets the relaxation cannot start from.
pub(crate) fn validate_points(points: &[Point]) -> Result<()> {
    if points.is_empty() {
        return Err(LloydError::EmptyPointSet);
    }

    if let Some(i) = points.iter().position(|p| !p.is_finite()) {
        return Err(LloydError::InvalidConfig(format!("point {} is not finite: {:?}", i, points[i])));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;

    use super::*;
    use crate::{utils::generate_ring_sites, DelaunatorTriangulator};

    fn ring_with_center() -> Vec<Point> {
        let mut points = vec![Point::new(1.0, 0.5), Point::new(-2.0, 1.0), Point::new(0.5, -3.0)];
        points.extend(generate_ring_sites(12, 10.0));
        points
    }

    fn relaxation(config: RelaxationConfig, points: Vec<Point>) -> Relaxation {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Relaxation::new(config, points, Box::new(DelaunatorTriangulator), rng)
    }

    #[test]
    fn default_config_is_valid() {
        assert!(RelaxationConfig::default().validate().is_ok());
    }

    #[test]
    fn invalid_configs() {
        let configs = [
            RelaxationConfig { radius: 0.0, ..Default::default() },
            RelaxationConfig { radius: f64::NAN, ..Default::default() },
            RelaxationConfig { step: 1.5, ..Default::default() },
            RelaxationConfig { step: -0.1, ..Default::default() },
            RelaxationConfig { border_epsilon: -1.0, ..Default::default() },
            RelaxationConfig { strategy: Some(CenteringStrategy::KNearest { k: 0 }), ..Default::default() },
            RelaxationConfig { triangulation_mode: TriangulationMode::FlipRepair, max_flip_passes: 0, ..Default::default() },
            RelaxationConfig { spike_factor: 0.5, ..Default::default() },
            RelaxationConfig { convergence_threshold: -1.0, ..Default::default() },
        ];

        for config in configs.iter() {
            assert!(matches!(config.validate(), Err(LloydError::InvalidConfig(_))), "{:?} must be rejected", config);
        }
    }

    #[test]
    fn point_validation() {
        assert!(matches!(validate_points(&[]), Err(LloydError::EmptyPointSet)));
        assert!(matches!(validate_points(&[Point::new(0.0, f64::INFINITY)]), Err(LloydError::InvalidConfig(_))));
        assert!(validate_points(&[Point::ORIGIN]).is_ok());
    }

    #[test]
    fn border_points_never_move() {
        let mut relaxation = relaxation(RelaxationConfig::default(), ring_with_center());
        let ring: Vec<Point> = relaxation.points()[3..].to_vec();

        assert_eq!(12, relaxation.border().len());
        for _ in 0..5 {
            relaxation.iterate();
        }

        assert_eq!(ring.as_slice(), &relaxation.points()[3..]);
        assert_ne!(ring_with_center()[..3], relaxation.points()[..3], "Interior points moved");
    }

    #[test]
    fn point_without_cell_is_skipped() {
        let mut points = ring_with_center();
        points.push(Point::new(1.0, 0.5));
        let duplicate = points.len() - 1;
        let mut relaxation = relaxation(RelaxationConfig::default(), points);

        assert!(relaxation.cells().cell_triangles(duplicate).is_empty());

        let report = relaxation.relax();
        assert_eq!(1, report.skipped);
        assert_eq!(3, report.moved);
        assert_eq!(0, report.newly_pinned);
        assert_eq!(1.0_f64.to_bits(), relaxation.points()[duplicate].x.to_bits());
        assert_eq!(0.5_f64.to_bits(), relaxation.points()[duplicate].y.to_bits());
        assert!(!relaxation.border().contains(duplicate));
    }

    #[test]
    fn invalidated_border_releases_pinned_points() {
        let mut points = ring_with_center();
        points.push(Point::new(1.0, 0.5));
        let duplicate = points.len() - 1;
        let config = RelaxationConfig { strategy: Some(CenteringStrategy::MinEnclosingCircle), step: 0.5, ..Default::default() };
        let mut relaxation = relaxation(config, points);

        assert_eq!(12, relaxation.border().len());
        assert_eq!(1, relaxation.iterate().newly_pinned);
        assert_eq!(13, relaxation.border().len());
        assert!(relaxation.border().contains(duplicate));

        relaxation.invalidate_border();
        assert_eq!(RelaxationState::AwaitingTriangulation, relaxation.state());
        assert_eq!(13, relaxation.border().len(), "Classified again on the next geometry update only");

        relaxation.update_geometry();
        assert_eq!(RelaxationState::Idle, relaxation.state());
        assert_eq!(12, relaxation.border().len(), "Only the ring is on the domain circle");
        assert!(!relaxation.border().contains(duplicate));

        assert_eq!(2, relaxation.energy().len());
        relaxation.reset_energy();
        assert!(relaxation.energy().is_empty());

        relaxation.record_energy();
        assert_eq!(1, relaxation.energy().len());
        assert_eq!(0, relaxation.energy().spikes(), "A cleared series has no previous value to clamp against");
    }

    #[test]
    fn zero_step_moves_nothing() {
        let config = RelaxationConfig { step: 0.0, ..Default::default() };
        let mut relaxation = relaxation(config, ring_with_center());
        let report = relaxation.iterate();
        assert_eq!(0.0, report.max_displacement);
        assert_eq!(ring_with_center(), relaxation.points());
    }

    #[test]
    fn half_step_moves_half_way() {
        let points = ring_with_center();
        let mut full = relaxation(RelaxationConfig::default(), points.clone());
        let mut half = relaxation(RelaxationConfig { step: 0.5, ..Default::default() }, points.clone());
        full.relax();
        half.relax();

        for i in 0..3 {
            let expected = points[i].lerp(&full.points()[i], 0.5);
            assert_abs_diff_eq!(expected.x, half.points()[i].x, epsilon = 1e-12);
            assert_abs_diff_eq!(expected.y, half.points()[i].y, epsilon = 1e-12);
        }
    }

    #[test]
    fn no_strategy_skips_every_point() {
        let config = RelaxationConfig { strategy: None, ..Default::default() };
        let mut relaxation = relaxation(config, ring_with_center());
        let report = relaxation.relax();
        assert_eq!(0, report.moved);
        assert_eq!(3, report.skipped);
        assert_eq!(ring_with_center(), relaxation.points());
    }

    #[test]
    fn state_follows_the_cycle() {
        let mut relaxation = relaxation(RelaxationConfig::default(), ring_with_center());
        assert_eq!(RelaxationState::Idle, relaxation.state());
        assert_eq!(1, relaxation.energy().len(), "Baseline energy is recorded on creation");

        relaxation.relax();
        assert_eq!(RelaxationState::AwaitingTriangulation, relaxation.state());
        relaxation.update_geometry();
        assert_eq!(RelaxationState::Idle, relaxation.state());

        relaxation.iterate();
        assert_eq!(1, relaxation.iterations());
        assert_eq!(2, relaxation.energy().len());
    }

    #[test]
    fn converges_under_threshold() {
        let config = RelaxationConfig { convergence_threshold: 1e-3, ..Default::default() };
        let mut relaxation = relaxation(config, ring_with_center());
        let ran = relaxation.run(500);

        assert_eq!(RelaxationState::Converged, relaxation.state());
        assert!(ran < 500);
        assert_eq!(ran, relaxation.iterations());
        assert_eq!(ran, relaxation.run(10) + ran, "A converged relaxation does not iterate");
    }

    #[test]
    fn outside_points_are_clamped_on_creation() {
        let mut points = ring_with_center();
        points.push(Point::new(20.0, 20.0));
        let relaxation = relaxation(RelaxationConfig::default(), points);

        let diagonal = 10.0 * std::f64::consts::FRAC_1_SQRT_2;
        assert_eq!(13, relaxation.border().len());
        assert_eq!(Point::new(diagonal, diagonal), relaxation.points()[15]);
    }

    #[test]
    fn set_points_starts_over() {
        let mut relaxation = relaxation(RelaxationConfig::default(), ring_with_center());
        relaxation.run(3);
        assert_eq!(4, relaxation.energy().len());

        let mut points = vec![Point::ORIGIN];
        points.extend(generate_ring_sites(6, 10.0));
        relaxation.set_points(points).unwrap();

        assert_eq!(1, relaxation.energy().len());
        assert_eq!(0, relaxation.iterations());
        assert_eq!(6, relaxation.border().len());
        assert_eq!(7, relaxation.boundaries().len());
        assert!(matches!(relaxation.set_points(vec![]), Err(LloydError::EmptyPointSet)));
    }

    #[test]
    fn flip_repair_mode_keeps_a_delaunay_triangulation() {
        let config = RelaxationConfig { triangulation_mode: TriangulationMode::FlipRepair, step: 0.3, ..Default::default() };
        let mut points = crate::utils::generate_disc_sites(40, 8.0, &mut ChaCha8Rng::seed_from_u64(3));
        points.extend(generate_ring_sites(30, 10.0));
        let mut relaxation = relaxation(config, points);
        let triangles = relaxation.triangulation().len();

        relaxation.run(5);

        assert_eq!(triangles, relaxation.triangulation().len(), "Flips keep the number of triangles");
        let mut check = relaxation.triangulation().clone();
        assert_eq!(0, check.flip_repair(relaxation.points()));
    }

    #[test]
    fn cell_energy_matches_total() {
        let relaxation = relaxation(RelaxationConfig::default(), ring_with_center());
        let inner: f64 = (0..3).filter_map(|i| relaxation.cell_energy(i)).sum();
        assert_abs_diff_eq!(inner, relaxation.energy().raw()[0], epsilon = 1e-9);
        assert_eq!(Some(0.0), relaxation.cell_energy(5), "Border cells have no boundary");
        assert_eq!(None, relaxation.cell_energy(100));
    }
}
