use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::{
    error::Result,
    relaxation::validate_points,
    utils::{generate_disc_sites, generate_ring_sites},
    CenteringStrategy, DelaunatorTriangulator, Point, Relaxation, RelaxationConfig, TriangulationMode,
    Triangulator,
};

/// Provides a convenient way to set up a [Relaxation].
pub struct RelaxationBuilder {
    sites: Vec<Point>,
    config: RelaxationConfig,
    triangulator: Box<dyn Triangulator>,
    rng: Option<ChaCha8Rng>,
}

impl Default for RelaxationBuilder {
    fn default() -> Self {
        Self {
            sites: Vec::new(),
            config: RelaxationConfig::default(),
            triangulator: Box::new(DelaunatorTriangulator),
            rng: None,
        }
    }
}

impl RelaxationBuilder {
    /// Sets the whole [RelaxationConfig] at once.
    pub fn set_config(mut self, config: RelaxationConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the radius of the domain disc, centered at the origin.
    pub fn set_radius(mut self, radius: f64) -> Self {
        self.config.radius = radius;
        self
    }

    /// Sets the distance to the domain circle under which a point is a border point.
    pub fn set_border_epsilon(mut self, epsilon: f64) -> Self {
        self.config.border_epsilon = epsilon;
        self
    }

    /// Sets the damping of each move, in `[0, 1]`.
    pub fn set_step(mut self, step: f64) -> Self {
        self.config.step = step;
        self
    }

    /// Sets the [CenteringStrategy]. `None` makes every pass leave the points in place.
    pub fn set_strategy(mut self, strategy: Option<CenteringStrategy>) -> Self {
        self.config.strategy = strategy;
        self
    }

    pub fn set_triangulation_mode(mut self, mode: TriangulationMode) -> Self {
        self.config.triangulation_mode = mode;
        self
    }

    pub fn set_max_flip_passes(mut self, passes: usize) -> Self {
        self.config.max_flip_passes = passes;
        self
    }

    pub fn set_energy_radius_factor(mut self, factor: f64) -> Self {
        self.config.energy_radius_factor = factor;
        self
    }

    pub fn set_spike_factor(mut self, factor: f64) -> Self {
        self.config.spike_factor = factor;
        self
    }

    pub fn set_convergence_threshold(mut self, threshold: f64) -> Self {
        self.config.convergence_threshold = threshold;
        self
    }

    /// Sets the seed of the random generator used for site generation and enclosing circle shuffles.
    /// Already generated sites are kept.
    pub fn set_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self.rng = None;
        self
    }

    /// Sets the [Triangulator] used to triangulate the points. Defaults to [DelaunatorTriangulator].
    pub fn set_triangulator(mut self, triangulator: Box<dyn Triangulator>) -> Self {
        self.triangulator = triangulator;
        self
    }

    /// Sets a vector of [Point]s to relax, replacing any site set or generated before.
    pub fn set_sites(mut self, sites: Vec<Point>) -> Self {
        self.sites = sites;
        self
    }

    fn rng(&mut self) -> &mut ChaCha8Rng {
        let seed = self.config.seed;
        self.rng.get_or_insert_with(|| ChaCha8Rng::seed_from_u64(seed))
    }

    /// Adds `size` random sites inside a disc of radius `radius` centered at the origin.
    ///
    /// Sites are drawn from the seeded generator (see [Self::set_seed]), so the same seed gives the same sites.
    pub fn generate_random_sites(mut self, size: usize, radius: f64) -> Self {
        let sites = generate_disc_sites(size, radius, self.rng());
        self.sites.extend(sites);
        self
    }

    /// Adds `size` sites evenly spaced on the domain circle.
    pub fn add_ring_sites(mut self, size: usize) -> Self {
        self.sites.extend(generate_ring_sites(size, self.config.radius));
        self
    }

    /// Consumes this builder and sets up the relaxation: border classification, first triangulation and baseline energy.
    ///
    /// Fails if the configuration is not valid, or if there are no sites or some are not finite.
    pub fn build(mut self) -> Result<Relaxation> {
        self.config.validate()?;
        validate_points(&self.sites)?;

        let rng = self.rng().clone();
        Ok(Relaxation::new(self.config, self.sites, self.triangulator, rng))
    }
}

impl From<&Relaxation> for RelaxationBuilder {
    /// Creates a builder with the configuration and current points of `relaxation`.
    /// Useful to restart a relaxation from where another one is.
    fn from(relaxation: &Relaxation) -> Self {
        Self::default()
            .set_config(relaxation.config().clone())
            .set_sites(relaxation.points().to_vec())
    }
}

impl std::fmt::Debug for RelaxationBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelaxationBuilder")
            .field("sites", &self.sites.len())
            .field("config", &self.config)
            .finish()
    }
}
