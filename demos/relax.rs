use std::{fs::File, io::{BufReader, BufWriter}, path::PathBuf};

use clap::{ArgEnum, Parser};
use lloyd_cvt::{io, CenteringStrategy, RelaxationBuilder, TriangulationMode};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ArgEnum)]
enum Strategy {
    Centroid,
    Welzl,
    Square,
    OrientedBox,
    Octagon,
    KNearest,
    Mean,
}

/// Relaxes points inside a disc, then writes the final points and the energy of every iteration.
#[derive(Debug, Parser)]
#[clap(version, about)]
struct Args {
    /// Number of random interior points
    #[clap(short, long, default_value_t = 100)]
    sites: usize,

    /// Number of points evenly spaced on the domain circle
    #[clap(long, default_value_t = 50)]
    ring: usize,

    #[clap(short, long, default_value_t = 10.0)]
    radius: f64,

    #[clap(short, long, default_value_t = 100)]
    iterations: usize,

    /// Fraction of the way to its target each point moves, in [0, 1]
    #[clap(long, default_value_t = 1.0)]
    step: f64,

    #[clap(long, arg_enum, default_value = "centroid")]
    strategy: Strategy,

    /// Neighbors used by the k-nearest strategy
    #[clap(short, default_value_t = 8)]
    k: usize,

    /// Repair the triangulation with edge flips instead of triangulating again
    #[clap(long)]
    flip_repair: bool,

    #[clap(long, default_value_t = 42)]
    seed: u64,

    /// Start from the points in this file instead of random ones
    #[clap(long)]
    input: Option<PathBuf>,

    #[clap(long, default_value = "points.txt")]
    output: PathBuf,

    #[clap(long, default_value = "energy.csv")]
    energy: PathBuf,
}

fn main() -> lloyd_cvt::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let strategy = match args.strategy {
        Strategy::Centroid => CenteringStrategy::Centroid,
        Strategy::Welzl => CenteringStrategy::MinEnclosingCircle,
        Strategy::Square => CenteringStrategy::BoundingBox,
        Strategy::OrientedBox => CenteringStrategy::OrientedBox,
        Strategy::Octagon => CenteringStrategy::OrientedOctagon,
        Strategy::KNearest => CenteringStrategy::KNearest { k: args.k },
        Strategy::Mean => CenteringStrategy::Mean,
    };

    let mode = if args.flip_repair { TriangulationMode::FlipRepair } else { TriangulationMode::Full };

    let builder = RelaxationBuilder::default()
        .set_radius(args.radius)
        .set_step(args.step)
        .set_strategy(Some(strategy))
        .set_triangulation_mode(mode)
        .set_seed(args.seed);

    let builder = match &args.input {
        Some(path) => {
            info!("Reading points from {}", path.display());
            builder.set_sites(io::read_point_list(BufReader::new(File::open(path)?))?)
        },
        None => builder
            .generate_random_sites(args.sites, args.radius - 1.0)
            .add_ring_sites(args.ring),
    };

    let mut relaxation = builder.build()?;
    info!("Relaxing {} points, {} on the border", relaxation.points().len(), relaxation.border().len());

    let ran = relaxation.run(args.iterations);
    let energy = relaxation.energy();
    info!(
        "Ran {} iterations, energy {:?} -> {:?}, {} spikes clamped",
        ran,
        energy.clamped().first(),
        energy.last(),
        energy.spikes()
    );

    io::write_point_list(&mut BufWriter::new(File::create(&args.output)?), relaxation.points())?;
    io::write_energy_csv(&mut BufWriter::new(File::create(&args.energy)?), energy.clamped())?;
    info!("Wrote {} and {}", args.output.display(), args.energy.display());

    Ok(())
}
