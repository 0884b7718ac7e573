//! Brain-shaped particle network in a window.
//!
//! Run with: `cargo run --release --features viewer`
//!
//! Pass `--ambient` to add a cloud of background particles around the shape.

use clap::Parser;
use neuroweb::prelude::*;
use neuroweb::viewer;

/// Half-size of the cube ambient particles live in.
const AMBIENT_HALF_SIZE: f32 = 10.0;
const AMBIENT_COUNT: usize = 150;

#[derive(Parser, Debug)]
#[command(name = "neuroweb")]
#[command(about = "Animated particle network sampled from a brain-like mesh", long_about = None)]
#[command(version)]
struct Cli {
    /// Surround the shape with drifting background particles
    #[arg(long)]
    ambient: bool,

    /// Seed for reproducible initial positions and velocities
    #[arg(long)]
    seed: Option<u64>,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn network_config(&self) -> NetworkConfig {
        let mut config = NetworkConfig::new();
        if self.ambient {
            config = config
                .with_ambient(AmbientConfig::new(AMBIENT_COUNT, AMBIENT_HALF_SIZE))
                .with_max_distance(Some(0.05));
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        config
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if cli.verbose > 0 {
        log::set_max_level(match cli.verbose {
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        });
    }

    // Roughly the proportions of a human brain, in model units.
    let mesh = SourceMesh::ellipsoid(Vec3::new(0.3, 0.25, 0.36), 32, 24);

    let network = Network::new(mesh.positions(), cli.network_config())?;
    log::info!(
        "{} particles, up to {} lines per frame",
        network.store().len(),
        network.graph().lines().capacity()
    );

    viewer::run(network, ViewerConfig::default())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_ambient_flag() {
        let cli = Cli::try_parse_from(["neuroweb", "--ambient", "--seed", "4"]).unwrap();
        let config = cli.network_config();
        assert_eq!(config.ambient_particle_count(), AMBIENT_COUNT);
        assert_eq!(config.max_distance, Some(0.05));
        assert_eq!(config.seed, Some(4));

        let plain = Cli::try_parse_from(["neuroweb"]).unwrap().network_config();
        assert_eq!(plain.ambient_particle_count(), 0);
        assert_eq!(plain.max_distance, None);
    }

    #[test]
    fn test_unknown_argument_rejected() {
        assert!(Cli::try_parse_from(["neuroweb", "--ambinet"]).is_err());
    }
}
