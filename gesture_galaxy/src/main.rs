//! gesture_galaxy: interactive entry point.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use gesture_galaxy::{run, AppConfig};
use log::LevelFilter;

/// Wave to wake the cube, open a hand to expand the galaxy, dwell on a
/// glowing carrier to open its photo.
#[derive(Parser, Debug)]
#[command(name = "gesture_galaxy", version, about)]
struct Cli {
    /// Directory of images to scatter through the galaxy
    #[arg(long, value_name = "DIR")]
    photos: Option<PathBuf>,

    /// Number of particles
    #[arg(long, default_value_t = 600)]
    particles: usize,

    /// Initial window width
    #[arg(long, default_value_t = 1280)]
    width: usize,

    /// Initial window height
    #[arg(long, default_value_t = 720)]
    height: usize,

    /// Use the "Right" tracker label as the pointer hand
    #[arg(long)]
    swap_hands: bool,

    /// Seed for particle placement and carrier selection
    #[arg(long)]
    seed: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> AppConfig {
        let mut cfg = AppConfig {
            photo_dir: self.photos,
            width:     self.width.max(1),
            height:    self.height.max(1),
            seed:      self.seed,
            ..AppConfig::default()
        };
        cfg.session.particle_count = self.particles;
        if self.swap_hands {
            cfg.session.roles = cfg.session.roles.swapped();
        }
        cfg
    }
}

/// Default log level for a `-v` count; `RUST_LOG` still takes precedence.
fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level(cli.verbose).as_str())).init();

    #[cfg(feature = "leap")]
    log::info!("mode: LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    log::info!("mode: mouse/keyboard simulation (build with --features leap for hardware)");

    run(cli.into_config())?;
    Ok(())
}
