//! Merit Beads headless driver
//!
//! Runs a session without a renderer: beads are dropped at seeded
//! pseudo-random positions on a fixed cadence and every cue is logged.

use std::path::PathBuf;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use merit_beads::feedback::{Cue, Feedback, FeedbackSink};
use merit_beads::{GameEvent, Runner, Settings, World};

/// Drop beads into the box and watch them fuse
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Seed for drop positions
    #[arg(long, default_value_t = 7)]
    seed: u64,

    /// Simulation ticks to run
    #[arg(long, default_value_t = 7200)]
    ticks: u32,

    /// Ticks between drops
    #[arg(long, default_value_t = 30)]
    interval: u32,

    /// JSON settings file
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,
}

/// Logs cues instead of playing them
struct LogSink;

impl FeedbackSink for LogSink {
    fn play(&mut self, cue: Cue, volume: f32) {
        let tone = cue.tone();
        log::debug!(
            "cue {:?}: {:.0}->{:.0} Hz for {:.2}s at {:.2}",
            cue,
            tone.start_hz,
            tone.end_hz,
            tone.duration,
            volume
        );
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = cli
        .settings
        .as_deref()
        .map(Settings::load)
        .unwrap_or_default();

    log::info!("Merit Beads starting with seed {}", cli.seed);

    let feedback = Feedback::new(&settings);
    let mut sink = LogSink;
    let mut rng = Pcg32::seed_from_u64(cli.seed);
    let world = match World::with_settings(&settings) {
        Ok(world) => world,
        Err(e) => {
            log::error!("Cannot start: {}", e);
            std::process::exit(2);
        }
    };
    let mut runner = Runner::new(world);
    let width = settings.container_width;
    let timestep = runner.timestep();
    let interval = cli.interval.max(1);

    for tick in 0..cli.ticks {
        if tick % interval == 0 {
            // Keep drops clear of the walls, as a player would
            let x = rng.random_range(0.1 * width..0.9 * width);
            if let Err(e) = runner.drop_at(x) {
                feedback.on_error(&e, &mut sink);
            }
        }

        let events = runner.advance(timestep);
        feedback.on_events(&events, &mut sink);

        for event in &events {
            match event {
                GameEvent::Merged { from, at, points, .. } => {
                    log::info!("Tier {} pair fused at ({:.0}, {:.0}) +{}", from, at.x, at.y, points);
                }
                GameEvent::Won { score } => {
                    log::info!("Rainbow bead formed at tick {}! Score {}", tick, score);
                }
                GameEvent::BodySpawned { .. } => {}
            }
        }
    }

    let world = runner.world();
    println!(
        "score: {}  won: {}  beads: {}  ticks: {}",
        world.score(),
        world.won(),
        world.body_count(),
        world.time_ticks()
    );
}
