//! Only Sun headless runner
//!
//! Plays autopiloted runs at a simulated 60 Hz refresh and prints each run
//! summary as JSON. Useful for balance checks against a config file.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use only_sun::persistence::{FileStore, KeyValueStore, MemoryStore};
    use only_sun::platform::FrameDriver;
    use only_sun::sim::{ManualClock, TickOutcome, Viewport, steer};
    use only_sun::{GameConfig, Session};

    /// Host refresh interval being simulated
    const FRAME_MS: f64 = 1000.0 / 60.0;

    #[derive(Parser, Debug)]
    #[command(name = "only-sun", about = "Run Only Sun headless with the autopilot")]
    struct Args {
        /// Spawn RNG seed
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Number of runs to play
        #[arg(long, default_value_t = 1)]
        runs: u32,
        /// Frame cap per run
        #[arg(long, default_value_t = 60 * 60 * 10)]
        frames: u64,
        #[arg(long, default_value_t = 390.0)]
        width: f32,
        #[arg(long, default_value_t = 844.0)]
        height: f32,
        /// JSON file overriding game constants
        #[arg(long)]
        config: Option<PathBuf>,
        /// Directory for the persisted high score (in-memory if omitted)
        #[arg(long)]
        store_dir: Option<PathBuf>,
    }

    pub fn run() -> Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let args = Args::parse();
        let config = match &args.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        let store: Box<dyn KeyValueStore> = match &args.store_dir {
            Some(dir) => Box::new(FileStore::new(dir)),
            None => Box::new(MemoryStore::new()),
        };

        let clock = ManualClock::new(0);
        let mut session = Session::new(
            config,
            Viewport::new(args.width, args.height),
            args.seed,
            Box::new(clock.clone()),
            store,
        );
        log::info!("Only Sun (headless) seed {}", args.seed);

        let mut time_ms: f64 = 0.0;
        for run in 0..args.runs {
            session.start();
            let mut driver = FrameDriver::new();

            for _ in 0..args.frames {
                let command = steer(session.state(), session.config());
                session.set_movement_intent(command.intent);
                if command.fire {
                    session.fire_projectile();
                }

                time_ms += FRAME_MS;
                clock.set(time_ms.round() as u64);
                if let TickOutcome::Ended(_) = driver.on_frame(&mut session, time_ms) {
                    break;
                }
            }

            let summary = match session.last_summary() {
                Some(summary) => *summary,
                None => session.end().context("run was not in progress")?,
            };
            println!("{}", serde_json::to_string(&summary)?);
            log::info!("Run {} finished with score {}", run + 1, summary.score);

            // Pause between runs, as a player would
            time_ms += 1_000.0;
            clock.set(time_ms.round() as u64);
        }

        log::info!(
            "Best score: {}, coins: {}",
            session.high_score(),
            session.coins()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on web
}
