use engine::distribution::ensure_valid;
use engine::{EngineConfig, ManualClock, SpinSession};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

use crate::config::SimulatorConfig;
use crate::error::Error;

mod config;
mod error;
mod logging;
mod report;

fn main() {
    dotenvy::from_path(".env").ok();
    logging::setup();

    if let Err(e) = run() {
        error!("Simulation failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let settings = SimulatorConfig::from_env()?;
    let engine_config = EngineConfig::from_env()?;
    let sectors = settings.load_sectors()?;

    // Refuse to simulate a wheel the dashboard would not let anyone spin
    let distribution = ensure_valid(&sectors)?;
    info!(
        "Simulating {} spins over {} prize / {} non-prize sectors",
        settings.spins, distribution.total_prizes, distribution.total_non_prizes
    );

    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = SpinSession::with_config(engine_config, ManualClock::default(), rng)?;
    let bounds = session.config();
    info!(
        min_ms = bounds.min_duration_ms,
        max_ms = bounds.max_duration_ms,
        frame_ms = settings.frame_ms,
        "Animation bounds"
    );
    let report = report::simulate(&mut session, &sectors, settings.spins, settings.frame_ms)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    info!(
        "{} spins, prize rate {:.2}%, chi-squared {:.3}, {} round-trip mismatches",
        report.spins,
        report.prize_rate * 100.0,
        report.chi_squared,
        report.round_trip_mismatches
    );
    Ok(())
}
