use engine::distribution::distribute;
use engine::sampler::normalized_weights;
use engine::{ManualClock, SpinSession};
use rand::Rng;
use serde::Serialize;
use shared::{active_sectors, ProbabilityDistribution, Sector};
use tracing::warn;

use crate::error::Error;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectorTally {
    pub id: String,
    pub display_name: String,
    pub is_prize: bool,
    pub expected_share: f64,
    pub observed_share: f64,
    pub wins: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub spins: usize,
    pub frames: usize,
    pub prize_rate: f64,
    pub chi_squared: f64,
    pub round_trip_mismatches: usize,
    pub distribution: ProbabilityDistribution,
    pub sectors: Vec<SectorTally>,
}

/// Runs `spins` full spins on the fake clock and tallies where the wheel stopped.
pub fn simulate<R: Rng>(
    session: &mut SpinSession<ManualClock, R>,
    sectors: &[Sector],
    spins: usize,
    frame_ms: f64,
) -> Result<SimulationReport, Error> {
    let active = active_sectors(sectors);
    let expected = normalized_weights(&active);
    let mut wins = vec![0usize; active.len()];
    let mut frames = 0;
    let mut mismatches = 0;

    for _ in 0..spins {
        session.spin(sectors)?;
        while let Some(token) = session.scheduler_mut().next_frame(frame_ms) {
            session.on_frame(token)?;
            frames += 1;
        }

        let Some(result) = session.last_result() else {
            warn!("spin finished without a result");
            continue;
        };
        if session.sampled_sector_id() != Some(result.winner_sector.id.as_str()) {
            mismatches += 1;
        }
        if let Some(index) = active.iter().position(|s| s.id == result.winner_sector.id) {
            wins[index] += 1;
        }
    }

    let total = spins.max(1) as f64;
    let chi_squared: f64 = expected
        .iter()
        .zip(&wins)
        .filter(|(p, _)| **p > 0.0)
        .map(|(p, &observed)| {
            let e = p * spins as f64;
            (observed as f64 - e).powi(2) / e
        })
        .sum();
    let prize_wins: usize = active
        .iter()
        .zip(&wins)
        .filter(|(s, _)| s.is_prize)
        .map(|(_, w)| w)
        .sum();

    let tallies = active
        .iter()
        .zip(expected.iter().zip(&wins))
        .map(|(sector, (&expected_share, &wins))| SectorTally {
            id: sector.id.clone(),
            display_name: sector.display_name.clone(),
            is_prize: sector.is_prize,
            expected_share,
            observed_share: wins as f64 / total,
            wins,
        })
        .collect();

    Ok(SimulationReport {
        spins,
        frames,
        prize_rate: prize_wins as f64 / total,
        chi_squared,
        round_trip_mismatches: mismatches,
        distribution: distribute(sectors),
        sectors: tallies,
    })
}
