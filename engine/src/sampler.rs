//! Weighted sector selection and landing-angle generation.

use rand::Rng;
use shared::{Sector, FULL_TURN_DEGREES};
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::distribution::distribute;
use crate::error::SpinError;
use crate::geometry::{rotation_for_position, sector_index_at, slice_start, slice_width};

/// A sampled spin: the chosen slot in the active list and the absolute
/// rotation that lands it under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub index: usize,
    pub target_angle: f64,
}

/// Selection weight per active sector: prize sectors use their own
/// probability, non-prize sectors share the residual budget.
pub fn effective_weights(active: &[Sector]) -> Vec<f64> {
    let residual = distribute(active).non_prizes_probability_each.max(0.0);
    active
        .iter()
        .map(|s| if s.is_prize { s.probability as f64 } else { residual })
        .collect()
}

/// Effective weights scaled to sum to 1. Falls back to a uniform split when
/// nothing carries weight.
pub fn normalized_weights(active: &[Sector]) -> Vec<f64> {
    let weights = effective_weights(active);
    let total: f64 = weights.iter().sum();
    if total > 0.0 && total.is_finite() {
        weights.iter().map(|w| w / total).collect()
    } else {
        if !active.is_empty() {
            warn!("no sector carries weight, falling back to a uniform pick");
        }
        vec![1.0 / active.len() as f64; active.len()]
    }
}

/// Inverse-CDF pick over `weights`, which must sum to (roughly) 1.
pub fn pick_index<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> usize {
    let draw: f64 = rng.gen();
    let mut cumulative = 0.0;
    let mut last_weighted = 0;
    for (index, weight) in weights.iter().enumerate() {
        if *weight > 0.0 {
            last_weighted = index;
        }
        cumulative += weight;
        if draw < cumulative {
            return index;
        }
    }
    // Rounding left the cumulative sum just under 1
    last_weighted
}

pub fn sample<R: Rng + ?Sized>(active: &[Sector], config: &EngineConfig, rng: &mut R) -> Result<Sample, SpinError> {
    if active.is_empty() {
        return Err(SpinError::EmptySectorSet);
    }
    let weights = normalized_weights(active);
    let index = pick_index(&weights, rng);
    let target_angle = landing_angle(index, active.len(), config, rng);
    debug!("sampled sector {} of {} at {:.3} degrees", index, active.len(), target_angle);
    Ok(Sample { index, target_angle })
}

/// Absolute rotation that stops a random point of slice `index` under the
/// pointer after a whole number of extra turns.
pub fn landing_angle<R: Rng + ?Sized>(index: usize, sector_count: usize, config: &EngineConfig, rng: &mut R) -> f64 {
    let slice = slice_width(sector_count);
    let start = slice_start(index, sector_count);
    let offset = uniform(rng, 0.0, slice);
    let turns = uniform(rng, config.min_extra_rotations, config.max_extra_rotations).floor();
    let spin = turns * FULL_TURN_DEGREES;

    let target = spin + rotation_for_position(start + offset);
    if sector_index_at(target, sector_count) == Some(index) {
        return target;
    }
    // Float error pushed the offset across a slice edge
    warn!("landing angle {} drifted out of slice {}, using its center", target, index);
    spin + rotation_for_position(start + slice / 2.0)
}

pub(crate) fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn example_wheel() -> Vec<Sector> {
        vec![
            Sector::prize("a", "Mug", 30, 0),
            Sector::filler("b", "Try again", 1),
            Sector::prize("c", "Hat", 20, 2),
        ]
    }

    #[test]
    fn test_effective_weights_use_residual() {
        assert_eq!(effective_weights(&example_wheel()), vec![30.0, 50.0, 20.0]);
    }

    #[test]
    fn test_negative_residual_is_clamped() {
        let sectors = vec![Sector::prize("a", "Mug", 80, 0), Sector::prize("b", "Hat", 40, 1), Sector::filler("c", "x", 2)];
        let weights = normalized_weights(&sectors);
        assert_eq!(weights[2], 0.0);
        assert!((weights.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_weights_fall_back_to_uniform() {
        let sectors = vec![Sector::prize("a", "Mug", 0, 0), Sector::prize("b", "Hat", 0, 1)];
        assert_eq!(normalized_weights(&sectors), vec![0.5, 0.5]);
    }

    #[test]
    fn test_zero_weight_sector_never_picked() {
        let mut rng = StdRng::seed_from_u64(3);
        let weights = [0.0, 1.0, 0.0];
        for _ in 0..1000 {
            assert_eq!(pick_index(&weights, &mut rng), 1);
        }
    }

    #[test]
    fn test_empty_set_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(sample(&[], &EngineConfig::default(), &mut rng), Err(SpinError::EmptySectorSet));
    }

    #[test]
    fn test_landing_angle_includes_whole_turns() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = EngineConfig::default();
        for _ in 0..1000 {
            let angle = landing_angle(1, 3, &config, &mut rng);
            assert!(angle >= 3.0 * FULL_TURN_DEGREES && angle < 6.0 * FULL_TURN_DEGREES);
            assert_eq!(sector_index_at(angle, 3), Some(1));
        }
    }

    #[test]
    fn test_fixed_rotation_count() {
        let mut rng = StdRng::seed_from_u64(5);
        let config = EngineConfig {
            min_extra_rotations: 4.0,
            max_extra_rotations: 4.0,
            ..EngineConfig::default()
        };
        let angle = landing_angle(0, 1, &config, &mut rng);
        assert!(angle >= 4.0 * FULL_TURN_DEGREES && angle < 5.0 * FULL_TURN_DEGREES);
    }
}
