use shared::constants::{
    NO_ACTIVE_SECTORS_ERROR, NO_ROOM_FOR_NON_PRIZES_ERROR, PRIZE_SUM_EXCEEDED_ERROR,
    PROBABILITY_BUDGET, PROBABILITY_OUT_OF_RANGE_ERROR,
};
use shared::validation::validate_probability;
use shared::{ProbabilityDistribution, Sector};
use tracing::debug;

use crate::error::SpinError;

/// Computes the prize / non-prize split over the active sectors.
///
/// Non-prize sectors share whatever the prize sectors leave of the 100%
/// budget. With no non-prize sectors the residual share is 0.
pub fn distribute(sectors: &[Sector]) -> ProbabilityDistribution {
    let active: Vec<&Sector> = sectors.iter().filter(|s| s.is_active).collect();
    let mut errors = Vec::new();

    if active.is_empty() {
        errors.push(NO_ACTIVE_SECTORS_ERROR.to_string());
    }

    let prizes: Vec<&Sector> = active.iter().copied().filter(|s| s.is_prize).collect();
    let total_prizes = prizes.len();
    let total_non_prizes = active.len() - total_prizes;
    // Out-of-range probabilities are reported, not rejected, so widen before summing
    let prize_total: u64 = prizes.iter().map(|s| s.probability as u64).sum();
    let prizes_probability_sum = u32::try_from(prize_total).unwrap_or(u32::MAX);

    for sector in &prizes {
        if validate_probability(sector.probability).is_err() {
            errors.push(format!("{}: {}", sector.display_name, PROBABILITY_OUT_OF_RANGE_ERROR));
        }
    }

    if prize_total > PROBABILITY_BUDGET as u64 {
        errors.push(PRIZE_SUM_EXCEEDED_ERROR.to_string());
    } else if prize_total == PROBABILITY_BUDGET as u64 && total_non_prizes > 0 {
        errors.push(NO_ROOM_FOR_NON_PRIZES_ERROR.to_string());
    }

    let non_prizes_probability_each = if total_non_prizes == 0 {
        0.0
    } else {
        (PROBABILITY_BUDGET as f64 - prize_total as f64) / total_non_prizes as f64
    };

    ProbabilityDistribution {
        total_prizes,
        total_non_prizes,
        prizes_probability_sum,
        non_prizes_probability_each,
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Returns the distribution, or its errors when it is not valid. The engine
/// never calls this itself; gating spins on validity is the caller's policy.
pub fn ensure_valid(sectors: &[Sector]) -> Result<ProbabilityDistribution, SpinError> {
    let distribution = distribute(sectors);
    if distribution.is_valid {
        Ok(distribution)
    } else {
        Err(SpinError::InvalidDistribution(distribution.errors))
    }
}

/// Rewrites the probabilities of active prize sectors so they sum to 100.
///
/// Relative weights are kept using largest-remainder rounding. When every
/// prize sector is at 0 the budget is split evenly, with leftover points going
/// to the lowest `order`. Non-prize sectors and inactive sectors are returned
/// untouched.
pub fn auto_distribute(sectors: &[Sector]) -> Vec<Sector> {
    let mut result = sectors.to_vec();

    let mut prize_indices: Vec<usize> = result
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_active && s.is_prize)
        .map(|(i, _)| i)
        .collect();
    if prize_indices.is_empty() {
        return result;
    }
    prize_indices.sort_by_key(|&i| result[i].order);

    let budget = PROBABILITY_BUDGET as u64;
    let count = prize_indices.len() as u64;
    let sum: u64 = prize_indices.iter().map(|&i| result[i].probability as u64).sum();

    // (slot in prize_indices, floor share, remainder)
    let mut shares: Vec<(usize, u64, u64)> = if sum == 0 {
        debug!("all prize sectors at 0%, splitting {} evenly", budget);
        (0..prize_indices.len())
            .map(|slot| (slot, budget / count, 0))
            .collect()
    } else {
        prize_indices
            .iter()
            .enumerate()
            .map(|(slot, &i)| {
                let scaled = result[i].probability as u64 * budget;
                (slot, scaled / sum, scaled % sum)
            })
            .collect()
    };

    let assigned: u64 = shares.iter().map(|(_, share, _)| share).sum();
    let leftover = budget.saturating_sub(assigned) as usize;

    // Largest remainder first; lower order breaks ties
    let mut ranking: Vec<usize> = (0..shares.len()).collect();
    ranking.sort_by(|&a, &b| shares[b].2.cmp(&shares[a].2).then(shares[a].0.cmp(&shares[b].0)));
    for &rank in ranking.iter().take(leftover) {
        shares[rank].1 += 1;
    }

    for (slot, share, _) in shares {
        result[prize_indices[slot]].probability = share as u32;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probabilities(sectors: &[Sector]) -> Vec<u32> {
        sectors.iter().map(|s| s.probability).collect()
    }

    #[test]
    fn test_empty_wheel_is_invalid() {
        let distribution = distribute(&[]);
        assert!(!distribution.is_valid);
        assert!(distribution.errors[0].contains("at least one active sector"));
        assert_eq!(distribution.non_prizes_probability_each, 0.0);
    }

    #[test]
    fn test_only_inactive_sectors_is_invalid() {
        let sectors = vec![Sector::prize("a", "Hat", 10, 0).inactive()];
        assert!(!distribute(&sectors).is_valid);
    }

    #[test]
    fn test_example_three_sector_split() {
        let sectors = vec![
            Sector::prize("a", "Mug", 30, 0),
            Sector::filler("b", "Try again", 1),
            Sector::prize("c", "Hat", 20, 2),
        ];
        let distribution = distribute(&sectors);
        assert!(distribution.is_valid);
        assert_eq!(distribution.prizes_probability_sum, 50);
        assert_eq!(distribution.total_prizes, 2);
        assert_eq!(distribution.total_non_prizes, 1);
        assert_eq!(distribution.non_prizes_probability_each, 50.0);
    }

    #[test]
    fn test_full_prize_budget_with_fillers_is_invalid() {
        let sectors = vec![
            Sector::prize("a", "Mug", 60, 0),
            Sector::prize("b", "Hat", 40, 1),
            Sector::filler("c", "Try again", 2),
        ];
        let distribution = distribute(&sectors);
        assert!(!distribution.is_valid);
        assert_eq!(distribution.non_prizes_probability_each, 0.0);
    }

    #[test]
    fn test_prizes_only_is_valid_under_budget() {
        let sectors = vec![Sector::prize("a", "Mug", 10, 0), Sector::prize("b", "Hat", 5, 1)];
        let distribution = distribute(&sectors);
        assert!(distribution.is_valid);
        assert_eq!(distribution.non_prizes_probability_each, 0.0);

        let sectors = vec![Sector::prize("a", "Mug", 100, 0)];
        assert!(distribute(&sectors).is_valid);
    }

    #[test]
    fn test_over_budget_is_invalid() {
        let sectors = vec![
            Sector::prize("a", "Mug", 70, 0),
            Sector::prize("b", "Hat", 40, 1),
            Sector::filler("c", "Try again", 2),
        ];
        let distribution = distribute(&sectors);
        assert!(!distribution.is_valid);
        assert!(distribution.errors.contains(&PRIZE_SUM_EXCEEDED_ERROR.to_string()));
        assert!(matches!(ensure_valid(&sectors), Err(SpinError::InvalidDistribution(_))));
    }

    #[test]
    fn test_huge_probabilities_do_not_overflow() {
        let sectors = vec![
            Sector::prize("a", "Mug", u32::MAX, 0),
            Sector::prize("b", "Hat", 1, 1),
            Sector::prize("c", "Pen", u32::MAX, 2),
            Sector::filler("d", "Try again", 3),
        ];
        let distribution = distribute(&sectors);
        assert!(!distribution.is_valid);
        assert_eq!(distribution.prizes_probability_sum, u32::MAX);
        assert!(distribution.errors.contains(&PRIZE_SUM_EXCEEDED_ERROR.to_string()));
        assert!(distribution.non_prizes_probability_each < 0.0);

        let weights = crate::sampler::normalized_weights(&sectors);
        assert!(weights.iter().all(|w| w.is_finite()));
        assert_eq!(weights[3], 0.0);

        let balanced = auto_distribute(&sectors);
        let total: u32 = balanced.iter().filter(|s| s.is_prize).map(|s| s.probability).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_inactive_sectors_are_ignored() {
        let sectors = vec![
            Sector::prize("a", "Mug", 30, 0),
            Sector::prize("b", "Car", 90, 1).inactive(),
            Sector::filler("c", "Try again", 2),
            Sector::filler("d", "Try again", 3),
        ];
        let distribution = distribute(&sectors);
        assert!(distribution.is_valid);
        assert_eq!(distribution.non_prizes_probability_each, 35.0);
    }

    #[test]
    fn test_auto_distribute_scales_proportionally() {
        let sectors = vec![
            Sector::prize("a", "Mug", 10, 0),
            Sector::filler("b", "Try again", 1),
            Sector::prize("c", "Hat", 30, 2),
        ];
        let result = auto_distribute(&sectors);
        assert_eq!(probabilities(&result), vec![25, 0, 75]);
    }

    #[test]
    fn test_auto_distribute_rounds_to_exact_budget() {
        let sectors = vec![
            Sector::prize("a", "Mug", 1, 0),
            Sector::prize("b", "Hat", 1, 1),
            Sector::prize("c", "Pen", 1, 2),
        ];
        let result = auto_distribute(&sectors);
        assert_eq!(probabilities(&result), vec![34, 33, 33]);
    }

    #[test]
    fn test_auto_distribute_equal_split_when_all_zero() {
        let sectors = vec![
            Sector::prize("c", "Pen", 0, 2),
            Sector::prize("a", "Mug", 0, 0),
            Sector::prize("b", "Hat", 0, 1),
            Sector::filler("f", "Nothing", 3),
        ];
        let result = auto_distribute(&sectors);
        // leftover point goes to the lowest order
        assert_eq!(probabilities(&result), vec![33, 34, 33, 0]);
    }

    #[test]
    fn test_auto_distribute_skips_inactive_and_fillers() {
        let sectors = vec![
            Sector::prize("a", "Mug", 20, 0),
            Sector::prize("b", "Car", 50, 1).inactive(),
            Sector::filler("c", "Try again", 2),
        ];
        let result = auto_distribute(&sectors);
        assert_eq!(probabilities(&result), vec![100, 50, 0]);
    }

    #[test]
    fn test_auto_distribute_is_idempotent() {
        let sectors = vec![
            Sector::prize("a", "Mug", 7, 0),
            Sector::prize("b", "Hat", 13, 1),
            Sector::prize("c", "Pen", 29, 2),
            Sector::filler("d", "Try again", 3),
        ];
        let once = auto_distribute(&sectors);
        assert_eq!(once.iter().filter(|s| s.is_prize).map(|s| s.probability).sum::<u32>(), 100);
        let twice = auto_distribute(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_auto_distribute_without_prizes_is_unchanged() {
        let sectors = vec![Sector::filler("a", "Nothing", 0)];
        assert_eq!(auto_distribute(&sectors), sectors);
        assert!(auto_distribute(&[]).is_empty());
    }
}
