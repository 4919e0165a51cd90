use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::validate_display_name;

/// One wedge of the wheel, as configured by the dashboard.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Sector {
    pub id: String,
    #[validate(custom = "validate_display_name")]
    pub display_name: String,
    #[serde(default)]
    pub formal_name: String,
    pub is_prize: bool,
    // Percent; only meaningful for prize sectors
    #[validate(range(max = 100))]
    #[serde(default)]
    pub probability: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub order: i32,
}

fn default_active() -> bool {
    true
}

impl Sector {
    pub fn prize(id: impl Into<String>, display_name: impl Into<String>, probability: u32, order: i32) -> Self {
        let display_name = display_name.into();
        Self {
            id: id.into(),
            formal_name: display_name.clone(),
            display_name,
            is_prize: true,
            probability,
            is_active: true,
            order,
        }
    }

    pub fn filler(id: impl Into<String>, display_name: impl Into<String>, order: i32) -> Self {
        let display_name = display_name.into();
        Self {
            id: id.into(),
            formal_name: display_name.clone(),
            display_name,
            is_prize: false,
            probability: 0,
            is_active: true,
            order,
        }
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Returns the active sectors sorted by `order`, which is their clockwise
/// placement on the wheel starting at the pointer. Ties keep input order.
pub fn active_sectors(sectors: &[Sector]) -> Vec<Sector> {
    let mut active: Vec<Sector> = sectors.iter().filter(|s| s.is_active).cloned().collect();
    active.sort_by_key(|s| s.order);
    active
}

/// Derived probability split between prize and non-prize sectors.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProbabilityDistribution {
    pub total_prizes: usize,
    pub total_non_prizes: usize,
    pub prizes_probability_sum: u32,
    pub non_prizes_probability_each: f64,
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// Outcome of a completed spin
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpinResult {
    pub spin_id: Uuid,
    pub winner_sector: Sector,
    pub is_winner: bool,
    pub final_angle: f64,
    pub timestamp: DateTime<Utc>,
}

impl SpinResult {
    pub fn new(winner_sector: Sector, final_angle: f64) -> Self {
        Self {
            spin_id: Uuid::new_v4(),
            is_winner: winner_sector.is_prize,
            winner_sector,
            final_angle,
            timestamp: Utc::now(),
        }
    }
}

/// What a renderer needs each frame
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpinStatus {
    pub is_spinning: bool,
    pub current_angle: f64,
    pub progress: f64,
    pub last_result: Option<SpinResult>,
}

impl SpinStatus {
    pub fn idle() -> Self {
        Self {
            is_spinning: false,
            current_angle: 0.0,
            progress: 0.0,
            last_result: None,
        }
    }
}

impl Default for SpinStatus {
    fn default() -> Self {
        Self::idle()
    }
}

// Animation defaults
pub const FULL_TURN_DEGREES: f64 = 360.0;
pub const MIN_SPIN_DURATION_MS: f64 = 3000.0;
pub const MAX_SPIN_DURATION_MS: f64 = 5000.0;
pub const MIN_EXTRA_ROTATIONS: f64 = 3.0; // Minimum number of full rotations
pub const MAX_EXTRA_ROTATIONS: f64 = 6.0; // Exclusive upper bound
