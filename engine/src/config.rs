use std::{env, fmt};

use serde::{Deserialize, Serialize};
use shared::{MAX_EXTRA_ROTATIONS, MAX_SPIN_DURATION_MS, MIN_EXTRA_ROTATIONS, MIN_SPIN_DURATION_MS};

/// Tunables for the spin animation.
///
/// Durations are in milliseconds. Extra rotations are drawn from
/// `[min_extra_rotations, max_extra_rotations)` and floored to whole turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub min_duration_ms: f64,
    pub max_duration_ms: f64,
    pub min_extra_rotations: f64,
    pub max_extra_rotations: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_duration_ms: MIN_SPIN_DURATION_MS,
            max_duration_ms: MAX_SPIN_DURATION_MS,
            min_extra_rotations: MIN_EXTRA_ROTATIONS,
            max_extra_rotations: MAX_EXTRA_ROTATIONS,
        }
    }
}

impl EngineConfig {
    /// Reads overrides from `ROULETTE_*` variables. Missing or unparsable
    /// values fall back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            min_duration_ms: env_f64("ROULETTE_SPIN_MIN_MS", defaults.min_duration_ms),
            max_duration_ms: env_f64("ROULETTE_SPIN_MAX_MS", defaults.max_duration_ms),
            min_extra_rotations: env_f64("ROULETTE_MIN_ROTATIONS", defaults.min_extra_rotations),
            max_extra_rotations: env_f64("ROULETTE_MAX_ROTATIONS", defaults.max_extra_rotations),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !valid_range(self.min_duration_ms, self.max_duration_ms) {
            return Err(ConfigError::InvalidDuration {
                min: self.min_duration_ms,
                max: self.max_duration_ms,
            });
        }
        if !valid_range(self.min_extra_rotations, self.max_extra_rotations) {
            return Err(ConfigError::InvalidRotations {
                min: self.min_extra_rotations,
                max: self.max_extra_rotations,
            });
        }
        Ok(())
    }
}

fn valid_range(min: f64, max: f64) -> bool {
    min.is_finite() && max.is_finite() && min >= 0.0 && max >= min
}

fn env_f64(key: &str, default: f64) -> f64 {
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .unwrap_or(default)
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidDuration { min: f64, max: f64 },
    InvalidRotations { min: f64, max: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDuration { min, max } => {
                write!(f, "Invalid spin duration range: {}..{} ms", min, max)
            }
            Self::InvalidRotations { min, max } => {
                write!(f, "Invalid extra rotation range: {}..{}", min, max)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
