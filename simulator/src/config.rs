use std::env;
use std::path::PathBuf;

use shared::Sector;
use validator::Validate;

use crate::error::Error;

#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    pub spins: usize,
    pub seed: Option<u64>,
    pub frame_ms: f64,
    pub sectors_path: Option<PathBuf>,
}

impl SimulatorConfig {
    pub fn from_env() -> Result<Self, Error> {
        let spins = env::var("SIM_SPINS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse()
            .unwrap_or(1000);
        let seed = env::var("SIM_SEED").ok().and_then(|s| s.parse().ok());
        let frame_ms: f64 = env::var("SIM_FRAME_MS")
            .unwrap_or_else(|_| "16".to_string())
            .parse()
            .unwrap_or(16.0);
        let sectors_path = env::var("SIM_SECTORS_PATH").ok().map(PathBuf::from);

        // The fake clock only moves per frame, so a zero step never finishes a spin
        if !(frame_ms.is_finite() && frame_ms > 0.0) {
            return Err(Error::Settings(format!("SIM_FRAME_MS must be positive, got {}", frame_ms)));
        }

        Ok(Self {
            spins,
            seed,
            frame_ms,
            sectors_path,
        })
    }

    pub fn load_sectors(&self) -> Result<Vec<Sector>, Error> {
        let sectors = match &self.sectors_path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                serde_json::from_str::<Vec<Sector>>(&raw)?
            }
            None => demo_wheel(),
        };
        for sector in &sectors {
            sector
                .validate()
                .map_err(|e| Error::InvalidSector(format!("{}: {}", sector.id, e)))?;
        }
        Ok(sectors)
    }
}

/// Eight-slot wheel used when no sector file is given.
pub fn demo_wheel() -> Vec<Sector> {
    vec![
        Sector::prize("coffee", "Free coffee", 20, 0),
        Sector::filler("again-1", "Try again", 1),
        Sector::prize("tote", "Tote bag", 10, 2),
        Sector::filler("again-2", "Try again", 3),
        Sector::prize("voucher", "10% voucher", 15, 4),
        Sector::filler("again-3", "Try again", 5),
        Sector::prize("grand", "Grand prize", 1, 6),
        Sector::filler("again-4", "Try again", 7),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::distribution::distribute;

    #[test]
    fn test_demo_wheel_is_valid() {
        let distribution = distribute(&demo_wheel());
        assert!(distribution.is_valid);
        assert_eq!(distribution.prizes_probability_sum, 46);
        assert_eq!(distribution.non_prizes_probability_each, 13.5);
    }

    #[test]
    fn test_load_rejects_out_of_range_probability() {
        let path = env::temp_dir().join("simulator_bad_sectors.json");
        std::fs::write(
            &path,
            r#"[{"id":"x","displayName":"Car","isPrize":true,"probability":150,"order":0}]"#,
        )
        .unwrap();
        let config = SimulatorConfig {
            spins: 1,
            seed: None,
            frame_ms: 16.0,
            sectors_path: Some(path.clone()),
        };
        let result = config.load_sectors();
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(Error::InvalidSector(_))));
    }

    #[test]
    fn test_load_reports_readable_name_error() {
        let path = env::temp_dir().join("simulator_unnamed_sectors.json");
        std::fs::write(
            &path,
            r#"[{"id":"blank","displayName":"  ","isPrize":false,"probability":0,"order":0}]"#,
        )
        .unwrap();
        let config = SimulatorConfig {
            spins: 1,
            seed: None,
            frame_ms: 16.0,
            sectors_path: Some(path.clone()),
        };
        let result = config.load_sectors();
        std::fs::remove_file(&path).ok();
        match result {
            Err(Error::InvalidSector(message)) => {
                assert!(message.starts_with("blank: "));
                assert!(message.contains(shared::constants::EMPTY_DISPLAY_NAME_ERROR));
            }
            other => panic!("expected InvalidSector, got {:?}", other.map(|s| s.len())),
        }
    }
}
