use std::fmt;

/// Reasons a spin command or frame was not applied.
///
/// None of these are fatal. A rejected command leaves the session exactly as
/// it was, so callers that ignore the error get a silent no-op.
#[derive(Debug, Clone, PartialEq)]
pub enum SpinError {
    EmptySectorSet,
    ReentrantSpin,
    StaleCallback,
    UnknownSector(String),
    InvalidDistribution(Vec<String>),
}

impl fmt::Display for SpinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptySectorSet => write!(f, "No active sectors to spin"),
            Self::ReentrantSpin => write!(f, "A spin is already in progress"),
            Self::StaleCallback => write!(f, "Frame belongs to a cancelled or finished spin"),
            Self::UnknownSector(id) => write!(f, "No active sector with id {}", id),
            Self::InvalidDistribution(errors) => write!(f, "Invalid distribution: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for SpinError {}
