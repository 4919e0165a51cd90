use std::fmt;

use engine::config::ConfigError;
use engine::SpinError;

#[derive(Debug)]
pub enum Error {
    Engine(ConfigError),
    Settings(String),
    InvalidSector(String),
    Spin(SpinError),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Engine(e) => write!(f, "Engine config error: {}", e),
            Self::Settings(msg) => write!(f, "Simulator config error: {}", msg),
            Self::InvalidSector(msg) => write!(f, "Invalid sector: {}", msg),
            Self::Spin(e) => write!(f, "Spin error: {}", e),
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Engine(e) => Some(e),
            Self::Spin(e) => Some(e),
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Engine(err)
    }
}

impl From<SpinError> for Error {
    fn from(err: SpinError) -> Self {
        Error::Spin(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}
