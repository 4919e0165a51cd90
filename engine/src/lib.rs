pub mod animator;
pub mod config;
pub mod distribution;
pub mod error;
pub mod geometry;
pub mod resolver;
pub mod sampler;
pub mod scheduler;
pub mod session;

pub use config::EngineConfig;
pub use distribution::{auto_distribute, distribute};
pub use error::SpinError;
pub use resolver::resolve;
pub use scheduler::{FrameScheduler, FrameToken, ManualClock};
pub use session::SpinSession;
