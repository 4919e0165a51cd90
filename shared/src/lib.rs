pub mod constants;
pub mod shared_roulette;
pub mod validation;

pub use shared_roulette::*;
