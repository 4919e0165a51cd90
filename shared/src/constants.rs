pub const PROBABILITY_BUDGET: u32 = 100;
pub const MAX_DISPLAY_NAME_LENGTH: usize = 64;

pub const NO_ACTIVE_SECTORS_ERROR: &str = "The wheel needs at least one active sector";
pub const PRIZE_SUM_EXCEEDED_ERROR: &str = "Prize probabilities add up to more than 100%";
pub const NO_ROOM_FOR_NON_PRIZES_ERROR: &str = "Prize probabilities add up to 100% but non-prize sectors would never be picked";
pub const PROBABILITY_OUT_OF_RANGE_ERROR: &str = "Probability must be between 0 and 100";
pub const EMPTY_DISPLAY_NAME_ERROR: &str = "Sector name cannot be empty";
pub const DISPLAY_NAME_TOO_LONG_ERROR: &str = "Sector name is too long";
