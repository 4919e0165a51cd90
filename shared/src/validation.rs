use std::borrow::Cow;

use validator::ValidationError;

use crate::constants::{
    DISPLAY_NAME_TOO_LONG_ERROR, EMPTY_DISPLAY_NAME_ERROR, MAX_DISPLAY_NAME_LENGTH, PROBABILITY_BUDGET,
    PROBABILITY_OUT_OF_RANGE_ERROR,
};

fn rejected(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub fn validate_display_name(name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        log::debug!("rejected empty sector name");
        return Err(rejected("empty_display_name", EMPTY_DISPLAY_NAME_ERROR));
    }
    if trimmed.chars().count() > MAX_DISPLAY_NAME_LENGTH {
        log::debug!("rejected sector name longer than {} chars", MAX_DISPLAY_NAME_LENGTH);
        return Err(rejected("display_name_too_long", DISPLAY_NAME_TOO_LONG_ERROR));
    }
    Ok(())
}

pub fn validate_probability(probability: u32) -> Result<(), ValidationError> {
    if probability > PROBABILITY_BUDGET {
        return Err(rejected("probability_out_of_range", PROBABILITY_OUT_OF_RANGE_ERROR));
    }
    Ok(())
}
