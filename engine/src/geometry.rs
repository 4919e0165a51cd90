//! Angle <-> sector index conversion.
//!
//! The wheel turns clockwise under a pointer fixed at the top. Active sectors,
//! sorted by `order`, sit clockwise from the wheel's zero mark in equal slices.
//! Both the sampler and the resolver go through these functions so they can
//! never disagree about which slice sits under the pointer.

use shared::FULL_TURN_DEGREES;

pub fn slice_width(sector_count: usize) -> f64 {
    FULL_TURN_DEGREES / sector_count as f64
}

pub fn slice_start(index: usize, sector_count: usize) -> f64 {
    index as f64 * slice_width(sector_count)
}

/// Position on the wheel, in degrees clockwise from its zero mark, that sits
/// under the pointer once the wheel has turned `angle` degrees clockwise.
pub fn pointer_position(angle: f64) -> f64 {
    (FULL_TURN_DEGREES - angle.rem_euclid(FULL_TURN_DEGREES)).rem_euclid(FULL_TURN_DEGREES)
}

/// Rotation in `[0, 360)` that brings `position` under the pointer.
pub fn rotation_for_position(position: f64) -> f64 {
    // The mapping is its own inverse.
    pointer_position(position)
}

/// Index of the slice under the pointer, or `None` for an empty wheel.
pub fn sector_index_at(angle: f64, sector_count: usize) -> Option<usize> {
    if sector_count == 0 {
        return None;
    }
    let index = (pointer_position(angle) / slice_width(sector_count)).floor() as usize;
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    Some(index.min(sector_count - 1))
}
