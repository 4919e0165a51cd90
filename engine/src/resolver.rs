use shared::{active_sectors, Sector};

use crate::error::SpinError;
use crate::geometry::sector_index_at;

/// Recovers the sector under the pointer for a wheel at rest at `final_angle`.
///
/// Pure: works on live sector lists as well as on a persisted historical
/// angle, independent of any running animation.
pub fn resolve(final_angle: f64, sectors: &[Sector]) -> Result<Sector, SpinError> {
    let active = active_sectors(sectors);
    resolve_active(final_angle, &active).cloned()
}

/// Same as [`resolve`] for a list that is already active-only and sorted.
pub fn resolve_active(final_angle: f64, active: &[Sector]) -> Result<&Sector, SpinError> {
    let index = sector_index_at(final_angle, active.len()).ok_or(SpinError::EmptySectorSet)?;
    Ok(&active[index])
}
