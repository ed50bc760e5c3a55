// Derived simulation-clock operations

use chrono::NaiveDate;

use crate::entities::AdvanceOutcome;
use crate::error::SimulationError;
use crate::ports::SimulationGateway;
use crate::utils::{millis_to_utc, MILLIS_PER_DAY};

/// Moves the simulation clock to `target` by advancing whole days.
///
/// Not a backend primitive: the day delta is computed from the current
/// status, floored to whole days. The clock only moves forward; a target
/// before the current date fails with [`SimulationError::PastDate`] and a
/// same-day target is a no-op that issues no advance call.
pub async fn jump_to_date(
    gateway: &dyn SimulationGateway,
    target: NaiveDate,
) -> Result<AdvanceOutcome, SimulationError> {
    let status = gateway.status().await?;
    let current_ms = status
        .current_time_ms
        .ok_or(SimulationError::NotInitialized)?;

    let target_ms = target
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .ok_or(SimulationError::NotInitialized)?;

    let diff_days = (target_ms - current_ms).div_euclid(MILLIS_PER_DAY);
    if diff_days < 0 {
        return Err(SimulationError::PastDate {
            target: target.to_string(),
            current: millis_to_utc(current_ms).date_naive().to_string(),
        });
    }
    if diff_days == 0 {
        return Ok(AdvanceOutcome {
            current_time_ms: current_ms,
            days_advanced: 0,
            hours_advanced: 0,
            message: "already at the requested date".to_string(),
        });
    }
    gateway.advance(diff_days as u32, 0).await
}
