use fraudwatch_domain::entities::{DetectionCase, HourlyDistribution};
use fraudwatch_domain::services::{hourly_histogram, select_cases, CaseQuery};

use crate::{AppError, AppState};

/// Filter/sort/page the snapshot's case list for table views.
pub async fn list_cases(
    state: &AppState,
    query: &CaseQuery,
) -> Result<Vec<DetectionCase>, AppError> {
    let snapshot = state.snapshot.read().await;
    let snapshot = snapshot
        .as_ref()
        .ok_or_else(|| AppError::BadRequest("no snapshot loaded yet".to_string()))?;
    Ok(select_cases(&snapshot.cases, query))
}

/// Hour-of-day histogram recomputed from the snapshot's case list.
pub async fn local_hourly_distribution(state: &AppState) -> Result<HourlyDistribution, AppError> {
    let snapshot = state.snapshot.read().await;
    let snapshot = snapshot
        .as_ref()
        .ok_or_else(|| AppError::BadRequest("no snapshot loaded yet".to_string()))?;
    Ok(hourly_histogram(&snapshot.cases))
}
