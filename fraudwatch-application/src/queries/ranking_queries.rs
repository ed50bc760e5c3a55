use fraudwatch_domain::entities::TopAccount;
use fraudwatch_domain::services::compute_top_accounts;
use fraudwatch_domain::value_objects::{ModelFilter, Period};

use crate::{AppError, AppState};

/// Local top-account ranking over the loaded snapshot. Unlike the backend's
/// `/api/top-accounts` this honors a lookback window and a model filter
/// without another round trip.
pub async fn local_top_accounts(
    state: &AppState,
    period: Period,
    filter: ModelFilter,
) -> Result<Vec<TopAccount>, AppError> {
    let snapshot = state.snapshot.read().await;
    let snapshot = snapshot
        .as_ref()
        .ok_or_else(|| AppError::BadRequest("no snapshot loaded yet".to_string()))?;
    Ok(compute_top_accounts(
        &snapshot.cases,
        &snapshot.wash_trade_pairs,
        period,
        filter,
        state.config.ranking_size,
    ))
}
