// Local top-account ranking
// Re-aggregates per-account profit and score statistics from the flat case
// list, so the panel stays filterable without another backend round trip.

use std::collections::{HashMap, HashSet};

use crate::entities::{CasePayload, DetectionCase, ProfitBreakdown, TopAccount, TradePair};
use crate::utils::current_millis;
use crate::value_objects::{ModelFilter, Period, CRITICAL_SCORE, HIGH_SCORE};

pub const DEFAULT_RANKING_SIZE: usize = 5;

#[derive(Debug, Default)]
struct AccountAccumulator {
    scores: Vec<f64>,
    profits: ProfitBreakdown,
}

/// Ranks accounts by total attributed profit/loss over a lookback window.
///
/// The window is anchored on the newest case timestamp, not wall clock, so
/// rankings stay meaningful under simulated time. Ties keep first-seen
/// accumulation order (the sort is stable).
pub fn compute_top_accounts(
    cases: &[DetectionCase],
    trade_pairs: &[TradePair],
    period: Period,
    filter: ModelFilter,
    limit: usize,
) -> Vec<TopAccount> {
    let reference = cases
        .iter()
        .map(|case| case.timestamp_ms)
        .max()
        .unwrap_or_else(current_millis);
    let window_start = reference - period.window_millis();

    let mut order: Vec<String> = Vec::new();
    let mut stats: HashMap<String, AccountAccumulator> = HashMap::new();

    for case in cases {
        if case.timestamp_ms < window_start || !filter.matches(case.model) {
            continue;
        }
        for account_id in &case.accounts {
            if !stats.contains_key(account_id) {
                order.push(account_id.clone());
            }
            let acc = stats.entry(account_id.clone()).or_default();
            acc.scores.push(case.score);
            attribute_profit(acc, case, account_id, trade_pairs);
        }
    }

    let mut ranked: Vec<TopAccount> = order
        .into_iter()
        .filter_map(|account_id| {
            let acc = stats.remove(&account_id)?;
            let total_cases = acc.scores.len() as u64;
            let total_score: f64 = acc.scores.iter().sum();
            let max_score = acc.scores.iter().cloned().fold(f64::MIN, f64::max);
            Some(TopAccount {
                account_id,
                total_cases,
                total_profit_loss: acc.profits.total(),
                profits: acc.profits,
                avg_score: if total_cases > 0 {
                    total_score / total_cases as f64
                } else {
                    0.0
                },
                max_score,
                critical_count: acc.scores.iter().filter(|s| **s >= CRITICAL_SCORE).count() as u64,
                high_count: acc
                    .scores
                    .iter()
                    .filter(|s| **s >= HIGH_SCORE && **s < CRITICAL_SCORE)
                    .count() as u64,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.total_profit_loss
            .partial_cmp(&a.total_profit_loss)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(limit);
    ranked
}

/// Adds one case's profit contribution for one participating account.
///
/// Wash: the laundered amount belongs to the winner account; without explicit
/// attribution it is split evenly among winners resolved via trade-pair
/// records. Cooperative: per-account realized PnL when one of the two named
/// sub-accounts matches, else the case total split evenly across all listed
/// accounts. Both fallbacks are kept exactly as the backend's dashboard
/// historically computed them.
fn attribute_profit(
    acc: &mut AccountAccumulator,
    case: &DetectionCase,
    account_id: &str,
    trade_pairs: &[TradePair],
) {
    match &case.payload {
        CasePayload::Funding { window_funding } => {
            acc.profits.funding += window_funding;
        }
        CasePayload::Wash {
            laundered_amount,
            winner_account,
            trade_pair_ids,
        } => {
            if winner_account.as_deref() == Some(account_id) {
                acc.profits.wash += laundered_amount;
            } else {
                let winners: HashSet<&str> = trade_pairs
                    .iter()
                    .filter(|pair| trade_pair_ids.contains(&pair.pair_id))
                    .map(|pair| pair.winner_account.as_str())
                    .collect();
                if winners.contains(account_id) {
                    acc.profits.wash += laundered_amount / winners.len().max(1) as f64;
                }
            }
        }
        CasePayload::Cooperative {
            account_id1,
            account_id2,
            rpnl1,
            rpnl2,
            pnl_total,
        } => {
            if account_id1.as_deref() == Some(account_id) {
                acc.profits.cooperative += rpnl1;
            } else if account_id2.as_deref() == Some(account_id) {
                acc.profits.cooperative += rpnl2;
            } else {
                acc.profits.cooperative += pnl_total / case.accounts.len().max(1) as f64;
            }
        }
    }
}
