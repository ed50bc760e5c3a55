use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use chrono::NaiveDate;
use tracing::{info, warn};

use fraudwatch_application::commands::snapshot_commands::{load_snapshot, reload_backend_data};
use fraudwatch_application::queries::case_queries::{list_cases, local_hourly_distribution};
use fraudwatch_application::queries::ranking_queries::local_top_accounts;
use fraudwatch_domain::entities::DetectionCase;
use fraudwatch_domain::services::{CaseQuery, CaseSort};
use fraudwatch_domain::utils::millis_to_utc;
use fraudwatch_domain::value_objects::{ModelFilter, Period, Severity};

use crate::AppContext;

/// Full snapshot plus local ranking, printed once.
pub async fn run_overview(ctx: &AppContext) -> Result<()> {
    load_snapshot(&ctx.state).await?;
    let snapshot = ctx.state.snapshot.read().await;
    let snapshot = snapshot
        .as_ref()
        .ok_or_else(|| anyhow!("snapshot missing after load"))?;

    let stats = &snapshot.stats;
    println!("detections: {} total", stats.total_detections);
    println!(
        "  wash: {}  funding: {}  cooperative: {}",
        stats.wash_trading, stats.funding_fee, stats.cooperative
    );
    println!("sanctions: {}", stats.total_sanctions);
    drop(snapshot);

    let ranked = local_top_accounts(&ctx.state, Period::Month, ModelFilter::All).await?;
    println!("top accounts (30d):");
    for (rank, account) in ranked.iter().enumerate() {
        println!(
            "  {}. {}  pnl={:.0}  cases={}  avg={:.1}  max={:.1}",
            rank + 1,
            account.account_id,
            account.total_profit_loss,
            account.total_cases,
            account.avg_score,
            account.max_score
        );
    }
    Ok(())
}

pub async fn run_status(ctx: &AppContext) -> Result<()> {
    match ctx.state.feed.health().await {
        Ok(()) => println!("backend: healthy"),
        Err(err) => warn!("backend health check failed: {}", err),
    }
    ctx.controller.refresh_status().await;
    let state = ctx.controller.snapshot().await;
    if let Some(err) = state.error {
        bail!(err);
    }
    match state.current_time_ms {
        Some(ms) => println!(
            "simulated time: {}  progress: {:.1}%",
            millis_to_utc(ms).format("%Y-%m-%d %H:%M"),
            state.progress
        ),
        None => println!("simulation clock not initialized"),
    }
    Ok(())
}

pub async fn run_advance(ctx: &AppContext, days: u32) -> Result<()> {
    ctx.controller.skip(days).await;
    finish_command(ctx).await
}

pub async fn run_reset(ctx: &AppContext) -> Result<()> {
    ctx.controller.reset().await;
    finish_command(ctx).await
}

pub async fn run_jump(ctx: &AppContext, date: NaiveDate) -> Result<()> {
    ctx.controller.jump_to(date).await;
    finish_command(ctx).await
}

pub async fn run_top(ctx: &AppContext, period: &str, model: &str) -> Result<()> {
    let period = Period::parse(period).ok_or_else(|| anyhow!("unknown period '{}'", period))?;
    let filter = ModelFilter::parse(model).ok_or_else(|| anyhow!("unknown model '{}'", model))?;

    load_snapshot(&ctx.state).await?;
    let ranked = local_top_accounts(&ctx.state, period, filter).await?;
    if ranked.is_empty() {
        println!("no suspicious accounts in the selected window");
        return Ok(());
    }
    for (rank, account) in ranked.iter().enumerate() {
        println!(
            "{}. {}  pnl={:.0} (wash={:.0} funding={:.0} coop={:.0})  critical={} high={}",
            rank + 1,
            account.account_id,
            account.total_profit_loss,
            account.profits.wash,
            account.profits.funding,
            account.profits.cooperative,
            account.critical_count,
            account.high_count
        );
    }
    Ok(())
}

/// Case table over the loaded snapshot, filtered and sorted client-side.
pub async fn run_cases(
    ctx: &AppContext,
    model: &str,
    sanctioned_only: bool,
    min_score: Option<f64>,
    limit: usize,
    by_score: bool,
) -> Result<()> {
    let filter = ModelFilter::parse(model).ok_or_else(|| anyhow!("unknown model '{}'", model))?;
    load_snapshot(&ctx.state).await?;
    let query = CaseQuery {
        model: filter,
        min_score,
        sanctioned_only,
        sort: if by_score {
            CaseSort::ScoreDesc
        } else {
            CaseSort::NewestFirst
        },
        offset: 0,
        limit: Some(limit),
    };
    let cases = list_cases(&ctx.state, &query).await?;
    if cases.is_empty() {
        println!("no matching cases");
        return Ok(());
    }
    for case in &cases {
        print_case_line(case);
    }
    Ok(())
}

/// Hour-of-day histogram recomputed from the loaded snapshot.
pub async fn run_hourly(ctx: &AppContext) -> Result<()> {
    load_snapshot(&ctx.state).await?;
    let histogram = local_hourly_distribution(&ctx.state).await?;
    for hour in 0u8..24 {
        println!(
            "{:02}:00  {}",
            hour,
            histogram.get(&hour).copied().unwrap_or(0)
        );
    }
    Ok(())
}

/// Sanctioned cases fetched straight from the backend.
pub async fn run_sanctions(ctx: &AppContext, model: &str, limit: Option<usize>) -> Result<()> {
    let filter = ModelFilter::parse(model).ok_or_else(|| anyhow!("unknown model '{}'", model))?;
    let sanctions = ctx.state.feed.sanctions(filter, limit).await?;
    if sanctions.is_empty() {
        println!("no sanctions");
        return Ok(());
    }
    for case in &sanctions {
        print_case_line(case);
    }
    Ok(())
}

pub async fn run_reload(ctx: &AppContext) -> Result<()> {
    reload_backend_data(&ctx.state).await?;
    let snapshot = ctx.state.snapshot.read().await;
    if let Some(snapshot) = snapshot.as_ref() {
        println!("reloaded: {} cases", snapshot.cases.len());
    }
    Ok(())
}

fn print_case_line(case: &DetectionCase) {
    println!(
        "{}  {:11}  {:5.1} {:8}  {}  [{}]{}",
        millis_to_utc(case.timestamp_ms).format("%Y-%m-%d %H:%M"),
        case.model.as_str(),
        case.score,
        Severity::from_score(case.score).as_str(),
        case.id,
        case.accounts.join(","),
        if case.is_sanctioned { "  SANCTIONED" } else { "" }
    );
}

/// Auto-advance playback until N ticks have landed, the backend rejects an
/// advance, or ctrl-c.
pub async fn run_play(ctx: &AppContext, speed: Option<u64>, ticks: Option<u64>) -> Result<()> {
    ctx.controller.refresh_status().await;
    if let Some(speed) = speed {
        ctx.controller.change_speed(speed).await;
    }
    ctx.controller.toggle().await;
    info!("playback running, ctrl-c to stop");

    let mut last = ctx.controller.snapshot().await.current_time_ms;
    let mut seen: u64 = 0;
    let failure = loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break None,
            _ = tokio::time::sleep(Duration::from_millis(250)) => {
                let state = ctx.controller.snapshot().await;
                if state.current_time_ms != last {
                    seen += 1;
                    last = state.current_time_ms;
                    if let Some(ms) = state.current_time_ms {
                        println!(
                            "tick {}: {}  ({:.1}%)",
                            seen,
                            millis_to_utc(ms).format("%Y-%m-%d"),
                            state.progress
                        );
                    }
                }
                if ticks.is_some_and(|limit| seen >= limit) {
                    break None;
                }
                if !state.is_playing {
                    break state.error;
                }
            }
        }
    };

    if ctx.controller.snapshot().await.is_playing {
        ctx.controller.toggle().await;
    }
    print!("{}", ctx.state.metrics.render_prometheus());
    if let Some(err) = failure {
        bail!("playback stopped: {}", err);
    }
    Ok(())
}

async fn finish_command(ctx: &AppContext) -> Result<()> {
    let state = ctx.controller.snapshot().await;
    if let Some(err) = state.error {
        bail!(err);
    }
    if let Some(ms) = state.current_time_ms {
        println!(
            "simulated time: {}  progress: {:.1}%",
            millis_to_utc(ms).format("%Y-%m-%d %H:%M"),
            state.progress
        );
    }
    Ok(())
}
