use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use fraudwatch_bootstrap::{runner, AppContext};

#[derive(Parser, Debug)]
#[command(name = "fraudwatch")]
#[command(about = "Fraud detection monitoring console", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a full snapshot and print stats plus the local ranking
    Overview,
    /// Print the current simulated time
    Status,
    /// Advance the simulation clock by whole days
    Advance {
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// Return the simulation clock to the window start
    Reset,
    /// Jump forward to a calendar date (YYYY-MM-DD)
    Jump {
        #[arg(long)]
        date: NaiveDate,
    },
    /// Local top-account ranking over the loaded case list
    Top {
        #[arg(long, default_value = "month")]
        period: String,
        #[arg(long, default_value = "all")]
        model: String,
    },
    /// List cases from the loaded snapshot
    Cases {
        #[arg(long, default_value = "all")]
        model: String,
        #[arg(long)]
        sanctioned_only: bool,
        #[arg(long)]
        min_score: Option<f64>,
        #[arg(long, default_value_t = 20)]
        limit: usize,
        /// Sort by score instead of recency
        #[arg(long)]
        by_score: bool,
    },
    /// Hour-of-day detection histogram from the loaded snapshot
    Hourly,
    /// List sanctioned cases straight from the backend
    Sanctions {
        #[arg(long, default_value = "all")]
        model: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Ask the backend to re-read its source data, then reload the snapshot
    Reload,
    /// Auto-advance playback (one simulated day per `speed` seconds)
    Play {
        #[arg(long)]
        speed: Option<u64>,
        /// Stop after this many ticks instead of running until ctrl-c
        #[arg(long)]
        ticks: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var("FRAUDWATCH_CONFIG", config);
    }

    let ctx = AppContext::new().await?;
    match args.command {
        Command::Overview => runner::run_overview(&ctx).await,
        Command::Status => runner::run_status(&ctx).await,
        Command::Advance { days } => runner::run_advance(&ctx, days).await,
        Command::Reset => runner::run_reset(&ctx).await,
        Command::Jump { date } => runner::run_jump(&ctx, date).await,
        Command::Top { period, model } => runner::run_top(&ctx, &period, &model).await,
        Command::Cases {
            model,
            sanctioned_only,
            min_score,
            limit,
            by_score,
        } => runner::run_cases(&ctx, &model, sanctioned_only, min_score, limit, by_score).await,
        Command::Hourly => runner::run_hourly(&ctx).await,
        Command::Sanctions { model, limit } => runner::run_sanctions(&ctx, &model, limit).await,
        Command::Reload => runner::run_reload(&ctx).await,
        Command::Play { speed, ticks } => runner::run_play(&ctx, speed, ticks).await,
    }
}
