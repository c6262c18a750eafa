//! Cross-venue dislocation pipeline - entry point.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use xvd_cli::AppConfig;

/// Cross-venue price dislocation collection, detection, and backtesting.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via XVD_CONFIG env var).
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll venue tickers into the tick store.
    Collect {
        /// How long to collect, in minutes.
        #[arg(long)]
        duration_min: Option<f64>,
        /// Polling cycle interval, in milliseconds.
        #[arg(long)]
        interval_ms: Option<u64>,
    },
    /// Detect dislocation events; write the metrics and events CSVs.
    Detect {
        /// Lookback window over the tick store, in minutes.
        #[arg(long)]
        lookback_min: Option<i64>,
        /// Entry threshold, in basis points.
        #[arg(long)]
        threshold_bps: Option<f64>,
        /// Minimum event duration, in milliseconds.
        #[arg(long)]
        persistence_ms: Option<i64>,
    },
    /// Replay detected events with latency and costs; write the trades CSV.
    Backtest {
        /// Lookback window in minutes (must match the detect output files).
        #[arg(long)]
        lookback_min: Option<i64>,
        /// Execution latency, in milliseconds.
        #[arg(long)]
        latency_ms: Option<i64>,
    },
    /// Collect, detect, and backtest in sequence.
    Run {
        /// Skip the collection stage and reuse the current store.
        #[arg(long)]
        skip_collect: bool,
        /// Lookback window over the tick store, in minutes.
        #[arg(long)]
        lookback_min: Option<i64>,
    },
}

/// Apply command-line overrides on top of the file configuration.
fn apply_overrides(config: &mut AppConfig, command: &Command) {
    match command {
        Command::Collect {
            duration_min,
            interval_ms,
        } => {
            if let Some(v) = duration_min {
                config.collector.duration_min = *v;
            }
            if let Some(v) = interval_ms {
                config.collector.interval_ms = *v;
            }
        }
        Command::Detect {
            lookback_min,
            threshold_bps,
            persistence_ms,
        } => {
            if let Some(v) = lookback_min {
                config.report.lookback_min = *v;
            }
            if let Some(v) = threshold_bps {
                config.detector.threshold_bps = *v;
            }
            if let Some(v) = persistence_ms {
                config.detector.persistence_ms = *v;
            }
        }
        Command::Backtest {
            lookback_min,
            latency_ms,
        } => {
            if let Some(v) = lookback_min {
                config.report.lookback_min = *v;
            }
            if let Some(v) = latency_ms {
                config.backtest.latency_ms = *v;
            }
        }
        Command::Run {
            lookback_min,
            skip_collect: _,
        } => {
            if let Some(v) = lookback_min {
                config.report.lookback_min = *v;
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    xvd_cli::init_logging()?;

    info!("Starting xvd v{}", env!("CARGO_PKG_VERSION"));

    // Determine config path: CLI arg > XVD_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("XVD_CONFIG").ok())
        .unwrap_or_else(|| "config.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");
    let mut config = AppConfig::load(&config_path)?;
    apply_overrides(&mut config, &args.command);

    let app = xvd_cli::Application::new(config)?;

    match args.command {
        Command::Collect { .. } => app.collect().await?,
        Command::Detect { .. } => app.detect()?,
        Command::Backtest { .. } => app.backtest()?,
        Command::Run { skip_collect, .. } => app.run(skip_collect).await?,
    }

    Ok(())
}
