//! EOD Pipeline Binary
//!
//! Runs the end-of-day pipeline for one trade date.
//!
//! # Usage
//!
//! ```bash
//! eod-pipeline --date 2024-01-31
//! eod-pipeline --date 2024-01-31 --type trades --type price
//! eod-pipeline --date 2024-01-31 --probe
//! ```
//!
//! Each file outcome is printed to stdout as one JSON line; logs go to
//! stderr. The exit code is 1 when any outcome is `fetch-failed`,
//! `decode-failed`, or `misconfigured`.
//!
//! # Environment Variables
//!
//! - `EOD_CONFIG`: Config file path (default: config.yaml)
//! - `RUST_LOG`: Log filter (default: `observability.logging.level`)

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, bail};
use chrono::{Local, NaiveDate};
use clap::Parser;
use eod_pipeline::config::{DEFAULT_CONFIG_PATH, LogFormat, LoggingConfig, load_config};
use eod_pipeline::{
    CsvTableEmitter, FileType, HttpRemoteSource, ProcessEodFilesUseCase, TracingEventSink,
};
use tokio::signal;
use tokio_util::sync::CancellationToken;

/// Download and decode a trade date's end-of-day files.
#[derive(Debug, Parser)]
#[command(name = "eod-pipeline", version, about)]
struct Args {
    /// Trade date (YYYY-MM-DD), not in the future.
    #[arg(long)]
    date: NaiveDate,

    /// File type to process (trades, price, instruments); repeatable. All when omitted.
    #[arg(long = "type", value_name = "TYPE")]
    types: Vec<FileType>,

    /// Config file path.
    #[arg(long, env = "EOD_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Only check that the listing URL is reachable.
    #[arg(long)]
    probe: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    load_dotenv();
    let args = Args::parse();

    let config_path = args.config.to_string_lossy();
    let config = load_config(Some(&*config_path))
        .with_context(|| format!("loading configuration from {config_path}"))?;

    init_tracing(&config.observability.logging);

    let today = Local::now().date_naive();
    if args.date > today {
        bail!("trade date {} is in the future (today is {today})", args.date);
    }

    let source = HttpRemoteSource::new(&config.source.listing_url, config.source.request_timeout())
        .context("creating remote source")?;
    let use_case = ProcessEodFilesUseCase::new(
        Arc::new(source),
        Arc::new(CsvTableEmitter::new()),
        Arc::new(TracingEventSink),
        config.pipeline_settings(),
    );

    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_ctrl_c(cancel.clone()));

    if args.probe {
        return Ok(match use_case.probe(&cancel).await {
            Ok(()) => {
                tracing::info!(url = %config.source.listing_url, "Listing reachable");
                ExitCode::SUCCESS
            }
            Err(e) => {
                tracing::error!(error = %e, "Listing unreachable");
                ExitCode::FAILURE
            }
        });
    }

    let types = if args.types.is_empty() {
        FileType::ALL.to_vec()
    } else {
        args.types
    };

    tracing::info!(trade_date = %args.date, ?types, "Starting EOD run");
    let report = use_case.run(args.date, &types, &cancel).await;

    let mut stdout = std::io::stdout().lock();
    for outcome in &report.outcomes {
        let line = serde_json::to_string(outcome).context("serializing outcome")?;
        writeln!(stdout, "{line}").context("writing outcome")?;
    }
    stdout.flush().context("flushing stdout")?;

    if report.has_failures() {
        tracing::warn!(trade_date = %args.date, "EOD run finished with failures");
        Ok(ExitCode::FAILURE)
    } else {
        tracing::info!(trade_date = %args.date, files = report.outcomes.len(), "EOD run finished");
        Ok(ExitCode::SUCCESS)
    }
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        for dir in cwd.ancestors().skip(1) {
            let env_path = dir.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
        }
    }
}

/// Initialize the tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Logs go to stderr so stdout
/// carries only outcomes.
fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Json => builder
            .json()
            .with_current_span(logging.include_spans)
            .with_span_list(logging.include_spans)
            .init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

/// Cancel the run on Ctrl+C.
async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    match signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C, cancelling run");
            cancel.cancel();
        }
        Err(e) => tracing::warn!(error = %e, "Failed to install Ctrl+C handler"),
    }
}
