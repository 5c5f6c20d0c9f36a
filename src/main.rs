//! CLI entry point for the sun_weekly tool.
//!
//! Provides subcommands for running the full fetch-and-aggregate pipeline,
//! dumping a year of raw daily records, and aggregating a previous dump.

mod infra;
mod services;

use crate::infra::sunrise_sunset::SunriseSunsetClient;
use crate::services::year_fetch::fetch_year;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use sun_weekly::aggregate::{AggregateOutcome, DailyRecord, Diagnostic, aggregate};
use sun_weekly::{config_store, output};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "sun_weekly")]
#[command(about = "Aggregates a year of sunrise/sunset times into weekly averages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct FetchArgs {
    /// Latitude of the observation point
    #[arg(long, default_value_t = -41.2865, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude of the observation point
    #[arg(long, default_value_t = 174.7762, allow_hyphen_values = true)]
    lng: f64,

    /// Calendar year to fetch
    #[arg(long, default_value_t = 2023)]
    year: i32,

    /// IANA timezone the API should report times in; fixed for the whole
    /// year so averages are not skewed by daylight saving
    #[arg(long, default_value = "Pacific/Auckland")]
    tzid: String,

    /// Maximum number of concurrent day fetches
    #[arg(short, long, default_value_t = 5)]
    concurrency: usize,
}

#[derive(clap::Args)]
struct OutputArgs {
    /// CSV file to write weekly averages to (overwritten)
    #[arg(short, long, default_value = "weekly-sunrise-sunset.csv")]
    output: String,

    /// Optional: JSON config file whose weekly-averages array to replace
    #[arg(long)]
    config: Option<PathBuf>,

    /// Name of the array field to replace in the config file
    #[arg(long, default_value = "weeklyAverageSunTimes")]
    config_field: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a year of daily sun times and write weekly averages
    Run {
        #[command(flatten)]
        fetch: FetchArgs,

        #[command(flatten)]
        out: OutputArgs,
    },
    /// Fetch a year of daily sun times and dump the raw records as JSON
    FetchYear {
        #[command(flatten)]
        fetch: FetchArgs,

        /// File to write the raw daily records to
        #[arg(short, long, default_value = "daily-sun-times.json")]
        out: String,
    },
    /// Aggregate a previously dumped daily-records JSON file
    Aggregate {
        /// JSON file produced by fetch-year
        #[arg(value_name = "FILE")]
        input: String,

        #[command(flatten)]
        out: OutputArgs,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/sun_weekly.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("sun_weekly.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { fetch, out } => {
            let days = fetch_days(&fetch).await;
            let outcome = aggregate(days);
            persist(&outcome, &out)?;
        }
        Commands::FetchYear { fetch, out } => {
            let days = fetch_days(&fetch).await;
            let json = serde_json::to_string_pretty(&days)?;
            std::fs::write(&out, json)
                .with_context(|| format!("writing daily records to {}", out))?;
            info!(path = %out, days = days.len(), "Raw daily records written");
        }
        Commands::Aggregate { input, out } => {
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("reading daily records from {}", input))?;
            let days: Vec<Option<DailyRecord>> = serde_json::from_str(&text)
                .with_context(|| format!("parsing daily records in {}", input))?;
            info!(path = %input, days = days.len(), "Loaded daily records");

            let outcome = aggregate(days);
            persist(&outcome, &out)?;
        }
    }

    Ok(())
}

/// Fetches every day of the requested year, reporting coverage.
async fn fetch_days(args: &FetchArgs) -> Vec<Option<DailyRecord>> {
    info!(
        lat = args.lat,
        lng = args.lng,
        year = args.year,
        tzid = %args.tzid,
        "Fetching year of sun times"
    );

    let client = Arc::new(SunriseSunsetClient::new(args.tzid.clone()));
    let days = fetch_year(client, args.lat, args.lng, args.year, args.concurrency).await;

    let present = days.iter().filter(|d| d.is_some()).count();
    info!(days = days.len(), present, "Year fetch complete");
    days
}

/// Logs diagnostics, writes the CSV, and patches the config if requested.
fn persist(outcome: &AggregateOutcome, out: &OutputArgs) -> Result<()> {
    report_diagnostics(outcome);

    output::write_csv(&out.output, &outcome.weeks)?;
    info!(path = %out.output, weeks = outcome.weeks.len(), "Weekly CSV written");

    if let Some(config) = &out.config {
        config_store::replace_weekly_times(config, &out.config_field, &outcome.weeks)?;
    } else {
        info!("Config file not specified, skipping config update");
    }

    Ok(())
}

fn report_diagnostics(outcome: &AggregateOutcome) {
    for diagnostic in &outcome.diagnostics {
        match diagnostic {
            Diagnostic::InvalidTimeFormat { week, field, raw } => {
                warn!(week, field = field.as_str(), raw = ?raw, "Invalid time excluded from average");
            }
            Diagnostic::EmptyAverage { week, field } => {
                warn!(
                    week,
                    field = field.as_str(),
                    "No valid values for field, week dropped"
                );
            }
        }
    }

    info!(
        weeks = outcome.weeks.len(),
        diagnostics = outcome.diagnostics.len(),
        "Aggregation complete"
    );
}
