use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{Command, Context};
use planboard_core::{
    Clock, CoreResult, DEFAULT_RECORDS_FILE, GranularityCalendar, RecordStore, SystemClock,
};

/// Environment variable name for the record file path
const PB_RECORDS_PATH_ENV: &str = "PB_RECORDS_PATH";

/// Directory under the platform data dir holding the default record file
const DATA_SUBDIR: &str = "planboard";

/// Planboard - navigate an employee's schedule timeline
#[derive(Parser)]
#[command(name = "pb")]
#[command(version = "0.1.0")]
#[command(about = "Navigate an employee's schedule timeline", long_about = None)]
struct Args {
    /// Path to the record file (can also be set via PB_RECORDS_PATH env var)
    #[arg(long, global = true)]
    records: Option<PathBuf>,

    /// Canonical zone as minutes east of UTC
    #[arg(
        long,
        global = true,
        env = "PB_UTC_OFFSET",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    utc_offset: i32,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Command>,
}

/// Get the record file path from command line, environment variable, or default.
///
/// Priority:
/// 1. Command line --records argument
/// 2. PB_RECORDS_PATH environment variable (if non-empty)
/// 3. Default path (`<data dir>/planboard/records.json`)
fn resolve_records_path(cli_records: Option<PathBuf>) -> PathBuf {
    if let Some(path) = cli_records {
        return path;
    }

    if let Ok(env_path) = std::env::var(PB_RECORDS_PATH_ENV)
        && !env_path.is_empty()
    {
        return PathBuf::from(env_path);
    }

    match dirs::data_dir() {
        Some(dir) => dir.join(DATA_SUBDIR).join(DEFAULT_RECORDS_FILE),
        None => PathBuf::from(DEFAULT_RECORDS_FILE),
    }
}

/// Initialize logging from `RUST_LOG`, defaulting to `warn`.
///
/// Examples:
/// - `RUST_LOG=trace` - every step and emission
/// - `RUST_LOG=debug` - emissions, clamp corrections and fetches
/// - `RUST_LOG=planboard_core=debug` - core only
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run_app().await {
        eprintln!("error: {}", e.full_message());
        process::exit(1);
    }
}

/// Main application logic - separated for testability
async fn run_app() -> CoreResult<()> {
    let args = Args::parse();
    let output = run_with_args(&args).await?;
    println!("{}", output);
    Ok(())
}

/// Run the application with the given arguments and return what to print
async fn run_with_args(args: &Args) -> CoreResult<String> {
    let calendar = GranularityCalendar::from_utc_offset_minutes(args.utc_offset)?;
    let records_path = resolve_records_path(args.records.clone());
    tracing::debug!(path = %records_path.display(), offset = %calendar.offset(), "session config");

    let ctx = Context {
        calendar,
        store: RecordStore::new(records_path),
        now: SystemClock.now(),
    };

    match &args.command {
        Some(cmd) => cmd.execute(&ctx).await,
        None => Ok("Welcome to Planboard!\nUse 'pb --help' for usage information.".to_string()),
    }
}
