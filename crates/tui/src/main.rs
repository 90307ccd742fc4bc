//! Entry point for the Planboard TUI application.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use planboard_core::{DEFAULT_RECORDS_FILE, Granularity, GranularityCalendar};
use planboard_tui::{App, AppConfig, TuiError, TuiResult};

/// Planboard timeline - browse an employee's schedule by day, week or month
#[derive(Parser)]
#[command(name = "pb-tui")]
#[command(version = "0.1.0")]
#[command(about = "Terminal timeline for an employee's schedule", long_about = None)]
struct Args {
    /// Path to the record file
    #[arg(long, env = "PB_RECORDS_PATH")]
    records: Option<PathBuf>,

    /// Employee whose schedule to show
    #[arg(short, long, env = "PB_EMPLOYEE")]
    employee: String,

    /// Display name for the employee row
    #[arg(long)]
    name: Option<String>,

    /// Initial granularity: day, week or month
    #[arg(short, long, default_value = "week", value_parser = parse_granularity)]
    granularity: Granularity,

    /// Canonical zone as minutes east of UTC
    #[arg(
        long,
        env = "PB_UTC_OFFSET",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    utc_offset: i32,

    /// Write logs to this file; nothing is logged otherwise
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_granularity(s: &str) -> Result<Granularity, String> {
    Granularity::parse(s)
        .ok_or_else(|| format!("invalid granularity '{}'. Valid values: day, week, month", s))
}

/// Record file from the flag or env var, else `<data dir>/planboard/records.json`.
fn resolve_records_path(records: Option<PathBuf>) -> PathBuf {
    records.unwrap_or_else(|| match dirs::data_dir() {
        Some(dir) => dir.join("planboard").join(DEFAULT_RECORDS_FILE),
        None => PathBuf::from(DEFAULT_RECORDS_FILE),
    })
}

/// Send logs to `path`. The terminal belongs to the UI, so without a log
/// file no subscriber is installed.
fn init_logging(path: Option<&PathBuf>) -> TuiResult<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| TuiError::LogFile {
            path: path.clone(),
            source,
        })?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> TuiResult<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let config = AppConfig {
        records: resolve_records_path(args.records),
        employee_id: args.employee,
        employee_name: args.name,
        granularity: args.granularity,
        calendar: GranularityCalendar::from_utc_offset_minutes(args.utc_offset)?,
    };
    tracing::info!(
        records = %config.records.display(),
        employee = %config.employee_id,
        "starting timeline"
    );

    let mut app = App::new(config).await;
    app.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn with_env<T>(var: &str, value: Option<&str>, f: impl FnOnce() -> T) -> T {
        let original = env::var(var).ok();
        // SAFETY: Tests touching env vars are #[serial] and restore the original value
        unsafe {
            match value {
                Some(v) => env::set_var(var, v),
                None => env::remove_var(var),
            }
        }
        let result = f();
        // SAFETY: Restoring to original state under #[serial]
        unsafe {
            match original {
                Some(val) => env::set_var(var, val),
                None => env::remove_var(var),
            }
        }
        result
    }

    #[test]
    #[serial]
    fn test_args_require_employee() {
        let result = with_env("PB_EMPLOYEE", None, || Args::try_parse_from(["pb-tui"]));
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_employee_from_env() {
        let args = with_env("PB_EMPLOYEE", Some("e7"), || {
            Args::try_parse_from(["pb-tui"]).unwrap()
        });
        assert_eq!(args.employee, "e7");
    }

    #[test]
    #[serial]
    fn test_args_defaults() {
        let args = with_env("PB_UTC_OFFSET", None, || {
            Args::try_parse_from(["pb-tui", "--employee", "e1"]).unwrap()
        });
        assert_eq!(args.employee, "e1");
        assert_eq!(args.granularity, Granularity::Week);
        assert_eq!(args.utc_offset, 0);
        assert!(args.log_file.is_none());
    }

    #[test]
    #[serial]
    fn test_args_month_with_negative_offset() {
        let args = Args::try_parse_from([
            "pb-tui", "-e", "e1", "-g", "m", "--utc-offset", "-300",
        ])
        .unwrap();
        assert_eq!(args.granularity, Granularity::Month);
        assert_eq!(args.utc_offset, -300);
    }

    #[test]
    fn test_explicit_records_path_wins() {
        let path = PathBuf::from("/tmp/records.json");
        assert_eq!(resolve_records_path(Some(path.clone())), path);
        assert!(resolve_records_path(None).ends_with(DEFAULT_RECORDS_FILE));
    }
}
