//! CLI commands for Planboard
//!
//! This module contains all subcommand implementations for the pb CLI.

pub mod clamp;
pub mod items;
pub mod step;
pub mod window;

pub use clamp::ClampCommand;
pub use items::ItemsCommand;
pub use step::StepCommand;
pub use window::WindowCommand;

use chrono::{DateTime, NaiveDate, Utc};
use clap::Subcommand;
use planboard_core::{CoreResult, Direction, Granularity, GranularityCalendar, Instant, RecordStore};

/// Everything a command needs from the session.
pub struct Context {
    /// Calendar in the configured canonical zone.
    pub calendar: GranularityCalendar,
    /// Source of schedule records.
    pub store: RecordStore,
    /// Session start; anchors default to it and bounds derive from it.
    pub now: Instant,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the window for a granularity around an anchor
    Window(WindowCommand),
    /// Page the window forward or backward
    Step(StepCommand),
    /// Clamp a requested window to the session bounds
    Clamp(ClampCommand),
    /// List an employee's timeline items for a window
    Items(ItemsCommand),
}

impl Command {
    /// Execute the command against the session context.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if the command input is invalid or records cannot
    /// be loaded.
    pub async fn execute(&self, ctx: &Context) -> CoreResult<String> {
        match self {
            Command::Window(cmd) => cmd.execute(ctx),
            Command::Step(cmd) => cmd.execute(ctx),
            Command::Clamp(cmd) => cmd.execute(ctx),
            Command::Items(cmd) => cmd.execute(ctx).await,
        }
    }
}

/// Parse a granularity string into a Granularity enum
pub(crate) fn parse_granularity(s: &str) -> Result<Granularity, String> {
    Granularity::parse(s)
        .ok_or_else(|| format!("invalid granularity '{}'. Valid values: day, week, month", s))
}

/// Parse a direction string into a Direction enum
pub(crate) fn parse_direction(s: &str) -> Result<Direction, String> {
    Direction::parse(s)
        .ok_or_else(|| format!("invalid direction '{}'. Valid values: next, prev", s))
}

/// Parse an RFC 3339 timestamp, or a bare date taken as midnight UTC.
pub(crate) fn parse_instant(s: &str) -> Result<Instant, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            format!(
                "invalid timestamp '{}'. Use RFC 3339 (2025-06-11T09:00:00Z) or a date (2025-06-11)",
                s
            )
        })
}
