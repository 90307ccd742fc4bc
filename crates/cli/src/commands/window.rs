//! Window command for showing the range a granularity covers
//!
//! Implements the `pb window` command: derive the calendar window that
//! contains an anchor instant.

use clap::Args;
use planboard_core::{CoreResult, Granularity, Instant};

use super::{Context, parse_granularity, parse_instant};
use crate::output::{WindowReport, format_window_report, to_json};

/// Show the window for a granularity around an anchor
#[derive(Debug, Args)]
pub struct WindowCommand {
    /// Granularity: day, week or month
    #[arg(short, long, default_value = "week", value_parser = parse_granularity)]
    pub granularity: Granularity,

    /// Anchor instant (defaults to now)
    #[arg(short, long, value_parser = parse_instant)]
    pub anchor: Option<Instant>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl WindowCommand {
    /// Build the report without formatting it.
    pub fn report(&self, ctx: &Context) -> WindowReport {
        let anchor = self.anchor.unwrap_or(ctx.now);
        WindowReport {
            granularity: self.granularity,
            label: ctx.calendar.label(anchor, self.granularity),
            window: ctx.calendar.window_for(anchor, self.granularity),
        }
    }

    /// Execute the window command.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ValidationError` if JSON encoding fails.
    pub fn execute(&self, ctx: &Context) -> CoreResult<String> {
        let report = self.report(ctx);
        if self.json {
            to_json(&report)
        } else {
            Ok(format_window_report(&report))
        }
    }
}
