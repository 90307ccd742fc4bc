//! Clamp command for correcting a free pan
//!
//! Implements the `pb clamp` command: apply the session bounds to a
//! requested window as the timeline surface would.

use clap::Args;
use planboard_core::{Bounds, CoreResult, Instant, Window, WindowClamper};

use super::{Context, parse_instant};
use crate::output::{ClampReport, format_clamp_report, to_json};

/// Clamp a requested window to the session bounds
#[derive(Debug, Args)]
pub struct ClampCommand {
    /// Requested window start
    #[arg(long, value_parser = parse_instant)]
    pub start: Instant,

    /// Requested window end
    #[arg(long, value_parser = parse_instant)]
    pub end: Instant,

    /// Lower bound (defaults to now minus two months)
    #[arg(long, value_parser = parse_instant, requires = "max")]
    pub min: Option<Instant>,

    /// Upper bound (defaults to now plus two months)
    #[arg(long, value_parser = parse_instant, requires = "min")]
    pub max: Option<Instant>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl ClampCommand {
    /// Build the report without formatting it.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidWindow` or `CoreError::InvalidBounds` when
    /// an end precedes its start.
    pub fn report(&self, ctx: &Context) -> CoreResult<ClampReport> {
        let requested = Window::new(self.start, self.end)?;
        let bounds = match (self.min, self.max) {
            (Some(min), Some(max)) => Bounds::new(min, max)?,
            _ => Bounds::from_now(ctx.now),
        };
        let clamped = WindowClamper::clamp(requested, bounds);
        Ok(ClampReport {
            requested,
            bounds,
            clamped,
            corrected: clamped != requested,
        })
    }

    /// Execute the clamp command.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if the requested window or bounds are inverted.
    pub fn execute(&self, ctx: &Context) -> CoreResult<String> {
        let report = self.report(ctx)?;
        if self.json {
            to_json(&report)
        } else {
            Ok(format_clamp_report(&report))
        }
    }
}
