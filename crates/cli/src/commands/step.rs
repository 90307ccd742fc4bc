//! Step command for paging the window
//!
//! Implements the `pb step` command: move the anchor one or more periods
//! forward or backward, the way the previous/next buttons do.

use clap::Args;
use planboard_core::{
    Bounds, CoreResult, Direction, FixedClock, Granularity, Instant, TimeWindowController,
};

use super::{Context, parse_direction, parse_granularity, parse_instant};
use crate::output::{StepReport, WindowReport, format_step_report, to_json};

/// Page the window forward or backward
#[derive(Debug, Args)]
pub struct StepCommand {
    /// Granularity: day, week or month
    #[arg(short, long, default_value = "week", value_parser = parse_granularity)]
    pub granularity: Granularity,

    /// Direction: next or prev
    #[arg(short, long, default_value = "next", value_parser = parse_direction)]
    pub direction: Direction,

    /// Anchor instant to start from (defaults to now)
    #[arg(short, long, value_parser = parse_instant)]
    pub anchor: Option<Instant>,

    /// Number of periods to move
    #[arg(short = 'n', long, default_value_t = 1)]
    pub count: u32,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl StepCommand {
    /// Build the report without formatting it.
    pub fn report(&self, ctx: &Context) -> StepReport {
        let anchor = self.anchor.unwrap_or(ctx.now);
        let mut controller = TimeWindowController::with_bounds(
            ctx.calendar,
            FixedClock(anchor),
            self.granularity,
            Bounds::from_now(ctx.now),
        );
        for _ in 0..self.count {
            match self.direction {
                Direction::Forward => controller.go_next(),
                Direction::Backward => controller.go_previous(),
            }
        }

        let window = controller.window();
        StepReport {
            anchor: controller.anchor(),
            current: WindowReport {
                granularity: controller.granularity(),
                label: controller.label(),
                window,
            },
            outside_bounds: !controller.bounds().contains(&window),
        }
    }

    /// Execute the step command.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ValidationError` if JSON encoding fails.
    pub fn execute(&self, ctx: &Context) -> CoreResult<String> {
        let report = self.report(ctx);
        if self.json {
            to_json(&report)
        } else {
            Ok(format_step_report(&report))
        }
    }
}
