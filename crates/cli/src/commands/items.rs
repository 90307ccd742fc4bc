//! Items command for listing an employee's timeline
//!
//! Implements the `pb items` command: fetch the schedule records that
//! overlap a window and map them into timeline groups and items.

use clap::Args;
use planboard_core::{CoreResult, Granularity, Instant, TimelineItemMapper};

use super::{Context, parse_granularity, parse_instant};
use crate::output::{ItemsReport, WindowReport, format_items_report, to_json};

/// List an employee's timeline items for a window
#[derive(Debug, Args)]
pub struct ItemsCommand {
    /// Employee whose schedule to show
    #[arg(short, long, env = "PB_EMPLOYEE")]
    pub employee: String,

    /// Display name for the employee row (defaults to the employee id)
    #[arg(long)]
    pub name: Option<String>,

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

impl ItemsCommand {
    /// Fetch and map the records for the selected window.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::RecordSource` or `CoreError::Parse` if the record
    /// file cannot be loaded.
    pub async fn report(&self, ctx: &Context) -> CoreResult<ItemsReport> {
        let anchor = self.anchor.unwrap_or(ctx.now);
        let window = ctx.calendar.window_for(anchor, self.granularity);
        let records = ctx.store.fetch(&self.employee, &window).await?;

        let name = self.name.as_deref().unwrap_or(&self.employee);
        Ok(ItemsReport {
            current: WindowReport {
                granularity: self.granularity,
                label: ctx.calendar.label(anchor, self.granularity),
                window,
            },
            groups: TimelineItemMapper::map_groups(name),
            items: TimelineItemMapper::map_items(&records),
        })
    }

    /// Execute the items command.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if the record file cannot be loaded.
    pub async fn execute(&self, ctx: &Context) -> CoreResult<String> {
        let report = self.report(ctx).await?;
        if self.json {
            to_json(&report)
        } else {
            Ok(format_items_report(&report))
        }
    }
}
