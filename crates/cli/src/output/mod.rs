//! Output formatting module for Planboard
//!
//! Provides report types, table formatting and JSON encoding for CLI output.

use chrono::SecondsFormat;
use serde::Serialize;

use planboard_core::{
    Bounds, CoreError, CoreResult, Granularity, Instant, TimelineGroup, TimelineItem, Window,
};

/// Maximum width for the title column before truncation
const MAX_TITLE_WIDTH: usize = 40;

/// A window together with its granularity and label.
#[derive(Debug, Serialize)]
pub struct WindowReport {
    pub granularity: Granularity,
    pub label: String,
    pub window: Window,
}

/// Result of paging the window.
#[derive(Debug, Serialize)]
pub struct StepReport {
    pub anchor: Instant,
    #[serde(flatten)]
    pub current: WindowReport,
    /// Stepping is never clamped, so the window may leave the bounds.
    pub outside_bounds: bool,
}

/// Result of clamping a requested window.
#[derive(Debug, Serialize)]
pub struct ClampReport {
    pub requested: Window,
    pub bounds: Bounds,
    pub clamped: Window,
    pub corrected: bool,
}

/// Mapped timeline for one employee and window.
#[derive(Debug, Serialize)]
pub struct ItemsReport {
    #[serde(flatten)]
    pub current: WindowReport,
    pub groups: Vec<TimelineGroup>,
    pub items: Vec<TimelineItem>,
}

/// Truncate a string to the specified maximum width, adding ellipsis if needed.
fn truncate(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        s.chars().take(max_width).collect()
    } else {
        let head: String = s.chars().take(max_width - 3).collect();
        format!("{}...", head)
    }
}

/// Format an instant as RFC 3339 with millisecond precision.
pub fn format_instant(instant: &Instant) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn format_range(window: &Window) -> String {
    format!(
        "{} .. {}",
        format_instant(&window.start),
        format_instant(&window.end)
    )
}

/// Format a window report.
///
/// ```text
/// week: Jun 9 – Jun 15, 2025
/// 2025-06-09T00:00:00.000Z .. 2025-06-15T23:59:59.999Z
/// ```
pub fn format_window_report(report: &WindowReport) -> String {
    format!(
        "{}: {}\n{}",
        report.granularity,
        report.label,
        format_range(&report.window)
    )
}

/// Format a step report, flagging windows outside the session bounds.
pub fn format_step_report(report: &StepReport) -> String {
    let mut output = format_window_report(&report.current);
    output.push_str(&format!("\nanchor: {}", format_instant(&report.anchor)));
    if report.outside_bounds {
        output.push_str("\n(outside session bounds)");
    }
    output
}

/// Format a clamp report.
pub fn format_clamp_report(report: &ClampReport) -> String {
    let bounds = Window {
        start: report.bounds.min,
        end: report.bounds.max,
    };
    let mut output = format!(
        "requested: {}\nbounds:    {}\nclamped:   {}",
        format_range(&report.requested),
        format_range(&bounds),
        format_range(&report.clamped)
    );
    if report.corrected {
        output.push_str(" (corrected)");
    }
    output
}

/// Format timeline items into an aligned table string.
///
/// Times are UTC, in the same form as the window range.
///
/// ```text
/// ID  Start                     End                       Color    Title
/// --  ------------------------  ------------------------  -------  ------------------
/// r1  2025-06-09T08:00:00.000Z  2025-06-09T12:00:00.000Z  #1677ff  Apollo - Telemetry
/// ```
pub fn format_item_table(items: &[TimelineItem]) -> String {
    if items.is_empty() {
        return "No items in this window.".to_string();
    }

    let headers = ["ID", "Start", "End", "Color", "Title"];
    let rows: Vec<[String; 5]> = items
        .iter()
        .map(|item| {
            [
                item.id.clone(),
                format_instant(&item.start),
                format_instant(&item.end),
                item.background_color.to_string(),
                truncate(&item.title, MAX_TITLE_WIDTH),
            ]
        })
        .collect();

    let widths: Vec<usize> = (0..headers.len())
        .map(|col| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .max()
                .unwrap_or(0)
                .max(headers[col].len())
        })
        .collect();

    let format_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<w$}", cell, w = w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    let separator_cells: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

    let mut lines = vec![format_row(&header_cells), format_row(&separator_cells)];
    lines.extend(rows.iter().map(|row| format_row(&row[..])));
    lines.join("\n")
}

/// Format the mapped timeline: group title, label and item table.
pub fn format_items_report(report: &ItemsReport) -> String {
    let title = report
        .groups
        .first()
        .map(|g| g.title.as_str())
        .unwrap_or("-");
    format!(
        "{} | {}\n{}",
        title,
        format_window_report(&report.current),
        format_item_table(&report.items)
    )
}

/// Encode a report as pretty JSON.
pub fn to_json<T: Serialize>(value: &T) -> CoreResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| CoreError::ValidationError {
        message: format!("Failed to encode output: {}", e),
    })
}
