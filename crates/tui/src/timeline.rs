//! Timeline surface for one employee's schedule.
//!
//! Draws the controller's current window as a horizontal scale whose columns
//! follow the granularity (hours for a day, weekdays for a week, dates for a
//! month), the employee group row, and one bar per timeline item colored
//! from the item's background color.

use chrono::Duration;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use planboard_core::{
    Granularity, GranularityCalendar, Instant, TimelineGroup, TimelineItem, Window,
};

/// Everything the surface needs to draw one frame.
pub struct TimelineView<'a> {
    pub window: Window,
    pub granularity: Granularity,
    pub calendar: &'a GranularityCalendar,
    pub groups: &'a [TimelineGroup],
    pub items: &'a [TimelineItem],
    pub selected_index: usize,
}

/// Configuration for the timeline display.
struct TimelineConfig {
    /// Visible range; always the controller's window.
    window: Window,
    /// Width available for the timeline bars (excluding label area).
    bar_width: u16,
    /// Width of the label area on the left.
    label_width: u16,
    /// Column boundaries for grid lines and headers.
    columns: Vec<ColumnInfo>,
}

/// Information about a single column in the timeline header.
#[derive(Debug, Clone)]
struct ColumnInfo {
    /// Label to display for this column.
    label: String,
    /// Start position (0-based, relative to bar area).
    start_col: u16,
    /// End position (exclusive).
    end_col: u16,
}

/// Column length and label format for a granularity.
fn column_unit(granularity: Granularity) -> (Duration, &'static str) {
    match granularity {
        Granularity::Day => (Duration::hours(1), "%H"),
        Granularity::Week => (Duration::days(1), "%a %-d"),
        Granularity::Month => (Duration::days(1), "%-d"),
    }
}

impl TimelineConfig {
    fn new(
        window: Window,
        granularity: Granularity,
        calendar: &GranularityCalendar,
        area_width: u16,
    ) -> Self {
        let label_width = 30u16.min(area_width / 3);
        let bar_width = area_width.saturating_sub(label_width).saturating_sub(1);
        let columns = Self::calculate_columns(window, granularity, calendar, bar_width);
        Self {
            window,
            bar_width,
            label_width,
            columns,
        }
    }

    /// Split the window into granularity sub-units, labelled in the
    /// calendar's zone.
    fn calculate_columns(
        window: Window,
        granularity: Granularity,
        calendar: &GranularityCalendar,
        bar_width: u16,
    ) -> Vec<ColumnInfo> {
        if bar_width == 0 {
            return Vec::new();
        }

        let (unit, format) = column_unit(granularity);
        let mut columns = Vec::new();
        let mut column_start = window.start;

        while column_start <= window.end {
            let Some(column_end) = column_start.checked_add_signed(unit) else {
                break;
            };
            let start_col = Self::position(window, column_start, bar_width);
            let end_col = Self::position(window, column_end, bar_width);

            if end_col > start_col {
                columns.push(ColumnInfo {
                    label: calendar.local(column_start).format(format).to_string(),
                    start_col,
                    end_col: end_col.min(bar_width),
                });
            }

            column_start = column_end;
        }

        columns
    }

    /// Column offset of an instant within `window`, clamped to the bar area.
    fn position(window: Window, instant: Instant, bar_width: u16) -> u16 {
        // The window end is inclusive; count its last millisecond.
        let span_ms = window.span().num_milliseconds().saturating_add(1).max(1);
        let offset_ms = (instant - window.start).num_milliseconds().clamp(0, span_ms);
        ((offset_ms as f64 / span_ms as f64) * bar_width as f64).round() as u16
    }

    /// Visible column range of an item's bar, at least one character wide.
    fn bar_range(&self, item: &TimelineItem) -> (usize, usize) {
        let bar_width = self.bar_width as usize;
        let start = (Self::position(self.window, item.start, self.bar_width) as usize)
            .min(bar_width.saturating_sub(1));
        let end = (Self::position(self.window, item.end, self.bar_width) as usize)
            .max(start + 1)
            .min(bar_width);
        (start, end)
    }
}

/// Parse a `#rrggbb` color into a terminal RGB color.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    Some(Color::Rgb(
        (value >> 16) as u8,
        (value >> 8) as u8,
        value as u8,
    ))
}

/// Render the timeline surface.
///
/// Rows are the column header, a separator, each group's row and then one
/// row per item. The view scrolls vertically to keep the selected item
/// visible.
pub fn render_timeline_view(frame: &mut Frame, area: Rect, view: &TimelineView<'_>) {
    let block = Block::default()
        .title(" Timeline ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner_width = area.width.saturating_sub(2);
    let inner_height = area.height.saturating_sub(2) as usize;
    let config = TimelineConfig::new(view.window, view.granularity, view.calendar, inner_width);

    let mut lines = vec![build_date_header(&config), build_separator(&config)];
    for group in view.groups {
        lines.push(build_group_line(group, &config));
    }

    let fixed_rows = lines.len();
    if view.items.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No items in this window",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (index, item) in view.items.iter().enumerate() {
        lines.push(build_item_line(
            item,
            &config,
            view.calendar,
            index == view.selected_index,
        ));
    }

    let visible_item_rows = inner_height.saturating_sub(fixed_rows).max(1);
    let scroll = view.selected_index.saturating_sub(visible_item_rows - 1);

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((scroll as u16, 0));
    frame.render_widget(paragraph, area);
}

/// Build the header line with column labels centered in each column.
fn build_date_header(config: &TimelineConfig) -> Line<'static> {
    let bar_width = config.bar_width as usize;
    let mut header_chars = vec![' '; bar_width];

    for col in &config.columns {
        let col_width = (col.end_col - col.start_col) as usize;
        let label_len = col.label.chars().count();

        if col_width >= label_len {
            let start_pos = col.start_col as usize + (col_width - label_len) / 2;
            for (i, c) in col.label.chars().enumerate() {
                if let Some(slot) = header_chars.get_mut(start_pos + i) {
                    *slot = c;
                }
            }
        } else {
            // Column too narrow - show what fits
            for (i, c) in col.label.chars().take(col_width).enumerate() {
                if let Some(slot) = header_chars.get_mut(col.start_col as usize + i) {
                    *slot = c;
                }
            }
        }
    }

    Line::from(vec![
        Span::raw(" ".repeat(config.label_width as usize)),
        Span::styled(
            header_chars.iter().collect::<String>(),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Build a separator line with grid markers at column boundaries.
fn build_separator(config: &TimelineConfig) -> Line<'static> {
    let bar_width = config.bar_width as usize;
    let mut sep_chars = vec!['\u{2500}'; bar_width];

    for col in &config.columns {
        if col.start_col > 0
            && let Some(slot) = sep_chars.get_mut(col.start_col as usize)
        {
            *slot = '\u{253C}';
        }
    }

    if let Some(first) = sep_chars.first_mut() {
        *first = '\u{251C}';
    }
    if bar_width > 1 {
        sep_chars[bar_width - 1] = '\u{2524}';
    }

    Line::from(vec![
        Span::raw(" ".repeat(config.label_width as usize)),
        Span::styled(
            sep_chars.iter().collect::<String>(),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Pad or truncate `text` to exactly `width` characters.
fn fit_label(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        format!("{:<width$}", text, width = width)
    } else if width <= 3 {
        text.chars().take(width).collect()
    } else {
        let head: String = text.chars().take(width - 3).collect();
        format!("{}...", head)
    }
}

/// Build the row for an employee group.
fn build_group_line(group: &TimelineGroup, config: &TimelineConfig) -> Line<'static> {
    let label = fit_label(&format!("\u{25B8} {}", group.title), config.label_width as usize);
    Line::from(vec![
        Span::styled(
            label,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "\u{00B7}".repeat(config.bar_width as usize),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

/// Build an item row: start time and title on the left, its bar on the right.
fn build_item_line(
    item: &TimelineItem,
    config: &TimelineConfig,
    calendar: &GranularityCalendar,
    is_selected: bool,
) -> Line<'static> {
    let selection_prefix = if is_selected { "> " } else { "  " };
    let start = calendar.local(item.start).format("%m/%d %H:%M");
    let label = fit_label(
        &format!("{}{} {}", selection_prefix, start, item.title),
        config.label_width as usize,
    );

    let label_style = if is_selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let mut spans = vec![Span::styled(label, label_style)];

    let bar_width = config.bar_width as usize;
    if bar_width == 0 {
        return Line::from(spans);
    }

    let (bar_start, bar_end) = config.bar_range(item);
    let fill = parse_hex_color(item.background_color).unwrap_or(Color::Gray);
    let edge = parse_hex_color(item.border_color).unwrap_or(fill);

    let bar_style = if is_selected {
        Style::default()
            .fg(edge)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    } else {
        Style::default().fg(fill)
    };

    if bar_start > 0 {
        spans.push(Span::raw(" ".repeat(bar_start)));
    }
    spans.push(Span::styled(
        "\u{2588}".repeat(bar_end - bar_start),
        bar_style,
    ));
    if bar_end < bar_width {
        spans.push(Span::raw(" ".repeat(bar_width - bar_end)));
    }

    Line::from(spans)
}
