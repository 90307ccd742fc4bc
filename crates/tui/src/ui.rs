//! UI rendering for the TUI.
//!
//! Provides layout and widget rendering using ratatui.

use chrono::SecondsFormat;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph, Tabs},
};

use planboard_core::Granularity;

use crate::app::App;
use crate::timeline::{TimelineView, render_timeline_view};

/// Legend text for keyboard shortcuts.
const LEGEND: &str =
    " [d/w/m] Granularity  [h/l] Prev/Next  [H/L] Pan  [j/k] Select  [q] Quit ";

/// Draw the entire UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = create_main_layout(frame.area());

    draw_header(frame, chunks[0], app);

    let view = TimelineView {
        window: app.window(),
        granularity: app.granularity(),
        calendar: app.calendar(),
        groups: app.groups(),
        items: app.items(),
        selected_index: app.selected_index(),
    };
    render_timeline_view(frame, chunks[1], &view);

    draw_status(frame, chunks[2], app);
    draw_legend(frame, chunks[3]);
}

/// Create the four-part layout: header, timeline, status line, legend.
fn create_main_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Granularity tabs with label
            Constraint::Min(0),    // Timeline
            Constraint::Length(1), // Status line
            Constraint::Length(1), // Legend bar
        ])
        .split(area)
        .to_vec()
}

/// Index of a granularity in the header tabs.
fn tab_index(granularity: Granularity) -> usize {
    Granularity::ALL
        .iter()
        .position(|g| *g == granularity)
        .unwrap_or(0)
}

/// Draw the granularity tabs, titled with the current label.
fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Granularity::ALL
        .iter()
        .map(|g| Line::from(g.as_str()))
        .collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(format!(" {} ", app.label()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .select(tab_index(app.granularity()))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

/// Status text: the fetch error if there is one, otherwise the session bounds.
fn status_text(app: &App) -> (String, Style) {
    match app.load_error() {
        Some(message) => (format!(" {}", message), Style::default().fg(Color::Red)),
        None => {
            let bounds = app.bounds();
            (
                format!(
                    " {} items  bounds {} .. {}",
                    app.items().len(),
                    bounds.min.to_rfc3339_opts(SecondsFormat::Secs, true),
                    bounds.max.to_rfc3339_opts(SecondsFormat::Secs, true)
                ),
                Style::default().fg(Color::DarkGray),
            )
        }
    }
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App) {
    let (text, style) = status_text(app);
    frame.render_widget(Paragraph::new(text).style(style), area);
}

/// Draw the legend bar at the bottom.
fn draw_legend(frame: &mut Frame, area: Rect) {
    let legend = Paragraph::new(LEGEND).style(Style::default().fg(Color::Black).bg(Color::Cyan));

    frame.render_widget(legend, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_mentions_every_action() {
        for key in ["d/w/m", "h/l", "H/L", "j/k", "q"] {
            assert!(LEGEND.contains(key), "legend is missing {}", key);
        }
    }

    #[test]
    fn test_tab_index_follows_granularity_order() {
        assert_eq!(tab_index(Granularity::Day), 0);
        assert_eq!(tab_index(Granularity::Week), 1);
        assert_eq!(tab_index(Granularity::Month), 2);
    }

    #[test]
    fn test_create_main_layout_produces_four_chunks() {
        let area = Rect::new(0, 0, 80, 24);
        let chunks = create_main_layout(area);
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[0].height, 3);
        assert_eq!(chunks[3].height, 1);
    }

    #[test]
    fn test_create_main_layout_small_terminal() {
        let area = Rect::new(0, 0, 40, 6);
        let chunks = create_main_layout(area);
        assert_eq!(chunks.len(), 4);
    }
}
