//! TUI module for Planboard
//!
//! Provides a terminal timeline surface for navigating an employee's
//! schedule using ratatui and crossterm.

pub mod app;
pub mod error;
pub mod event;
pub mod timeline;
pub mod ui;

pub use app::{App, AppConfig};
pub use error::{TuiError, TuiResult};
pub use timeline::{TimelineView, parse_hex_color, render_timeline_view};
