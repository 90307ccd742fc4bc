//! Main application state and event loop.

use std::cell::RefCell;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use crossterm::{
    event::KeyEvent,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::prelude::*;

use planboard_core::{
    Bounds, Granularity, GranularityCalendar, RecordStore, SystemClock, TimeWindowController,
    TimelineGroup, TimelineItem, TimelineItemMapper, Window, WindowChange,
};

use crate::error::TuiResult;
use crate::event::{
    granularity_key, is_down, is_next, is_pan_back, is_pan_forward, is_previous, is_quit, is_up,
    poll_key,
};
use crate::ui;

/// Startup options for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path of the schedule record file.
    pub records: PathBuf,
    /// Employee whose schedule is shown.
    pub employee_id: String,
    /// Display name for the employee row; defaults to the id.
    pub employee_name: Option<String>,
    /// Initial granularity.
    pub granularity: Granularity,
    /// Calendar in the canonical zone.
    pub calendar: GranularityCalendar,
}

/// Main application state.
pub struct App {
    /// Navigation state machine; its window is the surface's visible range.
    controller: TimeWindowController,
    /// Source of schedule records.
    store: RecordStore,
    /// Employee whose records are fetched.
    employee_id: String,
    /// The single employee group row.
    groups: Vec<TimelineGroup>,
    /// Items for the last fetched window.
    items: Vec<TimelineItem>,
    /// Latest emitted window not yet fetched. Later emissions overwrite
    /// earlier ones, so only the most recent window is ever fetched.
    pending: Rc<RefCell<Option<WindowChange>>>,
    /// Index of the selected item.
    selected_index: usize,
    /// Whether the application is still running.
    running: bool,
    /// Message of the last failed fetch, shown in the status bar.
    load_error: Option<String>,
}

impl App {
    /// Create a new App anchored at the current time and load the first window.
    pub async fn new(config: AppConfig) -> Self {
        let controller =
            TimeWindowController::new(config.calendar, SystemClock, config.granularity);
        let mut app = Self::with_controller(
            controller,
            RecordStore::new(config.records),
            config.employee_id,
            config.employee_name.as_deref(),
        );
        app.controller.emit_current();
        app.refetch_if_dirty().await;
        app
    }

    /// Wire an existing controller to a record store.
    ///
    /// Nothing is fetched until the controller emits and
    /// [`refetch_if_dirty`](Self::refetch_if_dirty) runs.
    pub fn with_controller(
        mut controller: TimeWindowController,
        store: RecordStore,
        employee_id: String,
        employee_name: Option<&str>,
    ) -> Self {
        let pending = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&pending);
        controller.subscribe(move |change: &WindowChange| {
            *slot.borrow_mut() = Some(*change);
        });

        let groups = TimelineItemMapper::map_groups(employee_name.unwrap_or(&employee_id));

        Self {
            controller,
            store,
            employee_id,
            groups,
            items: Vec::new(),
            pending,
            selected_index: 0,
            running: true,
            load_error: None,
        }
    }

    /// Label for the current window.
    pub fn label(&self) -> String {
        self.controller.label()
    }

    pub fn granularity(&self) -> Granularity {
        self.controller.granularity()
    }

    /// The surface's visible range.
    pub fn window(&self) -> Window {
        self.controller.window()
    }

    pub fn bounds(&self) -> Bounds {
        self.controller.bounds()
    }

    pub fn calendar(&self) -> &GranularityCalendar {
        self.controller.calendar()
    }

    pub fn groups(&self) -> &[TimelineGroup] {
        &self.groups
    }

    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Get the currently selected item, if any.
    pub fn selected_item(&self) -> Option<&TimelineItem> {
        self.items.get(self.selected_index)
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Check if the application is still running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Request the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Select the next item (does not wrap).
    pub fn select_next(&mut self) {
        if self.selected_index + 1 < self.items.len() {
            self.selected_index += 1;
        }
    }

    /// Select the previous item (does not wrap).
    pub fn select_previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    /// Pan the surface by a quarter of the visible range.
    ///
    /// The request goes through the controller, which clamps it to the
    /// session bounds.
    pub fn pan(&mut self, forward: bool) {
        let window = self.controller.window();
        let quarter = window.span() / 4;
        let delta = if forward { quarter } else { -quarter };
        self.controller.on_surface_pan(window.shifted(delta));
    }

    /// Fetch records for the pending window, if any.
    ///
    /// This should be called in the event loop after handling key events.
    /// A failed fetch keeps the previous items and records the error for
    /// the status bar.
    pub async fn refetch_if_dirty(&mut self) {
        let Some(change) = self.pending.borrow_mut().take() else {
            return;
        };

        match self.store.fetch(&self.employee_id, &change.window).await {
            Ok(records) => {
                self.items = TimelineItemMapper::map_items(&records);
                self.selected_index = 0;
                self.load_error = None;
            }
            Err(e) => {
                tracing::error!(error = %e.full_message(), "failed to load schedule records");
                self.load_error = Some(e.full_message());
            }
        }
    }

    /// Run the main application loop.
    ///
    /// This initializes the terminal, runs the event loop, and ensures
    /// the terminal is restored on exit (even on panic).
    pub async fn run(&mut self) -> TuiResult<()> {
        let mut terminal = init_terminal()?;

        // Use scopeguard to ensure terminal cleanup on panic
        let _guard = scopeguard::guard((), |()| {
            let _ = restore_terminal();
        });

        let result = self.event_loop(&mut terminal).await;

        drop(_guard);

        result
    }

    /// The main event loop.
    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> TuiResult<()> {
        while self.running {
            terminal.draw(|frame| ui::draw(frame, self))?;

            if let Some(key) = poll_key(Duration::from_millis(100))? {
                self.handle_key(&key);
                self.refetch_if_dirty().await;
            }
        }
        Ok(())
    }

    /// Handle a keyboard event.
    fn handle_key(&mut self, key: &KeyEvent) {
        if is_quit(key) {
            self.quit();
        } else if let Some(granularity) = granularity_key(key) {
            self.controller.set_granularity(granularity);
        } else if is_previous(key) {
            self.controller.go_previous();
        } else if is_next(key) {
            self.controller.go_next();
        } else if is_pan_back(key) {
            self.pan(false);
        } else if is_pan_forward(key) {
            self.pan(true);
        } else if is_down(key) {
            self.select_next();
        } else if is_up(key) {
            self.select_previous();
        }
    }
}

/// Initialize the terminal for TUI rendering.
fn init_terminal() -> TuiResult<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
fn restore_terminal() -> TuiResult<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use crossterm::event::{KeyCode, KeyModifiers};
    use planboard_core::{FixedClock, Instant};

    const RECORDS: &str = r#"[
        {"id": "this-week", "employee_id": "e1", "start_time": "2025-06-11T08:00:00Z",
         "end_time": "2025-06-11T12:00:00Z", "kind": "project",
         "project": {"name": "Apollo", "work_package": {"name": "Telemetry"}}},
        {"id": "also-this-week", "employee_id": "e1", "start_time": "2025-06-12T08:00:00Z",
         "end_time": "2025-06-12T10:00:00Z", "kind": "internal_task",
         "internal_task": {"name": "QA Review"}},
        {"id": "next-week", "employee_id": "e1", "start_time": "2025-06-18T08:00:00Z",
         "end_time": "2025-06-18T12:00:00Z", "kind": "internal_task",
         "internal_task": {"name": "Planning"}},
        {"id": "in-three-weeks", "employee_id": "e1", "start_time": "2025-07-02T08:00:00Z",
         "end_time": "2025-07-02T12:00:00Z", "kind": "project",
         "project": {"name": "Hermes"}}
    ]"#;

    fn now() -> Instant {
        Utc.with_ymd_and_hms(2025, 6, 11, 12, 0, 0).unwrap()
    }

    struct TempRecords(PathBuf);

    impl TempRecords {
        fn new(contents: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "pb-tui-app-test-{}-{:?}-{}.json",
                std::process::id(),
                std::thread::current().id(),
                std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .unwrap()
                    .as_nanos()
            ));
            std::fs::write(&path, contents).unwrap();
            Self(path)
        }
    }

    impl Drop for TempRecords {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    fn app(records: &TempRecords) -> App {
        let controller = TimeWindowController::new(
            GranularityCalendar::utc(),
            FixedClock(now()),
            Granularity::Week,
        );
        App::with_controller(
            controller,
            RecordStore::new(&records.0),
            "e1".to_string(),
            Some("Ada Lovelace"),
        )
    }

    async fn loaded(records: &TempRecords) -> App {
        let mut app = app(records);
        app.controller.emit_current();
        app.refetch_if_dirty().await;
        app
    }

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn ids(app: &App) -> Vec<&str> {
        app.items().iter().map(|i| i.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_initial_fetch_loads_current_week() {
        let records = TempRecords::new(RECORDS);
        let app = loaded(&records).await;
        assert_eq!(ids(&app), vec!["this-week", "also-this-week"]);
        assert_eq!(app.groups()[0].title, "Ada Lovelace");
        assert_eq!(app.label(), "Jun 9 – Jun 15, 2025");
    }

    #[tokio::test]
    async fn test_nothing_fetched_without_emission() {
        let records = TempRecords::new(RECORDS);
        let mut app = app(&records);
        app.refetch_if_dirty().await;
        assert!(app.items().is_empty());
    }

    #[tokio::test]
    async fn test_next_key_moves_window_and_refetches() {
        let records = TempRecords::new(RECORDS);
        let mut app = loaded(&records).await;

        app.handle_key(&key('l'));
        app.refetch_if_dirty().await;

        assert_eq!(app.window().start, Utc.with_ymd_and_hms(2025, 6, 16, 0, 0, 0).unwrap());
        assert_eq!(ids(&app), vec!["next-week"]);
    }

    #[tokio::test]
    async fn test_last_window_wins() {
        let records = TempRecords::new(RECORDS);
        let mut app = loaded(&records).await;

        app.handle_key(&key('l'));
        app.handle_key(&key('l'));
        app.handle_key(&key('l'));
        app.refetch_if_dirty().await;

        assert_eq!(ids(&app), vec!["in-three-weeks"]);
        // The slot was drained by the single fetch.
        assert!(app.pending.borrow().is_none());
    }

    #[tokio::test]
    async fn test_granularity_key_resets_to_now() {
        let records = TempRecords::new(RECORDS);
        let mut app = loaded(&records).await;

        app.handle_key(&key('l'));
        app.handle_key(&key('d'));
        app.refetch_if_dirty().await;

        assert_eq!(app.granularity(), Granularity::Day);
        assert_eq!(app.label(), "Wednesday, June 11, 2025");
        assert_eq!(ids(&app), vec!["this-week"]);
    }

    #[tokio::test]
    async fn test_pan_is_clamped_to_bounds() {
        let records = TempRecords::new(RECORDS);
        let mut app = loaded(&records).await;
        let span = app.window().span();

        for _ in 0..100 {
            app.handle_key(&KeyEvent::new(KeyCode::Char('H'), KeyModifiers::SHIFT));
        }
        app.refetch_if_dirty().await;

        assert_eq!(app.window().start, app.bounds().min);
        assert_eq!(app.window().span(), span);
        assert!(app.items().is_empty());
    }

    #[tokio::test]
    async fn test_pan_forward_moves_a_quarter_window() {
        let records = TempRecords::new(RECORDS);
        let mut app = loaded(&records).await;
        let before = app.window();

        app.handle_key(&KeyEvent::new(KeyCode::Char('L'), KeyModifiers::SHIFT));

        assert_eq!(app.window().start, before.start + before.span() / 4);
        assert_eq!(app.granularity(), Granularity::Week);
    }

    #[tokio::test]
    async fn test_selection_stays_in_range() {
        let records = TempRecords::new(RECORDS);
        let mut app = loaded(&records).await;

        app.handle_key(&key('k'));
        assert_eq!(app.selected_index(), 0);
        app.handle_key(&key('j'));
        app.handle_key(&key('j'));
        assert_eq!(app.selected_index(), 1);
        assert_eq!(app.selected_item().unwrap().title, "QA Review");

        app.handle_key(&key('l'));
        app.refetch_if_dirty().await;
        assert_eq!(app.selected_index(), 0);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_items_and_reports() {
        let records = TempRecords::new(RECORDS);
        let mut app = loaded(&records).await;

        std::fs::write(&records.0, "not json").unwrap();
        app.handle_key(&key('l'));
        app.refetch_if_dirty().await;

        assert_eq!(ids(&app), vec!["this-week", "also-this-week"]);
        assert!(app.load_error().unwrap().contains("Failed to parse"));

        std::fs::write(&records.0, RECORDS).unwrap();
        app.handle_key(&key('h'));
        app.refetch_if_dirty().await;
        assert!(app.load_error().is_none());
    }

    #[test]
    fn test_quit_key() {
        let records = TempRecords::new("[]");
        let mut app = app(&records);
        assert!(app.is_running());
        app.handle_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.is_running());
    }
}
