//! Test infrastructure for integration tests
//!
//! Provides an isolated record file per test and command builder helpers.

use chrono::{TimeZone, Utc};
use planboard_cli::commands::{
    ClampCommand, Context, ItemsCommand, StepCommand, WindowCommand,
};
use planboard_core::{Direction, Granularity, GranularityCalendar, Instant, RecordStore};
use std::path::PathBuf;

/// Session start used by every test: Wednesday 2025-06-11 12:00 UTC.
pub fn session_now() -> Instant {
    Utc.with_ymd_and_hms(2025, 6, 11, 12, 0, 0).unwrap()
}

/// Shorthand for a UTC instant.
pub fn at(y: i32, m: u32, d: u32, h: u32) -> Instant {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

/// Test context owning a uniquely named record file.
pub struct TestContext {
    pub ctx: Context,
    pub records_path: PathBuf,
}

impl TestContext {
    /// Create a context whose record file does not exist yet.
    ///
    /// The file name uses process ID, thread ID, and nanosecond timestamp
    /// to guarantee isolation.
    pub fn new() -> Self {
        Self::with_calendar(GranularityCalendar::utc())
    }

    /// Create a context with a specific canonical zone.
    pub fn with_calendar(calendar: GranularityCalendar) -> Self {
        let records_path = std::env::temp_dir().join(format!(
            "pb-integration-test-{}-{:?}-{}.json",
            std::process::id(),
            std::thread::current().id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));

        let ctx = Context {
            calendar,
            store: RecordStore::new(&records_path),
            now: session_now(),
        };
        Self { ctx, records_path }
    }

    /// Replace the record file contents.
    pub fn write_records(&self, json: &str) {
        std::fs::write(&self.records_path, json).unwrap();
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.records_path);
    }
}

// =============================================================================
// Record Helpers
// =============================================================================

/// JSON for a project record, optionally with a work package.
pub fn project_record(
    id: &str,
    employee: &str,
    start: Instant,
    end: Instant,
    project: &str,
    work_package: Option<&str>,
) -> String {
    let wp = work_package
        .map(|name| format!(r#", "work_package": {{"name": "{}"}}"#, name))
        .unwrap_or_default();
    format!(
        r#"{{"id": "{}", "employee_id": "{}", "start_time": "{}", "end_time": "{}",
            "kind": "project", "project": {{"name": "{}"{}}}}}"#,
        id,
        employee,
        start.to_rfc3339(),
        end.to_rfc3339(),
        project,
        wp
    )
}

/// JSON for an internal task record.
pub fn internal_record(id: &str, employee: &str, start: Instant, end: Instant, task: &str) -> String {
    format!(
        r#"{{"id": "{}", "employee_id": "{}", "start_time": "{}", "end_time": "{}",
            "kind": "internal_task", "internal_task": {{"name": "{}"}}}}"#,
        id,
        employee,
        start.to_rfc3339(),
        end.to_rfc3339(),
        task
    )
}

/// Wrap record JSON objects in an array.
pub fn records(items: &[String]) -> String {
    format!("[{}]", items.join(","))
}

// =============================================================================
// Command Builder Helpers
// =============================================================================

pub fn window_cmd(granularity: Granularity, anchor: Option<Instant>) -> WindowCommand {
    WindowCommand {
        granularity,
        anchor,
        json: false,
    }
}

pub fn step_cmd(granularity: Granularity, direction: Direction, count: u32) -> StepCommand {
    StepCommand {
        granularity,
        direction,
        anchor: None,
        count,
        json: false,
    }
}

pub fn clamp_cmd(start: Instant, end: Instant) -> ClampCommand {
    ClampCommand {
        start,
        end,
        min: None,
        max: None,
        json: false,
    }
}

pub fn items_cmd(employee: &str, granularity: Granularity) -> ItemsCommand {
    ItemsCommand {
        employee: employee.to_string(),
        name: None,
        granularity,
        anchor: None,
        json: false,
    }
}
