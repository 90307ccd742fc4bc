//! Data models for Planboard timelines
//!
//! Defines the granularity and direction enums, the window and bounds value
//! types, the schedule records consumed from the record store, and the
//! group/item records produced for the rendering surface.

use chrono::{DateTime, Duration, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A point in time with millisecond precision.
pub type Instant = DateTime<Utc>;

/// Number of calendar months the bounds extend on each side of "now".
pub const DEFAULT_BOUNDS_MONTHS: u32 = 2;

/// Timeline granularity
///
/// Determines both the window-sizing rule and the navigation step size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Day,
    #[default]
    Week,
    Month,
}

impl Granularity {
    /// All granularities, finest first.
    pub const ALL: [Granularity; 3] = [Granularity::Day, Granularity::Week, Granularity::Month];

    /// Returns the string representation used in output and config
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
        }
    }

    /// Parse a granularity name, accepting single-letter shorthands.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "day" | "d" => Some(Granularity::Day),
            "week" | "w" => Some(Granularity::Week),
            "month" | "m" => Some(Granularity::Month),
            _ => None,
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Navigation direction for stepping the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// The opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// Parse a direction name (`next`/`forward` or `prev`/`previous`/`backward`).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "next" | "forward" | "fwd" => Some(Direction::Forward),
            "prev" | "previous" | "backward" | "back" => Some(Direction::Backward),
            _ => None,
        }
    }
}

/// The inclusive range of instants currently visible.
///
/// `end` is the last representable millisecond of the period, not an open
/// upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    pub start: Instant,
    pub end: Instant,
}

impl Window {
    /// Create a window, rejecting `start > end`.
    pub fn new(start: Instant, end: Instant) -> CoreResult<Self> {
        if start > end {
            return Err(CoreError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Distance between start and end.
    pub fn span(&self) -> Duration {
        self.end.signed_duration_since(self.start)
    }

    /// Whether `instant` lies within `[start, end]`.
    pub fn contains(&self, instant: Instant) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Whether the window shares at least one instant with `[start, end]`.
    pub fn overlaps(&self, start: Instant, end: Instant) -> bool {
        start <= self.end && end >= self.start
    }

    /// Move the whole window by `delta`, keeping its span.
    ///
    /// Returns the window unchanged when the shift would leave chrono's range.
    pub fn shifted(&self, delta: Duration) -> Self {
        match (
            self.start.checked_add_signed(delta),
            self.end.checked_add_signed(delta),
        ) {
            (Some(start), Some(end)) => Self { start, end },
            _ => *self,
        }
    }
}

/// Outer limits any free-pan window may reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Instant,
    pub max: Instant,
}

impl Bounds {
    /// Create bounds, rejecting `min > max`.
    pub fn new(min: Instant, max: Instant) -> CoreResult<Self> {
        if min > max {
            return Err(CoreError::InvalidBounds { min, max });
        }
        Ok(Self { min, max })
    }

    /// Bounds extending `months` calendar months either side of `now`.
    pub fn around(now: Instant, months: u32) -> Self {
        let months = Months::new(months);
        Self {
            min: now.checked_sub_months(months).unwrap_or(DateTime::<Utc>::MIN_UTC),
            max: now.checked_add_months(months).unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Session bounds: `now ± 2 months`.
    pub fn from_now(now: Instant) -> Self {
        Self::around(now, DEFAULT_BOUNDS_MONTHS)
    }

    /// Distance between min and max.
    pub fn span(&self) -> Duration {
        self.max.signed_duration_since(self.min)
    }

    /// Whether the window lies entirely within the bounds.
    pub fn contains(&self, window: &Window) -> bool {
        window.start >= self.min && window.end <= self.max
    }
}

/// Kind of scheduled work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Project,
    InternalTask,
}

impl RecordKind {
    /// Returns the string representation used in record files
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Project => "project",
            RecordKind::InternalTask => "internal_task",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkPackageRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub name: String,
    #[serde(default)]
    pub work_package: Option<WorkPackageRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalTaskRef {
    pub name: String,
}

/// A scheduled work item for one employee, as returned by the record store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub id: String,
    pub employee_id: String,
    pub start_time: Instant,
    pub end_time: Instant,
    pub kind: RecordKind,
    #[serde(default)]
    pub project: Option<ProjectRef>,
    #[serde(default)]
    pub internal_task: Option<InternalTaskRef>,
}

/// One row on the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineGroup {
    pub id: String,
    pub title: String,
    pub display_height: u16,
}

/// A renderable bar derived 1:1 from a [`ScheduleRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineItem {
    pub id: String,
    pub group_id: String,
    pub title: String,
    pub start: Instant,
    pub end: Instant,
    pub background_color: &'static str,
    pub border_color: &'static str,
}

/// Payload delivered to subscribers on every controller state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowChange {
    pub window: Window,
    pub granularity: Granularity,
}
