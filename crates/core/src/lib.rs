//! Core of Planboard
//!
//! Time-window navigation for an employee's schedule timeline: granularity
//! date math, bounds clamping for free pans, the navigation controller that
//! emits window changes, and mapping of schedule records into timeline
//! groups and items.

pub mod calendar;
pub mod clamp;
pub mod clock;
pub mod controller;
pub mod error;
pub mod mapper;
pub mod models;
pub mod store;

pub use calendar::GranularityCalendar;
pub use clamp::WindowClamper;
pub use clock::{Clock, FixedClock, SystemClock};
pub use controller::{SubscriptionId, TimeWindowController, ViewState, WindowSubscriber};
pub use error::{CoreError, CoreResult};
pub use mapper::{FALLBACK_TITLE, ItemColors, TimelineItemMapper};
pub use models::{
    Bounds, DEFAULT_BOUNDS_MONTHS, Direction, Granularity, Instant, InternalTaskRef, ProjectRef,
    RecordKind, ScheduleRecord, TimelineGroup, TimelineItem, Window, WindowChange, WorkPackageRef,
};
pub use store::{DEFAULT_RECORDS_FILE, RecordStore};

// Value types cross the async fetch boundary.
static_assertions::assert_impl_all!(Window: Send, Sync, Copy);
static_assertions::assert_impl_all!(GranularityCalendar: Send, Sync, Copy);
static_assertions::assert_impl_all!(RecordStore: Send, Sync);
