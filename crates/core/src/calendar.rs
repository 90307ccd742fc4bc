//! Granularity-driven date math.
//!
//! Computes the window containing an anchor, the next anchor one unit
//! forward or backward, and a human-readable label for the period. All
//! boundaries are computed in a single canonical zone (a fixed UTC offset)
//! and returned as UTC instants. Weeks are ISO weeks starting on Monday.
//!
//! Each granularity is one strategy behind [`CalendarStrategy`]; the
//! calendar picks the strategy with a `match` on the [`Granularity`] tag.

use chrono::{
    Datelike, Days, Duration, FixedOffset, LocalResult, Months, NaiveDate, NaiveDateTime,
    NaiveTime, Offset, TimeZone, Utc,
};

use crate::error::{CoreError, CoreResult};
use crate::models::{Direction, Granularity, Instant, Window};

/// Window sizing, stepping and labelling rules for one granularity.
trait CalendarStrategy {
    /// First date of the period containing `date`.
    fn period_start(&self, date: NaiveDate) -> NaiveDate;

    /// First date of the period following the one starting at `start`.
    fn next_period_start(&self, start: NaiveDate) -> Option<NaiveDate>;

    /// Move a local anchor by one unit. `None` on calendar overflow.
    fn step(&self, local: NaiveDateTime, direction: Direction) -> Option<NaiveDateTime>;

    /// Label for the period starting at `start`.
    fn label(&self, start: NaiveDate) -> String;
}

struct DayStrategy;
struct WeekStrategy;
struct MonthStrategy;

impl CalendarStrategy for DayStrategy {
    fn period_start(&self, date: NaiveDate) -> NaiveDate {
        date
    }

    fn next_period_start(&self, start: NaiveDate) -> Option<NaiveDate> {
        start.succ_opt()
    }

    fn step(&self, local: NaiveDateTime, direction: Direction) -> Option<NaiveDateTime> {
        match direction {
            Direction::Forward => local.checked_add_signed(Duration::days(1)),
            Direction::Backward => local.checked_sub_signed(Duration::days(1)),
        }
    }

    fn label(&self, start: NaiveDate) -> String {
        start.format("%A, %B %-d, %Y").to_string()
    }
}

impl CalendarStrategy for WeekStrategy {
    fn period_start(&self, date: NaiveDate) -> NaiveDate {
        let since_monday = u64::from(date.weekday().num_days_from_monday());
        // The first representable week starts at the first representable date.
        date.checked_sub_days(Days::new(since_monday)).unwrap_or(date)
    }

    fn next_period_start(&self, start: NaiveDate) -> Option<NaiveDate> {
        start.checked_add_days(Days::new(7))
    }

    fn step(&self, local: NaiveDateTime, direction: Direction) -> Option<NaiveDateTime> {
        match direction {
            Direction::Forward => local.checked_add_signed(Duration::weeks(1)),
            Direction::Backward => local.checked_sub_signed(Duration::weeks(1)),
        }
    }

    fn label(&self, start: NaiveDate) -> String {
        let end = start.checked_add_days(Days::new(6)).unwrap_or(start);
        format!("{} – {}", start.format("%b %-d"), end.format("%b %-d, %Y"))
    }
}

impl CalendarStrategy for MonthStrategy {
    fn period_start(&self, date: NaiveDate) -> NaiveDate {
        date.with_day(1).unwrap_or(date)
    }

    fn next_period_start(&self, start: NaiveDate) -> Option<NaiveDate> {
        start.checked_add_months(Months::new(1))
    }

    // Shifting the month index clamps the day to the target month's length,
    // so Mar 31 minus one month is the last day of February.
    fn step(&self, local: NaiveDateTime, direction: Direction) -> Option<NaiveDateTime> {
        match direction {
            Direction::Forward => local.checked_add_months(Months::new(1)),
            Direction::Backward => local.checked_sub_months(Months::new(1)),
        }
    }

    fn label(&self, start: NaiveDate) -> String {
        start.format("%B %Y").to_string()
    }
}

fn strategy(granularity: Granularity) -> &'static dyn CalendarStrategy {
    match granularity {
        Granularity::Day => &DayStrategy,
        Granularity::Week => &WeekStrategy,
        Granularity::Month => &MonthStrategy,
    }
}

/// Pure date math for the timeline, evaluated in one canonical zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GranularityCalendar {
    offset: FixedOffset,
}

impl Default for GranularityCalendar {
    fn default() -> Self {
        Self::utc()
    }
}

impl GranularityCalendar {
    /// Calendar evaluated in UTC.
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Calendar evaluated at a fixed offset from UTC.
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Calendar at `minutes` east of UTC.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ValidationError` if the offset is not within ±24h.
    pub fn from_utc_offset_minutes(minutes: i32) -> CoreResult<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Self::with_offset)
            .ok_or_else(|| CoreError::ValidationError {
                message: format!("UTC offset of {} minutes is out of range", minutes),
            })
    }

    /// The canonical zone.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Window of the day, ISO week or month containing `anchor`.
    pub fn window_for(&self, anchor: Instant, granularity: Granularity) -> Window {
        let strategy = strategy(granularity);
        let start_date = strategy.period_start(self.local(anchor).date());
        let start = start_date.and_time(NaiveTime::MIN);
        let end = strategy
            .next_period_start(start_date)
            .and_then(|next| {
                next.and_time(NaiveTime::MIN)
                    .checked_sub_signed(Duration::milliseconds(1))
            })
            .unwrap_or(NaiveDateTime::MAX);

        Window {
            start: self.instant(start),
            end: self.instant(end),
        }
    }

    /// Shift `anchor` by exactly one unit of `granularity`.
    ///
    /// Overflow at the edges of the representable calendar leaves the
    /// anchor unchanged.
    pub fn step(&self, anchor: Instant, granularity: Granularity, direction: Direction) -> Instant {
        match strategy(granularity).step(self.local(anchor), direction) {
            Some(local) => self.instant(local),
            None => {
                tracing::warn!(%anchor, %granularity, ?direction, "calendar step overflowed, anchor kept");
                anchor
            }
        }
    }

    /// Human-readable label for the period containing `anchor`.
    pub fn label(&self, anchor: Instant, granularity: Granularity) -> String {
        let strategy = strategy(granularity);
        strategy.label(strategy.period_start(self.local(anchor).date()))
    }

    /// Wall-clock time of `instant` in the canonical zone.
    ///
    /// Saturates at the representable edges when the offset pushes the
    /// wall-clock time past them.
    pub fn local(&self, instant: Instant) -> NaiveDateTime {
        instant
            .naive_utc()
            .checked_add_offset(self.offset)
            .unwrap_or(if self.offset.local_minus_utc() > 0 {
                NaiveDateTime::MAX
            } else {
                NaiveDateTime::MIN
            })
    }

    fn instant(&self, local: NaiveDateTime) -> Instant {
        match self.offset.from_local_datetime(&local) {
            LocalResult::Single(dt) => dt.with_timezone(&Utc),
            _ => local.and_utc(),
        }
    }
}
