//! Time-window controller for the timeline view.
//!
//! Owns the `(granularity, anchor)` state, derives the visible window from
//! it, and notifies subscribers synchronously after every operation.
//! Granularity-driven steps are never clamped; only pan requests coming
//! from the rendering surface go through [`WindowClamper`].

use crate::calendar::GranularityCalendar;
use crate::clamp::WindowClamper;
use crate::clock::Clock;
use crate::models::{Bounds, Direction, Granularity, Instant, Window, WindowChange};

/// Consumer of window changes (refetch triggers, surface sync).
pub trait WindowSubscriber {
    fn on_window_change(&mut self, change: &WindowChange);
}

impl<F> WindowSubscriber for F
where
    F: FnMut(&WindowChange),
{
    fn on_window_change(&mut self, change: &WindowChange) {
        self(change)
    }
}

/// Handle returned by [`TimeWindowController::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The controller's owned state.
///
/// Transitions are pure so they can be exercised without a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub granularity: Granularity,
    pub anchor: Instant,
}

impl ViewState {
    /// Hard reset: the given granularity anchored at `now`.
    pub fn reset(granularity: Granularity, now: Instant) -> Self {
        Self {
            granularity,
            anchor: now,
        }
    }

    /// State with the anchor moved one unit in `direction`.
    pub fn stepped(self, calendar: &GranularityCalendar, direction: Direction) -> Self {
        Self {
            anchor: calendar.step(self.anchor, self.granularity, direction),
            ..self
        }
    }

    /// Window derived from this state.
    pub fn window(&self, calendar: &GranularityCalendar) -> Window {
        calendar.window_for(self.anchor, self.granularity)
    }
}

/// Navigation state machine driving the timeline's visible range.
pub struct TimeWindowController {
    calendar: GranularityCalendar,
    bounds: Bounds,
    clock: Box<dyn Clock>,
    state: ViewState,
    window: Window,
    subscribers: Vec<(SubscriptionId, Box<dyn WindowSubscriber>)>,
    next_subscription: u64,
}

impl TimeWindowController {
    /// Create a controller anchored at the clock's "now", with session
    /// bounds of `now ± 2 months`.
    pub fn new(
        calendar: GranularityCalendar,
        clock: impl Clock + 'static,
        granularity: Granularity,
    ) -> Self {
        let bounds = Bounds::from_now(clock.now());
        Self::with_bounds(calendar, clock, granularity, bounds)
    }

    /// Create a controller with explicit bounds.
    pub fn with_bounds(
        calendar: GranularityCalendar,
        clock: impl Clock + 'static,
        granularity: Granularity,
        bounds: Bounds,
    ) -> Self {
        let state = ViewState::reset(granularity, clock.now());
        let window = state.window(&calendar);
        Self {
            calendar,
            bounds,
            clock: Box::new(clock),
            state,
            window,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Register a subscriber. It is notified on every subsequent emission.
    pub fn subscribe(&mut self, subscriber: impl WindowSubscriber + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscriber. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Switch granularity and jump back to "now".
    pub fn set_granularity(&mut self, granularity: Granularity) {
        self.apply(ViewState::reset(granularity, self.clock.now()));
    }

    /// Move the window one unit back.
    pub fn go_previous(&mut self) {
        self.step(Direction::Backward);
    }

    /// Move the window one unit forward.
    pub fn go_next(&mut self) {
        self.step(Direction::Forward);
    }

    fn step(&mut self, direction: Direction) {
        let next = self.state.stepped(&self.calendar, direction);
        tracing::trace!(from = %self.state.anchor, to = %next.anchor, ?direction, "step");
        self.apply(next);
    }

    /// Handle a free pan/zoom request from the rendering surface.
    ///
    /// The request is clamped to the session bounds; the surface must reset
    /// its visible range to the returned window. Granularity and anchor are
    /// left untouched.
    pub fn on_surface_pan(&mut self, requested: Window) -> Window {
        let clamped = WindowClamper::clamp(requested, self.bounds);
        if clamped != requested {
            tracing::debug!(
                requested_start = %requested.start,
                requested_end = %requested.end,
                start = %clamped.start,
                end = %clamped.end,
                "pan request corrected to bounds"
            );
        }
        self.window = clamped;
        self.emit();
        clamped
    }

    /// Re-emit the current window, e.g. for the initial fetch.
    pub fn emit_current(&mut self) {
        self.emit();
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn granularity(&self) -> Granularity {
        self.state.granularity
    }

    pub fn anchor(&self) -> Instant {
        self.state.anchor
    }

    /// The window last emitted.
    pub fn window(&self) -> Window {
        self.window
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn calendar(&self) -> &GranularityCalendar {
        &self.calendar
    }

    /// Label for the period containing the current window's start.
    pub fn label(&self) -> String {
        self.calendar.label(self.window.start, self.state.granularity)
    }

    fn apply(&mut self, state: ViewState) {
        self.state = state;
        self.window = state.window(&self.calendar);
        self.emit();
    }

    fn emit(&mut self) {
        let change = WindowChange {
            window: self.window,
            granularity: self.state.granularity,
        };
        tracing::debug!(
            start = %change.window.start,
            end = %change.window.end,
            granularity = %change.granularity,
            subscribers = self.subscribers.len(),
            "emitting window change"
        );
        for (_, subscriber) in &mut self.subscribers {
            subscriber.on_window_change(&change);
        }
    }
}
