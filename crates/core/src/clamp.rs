//! Bounds clamping for free-pan window requests.

use crate::models::{Bounds, Window};

/// Corrects requested windows so they never leave the session bounds.
pub struct WindowClamper;

impl WindowClamper {
    /// Clamp `requested` into `bounds`.
    ///
    /// Rules, first match wins:
    ///
    /// 1. Both ends out of bounds, or the request is wider than the bounds:
    ///    collapse to `[min, max]`. A wider request cannot keep its span,
    ///    since shifting it by rule 2 or 3 would push its other end out.
    /// 2. Start before `min`: shift forward so the start is `min`, keeping span.
    /// 3. End after `max`: shift backward so the end is `max`, keeping span.
    /// 4. Otherwise the request is returned unchanged.
    ///
    /// The result always lies within `bounds`, and clamping a clamped
    /// window is a no-op.
    pub fn clamp(requested: Window, bounds: Bounds) -> Window {
        let span = requested.span();
        let full = Window {
            start: bounds.min,
            end: bounds.max,
        };

        if (requested.start < bounds.min && requested.end > bounds.max) || span > bounds.span() {
            return full;
        }

        if requested.start < bounds.min {
            return match bounds.min.checked_add_signed(span) {
                Some(end) => Window {
                    start: bounds.min,
                    end,
                },
                None => full,
            };
        }

        if requested.end > bounds.max {
            return match bounds.max.checked_sub_signed(span) {
                Some(start) => Window {
                    start,
                    end: bounds.max,
                },
                None => full,
            };
        }

        requested
    }
}
