#![forbid(unsafe_code)]

//! Drag-feedback presets.
//!
//! | Preset | Used for |
//! |--------|----------|
//! | [`wiggle`] | Every element while a drag is active |
//! | [`lift`] | The dragged element, once, on drag start |
//! | [`slide`] | A displaced element moving to its provisional slot |
//! | [`wiggle_and_slide`] | [`wiggle`] and [`slide`] together |

use std::time::Duration;

use super::{Animation, Easing, Pivot, Timing};
use crate::geometry::Point;

/// Peak rotation of the wiggle, in degrees either side of upright.
pub const WIGGLE_DEGREES: f32 = 2.0;
/// Time to swing from one wiggle extreme to the other.
pub const WIGGLE_HALF_CYCLE: Duration = Duration::from_millis(60);
/// Final scale of the lifted element.
pub const LIFT_SCALE: f32 = 1.4;
pub const LIFT_DURATION: Duration = Duration::from_millis(200);
pub const SLIDE_DURATION: Duration = Duration::from_millis(250);

/// Continuous small-angle oscillation around the element's center.
#[must_use]
pub fn wiggle() -> Animation {
    Animation::Rotate {
        from_degrees: -WIGGLE_DEGREES,
        to_degrees: WIGGLE_DEGREES,
        pivot: Pivot::Center,
        timing: Timing::oscillate(WIGGLE_HALF_CYCLE),
    }
}

/// One-shot scale-up anchored at the element's center; the enlarged size
/// persists until cleared.
#[must_use]
pub fn lift() -> Animation {
    Animation::Scale {
        from: 1.0,
        to: LIFT_SCALE,
        pivot: Pivot::Center,
        timing: Timing::once(LIFT_DURATION).fill_after(true),
    }
}

/// Eased translation from `from` to `to`, holding the end offset.
#[must_use]
pub fn slide(from: Point, to: Point) -> Animation {
    Animation::Translate {
        from,
        to,
        timing: Timing::once(SLIDE_DURATION)
            .easing(Easing::AccelerateDecelerate)
            .fill_after(true),
    }
}

/// Keep wiggling while sliding to a new slot.
#[must_use]
pub fn wiggle_and_slide(from: Point, to: Point) -> Animation {
    Animation::set([wiggle(), slide(from, to)])
}
