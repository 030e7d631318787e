#![forbid(unsafe_code)]

//! Press recognition: turns raw pointer events into press-level gestures.
//!
//! [`PressRecognizer`] follows one pointer at a time. It forwards the
//! down/move/up stream as [`Gesture`]s and, when polled with
//! [`check_long_press`](PressRecognizer::check_long_press), fires a single
//! [`Gesture::LongPress`] once the pointer has been held within the touch slop
//! for the configured threshold.
//!
//! # Invariants
//!
//! 1. At most one `LongPress` fires per down → up sequence.
//! 2. Movement beyond `touch_slop` before the threshold disarms the long press
//!    for the rest of the sequence.
//! 3. Events from a pointer other than the tracked one are ignored until the
//!    tracked pointer is released or canceled.
//! 4. After `reset()`, the recognizer is idle.

use std::time::Duration;

use web_time::Instant;

use crate::event::{PointerEvent, PointerEventKind};
use crate::geometry::Point;

/// Thresholds for press recognition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureConfig {
    /// Duration before a stationary press triggers long press (default: 500ms).
    pub long_press_threshold: Duration,
    /// Manhattan distance in pixels a press may wander and still count as
    /// stationary (default: 8).
    pub touch_slop: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            long_press_threshold: Duration::from_millis(500),
            touch_slop: 8,
        }
    }
}

/// A press-level gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Pressed {
        pointer_id: u32,
        raw: Point,
        local: Point,
    },
    /// Fired once per sequence; positions are those of the original press.
    LongPress {
        pointer_id: u32,
        raw: Point,
        local: Point,
        duration: Duration,
    },
    Moved {
        pointer_id: u32,
        raw: Point,
        local: Point,
    },
    Released {
        pointer_id: u32,
        raw: Point,
        local: Point,
        long_pressed: bool,
    },
    Canceled {
        pointer_id: u32,
    },
}

#[derive(Debug, Clone, Copy)]
struct PressTracker {
    pointer_id: u32,
    raw: Point,
    local: Point,
    down_at: Instant,
    armed: bool,
    long_pressed: bool,
}

/// Stateful single-pointer press recognizer.
#[derive(Debug, Clone, Default)]
pub struct PressRecognizer {
    config: GestureConfig,
    press: Option<PressTracker>,
}

impl PressRecognizer {
    /// Create a new recognizer with the given configuration.
    #[must_use]
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            press: None,
        }
    }

    /// Process a raw pointer event.
    ///
    /// Returns `None` for events that belong to an untracked pointer or arrive
    /// without a preceding press.
    pub fn process(&mut self, event: &PointerEvent, now: Instant) -> Option<Gesture> {
        match event.kind {
            PointerEventKind::Down => {
                if self.press.is_some() {
                    tracing::trace!(
                        target: "cellgrid.gesture",
                        pointer_id = event.pointer_id,
                        "press ignored: another pointer is tracked"
                    );
                    return None;
                }
                self.press = Some(PressTracker {
                    pointer_id: event.pointer_id,
                    raw: event.raw,
                    local: event.local,
                    down_at: now,
                    armed: true,
                    long_pressed: false,
                });
                Some(Gesture::Pressed {
                    pointer_id: event.pointer_id,
                    raw: event.raw,
                    local: event.local,
                })
            }
            PointerEventKind::Move => {
                let slop = self.config.touch_slop;
                let press = self.tracked_mut(event.pointer_id)?;
                if press.armed && press.raw.manhattan_distance(event.raw) > slop {
                    press.armed = false;
                }
                Some(Gesture::Moved {
                    pointer_id: event.pointer_id,
                    raw: event.raw,
                    local: event.local,
                })
            }
            PointerEventKind::Up => {
                let press = self.tracked_mut(event.pointer_id)?;
                let long_pressed = press.long_pressed;
                self.press = None;
                Some(Gesture::Released {
                    pointer_id: event.pointer_id,
                    raw: event.raw,
                    local: event.local,
                    long_pressed,
                })
            }
            PointerEventKind::Cancel => {
                self.tracked_mut(event.pointer_id)?;
                self.press = None;
                Some(Gesture::Canceled {
                    pointer_id: event.pointer_id,
                })
            }
        }
    }

    /// Check for long press timeout. Call periodically (e.g., on frame tick).
    pub fn check_long_press(&mut self, now: Instant) -> Option<Gesture> {
        let threshold = self.config.long_press_threshold;
        let press = self.press.as_mut()?;
        if !press.armed || press.long_pressed {
            return None;
        }
        let elapsed = now.saturating_duration_since(press.down_at);
        if elapsed < threshold {
            return None;
        }
        press.long_pressed = true;
        tracing::debug!(
            target: "cellgrid.gesture",
            pointer_id = press.pointer_id,
            x = press.raw.x,
            y = press.raw.y,
            elapsed_ms = elapsed.as_millis() as u64,
            "long press"
        );
        Some(Gesture::LongPress {
            pointer_id: press.pointer_id,
            raw: press.raw,
            local: press.local,
            duration: elapsed,
        })
    }

    /// Mark the current press as long-pressed without waiting for the timer.
    ///
    /// Used when the host runs its own long-press detection.
    pub fn force_long_press(&mut self) -> Option<Gesture> {
        let press = self.press.as_mut()?;
        if press.long_pressed {
            return None;
        }
        press.long_pressed = true;
        Some(Gesture::LongPress {
            pointer_id: press.pointer_id,
            raw: press.raw,
            local: press.local,
            duration: Duration::ZERO,
        })
    }

    /// Whether a press is being tracked.
    #[inline]
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    /// Pointer id of the tracked press, if any.
    #[must_use]
    pub fn tracked_pointer(&self) -> Option<u32> {
        self.press.map(|press| press.pointer_id)
    }

    /// Reset to idle.
    pub fn reset(&mut self) {
        self.press = None;
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    fn tracked_mut(&mut self, pointer_id: u32) -> Option<&mut PressTracker> {
        self.press
            .as_mut()
            .filter(|press| press.pointer_id == pointer_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::PointerEvent;

    fn down(x: i32, y: i32) -> PointerEvent {
        PointerEvent::at(PointerEventKind::Down, x, y)
    }

    fn moved(x: i32, y: i32) -> PointerEvent {
        PointerEvent::at(PointerEventKind::Move, x, y)
    }

    fn up(x: i32, y: i32) -> PointerEvent {
        PointerEvent::at(PointerEventKind::Up, x, y)
    }

    #[test]
    fn long_press_fires_once_after_threshold() {
        let mut rec = PressRecognizer::default();
        let t0 = Instant::now();
        assert!(matches!(
            rec.process(&down(10, 10), t0),
            Some(Gesture::Pressed { .. })
        ));
        assert_eq!(rec.check_long_press(t0 + Duration::from_millis(499)), None);
        let fired = rec.check_long_press(t0 + Duration::from_millis(500));
        assert!(matches!(
            fired,
            Some(Gesture::LongPress { raw, .. }) if raw == Point::new(10, 10)
        ));
        assert_eq!(rec.check_long_press(t0 + Duration::from_millis(900)), None);
    }

    #[test]
    fn movement_within_slop_keeps_long_press_armed() {
        let mut rec = PressRecognizer::default();
        let t0 = Instant::now();
        rec.process(&down(10, 10), t0);
        rec.process(&moved(14, 13), t0 + Duration::from_millis(100));
        assert!(
            rec.check_long_press(t0 + Duration::from_millis(600))
                .is_some()
        );
    }

    #[test]
    fn movement_beyond_slop_disarms() {
        let mut rec = PressRecognizer::default();
        let t0 = Instant::now();
        rec.process(&down(10, 10), t0);
        rec.process(&moved(30, 10), t0 + Duration::from_millis(100));
        // Returning inside the slop does not re-arm.
        rec.process(&moved(10, 10), t0 + Duration::from_millis(200));
        assert_eq!(rec.check_long_press(t0 + Duration::from_secs(2)), None);
    }

    #[test]
    fn release_reports_long_press_flag() {
        let mut rec = PressRecognizer::default();
        let t0 = Instant::now();
        rec.process(&down(0, 0), t0);
        rec.check_long_press(t0 + Duration::from_secs(1));
        let released = rec.process(&up(5, 5), t0 + Duration::from_secs(2));
        assert!(matches!(
            released,
            Some(Gesture::Released {
                long_pressed: true,
                ..
            })
        ));
        assert!(!rec.is_pressed());
    }

    #[test]
    fn second_pointer_is_ignored_while_tracking() {
        let mut rec = PressRecognizer::default();
        let t0 = Instant::now();
        rec.process(&down(0, 0), t0);
        assert_eq!(rec.process(&down(50, 50).with_pointer_id(1), t0), None);
        assert_eq!(rec.process(&up(50, 50).with_pointer_id(1), t0), None);
        assert_eq!(rec.tracked_pointer(), Some(0));
    }

    #[test]
    fn events_without_press_are_dropped() {
        let mut rec = PressRecognizer::default();
        let t0 = Instant::now();
        assert_eq!(rec.process(&moved(1, 1), t0), None);
        assert_eq!(rec.process(&up(1, 1), t0), None);
        assert_eq!(rec.check_long_press(t0), None);
    }

    #[test]
    fn cancel_returns_to_idle() {
        let mut rec = PressRecognizer::default();
        let t0 = Instant::now();
        rec.process(&down(0, 0), t0);
        let canceled = rec.process(&PointerEvent::at(PointerEventKind::Cancel, 0, 0), t0);
        assert_eq!(canceled, Some(Gesture::Canceled { pointer_id: 0 }));
        assert!(!rec.is_pressed());
    }

    #[test]
    fn force_long_press_is_one_shot() {
        let mut rec = PressRecognizer::default();
        let t0 = Instant::now();
        assert_eq!(rec.force_long_press(), None);
        rec.process(&down(3, 4), t0);
        assert!(rec.force_long_press().is_some());
        assert_eq!(rec.force_long_press(), None);
        assert_eq!(rec.check_long_press(t0 + Duration::from_secs(5)), None);
    }
}
