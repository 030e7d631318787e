#![forbid(unsafe_code)]

//! Canonical pointer event types.
//!
//! Hosts translate their native touch/mouse callbacks into [`PointerEvent`]s
//! and deliver them strictly in arrival order on the event thread.
//!
//! # Design Notes
//!
//! - Every event carries two coordinates: `raw` in screen space (used for hit
//!   testing against on-screen frames) and `local` relative to the receiving
//!   container's top-left corner (used for grid resolution).
//! - `pointer_id` identifies the finger/button stream. The drag engine follows
//!   exactly one pointer and ignores the rest.

use crate::geometry::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default pointer id for single-pointer hosts (mouse, primary finger).
pub const PRIMARY_POINTER: u32 = 0;

/// The phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PointerEventKind {
    /// Pointer pressed.
    Down,
    /// Pointer moved while pressed.
    Move,
    /// Pointer released.
    Up,
    /// The host aborted the sequence (e.g. a parent stole the gesture).
    Cancel,
}

/// A single pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub pointer_id: u32,
    /// Screen-space position.
    pub raw: Point,
    /// Container-relative position.
    pub local: Point,
}

impl PointerEvent {
    /// Create an event for the primary pointer.
    #[must_use]
    pub const fn new(kind: PointerEventKind, raw: Point, local: Point) -> Self {
        Self {
            kind,
            pointer_id: PRIMARY_POINTER,
            raw,
            local,
        }
    }

    /// Create an event whose screen and local coordinates coincide.
    ///
    /// Convenient for hosts where the container sits at the screen origin.
    #[must_use]
    pub const fn at(kind: PointerEventKind, x: i32, y: i32) -> Self {
        let point = Point::new(x, y);
        Self::new(kind, point, point)
    }

    /// Attach a pointer id.
    #[must_use]
    pub const fn with_pointer_id(mut self, pointer_id: u32) -> Self {
        self.pointer_id = pointer_id;
        self
    }

    /// Whether this event ends the pointer sequence.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self.kind, PointerEventKind::Up | PointerEventKind::Cancel)
    }
}
