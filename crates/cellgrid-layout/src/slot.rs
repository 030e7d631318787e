#![forbid(unsafe_code)]

//! Per-child grid rectangles.

use serde::{Deserialize, Serialize};

use crate::error::{GridError, SpanAxis};

/// A child's footprint on the grid, in cell units.
///
/// Slots are not required to be disjoint; overlapping children simply stack
/// in child order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    /// Leftmost column.
    pub left: u16,
    /// Topmost row.
    pub top: u16,
    /// Columns covered, at least 1.
    pub width: u16,
    /// Rows covered, at least 1.
    pub height: u16,
}

impl Slot {
    /// A validated slot.
    pub fn new(left: u16, top: u16, width: u16, height: u16) -> Result<Self, GridError> {
        if width == 0 {
            return Err(GridError::InvalidSpan {
                axis: SpanAxis::Width,
                value: 0,
            });
        }
        if height == 0 {
            return Err(GridError::InvalidSpan {
                axis: SpanAxis::Height,
                value: 0,
            });
        }
        Ok(Self {
            left,
            top,
            width,
            height,
        })
    }

    /// A 1×1 slot.
    #[must_use]
    pub const fn single(left: u16, top: u16) -> Self {
        Self {
            left,
            top,
            width: 1,
            height: 1,
        }
    }

    /// First column past the slot.
    #[inline]
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.left as u32 + self.width as u32
    }

    /// First row past the slot.
    #[inline]
    #[must_use]
    pub const fn bottom(&self) -> u32 {
        self.top as u32 + self.height as u32
    }

    /// Whether the slot fits within `columns`.
    #[inline]
    #[must_use]
    pub const fn fits(&self, columns: u16) -> bool {
        self.right() <= columns as u32
    }

    pub(crate) fn check_fits(&self, columns: u16) -> Result<(), GridError> {
        if self.fits(columns) {
            Ok(())
        } else {
            Err(GridError::SlotOutOfBounds {
                left: self.left,
                width: self.width,
                columns,
            })
        }
    }
}

impl Default for Slot {
    fn default() -> Self {
        Self::single(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_spans_are_rejected() {
        assert!(matches!(
            Slot::new(0, 0, 0, 1),
            Err(GridError::InvalidSpan {
                axis: SpanAxis::Width,
                ..
            })
        ));
        assert!(matches!(
            Slot::new(0, 0, 1, 0),
            Err(GridError::InvalidSpan {
                axis: SpanAxis::Height,
                ..
            })
        ));
    }

    #[test]
    fn edges_and_fit() {
        let slot = Slot::new(2, 1, 2, 3).unwrap();
        assert_eq!(slot.right(), 4);
        assert_eq!(slot.bottom(), 4);
        assert!(slot.fits(4));
        assert!(!slot.fits(3));
        assert!(slot.check_fits(3).is_err());
    }

    #[test]
    fn edges_do_not_overflow() {
        let slot = Slot::new(u16::MAX, u16::MAX, u16::MAX, u16::MAX).unwrap();
        assert_eq!(slot.right(), 2 * u32::from(u16::MAX));
    }
}
