#![forbid(unsafe_code)]

//! Provisional index remapping for gap animation.
//!
//! While a drag is in flight, displaced elements are animated toward the slot
//! they would occupy without touching the real child order. The ledger
//! remembers, per original index, the index each element was last sent to so
//! that the next animation starts where the previous one left the element.
//!
//! The ledger is a cache. The child order and slots remain the source of
//! truth; the ledger is discarded on commit or cancel.

use cellgrid_core::geometry::Point;
use rustc_hash::FxHashMap;

use crate::grid::GridGeometry;

/// Animation plan for one displaced element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapMove {
    /// Original index of the element to animate.
    pub element: usize,
    /// Provisional index it moves to.
    pub target: usize,
    /// Where the element currently appears, relative to its laid-out position.
    pub start_offset: Point,
    /// Where it should end up, relative to its laid-out position.
    pub end_offset: Point,
}

/// Sparse original-index → provisional-index map. Missing keys map to themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemapLedger {
    entries: FxHashMap<usize, usize>,
}

impl RemapLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Provisional index of `original`.
    #[inline]
    #[must_use]
    pub fn get(&self, original: usize) -> usize {
        self.entries.get(&original).copied().unwrap_or(original)
    }

    /// Whether `original` has been provisionally moved during this drag.
    #[inline]
    #[must_use]
    pub fn was_moved(&self, original: usize) -> bool {
        self.entries.contains_key(&original)
    }

    pub fn record(&mut self, original: usize, target: usize) {
        self.entries.insert(original, target);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All recorded moves, sorted by original index.
    #[must_use]
    pub fn entries(&self) -> Vec<(usize, usize)> {
        let mut out: Vec<_> = self.entries.iter().map(|(&k, &v)| (k, v)).collect();
        out.sort_unstable();
        out
    }

    /// Plan the animation that makes room for `dragged` at `target`, and
    /// record the resulting provisional positions.
    ///
    /// The element occupying `target` slides into the dragged element's
    /// current provisional slot. Returns `None` when `target` is the dragged
    /// element itself.
    pub fn plan_gap(
        &mut self,
        geometry: &GridGeometry,
        dragged: usize,
        target: usize,
    ) -> Option<GapMove> {
        let element = target;
        if element == dragged {
            return None;
        }

        let home = geometry.origin_of_index(element);
        let vacated = self.get(dragged);
        let destination = geometry.origin_of_index(vacated);

        let start_offset = if self.was_moved(element) {
            geometry.origin_of_index(self.get(element)).delta_from(home)
        } else {
            Point::ZERO
        };
        let end_offset = destination.delta_from(home);

        self.record(element, vacated);
        self.record(dragged, target);

        tracing::trace!(
            target: "cellgrid.drag",
            element,
            to = vacated,
            dragged,
            over = target,
            "gap planned"
        );

        Some(GapMove {
            element,
            target: vacated,
            start_offset,
            end_offset,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> GridGeometry {
        GridGeometry::new(4, 100.0, 2)
    }

    #[test]
    fn identity_by_default() {
        let ledger = RemapLedger::new();
        assert_eq!(ledger.get(7), 7);
        assert!(!ledger.was_moved(7));
        assert!(ledger.is_empty());
    }

    #[test]
    fn first_gap_starts_from_rest() {
        let mut ledger = RemapLedger::new();
        let plan = ledger.plan_gap(&grid(), 5, 2).unwrap();
        assert_eq!(plan.element, 2);
        assert_eq!(plan.target, 5);
        assert_eq!(plan.start_offset, Point::ZERO);
        // From (200, 0) to (100, 100).
        assert_eq!(plan.end_offset, Point::new(-100, 100));
        assert_eq!(ledger.get(2), 5);
        assert_eq!(ledger.get(5), 2);
    }

    #[test]
    fn repeated_gap_starts_from_last_position() {
        let mut ledger = RemapLedger::new();
        ledger.plan_gap(&grid(), 5, 2).unwrap();
        // Dragged now provisionally at 2; moving over 3 sends 3 to 2.
        let plan = ledger.plan_gap(&grid(), 5, 3).unwrap();
        assert_eq!(plan.start_offset, Point::ZERO);
        assert_eq!(plan.end_offset, Point::new(-100, 0));
        // Moving back over 2 slides it from where it was parked (index 5).
        let plan = ledger.plan_gap(&grid(), 5, 2).unwrap();
        assert_eq!(plan.start_offset, Point::new(-100, 100));
        assert_eq!(plan.target, 3);
        assert_eq!(plan.end_offset, Point::new(100, 0));
        assert_eq!(ledger.entries(), vec![(2, 3), (3, 2), (5, 2)]);
    }

    #[test]
    fn dragged_over_itself_is_noop() {
        let mut ledger = RemapLedger::new();
        assert_eq!(ledger.plan_gap(&grid(), 4, 4), None);
        assert!(ledger.is_empty());
    }

    #[test]
    fn clear_forgets_everything() {
        let mut ledger = RemapLedger::new();
        ledger.plan_gap(&grid(), 0, 1);
        assert_eq!(ledger.len(), 2);
        ledger.clear();
        assert!(ledger.is_empty());
        assert_eq!(ledger.get(1), 1);
    }
}
