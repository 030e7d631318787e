#![forbid(unsafe_code)]

//! Point-in-element hit testing.

use cellgrid_core::geometry::{Point, Rect};

/// Index of the first rectangle containing `point`.
///
/// Rectangles are scanned in order and the first match wins, so overlapping
/// siblings resolve to the earliest one regardless of how they are drawn.
/// An empty sequence never hits.
#[must_use]
pub fn hit_test<I>(point: Point, bounds: I) -> Option<usize>
where
    I: IntoIterator<Item = Rect>,
{
    bounds.into_iter().position(|rect| rect.contains(point))
}

/// Hit test against frames expressed relative to `origin`.
///
/// Each frame is moved into screen space by `origin` before the test, which
/// is how a container compares raw pointer coordinates with child frames.
#[must_use]
pub fn hit_test_at_origin<I>(point: Point, origin: Point, frames: I) -> Option<usize>
where
    I: IntoIterator<Item = Rect>,
{
    hit_test(point, frames.into_iter().map(|frame| frame.translated(origin)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_of_cells() -> Vec<Rect> {
        (0..4).map(|i| Rect::new(i * 50, 0, 50, 50)).collect()
    }

    #[test]
    fn hits_containing_cell() {
        let cells = row_of_cells();
        assert_eq!(hit_test(Point::new(75, 10), cells.iter().copied()), Some(1));
        assert_eq!(hit_test(Point::new(199, 49), cells.iter().copied()), Some(3));
    }

    #[test]
    fn misses_outside_every_cell() {
        let cells = row_of_cells();
        assert_eq!(hit_test(Point::new(200, 10), cells.iter().copied()), None);
        assert_eq!(hit_test(Point::new(10, 50), cells.iter().copied()), None);
    }

    #[test]
    fn empty_sequence_never_hits() {
        assert_eq!(hit_test(Point::new(0, 0), std::iter::empty()), None);
    }

    #[test]
    fn first_overlapping_rect_wins() {
        let rects = [Rect::new(0, 0, 100, 100), Rect::new(50, 50, 100, 100)];
        assert_eq!(hit_test(Point::new(60, 60), rects), Some(0));
        assert_eq!(hit_test(Point::new(120, 120), rects), Some(1));
    }

    #[test]
    fn origin_offset_applies_to_frames() {
        let frames = row_of_cells();
        let origin = Point::new(1000, 500);
        assert_eq!(
            hit_test_at_origin(Point::new(1060, 510), origin, frames.iter().copied()),
            Some(1)
        );
        assert_eq!(
            hit_test_at_origin(Point::new(60, 10), origin, frames.iter().copied()),
            None
        );
    }
}
