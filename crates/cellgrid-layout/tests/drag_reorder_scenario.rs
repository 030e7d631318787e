#![forbid(unsafe_code)]

//! End-to-end drag-reorder scenarios driven through `CellLayout::handle_pointer`.
//!
//! Run:
//!   cargo test -p cellgrid-layout --test drag_reorder_scenario

use std::time::Duration;

use cellgrid_core::Instant;
use cellgrid_core::event::{PointerEvent, PointerEventKind};
use cellgrid_core::geometry::{Point, Sides};
use cellgrid_layout::{
    CellLayout, DragEffect, DragNoopReason, DragState, GridConfig, MeasureSpec, Slot, SlotAttrs,
};

fn row_major(config: GridConfig, n: usize, width: i32) -> CellLayout<&'static str> {
    const NAMES: [&str; 12] = [
        "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l",
    ];
    let columns = usize::from(config.columns);
    let mut grid = CellLayout::new(config).unwrap();
    for (i, name) in NAMES.iter().take(n).enumerate() {
        let attrs = SlotAttrs::new((i % columns) as i32, (i / columns) as i32, 1, 1);
        grid.push(*name, attrs).unwrap();
    }
    grid.measure(MeasureSpec::Exactly(width), MeasureSpec::Unspecified);
    grid.layout();
    grid
}

fn names(grid: &CellLayout<&'static str>) -> Vec<&'static str> {
    grid.children().iter().map(|c| *c.content()).collect()
}

fn at(kind: PointerEventKind, x: i32, y: i32) -> PointerEvent {
    PointerEvent::at(kind, x, y)
}

// ============================================================================
// Concrete scenario: 4 columns, 8 cells, drag 5 onto 2
// ============================================================================

#[test]
fn drag_index_five_onto_index_two_swaps_them() {
    let mut grid = row_major(GridConfig::default(), 8, 400);
    let before = grid.slots();
    let t0 = Instant::now();

    // Child 5 sits at row 1, column 1.
    grid.handle_pointer(&at(PointerEventKind::Down, 150, 150), t0)
        .unwrap();
    let started = grid
        .tick(t0 + Duration::from_millis(500))
        .unwrap()
        .expect("long press should start a drag");
    assert!(matches!(started.effect, DragEffect::Started { dragged: 5, .. }));

    // Child 2 sits at row 0, column 2.
    grid.handle_pointer(&at(PointerEventKind::Move, 220, 120), t0)
        .unwrap();
    grid.handle_pointer(&at(PointerEventKind::Move, 250, 50), t0)
        .unwrap();
    assert_eq!(grid.drag_state().swap_candidate(), Some(2));

    let released = grid
        .handle_pointer(&at(PointerEventKind::Up, 250, 50), t0)
        .unwrap();
    assert!(released.consumed);
    assert_eq!(
        released.transition.map(|t| t.effect),
        Some(DragEffect::Committed {
            dragged: 5,
            candidate: 2
        })
    );

    assert_eq!(names(&grid), ["a", "b", "f", "d", "e", "c", "g", "h"]);
    assert_eq!(grid.children()[2].slot(), before[2]);
    assert_eq!(grid.children()[5].slot(), before[5]);
    assert_eq!(grid.slots(), before);
    assert_eq!(grid.drag_state(), DragState::Idle);
    assert_eq!(grid.drag_state().dragged_index(), None);
    assert!(grid.ledger().is_empty());

    // The next layout pass places the moved contents in their new cells.
    grid.layout();
    assert_eq!(grid.children()[2].frame().origin(), Point::new(200, 0));
    assert_eq!(grid.children()[5].frame().origin(), Point::new(100, 100));
}

#[test]
fn spanning_children_trade_footprints() {
    let mut grid = CellLayout::new(GridConfig::default()).unwrap();
    grid.push("wide", SlotAttrs::new(0, 0, 2, 1)).unwrap();
    grid.push("tall", SlotAttrs::new(2, 0, 1, 2)).unwrap();
    grid.push("small", SlotAttrs::new(3, 0, 1, 1)).unwrap();
    grid.measure(MeasureSpec::Exactly(400), MeasureSpec::Unspecified);
    grid.layout();

    let t0 = Instant::now();
    grid.handle_pointer(&at(PointerEventKind::Down, 50, 50), t0)
        .unwrap();
    grid.long_press().unwrap();
    // Position 2 in page -> candidate index 1.
    grid.handle_pointer(&at(PointerEventKind::Move, 150, 50), t0)
        .unwrap();
    grid.handle_pointer(&at(PointerEventKind::Up, 150, 50), t0)
        .unwrap();

    assert_eq!(*grid.children()[0].content(), "tall");
    assert_eq!(grid.children()[0].slot(), Slot::new(0, 0, 2, 1).unwrap());
    assert_eq!(*grid.children()[1].content(), "wide");
    assert_eq!(grid.children()[1].slot(), Slot::new(2, 0, 1, 2).unwrap());
}

// ============================================================================
// Coordinate spaces
// ============================================================================

#[test]
fn padding_and_screen_origin_are_respected() {
    let config = GridConfig::default().with_padding(Sides::new(20, 0, 0, 10));
    let mut grid = row_major(config, 8, 410);
    let origin = Point::new(100, 200);
    grid.set_screen_origin(origin);

    let event = |kind, local: Point| PointerEvent::new(kind, local.offset(origin), local);
    let t0 = Instant::now();

    // Child 5's local frame is (110, 120)..(210, 220).
    grid.handle_pointer(&event(PointerEventKind::Down, Point::new(150, 170)), t0)
        .unwrap();
    grid.long_press().unwrap();
    assert_eq!(grid.drag_state().dragged_index(), Some(5));

    // Child 2's local frame is (210, 20)..(310, 120).
    grid.handle_pointer(&event(PointerEventKind::Move, Point::new(250, 60)), t0)
        .unwrap();
    assert_eq!(grid.drag_state().swap_candidate(), Some(2));
    grid.handle_pointer(&event(PointerEventKind::Up, Point::new(250, 60)), t0)
        .unwrap();
    assert_eq!(names(&grid), ["a", "b", "f", "d", "e", "c", "g", "h"]);
}

#[test]
fn pointer_far_outside_clamps_candidate() {
    let mut grid = row_major(GridConfig::default(), 6, 400);
    let t0 = Instant::now();
    grid.handle_pointer(&at(PointerEventKind::Down, 50, 50), t0)
        .unwrap();
    grid.long_press().unwrap();
    grid.handle_pointer(&at(PointerEventKind::Move, 5000, 5000), t0)
        .unwrap();
    assert_eq!(grid.drag_state().swap_candidate(), Some(5));
    grid.handle_pointer(&at(PointerEventKind::Move, -300, -300), t0)
        .unwrap();
    assert_eq!(grid.drag_state().swap_candidate(), Some(0));
}

// ============================================================================
// Lifecycle edges
// ============================================================================

#[test]
fn up_without_long_press_changes_nothing() {
    let mut grid = row_major(GridConfig::default(), 8, 400);
    let before = grid.slots();
    let t0 = Instant::now();
    grid.handle_pointer(&at(PointerEventKind::Down, 150, 150), t0)
        .unwrap();
    grid.handle_pointer(&at(PointerEventKind::Move, 250, 50), t0)
        .unwrap();
    let r = grid
        .handle_pointer(&at(PointerEventKind::Up, 250, 50), t0)
        .unwrap();
    assert!(!r.consumed);
    assert_eq!(r.transition, None);
    assert_eq!(grid.slots(), before);
    assert_eq!(names(&grid), ["a", "b", "c", "d", "e", "f", "g", "h"]);
}

#[test]
fn long_press_on_empty_area_does_not_drag() {
    let mut grid = row_major(GridConfig::default(), 3, 400);
    let t0 = Instant::now();
    // Cell (3, 0) has no child.
    grid.handle_pointer(&at(PointerEventKind::Down, 350, 50), t0)
        .unwrap();
    let t = grid.long_press().unwrap().unwrap();
    assert_eq!(
        t.effect,
        DragEffect::Noop {
            reason: DragNoopReason::NothingUnderPress
        }
    );
    let r = grid
        .handle_pointer(&at(PointerEventKind::Up, 350, 50), t0)
        .unwrap();
    assert!(!r.consumed);
    assert_eq!(r.clicked, None);
}

#[test]
fn moves_after_release_are_ignored() {
    let mut grid = row_major(GridConfig::default(), 8, 400);
    let t0 = Instant::now();
    grid.handle_pointer(&at(PointerEventKind::Down, 150, 150), t0)
        .unwrap();
    grid.long_press().unwrap();
    grid.handle_pointer(&at(PointerEventKind::Up, 150, 150), t0)
        .unwrap();
    let r = grid
        .handle_pointer(&at(PointerEventKind::Move, 50, 50), t0)
        .unwrap();
    assert!(!r.consumed);
    assert_eq!(r.transition, None);
    assert_eq!(grid.drag_state(), DragState::Idle);
}

#[test]
fn second_pointer_cannot_hijack_a_drag() {
    let mut grid = row_major(GridConfig::default(), 8, 400);
    let t0 = Instant::now();
    grid.handle_pointer(&at(PointerEventKind::Down, 150, 150), t0)
        .unwrap();
    grid.long_press().unwrap();

    let other = |kind, x, y| at(kind, x, y).with_pointer_id(7);
    let r = grid
        .handle_pointer(&other(PointerEventKind::Down, 50, 50), t0)
        .unwrap();
    assert!(r.consumed);
    let r = grid
        .handle_pointer(&other(PointerEventKind::Up, 50, 50), t0)
        .unwrap();
    assert_eq!(
        r.transition.map(|t| t.effect),
        Some(DragEffect::Noop {
            reason: DragNoopReason::PointerMismatch
        })
    );
    assert_eq!(grid.drag_state().dragged_index(), Some(5));

    grid.handle_pointer(&at(PointerEventKind::Move, 50, 50), t0)
        .unwrap();
    grid.handle_pointer(&at(PointerEventKind::Up, 50, 50), t0)
        .unwrap();
    assert_eq!(*grid.children()[0].content(), "f");
}

#[test]
fn programmatic_cancel_discards_candidate() {
    let mut grid = row_major(GridConfig::default(), 8, 400);
    let t0 = Instant::now();
    grid.handle_pointer(&at(PointerEventKind::Down, 150, 150), t0)
        .unwrap();
    grid.long_press().unwrap();
    grid.handle_pointer(&at(PointerEventKind::Move, 50, 50), t0)
        .unwrap();
    let t = grid.cancel_drag().unwrap();
    assert!(matches!(t.effect, DragEffect::Canceled { dragged: 5, .. }));
    assert_eq!(grid.cancel_drag(), None);
    assert_eq!(names(&grid), ["a", "b", "c", "d", "e", "f", "g", "h"]);
}
