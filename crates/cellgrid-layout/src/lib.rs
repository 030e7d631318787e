#![forbid(unsafe_code)]

//! Cell-grid layout with drag-to-reorder.
//!
//! # Role in cellgrid
//! `cellgrid-layout` arranges children on a fixed-column grid and lets the
//! user long-press a child and drag it onto another to swap their places.
//!
//! # Primary responsibilities
//! - **Configuration**: [`GridConfig`] and per-child [`SlotAttrs`], both
//!   deserializable from camelCase JSON.
//! - **Geometry**: [`GridGeometry`] maps content-space pixels to cells.
//! - **Hit testing**: [`hit_test`] finds the child under a screen point.
//! - **Drag engine**: [`DragMachine`] tracks the dragged child and the swap
//!   candidate; [`RemapLedger`] plans gap animations; [`swap_commit`] applies
//!   the final exchange.
//! - **Container**: [`CellLayout`] wires all of the above to measure/layout
//!   passes and a pointer event stream.
//!
//! # Example
//!
//! ```
//! use cellgrid_core::event::{PointerEvent, PointerEventKind};
//! use cellgrid_core::Instant;
//! use cellgrid_layout::{CellLayout, GridConfig, MeasureSpec, SlotAttrs};
//!
//! let mut grid = CellLayout::new(GridConfig::default()).unwrap();
//! for i in 0..8 {
//!     grid.push(i, SlotAttrs::new(i % 4, i / 4, 1, 1)).unwrap();
//! }
//! grid.measure(MeasureSpec::Exactly(400), MeasureSpec::Unspecified);
//! grid.layout();
//!
//! let now = Instant::now();
//! grid.handle_pointer(&PointerEvent::at(PointerEventKind::Down, 150, 150), now).unwrap();
//! grid.long_press().unwrap();
//! grid.handle_pointer(&PointerEvent::at(PointerEventKind::Move, 250, 50), now).unwrap();
//! grid.handle_pointer(&PointerEvent::at(PointerEventKind::Up, 250, 50), now).unwrap();
//!
//! assert_eq!(*grid.children()[2].content(), 5);
//! assert_eq!(*grid.children()[5].content(), 2);
//! ```

pub mod commit;
pub mod config;
pub mod container;
pub mod drag;
pub mod error;
pub mod grid;
pub mod hit;
pub mod ledger;
pub mod slot;

pub use commit::{SlotOwner, swap_commit};
pub use config::{DEFAULT_CELL_SIZE_DP, GridConfig, SPAN_UNSET, SlotAttrs};
pub use container::{
    AnimationCommand, CellLayout, Child, MeasureResult, MeasureSpec, PointerResponse,
};
pub use drag::{
    DragCancelReason, DragEffect, DragInput, DragMachine, DragMachineError, DragNoopReason,
    DragState, DragTransition, swap_candidate_for,
};
pub use error::{GridError, SpanAxis};
pub use grid::{GridCell, GridGeometry};
pub use hit::{hit_test, hit_test_at_origin};
pub use ledger::{GapMove, RemapLedger};
pub use slot::Slot;
