#![forbid(unsafe_code)]

//! Core: pixel geometry, pointer events, press gestures, and animation contracts.
//!
//! # Role in cellgrid
//! `cellgrid-core` is the input and primitives layer. It defines the
//! coordinates the layout engine works in, the pointer events a host toolkit
//! delivers, and the animation descriptions the engine hands back.
//!
//! # Primary responsibilities
//! - **Geometry**: [`Point`](geometry::Point), [`Size`](geometry::Size),
//!   [`Rect`](geometry::Rect), [`Sides`](geometry::Sides) in signed pixels.
//! - **PointerEvent**: down/move/up/cancel with screen and local coordinates.
//! - **PressRecognizer**: long-press detection driven by frame ticks.
//! - **Animation**: rotate/scale/translate transitions that hosts sample on
//!   their own frame clock.
//!
//! # How it fits in the system
//! `cellgrid-layout` consumes these types to run grid measurement, hit
//! testing, and the drag-reorder engine. Nothing here depends on a particular
//! windowing toolkit.

pub mod animation;
pub mod event;
pub mod geometry;
pub mod gesture;

pub use web_time::Instant;
