#![forbid(unsafe_code)]

//! The cell-grid container.
//!
//! [`CellLayout`] owns an ordered list of children, each with a grid [`Slot`],
//! and drives the whole drag-to-reorder flow:
//!
//! ```text
//! pointer down ──► press recognizer ──► long press ──► hit test ──► DragMachine::Started
//! pointer move ──► grid geometry ──► swap candidate ──► (gap animation via RemapLedger)
//! pointer up   ──► DragMachine::Committed ──► swap_commit ──► ledger cleared
//! ```
//!
//! # Coordinate spaces
//!
//! - Frames are container-local: `(0, 0)` is the container's top-left, padding
//!   included.
//! - Grid resolution runs in content space (local minus the padding origin).
//! - Hit testing compares the event's `raw` point against frames translated by
//!   [`set_screen_origin`](CellLayout::set_screen_origin).
//!
//! # Animations
//!
//! The container never runs animations. It queues [`AnimationCommand`]s that
//! the host drains with [`drain_animations`](CellLayout::drain_animations) and
//! plays on its own frame clock. Commands are purely visual; the child order
//! and slots are already final when a commit's `ClearAll` is queued.

use std::fmt;

use cellgrid_core::Instant;
use cellgrid_core::animation::{self, Animation};
use cellgrid_core::event::{PointerEvent, PointerEventKind};
use cellgrid_core::geometry::{Point, Rect, Size};
use cellgrid_core::gesture::{Gesture, PressRecognizer};
use tracing::field::Empty;

use crate::commit::{SlotOwner, swap_commit};
use crate::config::{GridConfig, SlotAttrs};
use crate::drag::{DragEffect, DragInput, DragMachine, DragState, DragTransition};
use crate::error::GridError;
use crate::grid::GridGeometry;
use crate::hit::hit_test_at_origin;
use crate::ledger::RemapLedger;
use crate::slot::Slot;

/// One axis constraint handed down by the host for a measure pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureSpec {
    /// The container must be exactly this many pixels.
    Exactly(i32),
    /// The container may be at most this many pixels.
    AtMost(i32),
    /// No constraint.
    Unspecified,
}

/// Outcome of a measure pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureResult {
    pub width: i32,
    pub height: i32,
    pub cell_size: f32,
    /// Rows covered by children (`max(top + height)`).
    pub rows: u16,
    /// Largest measured child extent on each axis.
    pub largest_child: Size,
}

/// Visual work for the host to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum AnimationCommand {
    /// Start `animation` on child `index`, replacing whatever it was playing.
    Start { index: usize, animation: Animation },
    /// Stop every child's animation.
    ClearAll,
}

/// What the container did with a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerResponse {
    /// The host must not also treat the event as a scroll or click.
    pub consumed: bool,
    /// Drag start fired by the long-press timer before the event was
    /// processed. Set together with `transition` when the same event then
    /// moves or releases the new drag.
    pub long_press: Option<DragTransition>,
    /// Drag machine step caused by the event itself, if any.
    pub transition: Option<DragTransition>,
    /// Child whose click handler fired.
    pub clicked: Option<usize>,
}

/// A child element and the container's bookkeeping for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Child<T> {
    content: T,
    slot: Slot,
    measured: Size,
    frame: Rect,
}

impl<T> Child<T> {
    #[must_use]
    pub fn content(&self) -> &T {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut T {
        &mut self.content
    }

    #[must_use]
    pub fn slot(&self) -> Slot {
        self.slot
    }

    /// Pixel size assigned by the last measure pass.
    #[must_use]
    pub fn measured_size(&self) -> Size {
        self.measured
    }

    /// Container-local frame from the last layout pass, or the
    /// pointer-following frame while this child is dragged.
    #[must_use]
    pub fn frame(&self) -> Rect {
        self.frame
    }
}

impl<T> SlotOwner for Child<T> {
    fn slot(&self) -> Slot {
        self.slot
    }

    fn set_slot(&mut self, slot: Slot) {
        self.slot = slot;
    }
}

type ClickHandler<T> = Box<dyn FnMut(usize, &T)>;

/// Grid container with drag-to-reorder.
pub struct CellLayout<T> {
    config: GridConfig,
    children: Vec<Child<T>>,
    geometry: GridGeometry,
    measured: Option<MeasureResult>,
    screen_origin: Point,
    machine: DragMachine,
    recognizer: PressRecognizer,
    ledger: RemapLedger,
    /// Whether the current pointer sequence entered Dragging at any point.
    sequence_dragged: bool,
    animations: Vec<AnimationCommand>,
    on_click: Option<ClickHandler<T>>,
    layout_requested: bool,
}

impl<T: fmt::Debug> fmt::Debug for CellLayout<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellLayout")
            .field("config", &self.config)
            .field("children", &self.children)
            .field("geometry", &self.geometry)
            .field("drag", &self.machine.state())
            .field("ledger", &self.ledger)
            .field("layout_requested", &self.layout_requested)
            .finish_non_exhaustive()
    }
}

impl<T> CellLayout<T> {
    /// Create an empty container.
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        config.validate()?;
        let recognizer = PressRecognizer::new(config.gesture_config());
        Ok(Self {
            geometry: GridGeometry::new(config.columns, 0.0, 0),
            config,
            children: Vec::new(),
            measured: None,
            screen_origin: Point::ZERO,
            machine: DragMachine::new(),
            recognizer,
            ledger: RemapLedger::new(),
            sequence_dragged: false,
            animations: Vec::new(),
            on_click: None,
            layout_requested: true,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Attach a child at the end of the child list and return its index.
    ///
    /// The attributes are resolved against the column count here, once.
    pub fn push(&mut self, content: T, attrs: SlotAttrs) -> Result<usize, GridError> {
        let slot = attrs.resolve(self.config.columns)?;
        self.children.push(Child {
            content,
            slot,
            measured: Size::default(),
            frame: Rect::default(),
        });
        self.layout_requested = true;
        Ok(self.children.len() - 1)
    }

    /// Reassign the slot of child `index`.
    pub fn set_slot(&mut self, index: usize, attrs: SlotAttrs) -> Result<(), GridError> {
        let len = self.children.len();
        let slot = attrs.resolve(self.config.columns)?;
        let child = self
            .children
            .get_mut(index)
            .ok_or(GridError::IndexOutOfRange { index, len })?;
        child.slot = slot;
        self.layout_requested = true;
        Ok(())
    }

    #[must_use]
    pub fn children(&self) -> &[Child<T>] {
        &self.children
    }

    #[must_use]
    pub fn child(&self, index: usize) -> Option<&Child<T>> {
        self.children.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Slots in child order.
    #[must_use]
    pub fn slots(&self) -> Vec<Slot> {
        self.children.iter().map(|c| c.slot).collect()
    }

    /// Register the handler invoked for taps that never became drags.
    pub fn set_on_click(&mut self, handler: impl FnMut(usize, &T) + 'static) {
        self.on_click = Some(Box::new(handler));
    }

    pub fn clear_on_click(&mut self) {
        self.on_click = None;
    }

    /// Screen position of the container's top-left corner.
    pub fn set_screen_origin(&mut self, origin: Point) {
        self.screen_origin = origin;
    }

    #[must_use]
    pub fn screen_origin(&self) -> Point {
        self.screen_origin
    }

    #[must_use]
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Result of the last measure pass.
    #[must_use]
    pub fn last_measure(&self) -> Option<MeasureResult> {
        self.measured
    }

    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.machine.state()
    }

    #[must_use]
    pub fn ledger(&self) -> &RemapLedger {
        &self.ledger
    }

    /// Whether child order or slots changed since the last layout pass.
    #[must_use]
    pub fn is_layout_requested(&self) -> bool {
        self.layout_requested
    }

    /// Child indices in paint order, back to front. The dragged child, if
    /// any, is painted last.
    #[must_use]
    pub fn draw_order(&self) -> Vec<usize> {
        let dragged = self.machine.state().dragged_index();
        let mut order: Vec<usize> = (0..self.children.len())
            .filter(|&i| Some(i) != dragged)
            .collect();
        order.extend(dragged.filter(|&i| i < self.children.len()));
        order
    }

    /// Take the queued animation commands in the order they were issued.
    pub fn drain_animations(&mut self) -> Vec<AnimationCommand> {
        std::mem::take(&mut self.animations)
    }

    /// Derive the cell size and every child's pixel size.
    pub fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> MeasureResult {
        let span = tracing::debug_span!(
            "cellgrid.measure",
            columns = self.config.columns,
            children = self.children.len(),
            cell_size = Empty,
            rows = Empty,
        )
        .entered();

        let padding = self.config.padding;
        let columns = f32::from(self.config.columns);
        let (width_px, cell_size) = match width {
            MeasureSpec::Exactly(w) | MeasureSpec::AtMost(w) => {
                let content = (w - padding.horizontal_sum()).max(0);
                (w, content as f32 / columns)
            }
            MeasureSpec::Unspecified => {
                let cell = self.config.fallback_cell_size();
                ((columns * cell) as i32 + padding.horizontal_sum(), cell)
            }
        };

        let spacing = self.config.spacing;
        let mut rows: u32 = 0;
        let mut largest_child = Size::default();
        for child in &mut self.children {
            let w = (f32::from(child.slot.width) * cell_size) as i32 - spacing * 2;
            let h = (f32::from(child.slot.height) * cell_size) as i32 - spacing * 2;
            child.measured = Size::new(w.max(0), h.max(0));
            largest_child = largest_child.max(child.measured);
            rows = rows.max(child.slot.bottom());
        }
        let rows = u16::try_from(rows).unwrap_or(u16::MAX);

        let natural = (f32::from(rows) * cell_size).round() as i32 + padding.vertical_sum();
        let height_px = match height {
            MeasureSpec::Exactly(h) => h,
            MeasureSpec::AtMost(h) => h.min(natural),
            MeasureSpec::Unspecified => natural,
        };

        self.geometry = GridGeometry::new(self.config.columns, cell_size, rows);
        let result = MeasureResult {
            width: width_px,
            height: height_px,
            cell_size,
            rows,
            largest_child,
        };
        self.measured = Some(result);
        self.layout_requested = true;

        span.record("cell_size", cell_size);
        span.record("rows", rows);
        tracing::debug!(
            target: "cellgrid.measure",
            width = width_px,
            height = height_px,
            "measured"
        );
        result
    }

    /// Position every child's frame from its slot.
    ///
    /// The dragged child keeps its pointer-following frame.
    pub fn layout(&mut self) {
        let _span = tracing::debug_span!(
            "cellgrid.layout",
            children = self.children.len(),
            cell_size = self.geometry.cell_size(),
        )
        .entered();

        let dragged = self.machine.state().dragged_index();
        let cell = self.geometry.cell_size();
        let padding = self.config.padding;
        let spacing = self.config.spacing;
        let edge = |cells: u32| (cells as f32 * cell) as i32;

        for (index, child) in self.children.iter_mut().enumerate() {
            if Some(index) == dragged {
                continue;
            }
            let slot = child.slot;
            child.frame = Rect::from_edges(
                edge(u32::from(slot.left)) + padding.left + spacing,
                edge(u32::from(slot.top)) + padding.top + spacing,
                edge(slot.right()) + padding.left - spacing,
                edge(slot.bottom()) + padding.top - spacing,
            );
        }
        self.layout_requested = false;
        tracing::trace!(target: "cellgrid.layout", skipped = ?dragged, "laid out");
    }

    /// Index of the child under a screen-space point.
    #[must_use]
    pub fn hit_test(&self, raw: Point) -> Option<usize> {
        hit_test_at_origin(raw, self.screen_origin, self.children.iter().map(|c| c.frame))
    }

    /// Feed one pointer event.
    ///
    /// Moves and releases also poll the long-press timer first, so a host
    /// that never calls [`tick`](Self::tick) still sees long presses that
    /// completed before the event arrived. Such a drag start is reported in
    /// [`PointerResponse::long_press`].
    pub fn handle_pointer(
        &mut self,
        event: &PointerEvent,
        now: Instant,
    ) -> Result<PointerResponse, GridError> {
        let mut response = PointerResponse::default();

        if !matches!(event.kind, PointerEventKind::Down) {
            response.long_press = self.tick(now)?;
        }

        match self.recognizer.process(event, now) {
            Some(Gesture::Pressed { .. }) => {
                self.sequence_dragged = false;
            }
            Some(Gesture::Moved {
                pointer_id, local, ..
            }) => {
                if self.machine.is_active() {
                    let input = DragInput::Move {
                        pointer_id,
                        position: local,
                        position_in_page: self.position_in_page(local),
                    };
                    response.transition = Some(self.step(&input)?);
                }
            }
            Some(Gesture::Released {
                pointer_id,
                raw,
                local,
                ..
            }) => {
                if self.machine.is_active() {
                    let input = DragInput::Release {
                        pointer_id,
                        position: local,
                    };
                    response.transition = Some(self.step(&input)?);
                    // The release ends the drag, but the host must still not
                    // treat it as a click.
                    response.consumed = true;
                } else if !self.sequence_dragged {
                    response.clicked = self.click(raw);
                }
                self.sequence_dragged = false;
            }
            Some(Gesture::Canceled { pointer_id }) => {
                if self.machine.is_active() {
                    response.transition = Some(self.step(&DragInput::Cancel { pointer_id })?);
                    response.consumed = true;
                }
                self.sequence_dragged = false;
            }
            Some(Gesture::LongPress { .. }) => {}
            None => {
                // A pointer the recognizer is not tracking. Report it to the
                // machine so the mismatch shows up in telemetry.
                if self.machine.is_active() {
                    let input = match event.kind {
                        PointerEventKind::Down => None,
                        PointerEventKind::Move => Some(DragInput::Move {
                            pointer_id: event.pointer_id,
                            position: event.local,
                            position_in_page: self.position_in_page(event.local),
                        }),
                        PointerEventKind::Up => Some(DragInput::Release {
                            pointer_id: event.pointer_id,
                            position: event.local,
                        }),
                        PointerEventKind::Cancel => {
                            Some(DragInput::Cancel {
                                pointer_id: event.pointer_id,
                            })
                        }
                    };
                    if let Some(input) = input {
                        response.transition = Some(self.step(&input)?);
                    }
                }
            }
        }

        response.consumed |= self.machine.is_active();
        Ok(response)
    }

    /// Poll the long-press timer. Call from the host's frame clock.
    pub fn tick(&mut self, now: Instant) -> Result<Option<DragTransition>, GridError> {
        match self.recognizer.check_long_press(now) {
            Some(gesture) => self.begin_from_gesture(gesture),
            None => Ok(None),
        }
    }

    /// Treat the current press as a completed long press right away.
    ///
    /// For hosts that detect long presses themselves.
    pub fn long_press(&mut self) -> Result<Option<DragTransition>, GridError> {
        match self.recognizer.force_long_press() {
            Some(gesture) => self.begin_from_gesture(gesture),
            None => Ok(None),
        }
    }

    /// Abort any active drag without committing.
    pub fn cancel_drag(&mut self) -> Option<DragTransition> {
        let transition = self.machine.force_cancel()?;
        self.finish_drag(&transition);
        Some(transition)
    }

    fn begin_from_gesture(&mut self, gesture: Gesture) -> Result<Option<DragTransition>, GridError> {
        let Gesture::LongPress {
            pointer_id,
            raw,
            local,
            ..
        } = gesture
        else {
            return Ok(None);
        };
        let input = DragInput::LongPress {
            pointer_id,
            hit: self.hit_test(raw),
            position: local,
        };
        self.step(&input).map(Some)
    }

    fn position_in_page(&self, local: Point) -> usize {
        let content = local.delta_from(self.config.padding.content_origin());
        self.geometry.position_in_page(content)
    }

    fn click(&mut self, raw: Point) -> Option<usize> {
        let index = self.hit_test(raw)?;
        tracing::debug!(target: "cellgrid.drag", index, "click passthrough");
        if let Some(handler) = self.on_click.as_mut() {
            handler(index, &self.children[index].content);
        }
        Some(index)
    }

    /// Run one machine step and apply its side effects.
    fn step(&mut self, input: &DragInput) -> Result<DragTransition, GridError> {
        let transition = self.machine.apply(input, self.children.len())?;
        match transition.effect {
            DragEffect::Started { dragged, .. } => {
                self.sequence_dragged = true;
                self.ledger.clear();
                for index in 0..self.children.len() {
                    let animation = if index == dragged {
                        animation::lift()
                    } else {
                        animation::wiggle()
                    };
                    self.animations.push(AnimationCommand::Start { index, animation });
                }
            }
            DragEffect::CandidateChanged {
                dragged,
                candidate,
                position,
                ..
            } => {
                self.follow_pointer(dragged, position);
                if self.config.gap_animation
                    && let Some(candidate) = candidate
                    && let Some(plan) = self.ledger.plan_gap(&self.geometry, dragged, candidate)
                {
                    self.animations.push(AnimationCommand::Start {
                        index: plan.element,
                        animation: animation::wiggle_and_slide(plan.start_offset, plan.end_offset),
                    });
                }
            }
            DragEffect::Moved {
                dragged, position, ..
            } => self.follow_pointer(dragged, position),
            DragEffect::Committed { dragged, candidate } => {
                let committed = swap_commit(&mut self.children, dragged, candidate);
                self.finish_drag(&transition);
                committed?;
            }
            DragEffect::Released { .. } | DragEffect::Canceled { .. } => {
                self.finish_drag(&transition);
            }
            DragEffect::Noop { .. } => {}
        }
        Ok(transition)
    }

    fn follow_pointer(&mut self, dragged: usize, position: Point) {
        if let Some(child) = self.children.get_mut(dragged) {
            child.frame = Rect::centered_on(position, child.measured);
        }
    }

    fn finish_drag(&mut self, transition: &DragTransition) {
        self.animations.push(AnimationCommand::ClearAll);
        self.ledger.clear();
        self.layout_requested = true;
        tracing::debug!(
            target: "cellgrid.drag",
            transition_id = transition.transition_id,
            effect = ?transition.effect,
            "drag finished"
        );
    }
}
