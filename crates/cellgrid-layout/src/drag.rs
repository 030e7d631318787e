#![forbid(unsafe_code)]

//! Drag-reorder lifecycle.
//!
//! ```text
//! Idle -> Dragging -> Idle
//!          |   ^
//!          +---+  (pointer move: candidate updates)
//! ```
//!
//! The machine is index-only: the container resolves hit tests and grid
//! positions and feeds the results in as [`DragInput`]s. Every step returns a
//! [`DragTransition`] describing what changed, including explicit
//! [`DragEffect::Noop`] diagnostics for input that was safely ignored.
//!
//! # Invariants
//!
//! 1. At most one drag is active; a long press while dragging is ignored.
//! 2. While dragging, only the pointer that started the drag is followed.
//! 3. Every path out of `Dragging` lands in `Idle`.
//! 4. A swap candidate, when present, is always `< child_count` of the step
//!    that produced it.

use std::fmt;

use cellgrid_core::geometry::Point;
use serde::{Deserialize, Serialize};

/// Drag lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        dragged: usize,
        swap_candidate: Option<usize>,
        pointer_id: u32,
        /// Container-local point where the drag began.
        origin: Point,
        /// Container-local point of the latest accepted move.
        current: Point,
    },
}

impl DragState {
    /// Whether a drag is in progress.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    /// Index of the dragged element, if any.
    #[inline]
    #[must_use]
    pub const fn dragged_index(&self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Dragging { dragged, .. } => Some(*dragged),
        }
    }

    /// Current swap candidate, if any.
    #[inline]
    #[must_use]
    pub const fn swap_candidate(&self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::Dragging { swap_candidate, .. } => *swap_candidate,
        }
    }
}

/// Why a drag ended without committing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragCancelReason {
    /// The host canceled the pointer sequence.
    PointerCancel,
    /// The owner reset the machine directly.
    Programmatic,
}

/// Input to one machine step, already resolved against the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "input", rename_all = "snake_case")]
pub enum DragInput {
    /// A long press completed; `hit` is the element under the press origin.
    LongPress {
        pointer_id: u32,
        hit: Option<usize>,
        position: Point,
    },
    /// The pointer moved; `position_in_page` is the one-based ordinal of the
    /// cell under it.
    Move {
        pointer_id: u32,
        position: Point,
        position_in_page: usize,
    },
    Release {
        pointer_id: u32,
        position: Point,
    },
    Cancel {
        pointer_id: u32,
    },
}

/// Explicit no-op diagnostics for inputs that are safely ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragNoopReason {
    IdleWithoutActiveDrag,
    NothingUnderPress,
    ActiveDragAlreadyInProgress,
    PointerMismatch,
}

/// Effect emitted by one lifecycle step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum DragEffect {
    Started {
        dragged: usize,
        pointer_id: u32,
        origin: Point,
    },
    /// The pointer moved over a different element.
    CandidateChanged {
        dragged: usize,
        previous: Option<usize>,
        candidate: Option<usize>,
        position: Point,
    },
    /// The pointer moved but the candidate is unchanged.
    Moved {
        dragged: usize,
        candidate: Option<usize>,
        position: Point,
    },
    /// Released with a candidate: the owner must swap `dragged` and `candidate`.
    Committed { dragged: usize, candidate: usize },
    /// Released with no candidate; nothing to swap.
    Released { dragged: usize },
    Canceled {
        dragged: usize,
        reason: DragCancelReason,
    },
    Noop { reason: DragNoopReason },
}

/// One state-machine transition with deterministic telemetry fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragTransition {
    pub transition_id: u64,
    pub from: DragState,
    pub to: DragState,
    pub effect: DragEffect,
}

impl DragTransition {
    /// Whether the step left the machine unchanged.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self.effect, DragEffect::Noop { .. })
    }
}

/// Rejected drag input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMachineError {
    /// A long press reported a hit past the end of the child list.
    HitOutOfRange { index: usize, len: usize },
}

impl fmt::Display for DragMachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HitOutOfRange { index, len } => {
                write!(f, "long press hit index {index} but only {len} children exist")
            }
        }
    }
}

impl std::error::Error for DragMachineError {}

/// Swap candidate for a one-based cell ordinal, clamped into the child list.
///
/// Returns `None` only for an empty container.
#[must_use]
pub fn swap_candidate_for(position_in_page: usize, child_count: usize) -> Option<usize> {
    let last = child_count.checked_sub(1)?;
    Some(position_in_page.saturating_sub(1).min(last))
}

/// Runtime lifecycle machine for drag-to-reorder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragMachine {
    state: DragState,
    transition_counter: u64,
}

impl DragMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> DragState {
        self.state
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.state.is_active()
    }

    /// Unconditionally return to Idle.
    ///
    /// Returns a `Canceled` transition if a drag was active, `None` otherwise.
    pub fn force_cancel(&mut self) -> Option<DragTransition> {
        let from = self.state;
        let dragged = from.dragged_index()?;
        self.state = DragState::Idle;
        Some(self.emit(
            from,
            DragEffect::Canceled {
                dragged,
                reason: DragCancelReason::Programmatic,
            },
        ))
    }

    /// Apply one input given the container's current child count.
    pub fn apply(
        &mut self,
        input: &DragInput,
        child_count: usize,
    ) -> Result<DragTransition, DragMachineError> {
        let from = self.state;
        let effect = match (self.state, *input) {
            (
                DragState::Idle,
                DragInput::LongPress {
                    pointer_id,
                    hit,
                    position,
                },
            ) => match hit {
                Some(index) if index >= child_count => {
                    return Err(DragMachineError::HitOutOfRange {
                        index,
                        len: child_count,
                    });
                }
                Some(dragged) => {
                    self.state = DragState::Dragging {
                        dragged,
                        swap_candidate: None,
                        pointer_id,
                        origin: position,
                        current: position,
                    };
                    DragEffect::Started {
                        dragged,
                        pointer_id,
                        origin: position,
                    }
                }
                None => DragEffect::Noop {
                    reason: DragNoopReason::NothingUnderPress,
                },
            },
            (DragState::Idle, _) => DragEffect::Noop {
                reason: DragNoopReason::IdleWithoutActiveDrag,
            },
            (DragState::Dragging { .. }, DragInput::LongPress { .. }) => DragEffect::Noop {
                reason: DragNoopReason::ActiveDragAlreadyInProgress,
            },
            (
                DragState::Dragging {
                    dragged,
                    swap_candidate,
                    pointer_id,
                    origin,
                    ..
                },
                DragInput::Move {
                    pointer_id: incoming,
                    position,
                    position_in_page,
                },
            ) => {
                if incoming != pointer_id {
                    DragEffect::Noop {
                        reason: DragNoopReason::PointerMismatch,
                    }
                } else {
                    let candidate = swap_candidate_for(position_in_page, child_count);
                    self.state = DragState::Dragging {
                        dragged,
                        swap_candidate: candidate,
                        pointer_id,
                        origin,
                        current: position,
                    };
                    if candidate == swap_candidate {
                        DragEffect::Moved {
                            dragged,
                            candidate,
                            position,
                        }
                    } else {
                        DragEffect::CandidateChanged {
                            dragged,
                            previous: swap_candidate,
                            candidate,
                            position,
                        }
                    }
                }
            }
            (
                DragState::Dragging {
                    dragged,
                    swap_candidate,
                    pointer_id,
                    ..
                },
                DragInput::Release {
                    pointer_id: incoming,
                    ..
                },
            ) => {
                if incoming != pointer_id {
                    DragEffect::Noop {
                        reason: DragNoopReason::PointerMismatch,
                    }
                } else {
                    self.state = DragState::Idle;
                    match swap_candidate.filter(|&c| c < child_count && dragged < child_count) {
                        Some(candidate) => DragEffect::Committed { dragged, candidate },
                        None => DragEffect::Released { dragged },
                    }
                }
            }
            (
                DragState::Dragging {
                    dragged,
                    pointer_id,
                    ..
                },
                DragInput::Cancel {
                    pointer_id: incoming,
                },
            ) => {
                if incoming != pointer_id {
                    DragEffect::Noop {
                        reason: DragNoopReason::PointerMismatch,
                    }
                } else {
                    self.state = DragState::Idle;
                    DragEffect::Canceled {
                        dragged,
                        reason: DragCancelReason::PointerCancel,
                    }
                }
            }
        };

        let transition = self.emit(from, effect);
        match transition.effect {
            DragEffect::Noop { reason } => tracing::trace!(
                target: "cellgrid.drag",
                transition_id = transition.transition_id,
                ?reason,
                "drag input ignored"
            ),
            DragEffect::Moved { .. } => tracing::trace!(
                target: "cellgrid.drag",
                transition_id = transition.transition_id,
                effect = ?transition.effect,
                "drag moved"
            ),
            effect => tracing::debug!(
                target: "cellgrid.drag",
                transition_id = transition.transition_id,
                ?effect,
                "drag transition"
            ),
        }
        Ok(transition)
    }

    fn emit(&mut self, from: DragState, effect: DragEffect) -> DragTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        DragTransition {
            transition_id: self.transition_counter,
            from,
            to: self.state,
            effect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: u32 = 0;

    fn long_press(hit: Option<usize>) -> DragInput {
        DragInput::LongPress {
            pointer_id: P,
            hit,
            position: Point::new(10, 10),
        }
    }

    fn move_to(position_in_page: usize) -> DragInput {
        DragInput::Move {
            pointer_id: P,
            position: Point::new(20, 20),
            position_in_page,
        }
    }

    fn release() -> DragInput {
        DragInput::Release {
            pointer_id: P,
            position: Point::new(20, 20),
        }
    }

    #[test]
    fn candidate_is_position_minus_one_clamped() {
        assert_eq!(swap_candidate_for(3, 8), Some(2));
        assert_eq!(swap_candidate_for(1, 8), Some(0));
        assert_eq!(swap_candidate_for(0, 8), Some(0));
        assert_eq!(swap_candidate_for(50, 8), Some(7));
        assert_eq!(swap_candidate_for(1, 0), None);
    }

    #[test]
    fn long_press_on_child_starts_drag() {
        let mut machine = DragMachine::new();
        let t = machine.apply(&long_press(Some(5)), 8).unwrap();
        assert_eq!(t.transition_id, 1);
        assert_eq!(t.from, DragState::Idle);
        assert!(matches!(t.effect, DragEffect::Started { dragged: 5, .. }));
        assert_eq!(machine.state().dragged_index(), Some(5));
        assert_eq!(machine.state().swap_candidate(), None);
    }

    #[test]
    fn long_press_on_nothing_stays_idle() {
        let mut machine = DragMachine::new();
        let t = machine.apply(&long_press(None), 8).unwrap();
        assert_eq!(
            t.effect,
            DragEffect::Noop {
                reason: DragNoopReason::NothingUnderPress
            }
        );
        assert!(!machine.is_active());
    }

    #[test]
    fn long_press_hit_past_end_is_error() {
        let mut machine = DragMachine::new();
        let err = machine.apply(&long_press(Some(8)), 8).unwrap_err();
        assert_eq!(err, DragMachineError::HitOutOfRange { index: 8, len: 8 });
        assert!(!machine.is_active());
    }

    #[test]
    fn moves_update_candidate_then_release_commits() {
        let mut machine = DragMachine::new();
        machine.apply(&long_press(Some(5)), 8).unwrap();

        let t = machine.apply(&move_to(3), 8).unwrap();
        assert!(matches!(
            t.effect,
            DragEffect::CandidateChanged {
                previous: None,
                candidate: Some(2),
                ..
            }
        ));
        let t = machine.apply(&move_to(3), 8).unwrap();
        assert!(matches!(t.effect, DragEffect::Moved { candidate: Some(2), .. }));

        let t = machine.apply(&release(), 8).unwrap();
        assert_eq!(
            t.effect,
            DragEffect::Committed {
                dragged: 5,
                candidate: 2
            }
        );
        assert_eq!(machine.state(), DragState::Idle);
    }

    #[test]
    fn release_without_move_has_nothing_to_swap() {
        let mut machine = DragMachine::new();
        machine.apply(&long_press(Some(1)), 4).unwrap();
        let t = machine.apply(&release(), 4).unwrap();
        assert_eq!(t.effect, DragEffect::Released { dragged: 1 });
        assert!(!machine.is_active());
    }

    #[test]
    fn idle_ignores_moves_and_releases() {
        let mut machine = DragMachine::new();
        for input in [move_to(2), release(), DragInput::Cancel { pointer_id: P }] {
            let t = machine.apply(&input, 4).unwrap();
            assert!(t.is_noop());
            assert_eq!(t.to, DragState::Idle);
        }
    }

    #[test]
    fn second_long_press_is_rejected() {
        let mut machine = DragMachine::new();
        machine.apply(&long_press(Some(0)), 4).unwrap();
        let t = machine
            .apply(
                &DragInput::LongPress {
                    pointer_id: 1,
                    hit: Some(3),
                    position: Point::ZERO,
                },
                4,
            )
            .unwrap();
        assert_eq!(
            t.effect,
            DragEffect::Noop {
                reason: DragNoopReason::ActiveDragAlreadyInProgress
            }
        );
        assert_eq!(machine.state().dragged_index(), Some(0));
    }

    #[test]
    fn foreign_pointer_is_ignored() {
        let mut machine = DragMachine::new();
        machine.apply(&long_press(Some(0)), 4).unwrap();
        let t = machine
            .apply(
                &DragInput::Release {
                    pointer_id: 9,
                    position: Point::ZERO,
                },
                4,
            )
            .unwrap();
        assert_eq!(
            t.effect,
            DragEffect::Noop {
                reason: DragNoopReason::PointerMismatch
            }
        );
        assert!(machine.is_active());
    }

    #[test]
    fn cancel_ends_without_commit() {
        let mut machine = DragMachine::new();
        machine.apply(&long_press(Some(2)), 4).unwrap();
        machine.apply(&move_to(1), 4).unwrap();
        let t = machine.apply(&DragInput::Cancel { pointer_id: P }, 4).unwrap();
        assert_eq!(
            t.effect,
            DragEffect::Canceled {
                dragged: 2,
                reason: DragCancelReason::PointerCancel
            }
        );
        assert_eq!(machine.state(), DragState::Idle);
    }

    #[test]
    fn force_cancel_only_when_active() {
        let mut machine = DragMachine::new();
        assert_eq!(machine.force_cancel(), None);
        machine.apply(&long_press(Some(1)), 2).unwrap();
        let t = machine.force_cancel().unwrap();
        assert!(matches!(
            t.effect,
            DragEffect::Canceled {
                reason: DragCancelReason::Programmatic,
                ..
            }
        ));
        assert!(!machine.is_active());
    }

    #[test]
    fn transition_ids_are_monotonic() {
        let mut machine = DragMachine::new();
        let ids: Vec<u64> = [long_press(Some(0)), move_to(2), move_to(3), release()]
            .iter()
            .map(|input| machine.apply(input, 4).unwrap().transition_id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }
}
