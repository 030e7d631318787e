#![forbid(unsafe_code)]

//! Atomic exchange of two children's order and grid footprint.

use crate::error::GridError;
use crate::slot::Slot;

/// Anything that carries a grid slot.
pub trait SlotOwner {
    fn slot(&self) -> Slot;
    fn set_slot(&mut self, slot: Slot);
}

impl SlotOwner for Slot {
    fn slot(&self) -> Slot {
        *self
    }

    fn set_slot(&mut self, slot: Slot) {
        *self = slot;
    }
}

/// Exchange the children at `a` and `b`.
///
/// The element formerly at `a` ends up at index `b` carrying the slot that
/// `b` had, and vice versa. Both indices are validated before anything
/// moves, so an error leaves `children` untouched. `a == b` is a no-op.
pub fn swap_commit<C: SlotOwner>(children: &mut [C], a: usize, b: usize) -> Result<(), GridError> {
    let len = children.len();
    for index in [a, b] {
        if index >= len {
            return Err(GridError::IndexOutOfRange { index, len });
        }
    }
    if a == b {
        return Ok(());
    }

    let slot_a = children[a].slot();
    let slot_b = children[b].slot();
    children.swap(a, b);
    children[a].set_slot(slot_a);
    children[b].set_slot(slot_b);

    tracing::debug!(
        target: "cellgrid.commit",
        a,
        b,
        a_left = slot_a.left,
        a_top = slot_a.top,
        b_left = slot_b.left,
        b_top = slot_b.top,
        "swap committed"
    );
    Ok(())
}
