#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use cellgrid_core::Instant;
use cellgrid_core::event::{PointerEvent, PointerEventKind};
use cellgrid_layout::{CellLayout, GridConfig, MeasureSpec, SlotAttrs};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Op {
    Pointer { kind: u8, pointer: u8, x: i32, y: i32 },
    LongPress,
    Tick { ms: u16 },
    CancelDrag,
    Measure { width: u16 },
    Layout,
}

#[derive(Debug, Arbitrary)]
struct Input {
    columns: u8,
    children: u8,
    gap_animation: bool,
    ops: Vec<Op>,
}

fuzz_target!(|input: Input| {
    let columns = u16::from(input.columns % 8) + 1; // 1..=8
    let count = usize::from(input.children % 24);
    let config = GridConfig::default()
        .with_columns(columns)
        .with_gap_animation(input.gap_animation);
    let Ok(mut grid) = CellLayout::new(config) else {
        return;
    };
    let per_row = usize::from(columns);
    for i in 0..count {
        let attrs = SlotAttrs::new((i % per_row) as i32, (i / per_row) as i32, 1, 1);
        grid.push(i, attrs).expect("row-major single cells always fit");
    }
    grid.measure(MeasureSpec::Exactly(400), MeasureSpec::Unspecified);
    grid.layout();

    let slots = grid.slots();
    let mut now = Instant::now();

    for op in input.ops.iter().take(256) {
        match *op {
            Op::Pointer { kind, pointer, x, y } => {
                let kind = match kind % 4 {
                    0 => PointerEventKind::Down,
                    1 => PointerEventKind::Move,
                    2 => PointerEventKind::Up,
                    _ => PointerEventKind::Cancel,
                };
                let event = PointerEvent::at(kind, x, y)
                    .with_pointer_id(u32::from(pointer % 3));
                let _ = grid.handle_pointer(&event, now);
            }
            Op::LongPress => {
                let _ = grid.long_press();
            }
            Op::Tick { ms } => {
                now += Duration::from_millis(u64::from(ms));
                let _ = grid.tick(now);
            }
            Op::CancelDrag => {
                let _ = grid.cancel_drag();
            }
            Op::Measure { width } => {
                grid.measure(MeasureSpec::Exactly(i32::from(width)), MeasureSpec::Unspecified);
            }
            Op::Layout => grid.layout(),
        }

        // Slots belong to positions; reordering only moves content.
        assert_eq!(grid.slots(), slots, "slot moved with its child");
        assert_eq!(grid.len(), count);
        let mut contents: Vec<usize> = grid.children().iter().map(|c| *c.content()).collect();
        contents.sort_unstable();
        assert!(contents.iter().copied().eq(0..count), "children lost or duplicated");
        if let Some(dragged) = grid.drag_state().dragged_index() {
            assert!(dragged < count, "dragged index out of range");
        }
        assert_eq!(grid.draw_order().len(), count);
    }
});
