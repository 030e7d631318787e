//! Scripted drag replay.
//!
//! A replay presses one child, completes a long press, moves the pointer
//! over another child, and releases (or cancels). Each child is addressed
//! through the center of its top-left cell, so the swap candidate picked by
//! the grid is the child's own index whenever slots follow attach order.
//! The container sits at the screen origin, so raw and local coordinates
//! coincide.

use std::io::Write;

use cellgrid_core::Instant;
use cellgrid_core::event::{PointerEvent, PointerEventKind};
use cellgrid_core::geometry::{Point, Rect};
use cellgrid_layout::{CellLayout, DragTransition, MeasureSpec, Slot};
use serde::Serialize;

use crate::document::LayoutDocument;
use crate::error::{DemoError, Result};

/// What to replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayPlan {
    /// Child to long-press.
    pub drag: usize,
    /// Child to move over before releasing; `None` releases in place.
    pub over: Option<usize>,
    /// Container width in pixels.
    pub width: i32,
    /// End with a pointer cancel instead of a release.
    pub cancel: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildReport {
    pub index: usize,
    pub label: String,
    pub slot: Slot,
    pub frame: Rect,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridReport {
    pub columns: u16,
    pub cell_size: f32,
    pub rows: u16,
    pub width: i32,
    pub height: i32,
    pub children: Vec<ChildReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub before: GridReport,
    pub after: GridReport,
    pub transitions: Vec<DragTransition>,
    pub animation_commands: usize,
}

/// Measure and lay out `document` at `width`.
pub fn arrange(document: &LayoutDocument, width: i32) -> Result<(CellLayout<String>, GridReport)> {
    if width <= 0 {
        return Err(DemoError::invalid(format!("--width must be positive (got {width})")));
    }
    let mut grid = document.build()?;
    grid.measure(MeasureSpec::Exactly(width), MeasureSpec::Unspecified);
    grid.layout();
    let report = snapshot(&grid);
    Ok((grid, report))
}

pub fn snapshot(grid: &CellLayout<String>) -> GridReport {
    let measured = grid.last_measure();
    GridReport {
        columns: grid.config().columns,
        cell_size: grid.geometry().cell_size(),
        rows: grid.geometry().rows(),
        width: measured.map_or(0, |m| m.width),
        height: measured.map_or(0, |m| m.height),
        children: grid
            .children()
            .iter()
            .enumerate()
            .map(|(index, child)| ChildReport {
                index,
                label: child.content().clone(),
                slot: child.slot(),
                frame: child.frame(),
            })
            .collect(),
    }
}

/// Run `plan` against `document`.
pub fn replay(document: &LayoutDocument, plan: &ReplayPlan) -> Result<ReplayReport> {
    let (mut grid, before) = arrange(document, plan.width)?;
    let len = grid.len();
    for (flag, index) in [("--drag", Some(plan.drag)), ("--over", plan.over)] {
        if let Some(index) = index.filter(|&i| i >= len) {
            return Err(DemoError::invalid(format!(
                "{flag} {index} is out of range for {len} children"
            )));
        }
    }

    let anchor = |grid: &CellLayout<String>, index: usize| {
        let slot = grid.children()[index].slot();
        let cell = grid.geometry().cell_size();
        let padding = grid.config().padding;
        Point::new(
            padding.left + ((f32::from(slot.left) + 0.5) * cell) as i32,
            padding.top + ((f32::from(slot.top) + 0.5) * cell) as i32,
        )
    };
    let now = Instant::now();
    let mut transitions = Vec::new();
    let mut send = |grid: &mut CellLayout<String>, kind, at: Point| -> Result<()> {
        let response = grid.handle_pointer(&PointerEvent::at(kind, at.x, at.y), now)?;
        transitions.extend(response.long_press);
        transitions.extend(response.transition);
        Ok(())
    };

    let press = anchor(&grid, plan.drag);
    send(&mut grid, PointerEventKind::Down, press)?;
    let started = grid.long_press()?;

    let mut last = press;
    if let Some(over) = plan.over {
        last = anchor(&grid, over);
        send(&mut grid, PointerEventKind::Move, last)?;
    }
    let end = if plan.cancel {
        PointerEventKind::Cancel
    } else {
        PointerEventKind::Up
    };
    send(&mut grid, end, last)?;
    if let Some(started) = started {
        transitions.insert(0, started);
    }

    let animation_commands = grid.drain_animations().len();
    grid.layout();
    tracing::info!(
        drag = plan.drag,
        over = ?plan.over,
        transitions = transitions.len(),
        "replay finished"
    );

    Ok(ReplayReport {
        before,
        after: snapshot(&grid),
        transitions,
        animation_commands,
    })
}

pub fn write_grid_text(out: &mut dyn Write, report: &GridReport) -> std::io::Result<()> {
    writeln!(
        out,
        "{} columns x {} rows, cell {:.1}px, {}x{}px",
        report.columns, report.rows, report.cell_size, report.width, report.height
    )?;
    for child in &report.children {
        let slot = child.slot;
        let frame = child.frame;
        writeln!(
            out,
            "  [{}] {:<10} cell ({}, {}) span {}x{}  frame ({}, {}) {}x{}",
            child.index,
            child.label,
            slot.left,
            slot.top,
            slot.width,
            slot.height,
            frame.x,
            frame.y,
            frame.width,
            frame.height,
        )?;
    }
    Ok(())
}

pub fn write_replay_text(out: &mut dyn Write, report: &ReplayReport) -> std::io::Result<()> {
    writeln!(out, "before:")?;
    write_grid_text(out, &report.before)?;
    writeln!(out, "transitions:")?;
    for transition in &report.transitions {
        writeln!(out, "  #{} {:?}", transition.transition_id, transition.effect)?;
    }
    writeln!(out, "animation commands: {}", report.animation_commands)?;
    writeln!(out, "after:")?;
    write_grid_text(out, &report.after)
}
