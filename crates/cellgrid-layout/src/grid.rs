#![forbid(unsafe_code)]

//! Pixel ↔ cell mapping.
//!
//! All coordinates here are in content space: the container's padding has
//! already been removed. A single indexing scheme is used everywhere,
//! `index = column + row * columns`, which treats every index as one cell.
//! Multi-cell spans are not accounted for by [`GridGeometry::origin_of_index`];
//! callers that need a spanning element's origin must use its slot.

use cellgrid_core::geometry::Point;

/// A (column, row) pair. Derived from coordinates, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub column: u16,
    pub row: u16,
}

impl GridCell {
    #[must_use]
    pub const fn new(column: u16, row: u16) -> Self {
        Self { column, row }
    }
}

/// The geometry constants of one measure pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    columns: u16,
    cell_size: f32,
    rows: u16,
}

impl GridGeometry {
    /// `columns` is clamped to at least 1.
    #[must_use]
    pub fn new(columns: u16, cell_size: f32, rows: u16) -> Self {
        Self {
            columns: columns.max(1),
            cell_size,
            rows,
        }
    }

    #[inline]
    #[must_use]
    pub const fn columns(&self) -> u16 {
        self.columns
    }

    #[inline]
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Rows occupied by children as of the last measure pass.
    #[inline]
    #[must_use]
    pub const fn rows(&self) -> u16 {
        self.rows
    }

    /// Column containing `x`.
    ///
    /// Scans the right edges `i * cell_size` for `i` in `1..=columns` and
    /// counts the ones at or left of `x`. Points past the last edge resolve to
    /// `columns`; there is no further clamp.
    #[must_use]
    pub fn column_of(&self, x: i32) -> u16 {
        scan_boundaries(x, self.cell_size, self.columns)
    }

    /// Row containing `y`, scanned over `1..=rows` like [`column_of`](Self::column_of).
    #[must_use]
    pub fn row_of(&self, y: i32) -> u16 {
        scan_boundaries(y, self.cell_size, self.rows)
    }

    /// Cell under `point`.
    #[must_use]
    pub fn cell_at(&self, point: Point) -> GridCell {
        GridCell::new(self.column_of(point.x), self.row_of(point.y))
    }

    /// Row-major cell index of `cell`.
    #[inline]
    #[must_use]
    pub fn index_of_cell(&self, cell: GridCell) -> usize {
        usize::from(cell.column) + usize::from(cell.row) * usize::from(self.columns)
    }

    /// Row-major cell index under `point`.
    #[must_use]
    pub fn index_at(&self, point: Point) -> usize {
        self.index_of_cell(self.cell_at(point))
    }

    /// One-based ordinal of the cell under `point`; zero is never returned.
    ///
    /// The drag engine derives its swap candidate as `position_in_page - 1`.
    #[must_use]
    pub fn position_in_page(&self, point: Point) -> usize {
        self.index_at(point) + 1
    }

    /// Top-left pixel of the cell with row-major `index`.
    #[must_use]
    pub fn origin_of_index(&self, index: usize) -> Point {
        let columns = usize::from(self.columns);
        let column = index % columns;
        let row = index / columns;
        Point::new(
            (self.cell_size * column as f32) as i32,
            (self.cell_size * row as f32) as i32,
        )
    }
}

fn scan_boundaries(coordinate: i32, cell_size: f32, count: u16) -> u16 {
    let mut resolved = 0;
    for i in 1..=count {
        let edge = (f32::from(i) * cell_size) as i32;
        if coordinate < edge {
            break;
        }
        resolved += 1;
    }
    resolved
}
