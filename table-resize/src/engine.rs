//! Geometry sync: turns pointer movement into constrained candidates and fans committed
//! cell dimensions out to sibling cells.

use crate::{CellId, Constraints, MembershipIndex, Size, Surface, round_px};

/// Side length of the square, anchored at a cell's bottom-right corner, that starts a cell
/// drag.
pub const CELL_CORNER_PX: f32 = 15.0;

/// Delay between pointer-up and reading the dragged cell's final size.
pub const CELL_SETTLE_MS: u64 = 50;

/// Debounce for passive size observations.
pub const CELL_OBSERVE_DEBOUNCE_MS: u64 = 200;

/// Passive height changes at or below this delta are ignored.
pub const CELL_HEIGHT_EPSILON: u32 = 2;

/// Computes a header drag candidate: the start width moved by the pointer's x delta.
pub fn header_candidate(start_width: u32, delta_x: f32, constraints: &Constraints) -> u32 {
    let raw = round_px(start_width as f32 + delta_x);
    constraints.clamp_width(raw)
}

/// Whether a candidate differs enough from the current width to be committed.
///
/// Columns without a width always accept.
pub fn exceeds_dead_zone(current: Option<u32>, candidate: u32, threshold: u32) -> bool {
    match current {
        Some(current) => current.abs_diff(candidate) >= threshold,
        None => true,
    }
}

/// What a [`broadcast`] touched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub size: Size,
    pub row_cells: usize,
    pub column_cells: usize,
}

/// Applies a dragged cell's settled size to itself and its siblings.
///
/// The height goes to the row element and every mounted cell in the same row, whatever its
/// column. The width goes to every other mounted cell in the same column. Cells in other
/// columns keep their width.
pub fn broadcast(
    index: &MembershipIndex,
    surface: &mut dyn Surface,
    source: &CellId,
    size: Size,
    constraints: &Constraints,
) -> BroadcastReport {
    let size = Size {
        width: constraints.clamp_width(size.width),
        height: constraints.clamp_height(size.height),
    };

    surface.set_cell_height(source, size.height);
    surface.set_cell_width(source, size.width);

    surface.set_row_height(source.row, size.height);
    let row = index.row_cells(source.row);
    for cell in &row {
        surface.set_cell_height(cell, size.height);
    }

    let mut column_cells = 0;
    for cell in index.column_cells(&source.column) {
        if &cell == source {
            continue;
        }
        surface.set_cell_width(&cell, size.width);
        column_cells += 1;
    }

    rtrace!(
        row = source.row,
        column = %source.column,
        width = size.width,
        height = size.height,
        row_cells = row.len(),
        column_cells,
        "broadcast cell size"
    );

    BroadcastReport {
        size,
        row_cells: row.len(),
        column_cells,
    }
}
