use std::collections::HashMap;

use crate::{CellId, Size};

/// Read access to rendered cell geometry.
pub trait Geometry {
    /// The cell's rendered border box, rounded to whole pixels.
    fn measure(&self, cell: &CellId) -> Option<Size>;

    /// The cell's content extent in the width axis, including overflow.
    fn content_width(&self, cell: &CellId) -> Option<u32>;
}

/// Write access used by dimension propagation.
///
/// Writes are imperative style overrides that land outside the host's declarative render
/// pass, so they must be applied immediately.
pub trait Surface: Geometry {
    fn set_cell_height(&mut self, cell: &CellId, height: u32);
    fn set_cell_width(&mut self, cell: &CellId, width: u32);

    /// Sets the height of the row element itself. Hosts without row elements can ignore it.
    fn set_row_height(&mut self, _row: usize, _height: u32) {}
}

/// One rendered cell in a [`MemorySurface`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellBox {
    pub size: Size,
    pub content_width: u32,
}

/// A [`Surface`] that keeps cell boxes in memory.
///
/// Useful for hosts that lay out cells themselves (TUI, immediate-mode GUIs) and for tests.
#[derive(Clone, Debug, Default)]
pub struct MemorySurface {
    cells: HashMap<CellId, CellBox>,
    rows: HashMap<usize, u32>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, cell: CellId, size: Size, content_width: u32) {
        self.cells.insert(
            cell,
            CellBox {
                size,
                content_width,
            },
        );
    }

    pub fn remove(&mut self, cell: &CellId) -> Option<CellBox> {
        self.cells.remove(cell)
    }

    pub fn cell(&self, cell: &CellId) -> Option<CellBox> {
        self.cells.get(cell).copied()
    }

    /// Simulates the user's drag changing a cell's rendered box.
    pub fn resize(&mut self, cell: &CellId, size: Size) {
        if let Some(b) = self.cells.get_mut(cell) {
            b.size = size;
        }
    }

    pub fn row_height(&self, row: usize) -> Option<u32> {
        self.rows.get(&row).copied()
    }
}

impl Geometry for MemorySurface {
    fn measure(&self, cell: &CellId) -> Option<Size> {
        self.cells.get(cell).map(|b| b.size)
    }

    fn content_width(&self, cell: &CellId) -> Option<u32> {
        self.cells.get(cell).map(|b| b.content_width)
    }
}

impl Surface for MemorySurface {
    fn set_cell_height(&mut self, cell: &CellId, height: u32) {
        if let Some(b) = self.cells.get_mut(cell) {
            b.size.height = height;
        }
    }

    fn set_cell_width(&mut self, cell: &CellId, width: u32) {
        if let Some(b) = self.cells.get_mut(cell) {
            b.size.width = width;
        }
    }

    fn set_row_height(&mut self, row: usize, height: u32) {
        self.rows.insert(row, height);
    }
}
