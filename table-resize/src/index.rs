use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use crate::{CellId, ColumnKey};

/// Which cells are currently mounted, by row and by column.
///
/// Cells register on mount and unregister on teardown. Propagation and auto-size walk this
/// index instead of querying the rendered tree.
#[derive(Clone, Debug, Default)]
pub struct MembershipIndex {
    rows: BTreeMap<usize, BTreeSet<ColumnKey>>,
    columns: BTreeMap<ColumnKey, BTreeSet<usize>>,
}

impl MembershipIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, cell: &CellId) {
        self.rows
            .entry(cell.row)
            .or_default()
            .insert(cell.column.clone());
        self.columns
            .entry(cell.column.clone())
            .or_default()
            .insert(cell.row);
    }

    pub fn unregister(&mut self, cell: &CellId) {
        if let Some(cols) = self.rows.get_mut(&cell.row) {
            cols.remove(&cell.column);
            if cols.is_empty() {
                self.rows.remove(&cell.row);
            }
        }
        if let Some(rows) = self.columns.get_mut(&cell.column) {
            rows.remove(&cell.row);
            if rows.is_empty() {
                self.columns.remove(&cell.column);
            }
        }
    }

    pub fn contains(&self, cell: &CellId) -> bool {
        self.rows
            .get(&cell.row)
            .is_some_and(|cols| cols.contains(&cell.column))
    }

    pub fn len(&self) -> usize {
        self.rows.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.columns.clear();
    }

    /// Every mounted cell in `row`, in column key order.
    pub fn row_cells(&self, row: usize) -> Vec<CellId> {
        self.rows
            .get(&row)
            .map(|cols| {
                cols.iter()
                    .map(|column| CellId {
                        column: column.clone(),
                        row,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every mounted cell in `column`, in row order.
    pub fn column_cells(&self, column: &ColumnKey) -> Vec<CellId> {
        self.columns
            .get(column)
            .map(|rows| {
                rows.iter()
                    .map(|&row| CellId {
                        column: column.clone(),
                        row,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
