use std::collections::BTreeMap;

use table_resize::{
    BodyCellProps, Bounds, CellId, CellResize, ColumnKey, Geometry, Point, Size, Surface,
    TableResize,
};

use crate::{BodyCell, ClickOutcome, HeaderCell};

/// What one [`Driver::frame`] call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Cells whose settle delay elapsed and whose size was broadcast.
    pub settled: usize,
    /// Passive height changes reported to the controller.
    pub reported_heights: usize,
    /// Columns whose width changed at this frame boundary.
    pub committed: usize,
}

/// A framework-neutral driver that wraps a [`TableResize`] together with the gesture state
/// of every mounted header and body cell.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - the `header_*` / `cell_*` methods when pointer or observer events occur
/// - `frame(now_ms, surface)` on each animation frame / timer tick
///
/// Header props are re-derived from the controller after every frame, so drag previews and
/// committed widths show up on the next render.
#[derive(Debug)]
pub struct Driver {
    table: TableResize,
    headers: BTreeMap<ColumnKey, HeaderCell>,
    cells: BTreeMap<CellId, BodyCell>,
}

impl Driver {
    pub fn new(table: TableResize) -> Self {
        let mut driver = Self {
            table,
            headers: BTreeMap::new(),
            cells: BTreeMap::new(),
        };
        driver.sync_headers();
        driver
    }

    pub fn table(&self) -> &TableResize {
        &self.table
    }

    /// Mutable access to the controller. Call [`Self::sync_headers`] after changing columns
    /// or options through it.
    pub fn table_mut(&mut self) -> &mut TableResize {
        &mut self.table
    }

    pub fn into_table(self) -> TableResize {
        self.table
    }

    pub fn header(&self, key: &str) -> Option<&HeaderCell> {
        self.headers.get(key)
    }

    pub fn headers(&self) -> impl Iterator<Item = &HeaderCell> {
        self.headers.values()
    }

    pub fn cell(&self, id: &CellId) -> Option<&BodyCell> {
        self.cells.get(id)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Re-renders header props from the controller. Headers of removed columns are dropped.
    pub fn sync_headers(&mut self) {
        let columns = self.table.render_columns();
        self.headers
            .retain(|key, _| columns.iter().any(|c| c.key() == key));
        for column in columns {
            match self.headers.get_mut(column.key()) {
                Some(header) => header.set_props(column.header),
                None => {
                    self.headers
                        .insert(column.key().clone(), HeaderCell::new(column.header));
                }
            }
        }
    }

    /// Mounts one body cell for every column of `row`.
    pub fn mount_row(&mut self, row: usize) {
        let height = self.table.row_height(row);
        for column in self.table.render_columns() {
            let props = column.body_cell(row, height);
            self.mount_cell(props);
        }
    }

    /// Mounts a body cell. Remounting an id tears down the previous cell first.
    pub fn mount_cell(&mut self, props: BodyCellProps) -> &BodyCell {
        let id = props.cell_id();
        if let Some(mut old) = self.cells.remove(&id) {
            old.teardown(&mut self.table);
        }
        let cell = BodyCell::mount(props, &mut self.table);
        self.cells.entry(id).or_insert(cell)
    }

    /// Mounts a cell the host renders outside the declared columns, such as a selection box.
    /// With no `declared` config the cell takes the table's default policy.
    pub fn mount_host_cell(
        &mut self,
        column_key: impl Into<ColumnKey>,
        column_index: usize,
        row: usize,
        declared: Option<&CellResize>,
    ) -> &BodyCell {
        let body = self.table.components().body;
        let mut props = body.props_for(
            column_key.into(),
            column_index,
            row,
            declared,
            self.table.options(),
        );
        props.row_height = self.table.row_height(row);
        self.mount_cell(props)
    }

    pub fn unmount_cell(&mut self, id: &CellId) -> bool {
        match self.cells.remove(id) {
            Some(mut cell) => {
                cell.teardown(&mut self.table);
                true
            }
            None => false,
        }
    }

    pub fn header_drag_start(
        &mut self,
        key: &str,
        pointer: Point,
        measured_width: Option<u32>,
    ) -> bool {
        self.headers
            .get_mut(key)
            .is_some_and(|h| h.on_drag_start(pointer, measured_width))
    }

    pub fn header_drag_move(&mut self, key: &str, pointer: Point) -> Option<u32> {
        let header = self.headers.get_mut(key)?;
        header.on_drag_move(pointer, &mut self.table)
    }

    pub fn header_drag_stop(&mut self, key: &str, pointer: Point, now_ms: u64) -> bool {
        let Some(header) = self.headers.get_mut(key) else {
            return false;
        };
        let changed = header.on_drag_stop(pointer, &mut self.table, now_ms);
        self.sync_headers();
        changed
    }

    pub fn header_click(&self, key: &str, on_handle: bool) -> ClickOutcome {
        self.headers
            .get(key)
            .map_or(ClickOutcome::PassThrough, |h| h.on_click(on_handle))
    }

    pub fn header_double_click(
        &mut self,
        key: &str,
        on_handle: bool,
        geometry: &dyn Geometry,
        now_ms: u64,
    ) -> ClickOutcome {
        let Some(header) = self.headers.get_mut(key) else {
            return ClickOutcome::PassThrough;
        };
        let outcome = header.on_double_click(on_handle, &mut self.table, geometry, now_ms);
        if matches!(outcome, ClickOutcome::AutoSized(Some(_))) {
            self.sync_headers();
        }
        outcome
    }

    pub fn cell_pointer_down(&mut self, id: &CellId, pointer: Point, bounds: Bounds) -> bool {
        self.cells
            .get_mut(id)
            .is_some_and(|c| c.on_pointer_down(pointer, bounds))
    }

    /// Document-level pointer-up: ends whichever cell drag is active.
    pub fn pointer_up(&mut self, now_ms: u64) {
        for cell in self.cells.values_mut() {
            cell.on_pointer_up(now_ms);
        }
    }

    pub fn cell_observed(&mut self, id: &CellId, size: Size, now_ms: u64) {
        if let Some(cell) = self.cells.get_mut(id) {
            cell.on_observed_resize(size, now_ms);
        }
    }

    /// Advances every cell deadline, then the controller's frame queue and save timer.
    pub fn frame(&mut self, now_ms: u64, surface: &mut dyn Surface) -> FrameReport {
        let mut report = FrameReport::default();
        for cell in self.cells.values_mut() {
            let tick = cell.tick(now_ms, &mut self.table, surface);
            report.settled += usize::from(tick.settled.is_some());
            report.reported_heights += usize::from(tick.reported_height.is_some());
        }

        report.committed = self.table.on_frame(now_ms);
        self.table.tick(now_ms);

        for (id, cell) in self.cells.iter_mut() {
            cell.set_row_height(self.table.row_height(id.row));
        }
        self.sync_headers();
        report
    }

    /// The earliest pending deadline across every cell and the save timer.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.cells
            .values()
            .filter_map(BodyCell::next_deadline_ms)
            .chain(self.table.save_deadline_ms())
            .min()
    }

    /// Tears down every cell and header and releases the controller's scheduled work.
    pub fn teardown(&mut self) {
        for (_, mut cell) in core::mem::take(&mut self.cells) {
            cell.teardown(&mut self.table);
        }
        for header in self.headers.values_mut() {
            header.teardown();
        }
        self.table.teardown();
    }
}
