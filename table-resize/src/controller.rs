use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::autosize::estimate_column_width;
use crate::engine::{self, BroadcastReport};
use crate::persist::{self, SAVE_DEBOUNCE_MS, WidthMap};
use crate::render::{self, BodyRenderer, HeaderRenderer, RenderColumn, TableComponents};
use crate::scheduler::{Debounce, FrameQueue};
use crate::{
    CellId, CellPolicy, Column, ColumnDef, ColumnKey, Geometry, MembershipIndex, ResizeOptions,
    Size, Surface, WidthStore,
};

/// A shareable handle to the key-value store holding persisted widths.
pub type SharedStore = Arc<dyn WidthStore + Send + Sync>;

/// Notification sent to [`ResizeOptions::on_change`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResizeEvent {
    ColumnWidth { key: ColumnKey, width: u32 },
    RowHeight { row: usize, height: u32 },
    Reset,
}

/// Where a width commit comes from. Only header drags are subject to the dead zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitSource {
    HeaderDrag,
    CellDrag,
    AutoSize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingWidth {
    width: u32,
    source: CommitSource,
}

/// The resize state controller.
///
/// Owns the authoritative column list and is its only writer. Interaction adapters submit
/// candidates; this type applies the commit policy, schedules persistence and derives the
/// descriptors the host table renders with.
///
/// Like the rest of this crate it never reads a clock: every time-dependent call takes
/// `now_ms`, and the host calls [`TableResize::on_frame`] once per rendered frame and
/// [`TableResize::tick`] from its timer loop.
#[derive(Clone)]
pub struct TableResize {
    options: ResizeOptions,
    base: Vec<ColumnDef>,
    columns: Vec<Column>,
    /// Widths committed since construction, by key. They outlive `set_columns`.
    session_widths: BTreeMap<ColumnKey, u32>,
    /// Everything last read from or written to the store, unknown keys included.
    persisted: WidthMap,
    store: Option<SharedStore>,
    save: Debounce<(String, WidthMap)>,
    frame: FrameQueue<ColumnKey, PendingWidth>,
    index: MembershipIndex,
    row_heights: BTreeMap<usize, u32>,
}

impl TableResize {
    /// Creates a controller over `columns`.
    ///
    /// Column keys must be unique. When `options.persist_column_width` is set and a store is
    /// given, persisted widths are overlaid onto the columns immediately.
    pub fn new(
        columns: Vec<ColumnDef>,
        options: ResizeOptions,
        store: Option<SharedStore>,
    ) -> Self {
        debug_assert_unique_keys(&columns);
        rdebug!(
            columns = columns.len(),
            persist = options.persist_column_width,
            storage_key = %options.storage_key,
            "TableResize::new"
        );
        let mut t = Self {
            save: Debounce::new(SAVE_DEBOUNCE_MS),
            options,
            base: Vec::new(),
            columns: Vec::new(),
            session_widths: BTreeMap::new(),
            persisted: WidthMap::new(),
            store,
            frame: FrameQueue::new(),
            index: MembershipIndex::new(),
            row_heights: BTreeMap::new(),
        };
        t.reload_persisted();
        t.base = columns;
        t.rederive_columns();
        t
    }

    /// Convenience constructor without a store (persistence stays off).
    pub fn in_memory(columns: Vec<ColumnDef>, options: ResizeOptions) -> Self {
        Self::new(columns, options, None)
    }

    pub fn options(&self) -> &ResizeOptions {
        &self.options
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, key: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.def.key.as_str() == key)
    }

    pub fn column_width(&self, key: &str) -> Option<u32> {
        self.column(key).and_then(|c| c.width)
    }

    pub fn row_height(&self, row: usize) -> Option<u32> {
        self.row_heights.get(&row).copied()
    }

    pub fn index(&self) -> &MembershipIndex {
        &self.index
    }

    /// The persisted map as this controller last read or wrote it.
    pub fn persisted_widths(&self) -> &WidthMap {
        &self.persisted
    }

    pub fn has_pending_save(&self) -> bool {
        self.save.is_pending()
    }

    /// When the pending save is due, for hosts that schedule their own timers.
    pub fn save_deadline_ms(&self) -> Option<u64> {
        self.save.deadline_ms()
    }

    pub fn has_pending_frame(&self) -> bool {
        !self.frame.is_empty()
    }

    fn persistence(&self) -> Option<&SharedStore> {
        if self.options.persist_column_width {
            self.store.as_ref()
        } else {
            None
        }
    }

    /// Re-reads the stored map, then lays this session's commits over it so the next save
    /// still carries them. A pending save is rebased onto the merged map.
    fn reload_persisted(&mut self) {
        let Some(store) = self.persistence() else {
            self.persisted = WidthMap::new();
            return;
        };
        let mut persisted = persist::load_widths(store.as_ref(), &self.options.storage_key);
        persisted.extend(
            self.session_widths
                .iter()
                .map(|(key, width)| (key.as_str().to_owned(), *width)),
        );
        self.persisted = persisted;
        let snapshot = (self.options.storage_key.clone(), self.persisted.clone());
        self.save.replace_pending(snapshot);
    }

    /// Rebuilds `columns` from `base`: session width, then persisted, then declared.
    fn rederive_columns(&mut self) {
        let persisted = if self.options.persist_column_width {
            Some(&self.persisted)
        } else {
            None
        };
        self.columns = self
            .base
            .iter()
            .map(|def| {
                let width = self
                    .session_widths
                    .get(&def.key)
                    .copied()
                    .or_else(|| persisted.and_then(|p| p.get(def.key.as_str()).copied()))
                    .or_else(|| def.declared_width());
                Column {
                    def: def.clone(),
                    width,
                }
            })
            .collect();
    }

    /// Replaces the caller's column list.
    ///
    /// Widths committed this session win over a freshly reloaded persisted value, which wins
    /// over the new list's own `width`, which wins over its `default_width`.
    pub fn set_columns(&mut self, columns: Vec<ColumnDef>) {
        debug_assert_unique_keys(&columns);
        rtrace!(columns = columns.len(), "TableResize::set_columns");
        self.base = columns;
        self.reload_persisted();
        self.rederive_columns();
    }

    /// Replaces the options. Persisted widths are re-read when the storage key or the
    /// persistence switch changed.
    pub fn set_options(&mut self, options: ResizeOptions) {
        let reload = options.storage_key != self.options.storage_key
            || options.persist_column_width != self.options.persist_column_width;
        if options.storage_key != self.options.storage_key {
            // The pending snapshot belongs to the old key.
            self.flush_persistence();
        }
        self.options = options;
        rtrace!(reload, "TableResize::set_options");
        if reload {
            self.reload_persisted();
            self.rederive_columns();
        }
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut ResizeOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    fn emit(&self, event: ResizeEvent) {
        if let Some(cb) = &self.options.on_change {
            cb(&event);
        }
    }

    /// Applies one width commit. Returns `true` when the column's width changed.
    pub fn commit_width(
        &mut self,
        key: &str,
        candidate: u32,
        source: CommitSource,
        now_ms: u64,
    ) -> bool {
        let Some(i) = self.columns.iter().position(|c| c.def.key.as_str() == key) else {
            rdebug!(key, "commit for unknown column ignored");
            return false;
        };
        let column = &self.columns[i];
        let constraints = column.def.header_constraints(&self.options);
        let width = match source {
            CommitSource::HeaderDrag => {
                if !column.def.header_resizable(&self.options) {
                    return false;
                }
                let width = constraints.clamp_width(candidate);
                let threshold = column.def.threshold(&self.options);
                if !engine::exceeds_dead_zone(column.width, width, threshold) {
                    rtrace!(key, width, current = ?column.width, "within dead zone");
                    return false;
                }
                width
            }
            CommitSource::AutoSize => constraints.clamp_width(candidate),
            CommitSource::CellDrag => {
                if candidate == 0 {
                    return false;
                }
                candidate
            }
        };
        if column.width == Some(width) {
            return false;
        }

        let key = column.def.key.clone();
        self.columns[i].width = Some(width);
        self.session_widths.insert(key.clone(), width);
        rdebug!(key = %key, width, source = ?source, "commit column width");
        self.schedule_save(&key, width, now_ms);
        self.emit(ResizeEvent::ColumnWidth { key, width });
        true
    }

    fn schedule_save(&mut self, key: &ColumnKey, width: u32, now_ms: u64) {
        if self.persistence().is_none() {
            return;
        }
        self.persisted.insert(key.as_str().to_owned(), width);
        self.save.submit(
            (self.options.storage_key.clone(), self.persisted.clone()),
            now_ms,
        );
    }

    /// Commits a header drag candidate immediately. Candidates closer than the threshold to
    /// the current width are discarded.
    pub fn commit_header_width(&mut self, key: &str, candidate: u32, now_ms: u64) -> bool {
        self.commit_width(key, candidate, CommitSource::HeaderDrag, now_ms)
    }

    /// Queues a header drag candidate for the next frame. A later candidate for the same
    /// column replaces this one.
    pub fn submit_header_width(&mut self, key: &ColumnKey, candidate: u32) {
        self.frame.submit(
            key.clone(),
            PendingWidth {
                width: candidate,
                source: CommitSource::HeaderDrag,
            },
        );
    }

    /// Ends a header drag: drops any candidate still queued for the column, then commits the
    /// final one through the same dead-zone check as every other header candidate.
    pub fn finish_header_drag(&mut self, key: &ColumnKey, candidate: u32, now_ms: u64) -> bool {
        self.frame.take(key);
        self.commit_header_width(key.as_str(), candidate, now_ms)
    }

    /// Queues a width coming from a cell drag for the next frame.
    pub fn submit_cell_width(&mut self, key: &ColumnKey, width: u32) {
        if width == 0 {
            return;
        }
        self.frame.submit(
            key.clone(),
            PendingWidth {
                width,
                source: CommitSource::CellDrag,
            },
        );
    }

    /// Frame boundary: commits the latest queued candidate of every column.
    ///
    /// Returns the number of columns whose width changed.
    pub fn on_frame(&mut self, now_ms: u64) -> usize {
        let mut committed = 0;
        for (key, pending) in self.frame.flush() {
            if self.commit_width(key.as_str(), pending.width, pending.source, now_ms) {
                committed += 1;
            }
        }
        committed
    }

    /// Timer tick: performs the debounced persistence write once it is due.
    pub fn tick(&mut self, now_ms: u64) {
        if let Some((storage_key, widths)) = self.save.poll(now_ms) {
            self.write(&storage_key, &widths);
        }
    }

    /// Writes a pending save right away instead of waiting for its deadline.
    pub fn flush_persistence(&mut self) {
        if let Some((storage_key, widths)) = self.save.flush() {
            self.write(&storage_key, &widths);
        }
    }

    fn write(&self, storage_key: &str, widths: &WidthMap) {
        if let Some(store) = self.persistence() {
            persist::save_widths(store.as_ref(), storage_key, widths);
        }
    }

    /// Returns every column to its `default_width` (or declared `width`) and forgets all
    /// widths and row heights committed this session. With persistence on, the whole stored
    /// map is removed, including entries for columns that were never touched.
    pub fn reset(&mut self) {
        rdebug!(storage_key = %self.options.storage_key, "TableResize::reset");
        self.frame.cancel();
        self.save.cancel();
        self.session_widths.clear();
        self.persisted.clear();
        self.row_heights.clear();
        for column in &mut self.columns {
            column.width = column.def.reset_width();
        }
        if let Some(store) = self.persistence() {
            persist::clear_widths(store.as_ref(), &self.options.storage_key);
        }
        self.emit(ResizeEvent::Reset);
    }

    /// Sizes `key` to fit its widest mounted cell plus padding, bypassing the dead zone.
    ///
    /// Returns the committed width, or `None` when there was nothing to measure.
    pub fn auto_size(&mut self, key: &str, geometry: &dyn Geometry, now_ms: u64) -> Option<u32> {
        let column = self.column(key)?.def.key.clone();
        let Some(width) = estimate_column_width(&self.index, geometry, &column) else {
            rdebug!(key, "auto-size found no measurable cells");
            return None;
        };
        self.commit_width(key, width, CommitSource::AutoSize, now_ms);
        self.column_width(key)
    }

    /// Registers a mounted body cell so propagation and auto-size can reach it.
    pub fn mount_cell(&mut self, cell: &CellId) {
        self.index.register(cell);
    }

    pub fn unmount_cell(&mut self, cell: &CellId) {
        self.index.unregister(cell);
    }

    /// Handles the settled size of a dragged cell.
    ///
    /// The height is broadcast to every mounted cell of the row and the width to every
    /// mounted cell of the column, right away. The column width is also queued for the next
    /// frame so the declarative descriptors catch up.
    pub fn on_cell_resized(
        &mut self,
        cell: &CellId,
        size: Size,
        surface: &mut dyn Surface,
    ) -> BroadcastReport {
        let policy = self.cell_policy(&cell.column);
        let report = engine::broadcast(&self.index, surface, cell, size, &policy.constraints);
        self.row_heights.insert(cell.row, report.size.height);
        self.submit_cell_width(&cell.column, report.size.width);
        self.emit(ResizeEvent::RowHeight {
            row: cell.row,
            height: report.size.height,
        });
        report
    }

    /// Handles a height change reported by passive observation. Width is never taken from
    /// here: column width belongs to header drags and explicit cell drags.
    pub fn on_cell_height_observed(&mut self, cell: &CellId, height: u32) {
        if self.row_heights.get(&cell.row) == Some(&height) {
            return;
        }
        rtrace!(row = cell.row, height, "observed row height");
        self.row_heights.insert(cell.row, height);
        self.emit(ResizeEvent::RowHeight {
            row: cell.row,
            height,
        });
    }

    pub fn cell_policy(&self, column: &ColumnKey) -> CellPolicy {
        let declared = self
            .column(column.as_str())
            .and_then(|c| c.def.cell_resize.as_ref());
        CellPolicy::resolve(declared, &self.options)
    }

    /// The caller's columns augmented with committed widths and cell props.
    pub fn render_columns(&self) -> Vec<RenderColumn> {
        let count = self.columns.len();
        self.columns
            .iter()
            .enumerate()
            .map(|(i, c)| render::render_column(&c.def, c.width, i, count, &self.options))
            .collect()
    }

    pub fn components(&self) -> TableComponents {
        TableComponents {
            header: HeaderRenderer {
                show_width_tooltip: self.options.show_width_tooltip,
                double_click_auto_size: self.options.enable_double_click_auto_size,
            },
            body: BodyRenderer {
                default_policy: CellPolicy::resolve(None, &self.options),
            },
        }
    }

    /// Class for the table root selecting the handle style preset.
    pub fn table_class(&self) -> &'static str {
        self.options.cell_resize_handle_style.class_name()
    }

    /// Releases everything scheduled: queued frame commits, the pending save and the cell
    /// index. Call when the table unmounts.
    pub fn teardown(&mut self) {
        rdebug!("TableResize::teardown");
        self.frame.cancel();
        self.save.cancel();
        self.index.clear();
    }
}

impl core::fmt::Debug for TableResize {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TableResize")
            .field("options", &self.options)
            .field("columns", &self.columns)
            .field("session_widths", &self.session_widths)
            .field("persisted", &self.persisted)
            .field("has_store", &self.store.is_some())
            .field("save", &self.save)
            .field("frame", &self.frame)
            .field("index", &self.index)
            .field("row_heights", &self.row_heights)
            .finish()
    }
}

fn debug_assert_unique_keys(columns: &[ColumnDef]) {
    if cfg!(debug_assertions) {
        let mut seen = alloc::collections::BTreeSet::new();
        for c in columns {
            debug_assert!(seen.insert(&c.key), "duplicate column key `{}`", c.key);
        }
    }
}
