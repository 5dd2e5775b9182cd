use table_resize::engine::{
    BroadcastReport, CELL_CORNER_PX, CELL_HEIGHT_EPSILON, CELL_OBSERVE_DEBOUNCE_MS, CELL_SETTLE_MS,
};
use table_resize::scheduler::Debounce;
use table_resize::{
    BodyCellProps, Bounds, CellId, Point, ResizeSession, SessionTarget, Size, Surface, TableResize,
};

/// Hover text for the resizable cell region.
pub const CELL_TITLE: &str = "Drag the bottom-right corner to resize the cell";

/// Inline size limits for the inner resizable region of a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct ContentStyle {
    pub min_width: u32,
    pub max_width: Option<u32>,
    pub min_height: u32,
    pub max_height: Option<u32>,
    pub height: Option<u32>,
}

/// What a [`BodyCell::tick`] did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellTick {
    /// The settle delay after a drag elapsed and the cell's size was broadcast.
    pub settled: Option<BroadcastReport>,
    /// A passive height change was reported to the controller.
    pub reported_height: Option<u32>,
}

/// Gesture state for one body cell.
///
/// Each cell owns its drag flag and both of its deadlines; nothing is shared between cells.
/// Two tracks run side by side:
/// - the active track: a corner drag, then a settle delay, then a broadcast of the settled
///   size to the row and column;
/// - the passive track: debounced size observations, dropped while a drag is active, of
///   which only height changes are reported.
#[derive(Clone, Debug)]
pub struct BodyCell {
    props: BodyCellProps,
    id: CellId,
    session: Option<ResizeSession>,
    settle: Debounce<()>,
    observe: Debounce<Size>,
    last_size: Size,
}

impl BodyCell {
    /// Creates the cell and registers it with the controller. Cells with resizing disabled
    /// register too, so height broadcasts from other cells in the row still reach them.
    pub fn mount(props: BodyCellProps, table: &mut TableResize) -> Self {
        let id = props.cell_id();
        table.mount_cell(&id);
        Self {
            props,
            id,
            session: None,
            settle: Debounce::new(CELL_SETTLE_MS),
            observe: Debounce::new(CELL_OBSERVE_DEBOUNCE_MS),
            last_size: Size::default(),
        }
    }

    pub fn id(&self) -> &CellId {
        &self.id
    }

    pub fn props(&self) -> &BodyCellProps {
        &self.props
    }

    /// Picks up the row height the controller committed since the last render.
    pub fn set_row_height(&mut self, row_height: Option<u32>) {
        self.props.row_height = row_height;
    }

    pub fn is_enabled(&self) -> bool {
        self.props.policy.enabled
    }

    pub fn is_resizing(&self) -> bool {
        self.session.as_ref().is_some_and(ResizeSession::is_active)
    }

    pub fn class_name(&self) -> &'static str {
        if self.is_enabled() {
            "resizable-cell"
        } else {
            ""
        }
    }

    /// Size limits for the inner resizable region, or `None` for a plain cell.
    pub fn content_style(&self) -> Option<ContentStyle> {
        if !self.is_enabled() {
            return None;
        }
        let c = self.props.policy.constraints;
        Some(ContentStyle {
            min_width: c.min_width,
            max_width: c.max_width,
            min_height: c.min_height,
            max_height: c.max_height,
            height: self.props.row_height.or(self.props.policy.default_height),
        })
    }

    /// The earliest pending deadline, so the host can schedule its next tick.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        match (self.settle.deadline_ms(), self.observe.deadline_ms()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Pointer-down inside the cell. Starts a drag when it lands in the bottom-right corner.
    pub fn on_pointer_down(&mut self, pointer: Point, bounds: Bounds) -> bool {
        if !self.is_enabled() {
            return false;
        }
        let in_corner = pointer.x >= bounds.right() - CELL_CORNER_PX
            && pointer.y >= bounds.bottom() - CELL_CORNER_PX;
        if !in_corner {
            return false;
        }
        self.session = Some(ResizeSession::begin(
            SessionTarget::Cell(self.id.clone()),
            pointer,
            Size::from_f32(bounds.width, bounds.height),
        ));
        true
    }

    /// Pointer-up anywhere in the document. Ends an active drag and arms the settle delay.
    pub fn on_pointer_up(&mut self, now_ms: u64) {
        let Some(session) = self.session.as_mut().filter(|s| s.is_active()) else {
            return;
        };
        session.end();
        self.session = None;
        self.settle.submit((), now_ms);
    }

    /// A size observation for the cell's resizable region.
    pub fn on_observed_resize(&mut self, size: Size, now_ms: u64) {
        if !self.is_enabled() {
            return;
        }
        self.observe.submit(size, now_ms);
    }

    /// Runs whatever deadlines are due.
    pub fn tick(
        &mut self,
        now_ms: u64,
        table: &mut TableResize,
        surface: &mut dyn Surface,
    ) -> CellTick {
        let mut out = CellTick::default();

        if self.settle.poll(now_ms).is_some() {
            match surface.measure(&self.id) {
                Some(size) => {
                    let report = table.on_cell_resized(&self.id, size, surface);
                    self.last_size = report.size;
                    out.settled = Some(report);
                }
                None => {
                    adebug!(
                        column = %self.id.column,
                        row = self.id.row,
                        "settled cell is no longer rendered"
                    );
                }
            }
        }

        if let Some(size) = self.observe.poll(now_ms) {
            // The flag is read now, when the debounce fires, not when it was armed.
            if !self.is_resizing()
                && size.height.abs_diff(self.last_size.height) > CELL_HEIGHT_EPSILON
            {
                self.last_size = size;
                table.on_cell_height_observed(&self.id, size.height);
                out.reported_height = Some(size.height);
            }
        }

        out
    }

    /// Cancels both deadlines, drops an in-flight drag and unregisters the cell.
    pub fn teardown(&mut self, table: &mut TableResize) {
        self.session = None;
        self.settle.cancel();
        self.observe.cancel();
        table.unmount_cell(&self.id);
    }
}
