use table_resize::engine::header_candidate;
use table_resize::{
    Geometry, HeaderCellProps, Point, ResizeSession, SessionTarget, Size, TableResize,
};

use crate::WidthTooltip;

/// Hover text for the header resize handle.
pub const HANDLE_TITLE: &str = "Drag to resize the column, double-click to fit its content";

/// What a click on a header cell turned into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Not on the handle: let the table handle it (sorting, selection).
    PassThrough,
    /// On the handle: swallowed so it never reaches the table's own click handling.
    Consumed,
    /// A double-click on the handle that ran auto-size. `None` means nothing was measured.
    AutoSized(Option<u32>),
}

/// Gesture state for one header cell with a trailing-edge resize handle.
///
/// The adapter never writes widths itself: drag moves are submitted to the controller's
/// frame queue and the drag stop is committed through the controller.
#[derive(Clone, Debug)]
pub struct HeaderCell {
    props: HeaderCellProps,
    session: Option<ResizeSession>,
    tooltip: WidthTooltip,
}

impl HeaderCell {
    pub fn new(props: HeaderCellProps) -> Self {
        let tooltip = WidthTooltip {
            width: props.width.unwrap_or(0),
            ..WidthTooltip::default()
        };
        Self {
            props,
            session: None,
            tooltip,
        }
    }

    pub fn props(&self) -> &HeaderCellProps {
        &self.props
    }

    /// Applies re-rendered props. The tooltip follows the committed width while idle.
    pub fn set_props(&mut self, props: HeaderCellProps) {
        if !self.is_resizing() {
            self.tooltip.width = props.width.unwrap_or(self.tooltip.width);
        }
        self.props = props;
    }

    pub fn has_handle(&self) -> bool {
        self.props.has_handle()
    }

    pub fn is_resizing(&self) -> bool {
        self.session.as_ref().is_some_and(ResizeSession::is_active)
    }

    pub fn tooltip(&self) -> &WidthTooltip {
        &self.tooltip
    }

    pub fn class_name(&self) -> &'static str {
        if self.is_resizing() {
            "resizing-column"
        } else {
            ""
        }
    }

    pub fn handle_class(&self) -> &'static str {
        if self.is_resizing() {
            "resize-handle resizing"
        } else {
            "resize-handle"
        }
    }

    /// Pointer-down on the handle. `measured_width` is the header's rendered width, used
    /// when the column has no width yet.
    ///
    /// Returns `false` when this header has no handle.
    pub fn on_drag_start(&mut self, pointer: Point, measured_width: Option<u32>) -> bool {
        if !self.has_handle() {
            return false;
        }
        let start = self.props.width.or(measured_width).unwrap_or(0);
        self.session = Some(ResizeSession::begin(
            SessionTarget::Header(self.props.column_key.clone()),
            pointer,
            Size::new(start, 0),
        ));
        if self.props.show_width_tooltip {
            self.tooltip.show(start, pointer);
        }
        true
    }

    fn candidate(&self, session: &ResizeSession, pointer: Point) -> u32 {
        header_candidate(
            session.start.width,
            session.delta_x(pointer),
            &self.props.constraints,
        )
    }

    /// Pointer-move during a drag. Submits the candidate as an optimistic preview that the
    /// controller commits on its next frame.
    pub fn on_drag_move(&mut self, pointer: Point, table: &mut TableResize) -> Option<u32> {
        let session = self.session.as_ref().filter(|s| s.is_active())?;
        let width = self.candidate(session, pointer);
        if let Some(session) = self.session.as_mut() {
            session.update(Size::new(width, 0));
        }
        self.tooltip.update(width, pointer);
        table.submit_header_width(&self.props.column_key, width);
        Some(width)
    }

    /// Pointer-up. Commits the final candidate synchronously, hides the tooltip and leaves
    /// the active state. Returns whether the commit changed the width.
    pub fn on_drag_stop(&mut self, pointer: Point, table: &mut TableResize, now_ms: u64) -> bool {
        let Some(mut session) = self.session.take().filter(|s| s.is_active()) else {
            return false;
        };
        let width = self.candidate(&session, pointer);
        session.update(Size::new(width, 0));
        session.end();
        self.tooltip.hide();
        self.tooltip.width = width;
        table.finish_header_drag(&self.props.column_key, width, now_ms)
    }

    /// Single click anywhere on the header cell.
    pub fn on_click(&self, on_handle: bool) -> ClickOutcome {
        if on_handle && self.has_handle() {
            ClickOutcome::Consumed
        } else {
            ClickOutcome::PassThrough
        }
    }

    /// Double click anywhere on the header cell. On the handle it runs auto-size when
    /// enabled, and is consumed either way.
    pub fn on_double_click(
        &mut self,
        on_handle: bool,
        table: &mut TableResize,
        geometry: &dyn Geometry,
        now_ms: u64,
    ) -> ClickOutcome {
        if !on_handle || !self.has_handle() {
            return ClickOutcome::PassThrough;
        }
        if !self.props.double_click_auto_size {
            return ClickOutcome::Consumed;
        }
        let width = table.auto_size(self.props.column_key.as_str(), geometry, now_ms);
        ClickOutcome::AutoSized(width)
    }

    /// Drops an in-flight drag without committing (e.g. the header unmounted mid-drag).
    pub fn teardown(&mut self) {
        self.session = None;
        self.tooltip.hide();
    }
}
