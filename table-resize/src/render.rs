//! Render-ready descriptors handed to the host table.
//!
//! Descriptors are recomputed from the controller's columns and options on every call and
//! are never updated in place.

use serde::Serialize;

use crate::{
    CellId, CellPolicy, CellResize, ColumnDef, ColumnKey, Constraints, FixedSide, ResizeOptions,
};

/// Props for one header cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HeaderCellProps {
    pub column_key: ColumnKey,
    pub width: Option<u32>,
    /// No resize handle is rendered: nothing sits to the right of this column.
    pub is_last: bool,
    pub resizable: bool,
    pub constraints: Constraints,
    pub show_width_tooltip: bool,
    pub double_click_auto_size: bool,
}

impl HeaderCellProps {
    pub fn has_handle(&self) -> bool {
        self.resizable && !self.is_last
    }
}

/// Props for one body cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BodyCellProps {
    pub column_key: ColumnKey,
    pub column_index: usize,
    pub row_index: usize,
    pub policy: CellPolicy,
    /// Height last committed for this row, if any.
    pub row_height: Option<u32>,
}

impl BodyCellProps {
    pub fn cell_id(&self) -> CellId {
        CellId {
            column: self.column_key.clone(),
            row: self.row_index,
        }
    }
}

/// A caller column augmented with its committed width and cell props.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderColumn {
    pub def: ColumnDef,
    pub width: Option<u32>,
    pub column_index: usize,
    pub header: HeaderCellProps,
    pub cell_policy: CellPolicy,
}

impl RenderColumn {
    pub fn key(&self) -> &ColumnKey {
        &self.def.key
    }

    /// Body cell props for `row_index`. `row_height` comes from
    /// [`crate::TableResize::row_height`].
    pub fn body_cell(&self, row_index: usize, row_height: Option<u32>) -> BodyCellProps {
        BodyCellProps {
            column_key: self.def.key.clone(),
            column_index: self.column_index,
            row_index,
            policy: self.cell_policy,
            row_height,
        }
    }
}

/// Header cell renderer settings shared by every column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HeaderRenderer {
    pub show_width_tooltip: bool,
    pub double_click_auto_size: bool,
}

/// Body cell renderer settings shared by every column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BodyRenderer {
    /// Policy for cells whose column declares no `cell_resize`.
    pub default_policy: CellPolicy,
}

impl BodyRenderer {
    /// Props for a cell the host renders outside the declared columns (selection boxes,
    /// expanders). It still tags itself so row propagation reaches it.
    pub fn props_for(
        &self,
        column_key: ColumnKey,
        column_index: usize,
        row_index: usize,
        declared: Option<&CellResize>,
        options: &ResizeOptions,
    ) -> BodyCellProps {
        let policy = match declared {
            Some(_) => CellPolicy::resolve(declared, options),
            None => self.default_policy,
        };
        BodyCellProps {
            column_key,
            column_index,
            row_index,
            policy,
            row_height: None,
        }
    }
}

/// The custom header and body cell renderers to install on the host table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TableComponents {
    pub header: HeaderRenderer,
    pub body: BodyRenderer,
}

pub(crate) fn render_column(
    def: &ColumnDef,
    width: Option<u32>,
    column_index: usize,
    column_count: usize,
    options: &ResizeOptions,
) -> RenderColumn {
    let is_last = column_index + 1 == column_count || def.fixed == Some(FixedSide::Right);
    RenderColumn {
        def: def.clone(),
        width,
        column_index,
        header: HeaderCellProps {
            column_key: def.key.clone(),
            width,
            is_last,
            resizable: def.header_resizable(options),
            constraints: def.header_constraints(options),
            show_width_tooltip: options.show_width_tooltip,
            double_click_auto_size: options.enable_double_click_auto_size,
        },
        cell_policy: CellPolicy::resolve(def.cell_resize.as_ref(), options),
    }
}
