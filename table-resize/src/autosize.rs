use crate::{ColumnKey, Geometry, MembershipIndex};

/// Padding added to the widest measured cell.
pub const AUTO_SIZE_PADDING: u32 = 32;

/// Computes a width that fits the widest mounted cell of `column`.
///
/// Returns `None` when no mounted cell of the column can be measured (scrolled out, not
/// rendered yet, unknown key). That is "nothing to commit", not an error.
pub fn estimate_column_width(
    index: &MembershipIndex,
    geometry: &dyn Geometry,
    column: &ColumnKey,
) -> Option<u32> {
    let widest = index
        .column_cells(column)
        .iter()
        .filter_map(|cell| geometry.content_width(cell))
        .max()?;
    Some(widest.saturating_add(AUTO_SIZE_PADDING))
}
