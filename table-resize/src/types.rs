use core::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a column. Must be unique within one table.
///
/// Keys double as the property names of the persisted width map, so they are kept as
/// strings even when the host uses numeric column ids.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnKey(String);

impl ColumnKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for ColumnKey {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ColumnKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for ColumnKey {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl core::borrow::Borrow<str> for ColumnKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Identity of one rendered body cell: its column and its row index.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellId {
    pub column: ColumnKey,
    pub row: usize,
}

impl CellId {
    pub fn new(column: impl Into<ColumnKey>, row: usize) -> Self {
        Self {
            column: column.into(),
            row,
        }
    }
}

/// A rendered size in whole pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Rounds a fractional layout size to whole pixels.
    pub fn from_f32(width: f32, height: f32) -> Self {
        Self {
            width: round_px(width),
            height: round_px(height),
        }
    }
}

/// A pointer position in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An element's bounding box in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Which table edge a column is pinned to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixedSide {
    Left,
    Right,
}

/// Cosmetic preset for resize handles, applied as a class on the table root.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleStyle {
    #[default]
    Default,
    Minimal,
    Classic,
    Modern,
}

impl HandleStyle {
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::Minimal => "table-resize-minimal",
            Self::Classic => "table-resize-classic",
            Self::Modern => "table-resize-modern",
        }
    }
}

/// Rounds a layout value to whole pixels, saturating at zero.
pub fn round_px(value: f32) -> u32 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    value.round().min(u32::MAX as f32) as u32
}
