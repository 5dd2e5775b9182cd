use serde::{Deserialize, Serialize};

use crate::{CellResize, ColumnKey, Constraints, FixedSide, Resizable, ResizeOptions};

/// A column as declared by the caller.
///
/// `key` must be unique among the columns handed to one [`crate::TableResize`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDef {
    pub key: ColumnKey,
    #[serde(default)]
    pub title: String,
    /// Width the column falls back to, and returns to on reset.
    #[serde(default)]
    pub default_width: Option<u32>,
    /// Explicit width declared by the caller.
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub resizable: Resizable,
    #[serde(default)]
    pub cell_resize: Option<CellResize>,
    #[serde(default)]
    pub fixed: Option<FixedSide>,
}

impl ColumnDef {
    pub fn new(key: impl Into<ColumnKey>) -> Self {
        Self {
            key: key.into(),
            title: String::new(),
            default_width: None,
            width: None,
            resizable: Resizable::default(),
            cell_resize: None,
            fixed: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_default_width(mut self, width: u32) -> Self {
        self.default_width = Some(width);
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_resizable(mut self, resizable: Resizable) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn with_cell_resize(mut self, cell_resize: CellResize) -> Self {
        self.cell_resize = Some(cell_resize);
        self
    }

    pub fn with_fixed(mut self, fixed: FixedSide) -> Self {
        self.fixed = Some(fixed);
        self
    }

    /// The width this column has before anything is committed or loaded.
    pub fn declared_width(&self) -> Option<u32> {
        self.width.or(self.default_width)
    }

    /// The width a reset returns this column to.
    pub fn reset_width(&self) -> Option<u32> {
        self.default_width.or(self.width)
    }

    pub fn header_resizable(&self, options: &ResizeOptions) -> bool {
        if !options.enabled {
            return false;
        }
        match self.resizable {
            Resizable::Enabled(enabled) => enabled,
            Resizable::Custom(overrides) => overrides.enabled.unwrap_or(true),
        }
    }

    pub fn header_constraints(&self, options: &ResizeOptions) -> Constraints {
        let mut c = options.width_constraints();
        if let Resizable::Custom(overrides) = self.resizable {
            c.min_width = overrides.min_width.unwrap_or(c.min_width);
            c.max_width = overrides.max_width.or(c.max_width);
        }
        c
    }

    pub fn threshold(&self, options: &ResizeOptions) -> u32 {
        match self.resizable {
            Resizable::Custom(overrides) => overrides.threshold.unwrap_or(options.threshold),
            Resizable::Enabled(_) => options.threshold,
        }
    }
}

/// A column as held by the controller: the caller's declaration plus the committed width.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub def: ColumnDef,
    pub width: Option<u32>,
}

impl Column {
    pub fn key(&self) -> &ColumnKey {
        &self.def.key
    }
}
