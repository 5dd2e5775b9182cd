use alloc::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{HandleStyle, ResizeEvent};

pub const DEFAULT_MIN_WIDTH: u32 = 80;
pub const DEFAULT_MIN_HEIGHT: u32 = 40;
pub const DEFAULT_THRESHOLD: u32 = 2;
pub const DEFAULT_STORAGE_KEY: &str = "table-resize-config";

/// A callback fired after an effective commit, reset or upward height report.
pub type OnChangeCallback = Arc<dyn Fn(&ResizeEvent) + Send + Sync>;

/// Configuration for [`crate::TableResize`].
///
/// Constraint fields act as the default floor/ceiling for every column and cell that does
/// not declare its own override.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResizeOptions {
    pub min_width: u32,
    pub max_width: Option<u32>,
    pub min_height: u32,
    pub max_height: Option<u32>,
    /// Minimum pixel delta before a header drag candidate is committed.
    pub threshold: u32,
    /// Global switch for header resizing.
    pub enabled: bool,
    /// Cell resize policy for columns that do not declare `cell_resize`.
    pub enable_cell_content_resize: bool,
    pub cell_resize_handle_style: HandleStyle,
    pub persist_column_width: bool,
    pub storage_key: String,
    pub show_width_tooltip: bool,
    pub enable_double_click_auto_size: bool,

    /// Optional callback fired after the controller's state changes.
    #[serde(skip)]
    pub on_change: Option<OnChangeCallback>,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_WIDTH,
            max_width: None,
            min_height: DEFAULT_MIN_HEIGHT,
            max_height: None,
            threshold: DEFAULT_THRESHOLD,
            enabled: true,
            enable_cell_content_resize: false,
            cell_resize_handle_style: HandleStyle::Default,
            persist_column_width: false,
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            show_width_tooltip: true,
            enable_double_click_auto_size: true,
            on_change: None,
        }
    }
}

impl ResizeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width_bounds(mut self, min_width: u32, max_width: Option<u32>) -> Self {
        self.min_width = min_width;
        self.max_width = max_width;
        self
    }

    pub fn with_height_bounds(mut self, min_height: u32, max_height: Option<u32>) -> Self {
        self.min_height = min_height;
        self.max_height = max_height;
        self
    }

    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_cell_content_resize(mut self, enabled: bool) -> Self {
        self.enable_cell_content_resize = enabled;
        self
    }

    pub fn with_handle_style(mut self, style: HandleStyle) -> Self {
        self.cell_resize_handle_style = style;
        self
    }

    /// Enables width persistence under `storage_key`.
    pub fn with_persistence(mut self, storage_key: impl Into<String>) -> Self {
        self.persist_column_width = true;
        self.storage_key = storage_key.into();
        self
    }

    pub fn with_width_tooltip(mut self, show: bool) -> Self {
        self.show_width_tooltip = show;
        self
    }

    pub fn with_double_click_auto_size(mut self, enabled: bool) -> Self {
        self.enable_double_click_auto_size = enabled;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&ResizeEvent) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn width_constraints(&self) -> Constraints {
        Constraints {
            min_width: self.min_width,
            max_width: self.max_width,
            min_height: self.min_height,
            max_height: self.max_height,
        }
    }
}

impl core::fmt::Debug for ResizeOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResizeOptions")
            .field("min_width", &self.min_width)
            .field("max_width", &self.max_width)
            .field("min_height", &self.min_height)
            .field("max_height", &self.max_height)
            .field("threshold", &self.threshold)
            .field("enabled", &self.enabled)
            .field(
                "enable_cell_content_resize",
                &self.enable_cell_content_resize,
            )
            .field("cell_resize_handle_style", &self.cell_resize_handle_style)
            .field("persist_column_width", &self.persist_column_width)
            .field("storage_key", &self.storage_key)
            .field("show_width_tooltip", &self.show_width_tooltip)
            .field(
                "enable_double_click_auto_size",
                &self.enable_double_click_auto_size,
            )
            .finish_non_exhaustive()
    }
}

/// Per-column header resize overrides.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResizeOverrides {
    pub enabled: Option<bool>,
    pub min_width: Option<u32>,
    pub max_width: Option<u32>,
    pub threshold: Option<u32>,
}

/// Whether a column's header can be dragged, optionally with its own limits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Resizable {
    Enabled(bool),
    Custom(ResizeOverrides),
}

impl Default for Resizable {
    fn default() -> Self {
        Self::Enabled(true)
    }
}

/// Per-column cell content resize settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CellResizeConfig {
    pub enabled: Option<bool>,
    pub min_width: Option<u32>,
    pub max_width: Option<u32>,
    pub min_height: Option<u32>,
    pub max_height: Option<u32>,
    pub default_height: Option<u32>,
}

impl CellResizeConfig {
    pub fn enabled() -> Self {
        Self {
            enabled: Some(true),
            ..Self::default()
        }
    }

    pub fn with_height(mut self, default_height: u32, min: u32, max: Option<u32>) -> Self {
        self.default_height = Some(default_height);
        self.min_height = Some(min);
        self.max_height = max;
        self
    }

    pub fn with_max_width(mut self, max_width: u32) -> Self {
        self.max_width = Some(max_width);
        self
    }
}

/// A column's cell resize declaration: a plain switch or a full config.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellResize {
    Enabled(bool),
    Custom(CellResizeConfig),
}

/// Min/max bounds for one resizable target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraints {
    pub min_width: u32,
    pub max_width: Option<u32>,
    pub min_height: u32,
    pub max_height: Option<u32>,
}

impl Constraints {
    pub fn clamp_width(&self, width: u32) -> u32 {
        clamp(width, self.min_width, self.max_width)
    }

    pub fn clamp_height(&self, height: u32) -> u32 {
        clamp(height, self.min_height, self.max_height)
    }
}

fn clamp(value: u32, min: u32, max: Option<u32>) -> u32 {
    let value = value.max(min);
    match max {
        // A ceiling below the floor loses: the floor wins.
        Some(max) if max >= min => value.min(max),
        _ => value,
    }
}

/// Cell resize settings after merging a column's declaration with the global defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellPolicy {
    pub enabled: bool,
    pub constraints: Constraints,
    pub default_height: Option<u32>,
}

impl CellPolicy {
    pub fn resolve(declared: Option<&CellResize>, options: &ResizeOptions) -> Self {
        let mut policy = Self {
            enabled: options.enable_cell_content_resize,
            constraints: options.width_constraints(),
            default_height: None,
        };
        match declared {
            None => {}
            Some(CellResize::Enabled(enabled)) => policy.enabled = *enabled,
            Some(CellResize::Custom(cfg)) => {
                policy.enabled = cfg.enabled.unwrap_or(options.enable_cell_content_resize);
                let c = &mut policy.constraints;
                c.min_width = cfg.min_width.unwrap_or(options.min_width);
                c.max_width = cfg.max_width.or(options.max_width);
                c.min_height = cfg.min_height.unwrap_or(options.min_height);
                c.max_height = cfg.max_height.or(options.max_height);
                policy.default_height = cfg.default_height;
            }
        }
        policy
    }
}
