//! A headless column-width and cell-size resize engine for table components.
//!
//! For pointer-gesture adapters (header handles, resizable cells, width tooltip), see the
//! `table-resize-adapter` crate.
//!
//! This crate owns the resize state of one table: committed column widths, the dead-zone
//! policy for header drags, debounced width persistence, auto-sizing and the row/column
//! broadcast that keeps sibling cells in sync after a cell drag.
//!
//! It is UI-agnostic. A TUI/GUI/DOM layer is expected to provide:
//! - the caller's column list and options
//! - a key-value store for persisted widths (optional)
//! - rendered cell geometry, and a way to apply cell sizes
//! - the current time in milliseconds, a frame callback and a timer tick
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
mod macros;

mod autosize;
mod column;
mod controller;
pub mod engine;
mod error;
mod geometry;
mod index;
mod options;
pub mod persist;
mod render;
pub mod scheduler;
mod session;
mod storage;
mod types;


pub use autosize::{AUTO_SIZE_PADDING, estimate_column_width};
pub use column::{Column, ColumnDef};
pub use controller::{CommitSource, ResizeEvent, SharedStore, TableResize};
pub use error::StorageError;
pub use geometry::{CellBox, Geometry, MemorySurface, Surface};
pub use index::MembershipIndex;
pub use options::{
    CellPolicy, CellResize, CellResizeConfig, Constraints, DEFAULT_MIN_HEIGHT, DEFAULT_MIN_WIDTH,
    DEFAULT_STORAGE_KEY, DEFAULT_THRESHOLD, OnChangeCallback, Resizable, ResizeOptions,
    ResizeOverrides,
};
pub use persist::WidthMap;
pub use render::{
    BodyCellProps, BodyRenderer, HeaderCellProps, HeaderRenderer, RenderColumn, TableComponents,
};
pub use session::{ResizeSession, SessionTarget};
pub use storage::{MemoryStore, WidthStore};
pub use types::{Bounds, CellId, ColumnKey, FixedSide, HandleStyle, Point, Size, round_px};
