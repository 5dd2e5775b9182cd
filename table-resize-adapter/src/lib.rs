//! Gesture adapters for the `table-resize` crate.
//!
//! The `table-resize` crate is UI-agnostic and owns the resize state. This crate provides the
//! framework-neutral pieces a table adapter wires to pointer and observer events:
//!
//! - Header cells with a trailing-edge drag handle and double-click auto-size
//! - A live width tooltip for header drags
//! - Body cells with a corner drag, a settle delay and debounced passive observation
//! - A [`Driver`] that owns all of the above for one table
//!
//! This crate is intentionally framework-agnostic (no DOM/egui/ratatui bindings).
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod cell;
mod controller;
mod header;
mod tooltip;

#[cfg(test)]
mod tests;

pub use cell::{BodyCell, CELL_TITLE, CellTick, ContentStyle};
pub use controller::{Driver, FrameReport};
pub use header::{ClickOutcome, HANDLE_TITLE, HeaderCell};
pub use tooltip::WidthTooltip;
