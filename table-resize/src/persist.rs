//! Loading and saving the persisted column width map.
//!
//! Every failure here degrades to in-memory operation: the functions log and return, they
//! never propagate storage errors to the controller's caller.

use alloc::collections::BTreeMap;

use crate::{StorageError, WidthStore};

/// Column key → committed pixel width, as stored under one storage key.
pub type WidthMap = BTreeMap<String, u32>;

/// Delay between the last commit and the write that persists it.
pub const SAVE_DEBOUNCE_MS: u64 = 500;

/// Reads the width map stored under `storage_key`.
///
/// A missing entry, an unreachable store and malformed JSON all yield an empty map.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub fn load_widths(store: &dyn WidthStore, storage_key: &str) -> WidthMap {
    match try_load_widths(store, storage_key) {
        Ok(map) => map,
        Err(err) => {
            rwarn!(storage_key, error = %err, "failed to load column widths");
            WidthMap::new()
        }
    }
}

/// Like [`load_widths`], but reports why nothing could be loaded.
pub fn try_load_widths(
    store: &dyn WidthStore,
    storage_key: &str,
) -> Result<WidthMap, StorageError> {
    let Some(raw) = store.get(storage_key)? else {
        rdebug!(storage_key, "no persisted column widths");
        return Ok(WidthMap::new());
    };
    let parsed: BTreeMap<String, f64> = serde_json::from_str(&raw)?;
    let mut out = WidthMap::new();
    for (key, width) in parsed {
        // Zero, negative and non-finite widths count as "not persisted".
        if width.is_finite() && width >= 0.5 {
            out.insert(key, width.round().min(u32::MAX as f64) as u32);
        }
    }
    Ok(out)
}

/// Writes `widths` under `storage_key`. Failures are logged and dropped.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub fn save_widths(store: &dyn WidthStore, storage_key: &str, widths: &WidthMap) {
    let result = serde_json::to_string(widths)
        .map_err(StorageError::from)
        .and_then(|raw| store.set(storage_key, &raw));
    match result {
        Ok(()) => {
            rtrace!(storage_key, entries = widths.len(), "saved column widths");
        }
        Err(err) => {
            rwarn!(storage_key, error = %err, "failed to save column widths");
        }
    }
}

/// Removes the whole width map stored under `storage_key`.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub fn clear_widths(store: &dyn WidthStore, storage_key: &str) {
    if let Err(err) = store.remove(storage_key) {
        rwarn!(storage_key, error = %err, "failed to clear column widths");
    }
}
