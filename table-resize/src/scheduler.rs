//! Clock-driven scheduling primitives.
//!
//! Nothing here owns a timer. Adapters pass the current time (`now_ms`) in and poll for due
//! work, so the same code runs against a real frame loop or a virtual clock in tests.

use alloc::collections::{BTreeMap, btree_map};

/// Holds the latest submitted value until `delay_ms` passes without a newer submission.
#[derive(Clone, Debug)]
pub struct Debounce<T> {
    delay_ms: u64,
    pending: Option<(T, u64)>,
}

impl<T> Debounce<T> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Replaces any pending value and re-arms the deadline at `now_ms + delay_ms`.
    pub fn submit(&mut self, value: T, now_ms: u64) {
        self.pending = Some((value, now_ms.saturating_add(self.delay_ms)));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref().map(|(value, _)| value)
    }

    /// Swaps the pending value without moving its deadline. Does nothing when idle.
    pub fn replace_pending(&mut self, value: T) -> bool {
        match &mut self.pending {
            Some((pending, _)) => {
                *pending = value;
                true
            }
            None => false,
        }
    }

    /// Takes the pending value once its deadline has passed.
    pub fn poll(&mut self, now_ms: u64) -> Option<T> {
        match self.pending {
            Some((_, due)) if now_ms >= due => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Takes the pending value regardless of its deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Coalesces submissions until the next frame boundary: per key, the latest value wins.
#[derive(Clone, Debug)]
pub struct FrameQueue<K, T> {
    pending: BTreeMap<K, T>,
}

impl<K: Ord, T> Default for FrameQueue<K, T> {
    fn default() -> Self {
        Self {
            pending: BTreeMap::new(),
        }
    }
}

impl<K: Ord, T> FrameQueue<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `value` for `key`, dropping any value queued earlier in this frame.
    pub fn submit(&mut self, key: K, value: T) {
        self.pending.insert(key, value);
    }

    /// Removes and returns whatever is queued for `key`.
    pub fn take(&mut self, key: &K) -> Option<T> {
        self.pending.remove(key)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Drains everything queued this frame, in key order.
    pub fn flush(&mut self) -> btree_map::IntoIter<K, T> {
        core::mem::take(&mut self.pending).into_iter()
    }

    pub fn cancel(&mut self) {
        self.pending.clear();
    }
}
