//! Bounded LRU memo of previous resolutions.
//!
//! Every lookup touches recency, so even reads need exclusive access; the
//! cache sits behind a mutex. Under contention the eviction order is only
//! approximately LRU, but the capacity bound always holds.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Default number of remembered resolutions.
pub const DEFAULT_MEMO_CAPACITY: usize = 512;

/// What the memo remembers for one normalized input.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoEntry {
    pub id: String,
    pub confidence: f64,
    /// Whether the resolution came from the exact-match index
    pub exact: bool,
}

/// Thread-safe LRU map from normalized input to a resolved language id.
#[derive(Debug)]
pub struct ResolutionMemo {
    cache: Mutex<LruCache<String, MemoEntry>>,
}

impl ResolutionMemo {
    /// Create a memo holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    // Poisoning is ignored: no LruCache call panics halfway through an update.
    fn lock(&self) -> MutexGuard<'_, LruCache<String, MemoEntry>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up `key`, marking it as most recently used.
    pub fn get(&self, key: &str) -> Option<MemoEntry> {
        self.lock().get(key).cloned()
    }

    /// Remember `entry` for `key`, evicting the least recently used entry if full.
    pub fn put(&self, key: impl Into<String>, entry: MemoEntry) {
        self.lock().put(key.into(), entry);
    }

    /// Whether `key` is present, without touching recency.
    pub fn contains(&self, key: &str) -> bool {
        self.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().cap().get()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Default for ResolutionMemo {
    fn default() -> Self {
        Self::new(DEFAULT_MEMO_CAPACITY)
    }
}
