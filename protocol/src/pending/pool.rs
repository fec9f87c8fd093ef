//! In-memory registry of pending entries.
//!
//! Holds every proposal the wallet currently knows about, keyed by the
//! entry hash. Entries stay here until the confirmation workflow resolves
//! them; a failed submission leaves the entry in place so the user can try
//! again.
//!
//! `DashMap` keeps lookups lock-free for the UI's list and detail reads.
//! Arrival order is kept with a monotonic sequence number.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::entry::PendingEntry;

#[derive(Debug, Clone)]
struct Pooled {
    entry: PendingEntry,
    seq: u64,
}

/// Registry of pending entries awaiting resolution.
#[derive(Debug, Default)]
pub struct PendingPool {
    entries: DashMap<String, Pooled>,
    next_seq: AtomicU64,
}

impl PendingPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `entry`. Returns `false` and keeps the existing entry if
    /// its hash is already present.
    pub fn insert(&self, entry: PendingEntry) -> bool {
        match self.entries.entry(entry.hash().to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                slot.insert(Pooled { entry, seq });
                true
            }
        }
    }

    pub fn get(&self, hash: &str) -> Option<PendingEntry> {
        self.entries.get(hash).map(|pooled| pooled.entry.clone())
    }

    /// Drops the entry with `hash`, returning it if it was present.
    pub fn remove(&self, hash: &str) -> Option<PendingEntry> {
        self.entries.remove(hash).map(|(_, pooled)| pooled.entry)
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.entries.contains_key(hash)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every pooled entry, oldest first.
    pub fn list(&self) -> Vec<PendingEntry> {
        let mut all: Vec<Pooled> = self
            .entries
            .iter()
            .map(|pooled| pooled.value().clone())
            .collect();
        all.sort_by_key(|pooled| pooled.seq);
        all.into_iter().map(|pooled| pooled.entry).collect()
    }
}
