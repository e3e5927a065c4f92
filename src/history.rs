//! Bounded FIFO history stores.
//!
//! The shell keeps two of these: one for raw command lines and one for the
//! pids of children it has waited on. Both share the same eviction policy,
//! so the store is generic over the entry type.

use std::collections::VecDeque;

/// An append-only store holding at most `capacity` entries.
///
/// Appending to a full store evicts the oldest entry first, so indices
/// renumber from 0 after every eviction. Callers must resolve indices
/// against the current state rather than cache them across appends.
#[derive(Debug)]
pub struct BoundedHistory<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedHistory<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an entry, evicting the oldest one when the store is full.
    pub fn push(&mut self, entry: T) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Entry at `index` in insertion order, oldest first.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index)
    }

    /// All entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
