// src/dedup.rs

use crate::model::HistoryEntry;
use std::collections::HashSet;

/// Remembers every record text emitted during a run.
///
/// The memory is not a sliding window: a record that comes back after a
/// different one was emitted is still a repeat and gets dropped.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `entry` should be emitted, recording its text as seen.
    pub fn admit(&mut self, entry: &HistoryEntry) -> bool {
        if self.seen.contains(&entry.record) {
            return false;
        }
        self.seen.insert(entry.record.clone());
        true
    }
}

/// Iterator adapter dropping repeated records; errors pass straight through.
pub struct Dedup<I> {
    inner: I,
    state: Deduplicator,
}

pub fn dedup<I, E>(inner: I) -> Dedup<I>
where
    I: Iterator<Item = Result<HistoryEntry, E>>,
{
    Dedup { inner, state: Deduplicator::new() }
}

impl<I, E> Iterator for Dedup<I>
where
    I: Iterator<Item = Result<HistoryEntry, E>>,
{
    type Item = Result<HistoryEntry, E>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(entry) if !self.state.admit(&entry) => {
                    tracing::debug!("Dropping unchanged record at {}", entry.revision);
                }
                item => return Some(item),
            }
        }
    }
}
