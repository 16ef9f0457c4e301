// src/pipeline.rs

use crate::dedup::dedup;
use crate::error::{Error, Result};
use crate::model::{HistoryEntry, ObjectId, Query};
use crate::parser::parse_snapshot;
use crate::walker::{HistoryWalker, Snapshots};

/// Yields the target object's record from each snapshot that has one.
/// Fused after the first error.
pub struct Extraction<'repo> {
    snapshots: Snapshots<'repo>,
    object_id: ObjectId,
    failed: bool,
}

pub fn extract<'repo>(
    walker: &'repo HistoryWalker,
    query: &Query,
    progress: bool,
) -> Result<Extraction<'repo>> {
    let snapshots = walker.walk(&query.branch, &query.path, query.bounds, progress)?;
    Ok(Extraction {
        snapshots,
        object_id: query.object_id.clone(),
        failed: false,
    })
}

impl Extraction<'_> {
    fn next_entry(&mut self) -> Result<Option<HistoryEntry>> {
        while let Some(snapshot) = self.snapshots.next().transpose()? {
            let revision = snapshot.revision.to_string();
            let mut records = parse_snapshot(&snapshot.content)
                .map_err(|source| Error::Parse { revision: revision.clone(), source })?;

            // Absence is the common case: this revision did not carry the object
            match records.remove(&self.object_id) {
                Some(record) => {
                    return Ok(Some(HistoryEntry {
                        timestamp: snapshot.timestamp,
                        revision,
                        record,
                    }))
                }
                None => tracing::debug!("{} not in snapshot {}", self.object_id, revision),
            }
        }
        Ok(None)
    }
}

impl Iterator for Extraction<'_> {
    type Item = Result<HistoryEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let item = self.next_entry().transpose();
        if matches!(item, Some(Err(_))) {
            self.failed = true;
        }
        item
    }
}

/// Runs the whole extraction and returns the distinct records, oldest first.
/// Any error aborts the run; nothing collected so far is returned.
pub fn collect_history(
    walker: &HistoryWalker,
    query: &Query,
    progress: bool,
) -> Result<Vec<HistoryEntry>> {
    if query.bounds.is_empty() {
        tracing::warn!("Start bound is after end bound, nothing to extract");
        return Ok(Vec::new());
    }

    let entries = dedup(extract(walker, query, progress)?).collect::<Result<Vec<_>>>()?;

    tracing::info!(
        "Collected {} distinct records for object {}",
        entries.len(),
        query.object_id
    );
    Ok(entries)
}
