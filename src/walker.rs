// src/walker.rs

use crate::error::{Error, Result};
use crate::model::{Snapshot, TimeBounds};
use chrono::{DateTime, FixedOffset, TimeZone};
use git2::{Commit, ErrorCode, Oid, Repository, Tree};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Read-only access to the commit history holding the tracked file
pub struct HistoryWalker {
    repo: Repository,
}

impl HistoryWalker {
    /// Discover and open the repository containing `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path.as_ref())?;
        tracing::info!("Opened git repository at: {}", repo.path().display());
        Ok(Self { repo })
    }

    /// Lists every snapshot of `path` on `branch`, oldest first.
    ///
    /// The commit list is enumerated eagerly (to order it and size the progress
    /// bar); file contents are read lazily, one revision per `next()`.
    pub fn walk(
        &self,
        branch: &str,
        path: &Path,
        bounds: TimeBounds,
        progress: bool,
    ) -> Result<Snapshots<'_>> {
        let mut revisions = self.revisions_touching(branch, path)?;
        revisions.reverse(); // Oldest first

        tracing::info!(
            "Found {} revisions of {} on {}",
            revisions.len(),
            path.display(),
            branch
        );

        let bar = if progress {
            let bar = ProgressBar::new(revisions.len() as u64);
            if let Ok(style) =
                ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len} ({percent}%)")
            {
                bar.set_style(style.progress_chars("=> "));
            }
            bar.set_message("Scanning revisions");
            bar
        } else {
            ProgressBar::hidden()
        };

        Ok(Snapshots {
            repo: &self.repo,
            path: path.to_path_buf(),
            bounds,
            revisions: revisions.into_iter(),
            bar,
            done: false,
        })
    }

    /// Commits on `branch` that changed `path`, newest first.
    ///
    /// Follows `git log <branch> -- <path>` history simplification: a merge
    /// whose blob at `path` matches one of its parents is not listed, and only
    /// that parent is followed, so side-branch edits the merge discarded never
    /// show up.
    fn revisions_touching(&self, branch: &str, path: &Path) -> Result<Vec<Oid>> {
        let tip = self
            .repo
            .revparse_single(branch)
            .and_then(|object| object.peel_to_commit())
            .map_err(|e| match e.code() {
                ErrorCode::NotFound | ErrorCode::InvalidSpec | ErrorCode::Peel => {
                    Error::BranchNotFound(branch.to_string())
                }
                _ => Error::Git(e),
            })?;

        let mut visited = HashSet::new();
        let mut pending = vec![tip.id()];
        let mut revisions = Vec::new();

        while let Some(oid) = pending.pop() {
            if !visited.insert(oid) {
                continue;
            }
            let commit = self.repo.find_commit(oid)?;
            let current = blob_id_at(&commit.tree()?, path)?;

            let mut parents = Vec::with_capacity(commit.parent_count());
            for parent in commit.parents() {
                let blob = blob_id_at(&parent.tree()?, path)?;
                parents.push((parent.id(), blob));
            }

            match parents.iter().find(|(_, blob)| *blob == current) {
                Some(&(same, _)) => pending.push(same),
                None => {
                    // Root commits land here too, when they contain the file
                    if current.is_some() || !parents.is_empty() {
                        revisions.push((commit.time().seconds(), oid));
                    }
                    pending.extend(parents.iter().map(|&(id, _)| id));
                }
            }
        }

        // Newest first, as `Sort::TIME` would hand them out
        revisions.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(revisions.into_iter().map(|(_, oid)| oid).collect())
    }
}

fn blob_id_at(tree: &Tree, path: &Path) -> Result<Option<Oid>> {
    match tree.get_path(path) {
        Ok(entry) => Ok(Some(entry.id())),
        Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn commit_time(commit: &Commit) -> Result<DateTime<FixedOffset>> {
    let time = commit.time();
    FixedOffset::east_opt(time.offset_minutes() * 60)
        .and_then(|offset| offset.timestamp_opt(time.seconds(), 0).single())
        .ok_or_else(|| {
            Error::Git(git2::Error::from_str(&format!(
                "commit {} has an unrepresentable timestamp",
                commit.id()
            )))
        })
}

/// Lazy, single-pass sequence of snapshots. Fused after the first error.
pub struct Snapshots<'repo> {
    repo: &'repo Repository,
    path: PathBuf,
    bounds: TimeBounds,
    revisions: std::vec::IntoIter<Oid>,
    bar: ProgressBar,
    done: bool,
}

impl Snapshots<'_> {
    fn read_next(&mut self) -> Result<Option<Snapshot>> {
        while let Some(oid) = self.revisions.next() {
            // Progress tracks scanned revisions, filtered or not
            self.bar.inc(1);

            let commit = self.repo.find_commit(oid)?;
            let timestamp = commit_time(&commit)?;
            if !self.bounds.contains(&timestamp) {
                continue;
            }

            let tree = commit.tree()?;
            let entry = match tree.get_path(&self.path) {
                Ok(entry) => entry,
                Err(e) if e.code() == ErrorCode::NotFound => {
                    tracing::debug!("{} absent at {}, skipping", self.path.display(), oid);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            let blob = entry.to_object(self.repo)?.peel_to_blob()?;

            return Ok(Some(Snapshot {
                timestamp,
                revision: oid,
                content: blob.content().to_vec(),
            }));
        }
        Ok(None)
    }
}

impl Iterator for Snapshots<'_> {
    type Item = Result<Snapshot>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.read_next().transpose();
        if !matches!(item, Some(Ok(_))) {
            self.done = true;
            self.bar.finish_and_clear();
        }
        item
    }
}

impl Drop for Snapshots<'_> {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}
