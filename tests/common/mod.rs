//! Throwaway git repositories for integration tests

#![allow(dead_code)]

use git2::{Commit, Index, Oid, Repository, RepositoryInitOptions, Signature, Time};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

pub const TLE_PATH: &str = "raw-data/tle-data.txt";

/// 2025-08-01T00:00:00Z
pub const AUG_1: i64 = 1_754_006_400;
pub const DAY: i64 = 86_400;

pub struct FixtureRepo {
    pub dir: TempDir,
    pub repo: Repository,
}

impl FixtureRepo {
    /// Empty repository whose HEAD points at `main`
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).expect("init repository");
        Self { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `contents` to `rel` and commits it at `secs` (UTC)
    pub fn commit_file(&self, rel: &str, contents: &str, secs: i64) -> Oid {
        let full = self.dir.path().join(rel);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&full, contents).expect("write file");

        let mut index = self.repo.index().expect("open index");
        index.add_path(Path::new(rel)).expect("stage file");
        index.write().expect("write index");
        self.commit(&mut index, secs, &format!("update {rel}"))
    }

    /// Deletes `rel` and commits the removal at `secs` (UTC)
    pub fn remove_file(&self, rel: &str, secs: i64) -> Oid {
        fs::remove_file(self.dir.path().join(rel)).expect("remove file");

        let mut index = self.repo.index().expect("open index");
        index.remove_path(Path::new(rel)).expect("unstage file");
        index.write().expect("write index");
        self.commit(&mut index, secs, &format!("remove {rel}"))
    }

    pub fn commit_tle(&self, contents: &str, secs: i64) -> Oid {
        self.commit_file(TLE_PATH, contents, secs)
    }

    /// Commits a tree holding exactly `files` on top of `parents`, without
    /// touching HEAD or any branch. Used to build merges.
    pub fn commit_tree(&self, files: &[(&str, &str)], parents: &[Oid], secs: i64) -> Oid {
        let tree = self.repo.find_tree(self.write_tree(files)).expect("find tree");
        let sig = Signature::new("Fixture", "fixture@example.com", &Time::new(secs, 0))
            .expect("signature");
        let parents: Vec<Commit> = parents
            .iter()
            .map(|id| self.repo.find_commit(*id).expect("find parent"))
            .collect();
        let parents: Vec<&Commit> = parents.iter().collect();

        self.repo
            .commit(None, &sig, &sig, "fixture commit", &tree, &parents)
            .expect("commit")
    }

    /// Points `refs/heads/<name>` at `target`
    pub fn set_branch(&self, name: &str, target: Oid) {
        self.repo
            .reference(&format!("refs/heads/{name}"), target, true, "fixture")
            .expect("update branch");
    }

    fn write_tree(&self, files: &[(&str, &str)]) -> Oid {
        let mut builder = self.repo.treebuilder(None).expect("tree builder");
        let mut dirs: BTreeMap<&str, Vec<(&str, &str)>> = BTreeMap::new();

        for &(path, contents) in files {
            match path.split_once('/') {
                Some((dir, rest)) => dirs.entry(dir).or_default().push((rest, contents)),
                None => {
                    let blob = self.repo.blob(contents.as_bytes()).expect("write blob");
                    builder.insert(path, blob, 0o100644).expect("insert blob");
                }
            }
        }
        for (dir, entries) in dirs {
            let subtree = self.write_tree(&entries);
            builder.insert(dir, subtree, 0o040000).expect("insert tree");
        }
        builder.write().expect("write tree")
    }

    fn commit(&self, index: &mut Index, secs: i64, message: &str) -> Oid {
        let tree_id = index.write_tree().expect("write tree");
        let tree = self.repo.find_tree(tree_id).expect("find tree");
        let sig = Signature::new("Fixture", "fixture@example.com", &Time::new(secs, 0))
            .expect("signature");

        let parent = self.repo.head().ok().and_then(|head| head.peel_to_commit().ok());
        let parents: Vec<&Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("commit")
    }
}

/// A syntactically plausible 3-line element set. `epoch` varies the element
/// lines so different values give different record texts.
pub fn tle(id: u32, epoch: u32) -> String {
    format!(
        "SAT {id}\n\
         1 {id:05}U 98067A   25{epoch:03}.50000000  .00011385  00000+0  20800-3 0  9991\n\
         2 {id:05}  51.6349 104.5385 0002138 150.0420 210.0670 15.49963470{epoch:05}"
    )
}

/// Joins records into the content of one snapshot of the tracked file
pub fn snapshot(records: &[String]) -> String {
    let mut content = records.join("\n");
    content.push('\n');
    content
}
