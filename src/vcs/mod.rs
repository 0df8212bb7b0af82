/// git2-backed implementation of the host capability.
pub mod git;
pub use git::GitHost;

use std::path::{Path, PathBuf};

use time::OffsetDateTime;

use crate::AppResult;

/// A branch as reported by the host, annotated with the tags that point at
/// the same commit. The annotation is joined fresh on every invocation.
#[derive(Debug, Clone)]
pub struct BranchInfo {
    pub name: Option<String>,
    pub commit_id: Option<String>,
    pub is_remote: bool,
    pub tags: Vec<String>,
}

/// A tag ref and the commit it resolves to.
#[derive(Debug, Clone)]
pub struct TagRef {
    pub name: String,
    pub commit: Option<String>,
}

/// A single entry of a file's commit history.
#[derive(Debug, Clone)]
pub struct CommitInfo {
    pub hash: String,
    pub author_name: String,
    pub message: String,
    pub commit_date: Option<OffsetDateTime>,
}

/// A revision-addressable reference: the file's content as it existed at
/// `revision`, materialized at `path` for the diff viewer to read.
#[derive(Debug, Clone)]
pub struct RevisionSnapshot {
    pub revision: String,
    pub path: PathBuf,
}

/// The version-control capability the comparison flows are built against.
///
/// Everything here is metadata retrieval or content resolution; the flows
/// never manipulate repository state. Implementations resolve the owning
/// repository per call so no handle outlives an invocation.
pub trait VcsHost {
    /// Working-tree root of the repository owning `file`, if any.
    fn repository_root(&self, file: &Path) -> Option<PathBuf>;

    /// Local branches, plus remote branches when `include_remote` is set,
    /// in the order the host reports them.
    async fn branches(&self, file: &Path, include_remote: bool) -> AppResult<Vec<BranchInfo>>;

    /// All tag refs of the repository owning `file`.
    async fn tag_refs(&self, file: &Path) -> AppResult<Vec<TagRef>>;

    /// Up to `max_entries` commits touching `rel_path` (relative to the
    /// repository root), newest reachable first.
    async fn log(
        &self,
        file: &Path,
        rel_path: &Path,
        max_entries: usize,
    ) -> AppResult<Vec<CommitInfo>>;

    /// Materialize `file` as it existed at `revision`.
    async fn revision_snapshot(&self, file: &Path, revision: &str) -> AppResult<RevisionSnapshot>;
}
