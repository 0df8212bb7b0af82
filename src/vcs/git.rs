use std::path::{Path, PathBuf};

use git2::{BranchType, Commit, Repository};
use tracing::{debug, trace};

use super::{BranchInfo, CommitInfo, RevisionSnapshot, TagRef, VcsHost};
use crate::dirs::DirType;
use crate::{AppError, AppResult, time_utils};

/// Git host backed by git2 (libgit2).
///
/// Repositories are discovered from the target file on every call, so no
/// repository handle is shared between invocations.
pub struct GitHost {
    snapshot_dir: Option<PathBuf>,
}

impl GitHost {
    pub fn new() -> Self {
        GitHost { snapshot_dir: None }
    }

    #[cfg(test)]
    pub fn with_snapshot_dir(dir: PathBuf) -> Self {
        GitHost {
            snapshot_dir: Some(dir),
        }
    }

    fn open(&self, file: &Path) -> AppResult<Repository> {
        let start = match file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        Ok(Repository::discover(start)?)
    }

    fn snapshot_dir(&self) -> AppResult<PathBuf> {
        match &self.snapshot_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(DirType::Cache.ensure_dir()?.join("snapshots")),
        }
    }

    /// True when `commit` changed the entry at `rel` relative to its parents
    /// (or introduced it, for root commits).
    fn touches_path(commit: &Commit, rel: &Path) -> AppResult<bool> {
        let entry = commit.tree()?.get_path(rel).ok().map(|e| e.id());
        if commit.parent_count() == 0 {
            return Ok(entry.is_some());
        }
        for parent in commit.parents() {
            let parent_entry = parent.tree()?.get_path(rel).ok().map(|e| e.id());
            if parent_entry != entry {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Branch names and tags land in snapshot file names; keep them path-safe.
fn sanitize_revision(revision: &str) -> String {
    revision
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl VcsHost for GitHost {
    fn repository_root(&self, file: &Path) -> Option<PathBuf> {
        self.open(file)
            .ok()
            .and_then(|repo| repo.workdir().map(Path::to_path_buf))
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn branches(&self, file: &Path, include_remote: bool) -> AppResult<Vec<BranchInfo>> {
        let repo = self.open(file)?;
        let filter = if include_remote {
            None
        } else {
            Some(BranchType::Local)
        };
        let mut out = Vec::new();
        for entry in repo.branches(filter)? {
            let (branch, branch_type) = entry?;
            let name = branch.name()?.map(str::to_string);
            let commit_id = branch.get().target().map(|oid| oid.to_string());
            trace!("Found {:?} branch {:?}", branch_type, name);
            out.push(BranchInfo {
                name,
                commit_id,
                is_remote: branch_type == BranchType::Remote,
                tags: Vec::new(),
            });
        }
        debug!("Listed {} branches", out.len());
        Ok(out)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn tag_refs(&self, file: &Path) -> AppResult<Vec<TagRef>> {
        let repo = self.open(file)?;
        let mut tags = Vec::new();
        for reference in repo.references_glob("refs/tags/*")? {
            let reference = reference?;
            let Some(name) = reference.shorthand().map(str::to_string) else {
                continue;
            };
            // Peeling resolves annotated tags to their target commit.
            let commit = reference
                .peel_to_commit()
                .ok()
                .map(|commit| commit.id().to_string());
            tags.push(TagRef { name, commit });
        }
        debug!("Listed {} tags", tags.len());
        Ok(tags)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn log(
        &self,
        file: &Path,
        rel_path: &Path,
        max_entries: usize,
    ) -> AppResult<Vec<CommitInfo>> {
        let repo = self.open(file)?;
        let mut revwalk = repo.revwalk()?;
        revwalk.push_head()?;
        let mut commits = Vec::new();
        for oid in revwalk {
            if commits.len() >= max_entries {
                break;
            }
            let commit = repo.find_commit(oid?)?;
            if !Self::touches_path(&commit, rel_path)? {
                continue;
            }
            commits.push(CommitInfo {
                hash: commit.id().to_string(),
                author_name: commit.author().name().unwrap_or("Unknown").to_string(),
                message: commit.summary().unwrap_or("").to_string(),
                commit_date: time_utils::commit_time_to_datetime(commit.time()),
            });
        }
        debug!(
            "Found {} commits touching {}",
            commits.len(),
            rel_path.display()
        );
        Ok(commits)
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn revision_snapshot(&self, file: &Path, revision: &str) -> AppResult<RevisionSnapshot> {
        let repo = self.open(file)?;
        let root = repo
            .workdir()
            .ok_or_else(|| AppError::Other("Repository has no working tree".to_string()))?
            .to_path_buf();
        let rel = file.strip_prefix(&root).unwrap_or(file);
        let commit = repo.revparse_single(revision)?.peel_to_commit()?;
        let entry = commit.tree()?.get_path(rel).map_err(|_| {
            AppError::Other(format!(
                "Revision {} has no entry for {}",
                revision,
                rel.display()
            ))
        })?;
        let blob = repo.find_blob(entry.id())?;

        let dir = self.snapshot_dir()?;
        std::fs::create_dir_all(&dir)?;
        let base = file
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("file");
        let path = dir.join(format!("{}-{}", sanitize_revision(revision), base));
        std::fs::write(&path, blob.content())?;
        debug!("Wrote {} at {} to {}", rel.display(), revision, path.display());

        Ok(RevisionSnapshot {
            revision: revision.to_string(),
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Signature;
    use tempfile::TempDir;

    fn init_repo(dir: &Path) -> Repository {
        let repo = Repository::init(dir).unwrap();
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
        repo
    }

    fn commit_file(repo: &Repository, name: &str, content: &str, message: &str) -> git2::Oid {
        let root = repo.workdir().unwrap().to_path_buf();
        std::fs::write(root.join(name), content).unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = Signature::now("Test", "test@example.com").unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    #[tokio::test]
    async fn lists_local_branches_and_tags() {
        let tmp = TempDir::new().unwrap();
        let repo = init_repo(tmp.path());
        let oid = commit_file(&repo, "foo.txt", "one\n", "add foo");
        let commit = repo.find_commit(oid).unwrap();
        repo.branch("dev", &commit, false).unwrap();
        repo.tag_lightweight("v1", commit.as_object(), false).unwrap();

        let host = GitHost::new();
        let file = tmp.path().join("foo.txt");

        let branches = host.branches(&file, true).await.unwrap();
        let names: Vec<_> = branches
            .iter()
            .filter_map(|b| b.name.as_deref())
            .collect();
        assert!(names.contains(&"dev"));
        assert!(branches.iter().all(|b| !b.is_remote));
        let dev = branches
            .iter()
            .find(|b| b.name.as_deref() == Some("dev"))
            .unwrap();
        assert_eq!(dev.commit_id.as_deref(), Some(oid.to_string().as_str()));

        let tags = host.tag_refs(&file).await.unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "v1");
        assert_eq!(tags[0].commit.as_deref(), Some(oid.to_string().as_str()));
    }

    #[tokio::test]
    async fn log_only_returns_commits_touching_the_path() {
        let tmp = TempDir::new().unwrap();
        let repo = init_repo(tmp.path());
        let first = commit_file(&repo, "foo.txt", "one\n", "add foo");
        commit_file(&repo, "bar.txt", "other\n", "add bar");
        let third = commit_file(&repo, "foo.txt", "two\n", "change foo");

        let host = GitHost::new();
        let file = tmp.path().join("foo.txt");

        let commits = host.log(&file, Path::new("foo.txt"), 10).await.unwrap();
        let hashes: Vec<_> = commits.iter().map(|c| c.hash.clone()).collect();
        assert_eq!(hashes, vec![third.to_string(), first.to_string()]);
        assert_eq!(commits[0].message, "change foo");
        assert_eq!(commits[0].author_name, "Test");
        assert!(commits[0].commit_date.is_some());
    }

    #[tokio::test]
    async fn log_respects_max_entries() {
        let tmp = TempDir::new().unwrap();
        let repo = init_repo(tmp.path());
        for n in 0..5 {
            commit_file(&repo, "foo.txt", &format!("{n}\n"), &format!("change {n}"));
        }

        let host = GitHost::new();
        let file = tmp.path().join("foo.txt");

        let commits = host.log(&file, Path::new("foo.txt"), 2).await.unwrap();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].message, "change 4");
    }

    #[tokio::test]
    async fn snapshot_materializes_historical_content() {
        let tmp = TempDir::new().unwrap();
        let repo = init_repo(tmp.path());
        let first = commit_file(&repo, "foo.txt", "one\n", "add foo");
        let commit = repo.find_commit(first).unwrap();
        repo.branch("dev", &commit, false).unwrap();
        commit_file(&repo, "foo.txt", "two\n", "change foo");

        let snapshots = TempDir::new().unwrap();
        let host = GitHost::with_snapshot_dir(snapshots.path().to_path_buf());
        let file = tmp.path().join("foo.txt");

        let snapshot = host.revision_snapshot(&file, "dev").await.unwrap();
        assert_eq!(snapshot.revision, "dev");
        assert_eq!(std::fs::read_to_string(&snapshot.path).unwrap(), "one\n");
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "two\n");
    }

    #[tokio::test]
    async fn snapshot_fails_for_paths_missing_at_the_revision() {
        let tmp = TempDir::new().unwrap();
        let repo = init_repo(tmp.path());
        let first = commit_file(&repo, "foo.txt", "one\n", "add foo");
        let commit = repo.find_commit(first).unwrap();
        repo.branch("dev", &commit, false).unwrap();
        commit_file(&repo, "bar.txt", "late\n", "add bar");

        let snapshots = TempDir::new().unwrap();
        let host = GitHost::with_snapshot_dir(snapshots.path().to_path_buf());
        let file = tmp.path().join("bar.txt");

        let err = host.revision_snapshot(&file, "dev").await.unwrap_err();
        assert!(err.to_string().contains("has no entry for"));
    }

    #[test]
    fn repository_root_is_none_outside_a_repository() {
        let tmp = TempDir::new().unwrap();
        let host = GitHost::new();
        assert!(host.repository_root(&tmp.path().join("foo.txt")).is_none());
    }

    #[test]
    fn sanitizes_revisions_for_file_names() {
        assert_eq!(sanitize_revision("origin/main"), "origin_main");
        assert_eq!(sanitize_revision("v1.2-rc"), "v1.2-rc");
    }
}
