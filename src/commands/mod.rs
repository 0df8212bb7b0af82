/// Branch comparison flow.
pub mod branch;
/// Commit comparison flow.
pub mod commit;

pub use branch::compare_with_branch;
pub use commit::compare_with_commit;

use std::path::Path;

/// Last path segment for display, or the whole path when there is none.
pub(crate) fn file_base_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    use time::OffsetDateTime;

    use crate::ui::{SelectionItem, UiHost};
    use crate::vcs::{BranchInfo, CommitInfo, RevisionSnapshot, TagRef, VcsHost};
    use crate::{AppError, AppResult};

    /// Scripted VCS host recording every call it receives.
    #[derive(Default)]
    pub struct FakeVcs {
        pub root: Option<PathBuf>,
        pub branches: Vec<BranchInfo>,
        pub tags: Vec<TagRef>,
        pub commits: Vec<CommitInfo>,
        pub log_error: Option<String>,
        pub calls: RefCell<Vec<String>>,
        pub log_args: RefCell<Option<(PathBuf, usize)>>,
    }

    impl VcsHost for FakeVcs {
        fn repository_root(&self, _file: &Path) -> Option<PathBuf> {
            self.calls.borrow_mut().push("repository_root".to_string());
            self.root.clone()
        }

        async fn branches(
            &self,
            _file: &Path,
            include_remote: bool,
        ) -> AppResult<Vec<BranchInfo>> {
            self.calls.borrow_mut().push("branches".to_string());
            Ok(self
                .branches
                .iter()
                .filter(|branch| include_remote || !branch.is_remote)
                .cloned()
                .collect())
        }

        async fn tag_refs(&self, _file: &Path) -> AppResult<Vec<TagRef>> {
            self.calls.borrow_mut().push("tag_refs".to_string());
            Ok(self.tags.clone())
        }

        async fn log(
            &self,
            _file: &Path,
            rel_path: &Path,
            max_entries: usize,
        ) -> AppResult<Vec<CommitInfo>> {
            self.calls.borrow_mut().push("log".to_string());
            if let Some(message) = &self.log_error {
                return Err(AppError::Other(message.clone()));
            }
            *self.log_args.borrow_mut() = Some((rel_path.to_path_buf(), max_entries));
            Ok(self.commits.iter().take(max_entries).cloned().collect())
        }

        async fn revision_snapshot(
            &self,
            _file: &Path,
            revision: &str,
        ) -> AppResult<RevisionSnapshot> {
            self.calls.borrow_mut().push("revision_snapshot".to_string());
            Ok(RevisionSnapshot {
                revision: revision.to_string(),
                path: PathBuf::from("/snapshots").join(revision.replace('/', "_")),
            })
        }
    }

    /// Scripted UI host: resolves the prompt to `choice`, records everything.
    #[derive(Default)]
    pub struct FakeUi {
        pub choice: Option<String>,
        pub errors: RefCell<Vec<String>>,
        pub presented: RefCell<Vec<Vec<SelectionItem>>>,
        pub placeholders: RefCell<Vec<String>>,
        pub diffs: RefCell<Vec<(String, PathBuf, String)>>,
    }

    impl UiHost for FakeUi {
        async fn pick(
            &self,
            items: &[SelectionItem],
            placeholder: &str,
        ) -> AppResult<Option<SelectionItem>> {
            self.presented.borrow_mut().push(items.to_vec());
            self.placeholders.borrow_mut().push(placeholder.to_string());
            Ok(self.choice.as_ref().map(|label| {
                items
                    .iter()
                    .find(|item| !item.is_divider && item.label == *label)
                    .cloned()
                    // A label the list never contained, for the defensive paths.
                    .unwrap_or_else(|| SelectionItem::entry(label.clone(), ""))
            }))
        }

        fn show_error(&self, message: &str) {
            self.errors.borrow_mut().push(message.to_string());
        }

        async fn open_diff(
            &self,
            left: &RevisionSnapshot,
            right: &Path,
            title: &str,
        ) -> AppResult<()> {
            self.diffs.borrow_mut().push((
                left.revision.clone(),
                right.to_path_buf(),
                title.to_string(),
            ));
            Ok(())
        }
    }

    pub fn local_branch(name: &str, commit: &str) -> BranchInfo {
        BranchInfo {
            name: Some(name.to_string()),
            commit_id: Some(commit.to_string()),
            is_remote: false,
            tags: Vec::new(),
        }
    }

    pub fn remote_branch(name: &str, commit: &str) -> BranchInfo {
        BranchInfo {
            name: Some(name.to_string()),
            commit_id: Some(commit.to_string()),
            is_remote: true,
            tags: Vec::new(),
        }
    }

    pub fn tag(name: &str, commit: &str) -> TagRef {
        TagRef {
            name: name.to_string(),
            commit: Some(commit.to_string()),
        }
    }

    pub fn commit_info(hash: &str, author: &str, message: &str, secs: Option<i64>) -> CommitInfo {
        CommitInfo {
            hash: hash.to_string(),
            author_name: author.to_string(),
            message: message.to_string(),
            commit_date: secs.map(|s| OffsetDateTime::from_unix_timestamp(s).unwrap()),
        }
    }
}
