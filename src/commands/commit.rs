use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::AppResult;
use crate::settings::Settings;
use crate::time_utils;
use crate::ui::{SelectionItem, UiHost};
use crate::vcs::{CommitInfo, VcsHost};

/// Compare the working copy of a file against a commit picked from the
/// file's history, newest first. Failures past repository lookup surface as
/// a single generic message instead of ending the process.
#[tracing::instrument(level = "debug", skip(vcs, ui, settings))]
pub async fn compare_with_commit<V: VcsHost, U: UiHost>(
    vcs: &V,
    ui: &U,
    settings: &Settings,
    file: Option<PathBuf>,
) -> AppResult<()> {
    let Some(file) = file else {
        ui.show_error("No file selected");
        return Ok(());
    };
    let Some(root) = vcs.repository_root(&file) else {
        ui.show_error("No repository found");
        return Ok(());
    };

    if let Err(e) = pick_and_open(vcs, ui, settings, &file, &root).await {
        ui.show_error(&format!("An error occurred: {}", e));
    }
    Ok(())
}

async fn pick_and_open<V: VcsHost, U: UiHost>(
    vcs: &V,
    ui: &U,
    settings: &Settings,
    file: &Path,
    root: &Path,
) -> AppResult<()> {
    let rel = file.strip_prefix(root).unwrap_or(file);
    let mut commits = vcs.log(file, rel, settings.commit_history_length).await?;
    sort_newest_first(&mut commits);

    let items = commits
        .iter()
        .map(commit_item)
        .collect::<AppResult<Vec<_>>>()?;

    let Some(choice) = ui
        .pick(&items, "Select a commit to compare with or search by commit hash")
        .await?
    else {
        ui.show_error("No commit selected");
        return Ok(());
    };

    // The label carries the identity: it is the commit hash.
    let hash = choice.label;
    let snapshot = vcs.revision_snapshot(file, &hash).await?;
    let title = format!("Comparing file changes with commit {}", hash);
    ui.open_diff(&snapshot, file, &title).await
}

/// Newest first by commit date. An undated commit orders in front of any
/// dated commit it is compared against; two undated commits compare equal
/// and keep their input order, so the comparator stays total.
pub(crate) fn sort_newest_first(commits: &mut [CommitInfo]) {
    commits.sort_by(|a, b| match (a.commit_date, b.commit_date) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => b.cmp(&a),
    });
}

fn commit_item(commit: &CommitInfo) -> AppResult<SelectionItem> {
    let description = match commit.commit_date {
        Some(date) => time_utils::format_utc(date)?,
        None => "unknown date".to_string(),
    };
    Ok(SelectionItem::entry(commit.hash.clone(), description)
        .with_detail(format!("{}: {}", commit.author_name, commit.message)))
}
