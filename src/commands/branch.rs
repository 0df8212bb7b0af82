use std::path::{Path, PathBuf};

use super::file_base_name;
use crate::AppResult;
use crate::settings::Settings;
use crate::ui::{SelectionItem, UiHost};
use crate::vcs::{BranchInfo, VcsHost};

/// Compare the working copy of a file against a branch picked from a grouped
/// local/remote list. Every abort path shows a message and ends the
/// invocation; a diff is only ever opened after a successful selection.
#[tracing::instrument(level = "debug", skip(vcs, ui, settings))]
pub async fn compare_with_branch<V: VcsHost, U: UiHost>(
    vcs: &V,
    ui: &U,
    settings: &Settings,
    file: Option<PathBuf>,
) -> AppResult<()> {
    let Some(file) = file else {
        ui.show_error("No file selected");
        return Ok(());
    };
    if vcs.repository_root(&file).is_none() {
        ui.show_error(&format!("Repository not found for {}", file.display()));
        return Ok(());
    }

    let branches = annotated_branches(vcs, &file, !settings.local_only).await?;
    let items = branch_items(&branches, settings.local_only);

    let Some(choice) = ui.pick(&items, "Select a branch to compare with").await? else {
        ui.show_error("No branch selected");
        return Ok(());
    };

    let Some(branch) = branches
        .iter()
        .find(|branch| branch.name.as_deref() == Some(choice.label.as_str()))
    else {
        ui.show_error(&format!("Branch not found: {}", choice.label));
        return Ok(());
    };
    // The find above matched on the name, but nothing past this point may
    // run with a nameless branch.
    let Some(name) = branch.name.as_deref() else {
        ui.show_error(&format!("Branch name is undefined: {}", choice.label));
        return Ok(());
    };

    let snapshot = vcs.revision_snapshot(&file, name).await?;
    let title = format!("{} compared with \"{}\"", name, file_base_name(&file));
    ui.open_diff(&snapshot, &file, &title).await
}

/// Branches with their tag annotation: the names of the tags whose target
/// commit equals the branch commit, in ref-listing order. Joined fresh per
/// invocation.
async fn annotated_branches<V: VcsHost>(
    vcs: &V,
    file: &Path,
    include_remote: bool,
) -> AppResult<Vec<BranchInfo>> {
    let mut branches = vcs.branches(file, include_remote).await?;
    let tags = vcs.tag_refs(file).await?;
    for branch in &mut branches {
        if branch.commit_id.is_none() {
            continue;
        }
        branch.tags = tags
            .iter()
            .filter(|tag| tag.commit == branch.commit_id)
            .map(|tag| tag.name.clone())
            .collect();
    }
    Ok(branches)
}

/// The grouped two-section list: a local section always, a remote section
/// unless `local_only`. Entry order within a section follows the host.
fn branch_items(branches: &[BranchInfo], local_only: bool) -> Vec<SelectionItem> {
    let to_item = |branch: &BranchInfo| {
        let description = if branch.tags.is_empty() {
            String::new()
        } else {
            format!("Tags: {}", branch.tags.join(", "))
        };
        SelectionItem::entry(
            branch.name.clone().unwrap_or_else(|| "unknown".to_string()),
            description,
        )
    };

    let mut items = vec![SelectionItem::divider("local branches")];
    items.extend(branches.iter().filter(|b| !b.is_remote).map(to_item));
    if !local_only {
        items.push(SelectionItem::divider("remote branches"));
        items.extend(branches.iter().filter(|b| b.is_remote).map(to_item));
    }
    items
}
