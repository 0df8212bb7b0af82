use std::path::Path;

use inquire::{InquireError, Select};
use tokio::process::Command;
use tracing::{debug, error};

use super::{SelectionItem, UiHost};
use crate::vcs::RevisionSnapshot;
use crate::{AppError, AppResult};

/// Terminal UI: an `inquire` select prompt and an external diff viewer
/// spawned per the configured command line.
pub struct TerminalUi {
    diff_tool: String,
}

impl TerminalUi {
    pub fn new(diff_tool: String) -> Self {
        TerminalUi { diff_tool }
    }
}

impl UiHost for TerminalUi {
    async fn pick(
        &self,
        items: &[SelectionItem],
        placeholder: &str,
    ) -> AppResult<Option<SelectionItem>> {
        if items.iter().all(|item| item.is_divider) {
            // Nothing selectable, including the empty list.
            return Ok(None);
        }
        loop {
            match Select::new(placeholder, items.to_vec()).prompt() {
                // Section headers label the list; picking one re-opens it.
                Ok(choice) if choice.is_divider => continue,
                Ok(choice) => return Ok(Some(choice)),
                Err(InquireError::OperationCanceled)
                | Err(InquireError::OperationInterrupted) => return Ok(None),
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn show_error(&self, message: &str) {
        error!("{}", message);
    }

    async fn open_diff(
        &self,
        left: &RevisionSnapshot,
        right: &Path,
        title: &str,
    ) -> AppResult<()> {
        let argv = shell_words::split(&self.diff_tool)?;
        let Some((program, args)) = argv.split_first() else {
            return Err(AppError::EmptyDiffTool);
        };
        println!("{}", title);
        let status = Command::new(program)
            .args(args)
            .arg(&left.path)
            .arg(right)
            .status()
            .await?;
        // `git diff` exits 1 whenever the files differ; exit codes carry no
        // failure signal worth surfacing here.
        debug!("Diff tool exited with {}", status);
        Ok(())
    }
}
