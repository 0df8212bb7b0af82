/// Terminal implementation of the UI capability.
pub mod terminal;
pub use terminal::TerminalUi;

use std::fmt::Display;
use std::path::Path;

use crate::AppResult;
use crate::vcs::RevisionSnapshot;

/// A display-only entry of the selection prompt. Carries no identity back to
/// its source branch or commit except through the label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionItem {
    pub label: String,
    pub description: String,
    pub detail: Option<String>,
    pub is_divider: bool,
}

impl SelectionItem {
    pub fn entry(label: impl Into<String>, description: impl Into<String>) -> Self {
        SelectionItem {
            label: label.into(),
            description: description.into(),
            detail: None,
            is_divider: false,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// A non-selectable entry labelling a section of the list.
    pub fn divider(label: impl Into<String>) -> Self {
        SelectionItem {
            label: label.into(),
            description: String::new(),
            detail: None,
            is_divider: true,
        }
    }
}

impl Display for SelectionItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_divider {
            return write!(f, "---- {} ----", self.label);
        }
        write!(f, "{}", self.label)?;
        if !self.description.is_empty() {
            write!(f, "  {}", self.description)?;
        }
        if let Some(detail) = &self.detail {
            write!(f, "  {}", detail)?;
        }
        Ok(())
    }
}

/// The presentation capability the comparison flows are built against:
/// a modal single-select prompt, message display, and the diff viewer.
pub trait UiHost {
    /// Present `items` and suspend until the user picks one or dismisses the
    /// prompt. Divider entries never resolve a selection.
    async fn pick(
        &self,
        items: &[SelectionItem],
        placeholder: &str,
    ) -> AppResult<Option<SelectionItem>>;

    /// Show a user-visible error message.
    fn show_error(&self, message: &str);

    /// Open the diff viewer comparing a historical snapshot against the
    /// working copy.
    async fn open_diff(
        &self,
        left: &RevisionSnapshot,
        right: &Path,
        title: &str,
    ) -> AppResult<()>;
}
