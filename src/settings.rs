use serde::Deserialize;

use crate::AppResult;
use crate::dirs::DirType;

/// Default command line for the external diff viewer.
///
/// `git diff --no-index` renders a diff between two arbitrary paths and is
/// available wherever git is; editor viewers (e.g. `code --diff`, `meld`)
/// can be substituted through the `diff-tool` key or `--tool` flag.
pub const DEFAULT_DIFF_TOOL: &str = "git diff --no-index";

/// Default number of commits fetched for the commit comparison flow.
pub const DEFAULT_COMMIT_HISTORY_LENGTH: usize = 1000;

/// User-settable options, read from `~/.config/git-differ/config.toml`.
///
/// The file is re-read on every command invocation; a missing file yields
/// the defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// When true, the branch comparison flow excludes remote branches.
    pub local_only: bool,
    /// Maximum number of commits fetched for the commit comparison flow.
    pub commit_history_length: usize,
    /// Command line of the external diff viewer.
    pub diff_tool: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            local_only: false,
            commit_history_length: DEFAULT_COMMIT_HISTORY_LENGTH,
            diff_tool: DEFAULT_DIFF_TOOL.to_string(),
        }
    }
}

impl Settings {
    pub fn load() -> AppResult<Settings> {
        let path = DirType::Config.get_dir()?.join("config.toml");
        if !path.exists() {
            return Ok(Settings::default());
        }
        let raw = std::fs::read_to_string(&path)?;
        Ok(toml::from_str(&raw)?)
    }
}
