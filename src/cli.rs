use std::io::Write;
use std::path::PathBuf;

use clap::builder::styling::{AnsiColor, Color, Style, Styles};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::aot::{Generator, Shell, generate};
use clap_complete_nushell::Nushell;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::fmt::Display;
use tracing::info;

use crate::commands;
use crate::settings::Settings;
use crate::ui::TerminalUi;
use crate::vcs::GitHost;
use crate::AppResult;

const STYLES: Styles = Styles::styled()
    .header(Style::new().bold())
    .usage(Style::new().bold())
    .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))))
    .literal(
        Style::new()
            .bold()
            .fg_color(Some(Color::Ansi(AnsiColor::Green))),
    )
    .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))))
    .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
    .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightRed))))
    .context(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Magenta))))
    .context_value(
        Style::new()
            .bold()
            .fg_color(Some(Color::Ansi(AnsiColor::Cyan))),
    );

/// Long-form CLI description shown in `--help`.
const LONG_ABOUT: &str = "git-differ - Compare a file against a branch or commit

Pick a branch, remote branch, or historical commit for a file and open a
visual diff between that revision and the working copy. Branch, tag, and
commit metadata come from the repository owning the file; the diff itself
is rendered by an external viewer (`git diff --no-index` unless
configured otherwise in ~/.config/git-differ/config.toml).";

/// git-differ - Compare a file against a branch or commit.
#[derive(Parser, Debug, Clone)]
#[command(author, version, propagate_version = true, about, long_about = Some(LONG_ABOUT), styles = STYLES)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub cmd: Cmd,
}

/// Top-level commands supported by the CLI.
#[derive(Subcommand, Debug, Clone)]
pub enum Cmd {
    /// Compare the file against a branch
    ///
    /// Presents local branches (annotated with the tags pointing at the
    /// same commit) and, unless local-only is set, remote branches
    Branch {
        #[command(flatten)]
        target: TargetArgs,

        /// Exclude remote branches from the selection
        /// Note: This is not a flag. You must provide a value (true or false) if you use this option.
        #[arg(long)]
        local_only: Option<bool>,

        #[command(flatten)]
        verbosity: Verbosity<InfoLevel>,
    },

    /// Compare the file against a commit from its history
    ///
    /// Presents the commits touching the file, newest first, with hash,
    /// date, author, and message
    Commit {
        #[command(flatten)]
        target: TargetArgs,

        /// Maximum number of commits to fetch
        #[arg(short = 'n', long)]
        max_count: Option<usize>,

        #[command(flatten)]
        verbosity: Verbosity<InfoLevel>,
    },

    /// Generate shell completion for a given shell
    Completion {
        /// Output file to write the completion script to
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// The shell to generate the completion for
        #[arg(value_enum)]
        shell: CompletionShell,

        #[command(flatten)]
        verbosity: Verbosity<InfoLevel>,
    },
}

/// Target options shared by the comparison commands.
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// File to compare
    ///
    /// Falls back to the GIT_DIFFER_FILE environment variable when omitted,
    /// which editor integrations can set to the active file
    #[arg(value_name = "FILE", env = "GIT_DIFFER_FILE")]
    pub file: Option<PathBuf>,

    /// Override the configured diff tool command line
    #[arg(long)]
    pub tool: Option<String>,
}

/// Supported completion targets for shell auto-completion.
#[derive(ValueEnum, Clone, Debug)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
    Nushell,
}

impl Display for CompletionShell {
    /// Render the canonical shell name string.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CompletionShell::Bash => "bash",
            CompletionShell::Zsh => "zsh",
            CompletionShell::Fish => "fish",
            CompletionShell::PowerShell => "powershell",
            CompletionShell::Elvish => "elvish",
            CompletionShell::Nushell => "nushell",
        };
        write!(f, "{}", s)
    }
}

impl Generator for &CompletionShell {
    fn generate(&self, cmd: &clap::builder::Command, buf: &mut dyn Write) {
        match self {
            CompletionShell::Bash => Shell::Bash.generate(cmd, buf),
            CompletionShell::Zsh => Shell::Zsh.generate(cmd, buf),
            CompletionShell::Fish => Shell::Fish.generate(cmd, buf),
            CompletionShell::PowerShell => Shell::PowerShell.generate(cmd, buf),
            CompletionShell::Elvish => Shell::Elvish.generate(cmd, buf),
            CompletionShell::Nushell => Nushell.generate(cmd, buf),
        }
    }

    fn file_name(&self, name: &str) -> String {
        match self {
            CompletionShell::Bash => Shell::Bash.file_name(name),
            CompletionShell::Zsh => Shell::Zsh.file_name(name),
            CompletionShell::Fish => Shell::Fish.file_name(name),
            CompletionShell::PowerShell => Shell::PowerShell.file_name(name),
            CompletionShell::Elvish => Shell::Elvish.file_name(name),
            CompletionShell::Nushell => Nushell.file_name(name),
        }
    }
}

/// Helper trait for accessing verbosity flags on commands.
pub trait GetVerbosity {
    fn get_verbosity(&self) -> &Verbosity<InfoLevel>;
}

impl GetVerbosity for Cmd {
    fn get_verbosity(&self) -> &Verbosity<InfoLevel> {
        match self {
            Cmd::Branch { verbosity, .. } => verbosity,
            Cmd::Commit { verbosity, .. } => verbosity,
            Cmd::Completion { verbosity, .. } => verbosity,
        }
    }
}

impl Cmd {
    /// Execute the chosen top-level command.
    #[tracing::instrument(name = "Running command", level = "info", skip(self))]
    pub async fn run(&self) -> AppResult<()> {
        match self {
            Cmd::Branch {
                target, local_only, ..
            } => {
                // Settings are re-read on every invocation, never cached.
                let mut settings = Settings::load()?;
                if let Some(local_only) = local_only {
                    settings.local_only = *local_only;
                }
                if let Some(tool) = &target.tool {
                    settings.diff_tool = tool.clone();
                }
                let ui = TerminalUi::new(settings.diff_tool.clone());
                commands::compare_with_branch(&GitHost::new(), &ui, &settings, target.file.clone())
                    .await
            }
            Cmd::Commit {
                target, max_count, ..
            } => {
                let mut settings = Settings::load()?;
                if let Some(max_count) = max_count {
                    settings.commit_history_length = *max_count;
                }
                if let Some(tool) = &target.tool {
                    settings.diff_tool = tool.clone();
                }
                let ui = TerminalUi::new(settings.diff_tool.clone());
                commands::compare_with_commit(&GitHost::new(), &ui, &settings, target.file.clone())
                    .await
            }
            Cmd::Completion { shell, output, .. } => {
                let mut cmd = Cli::command();
                if let Some(output_path) = output {
                    let mut file = std::fs::OpenOptions::new()
                        .write(true)
                        .truncate(true)
                        .create(true)
                        .open(output_path)?;
                    // Write completion script to the requested file.
                    generate(shell, &mut cmd, "git-differ", &mut file);
                    info!(
                        "Generated completion script for {} at {}",
                        shell,
                        output_path.display()
                    );
                } else {
                    // Fallback: print completion script to stdout.
                    generate(shell, &mut cmd, "git-differ", &mut std::io::stdout());
                }
                Ok(())
            }
        }
    }
}
