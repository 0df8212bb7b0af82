use thiserror::Error;

/// Unified application error type to simplify bubbling errors through async flows.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Errored while handling a file. {0}")]
    Io(#[from] std::io::Error),
    #[error("Error from git. {0}")]
    Git(#[from] git2::Error),
    #[error("Error reading the configuration file. {0}")]
    Config(#[from] toml::de::Error),
    #[error("Error while presenting a prompt. {0}")]
    Prompt(#[from] inquire::InquireError),
    #[error("Error formatting a timestamp. {0}")]
    TimeFormat(#[from] time::error::Format),
    #[error("Error parsing the diff tool command line. {0}")]
    ToolParse(#[from] shell_words::ParseError),
    #[error("The configured diff tool command line is empty")]
    EmptyDiffTool,
    #[error("Directory not found error. {0}")]
    DirNotFound(String),
    #[error("{0}")]
    Other(String),
}

/// Convenience alias for results that bubble `AppError`.
pub type AppResult<T> = Result<T, AppError>;
