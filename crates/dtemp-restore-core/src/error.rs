use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("The folder path '{}' does not exist.", .0.display())]
    RootNotFound(PathBuf),

    #[error("The path '{}' is not a folder.", .0.display())]
    RootNotADirectory(PathBuf),
}

/// Why a staged file was left in place. `Display` is the text written to the skip log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Unmatched,
    MalformedSidecar(String),
    MissingFields,
    UnsafeDestination,
    MoveFailed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unmatched => write!(f, "no matching sidecar"),
            SkipReason::MalformedSidecar(detail) => write!(f, "error: {}", detail),
            SkipReason::MissingFields => write!(f, "missing destination folder or name"),
            SkipReason::UnsafeDestination => write!(f, "invalid destination path"),
            SkipReason::MoveFailed(detail) => write!(f, "error: {}", detail),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("path '{path}' escapes the restoration root")]
pub struct PathRejected {
    pub path: String,
}

#[derive(Error, Debug)]
pub enum TimestampError {
    #[error("unrecognized timestamp '{0}'")]
    Parse(String),

    #[error("failed to set file times: {0}")]
    Io(#[from] std::io::Error),
}
