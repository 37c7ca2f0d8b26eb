//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: package.json / package-lock.json problems (fatal)
//! - HistoryError: failures fetching the previous manifest from git (advisory,
//!   reported as warnings and never wrapped in AppError)

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest or lockfile related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Failed to write status output
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Errors related to manifest and lockfile operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest or lockfile not found
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read file
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file
    #[error("failed to write {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },

    /// Valid JSON with an unexpected structure
    #[error("unexpected structure in {path}: {message}")]
    InvalidStructure { path: PathBuf, message: String },
}

/// Errors related to retrieving the previous manifest from git
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// The project is not inside a git repository
    #[error("not a git repository: {path}")]
    NotARepository { path: PathBuf },

    /// The manifest is not tracked at the requested reference
    #[error("{file} is not tracked at '{reference}'")]
    NotTracked { file: String, reference: String },

    /// The reference is empty, malformed, or unknown to git
    #[error("invalid reference '{reference}': {message}")]
    InvalidReference { reference: String, message: String },

    /// git could not be run or exited with an unrecognised failure
    #[error("{command} failed: {message}")]
    CommandFailed { command: String, message: String },

    /// The snapshot returned by git could not be parsed
    #[error("previous manifest at '{reference}' is unreadable: {message}")]
    Snapshot { reference: String, message: String },
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new ReadError, mapping a missing file to NotFound
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            return ManifestError::not_found(path);
        }
        ManifestError::ReadError { path, source }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidStructure error
    pub fn invalid_structure(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::InvalidStructure {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl HistoryError {
    /// Creates a new NotARepository error
    pub fn not_a_repository(path: impl Into<PathBuf>) -> Self {
        HistoryError::NotARepository { path: path.into() }
    }

    /// Creates a new NotTracked error
    pub fn not_tracked(file: impl Into<String>, reference: impl Into<String>) -> Self {
        HistoryError::NotTracked {
            file: file.into(),
            reference: reference.into(),
        }
    }

    /// Creates a new InvalidReference error
    pub fn invalid_reference(reference: impl Into<String>, message: impl Into<String>) -> Self {
        HistoryError::InvalidReference {
            reference: reference.into(),
            message: message.into(),
        }
    }

    /// Creates a new CommandFailed error
    pub fn command_failed(command: impl Into<String>, message: impl Into<String>) -> Self {
        HistoryError::CommandFailed {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Warning shown when the comparison has to be skipped
    pub fn advisory(&self) -> String {
        match self {
            HistoryError::NotARepository { .. } => {
                "Not a git repository, can't compare with previous version".to_string()
            }
            HistoryError::NotTracked { file, .. } => {
                format!("{} not tracked in git, can't compare with previous version", file)
            }
            other => format!("Could not compare with git version: {}", other),
        }
    }

    /// Creates a new Snapshot error
    pub fn snapshot(reference: impl Into<String>, message: impl Into<String>) -> Self {
        HistoryError::Snapshot {
            reference: reference.into(),
            message: message.into(),
        }
    }
}
