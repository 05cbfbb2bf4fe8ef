//! Error types for cachetree
//!
//! All modules use `CacheTreeResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for cachetree operations
pub type CacheTreeResult<T> = Result<T, CacheTreeError>;

/// All errors that can occur in cachetree
#[derive(Error, Debug)]
pub enum CacheTreeError {
    // Report errors
    #[error("Malformed record at line {line}: {field} = {value:?} ({reason})")]
    MalformedRecord {
        line: usize,
        field: String,
        value: String,
        reason: String,
    },

    // Collaborator errors
    #[error("Command failed: {command} ({status})\n{output}")]
    CollaboratorFailure {
        command: String,
        status: String,
        output: String,
    },

    #[error("Failed to run command: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Usage errors
    #[error("Missing required option {option} for {mode} mode")]
    MissingRequiredOption { option: String, mode: String },

    #[error("Invalid cutoff: {0}")]
    InvalidCutoff(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CacheTreeError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a collaborator failure from a finished command
    pub fn collaborator(
        command: impl Into<String>,
        status: impl ToString,
        output: impl Into<String>,
    ) -> Self {
        Self::CollaboratorFailure {
            command: command.into(),
            status: status.to_string(),
            output: output.into(),
        }
    }

    /// Create a malformed record error
    pub fn malformed(
        line: usize,
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::MalformedRecord {
            line,
            field: field.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::MissingRequiredOption { .. } => {
                Some("Pass a cutoff, e.g. --until 72h or --until 2024-01-31")
            }
            Self::InvalidCutoff(_) => Some(
                "Use a Unix timestamp, a date like 2024-01-31, or a duration like 72h or 1h30m",
            ),
            Self::CommandFailed { .. } => {
                Some("Check that docker with the buildx plugin is installed and on PATH")
            }
            _ => None,
        }
    }
}
