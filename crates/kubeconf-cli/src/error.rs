//! CLI error types with exit code handling
//!
//! This module provides a unified error type for CLI operations that
//! maps errors to appropriate exit codes.

use kubeconf_core::{CoreError, ErrorKind};
use miette::Diagnostic;
use thiserror::Error;

use crate::exit_codes;

/// CLI-specific error type that includes exit code information
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum CliError {
    /// Bad or conflicting arguments, malformed input
    #[error("{message}")]
    #[diagnostic(code(kubeconf::cli::validation))]
    Validation {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// A referenced context does not exist
    #[error("{message}")]
    #[diagnostic(code(kubeconf::cli::not_found))]
    NotFound {
        message: String,
        #[help]
        help: Option<String>,
    },

    /// A context or key is already taken
    #[error("{message}")]
    #[diagnostic(code(kubeconf::cli::conflict))]
    Conflict { message: String },

    /// IO error (file not found, permissions, etc.)
    #[error("IO error: {message}")]
    #[diagnostic(code(kubeconf::cli::io))]
    Io { message: String },

    /// Anything else
    #[error("{message}")]
    #[diagnostic(code(kubeconf::cli::error))]
    Other { message: String },
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Validation { .. } => exit_codes::VALIDATION_ERROR,
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::Conflict { .. } => exit_codes::CONFLICT,
            CliError::Io { .. } => exit_codes::IO_ERROR,
            CliError::Other { .. } => exit_codes::ERROR,
        }
    }

    /// Create a validation error with help text
    pub fn validation_with_help(message: impl Into<String>, help: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            help: Some(help.into()),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match (err.kind(), &err) {
            (_, CoreError::ConflictingSources) => CliError::validation_with_help(
                message,
                "use either --from-env-file, or any number of --from-file/--from-literal",
            ),
            (_, CoreError::NoSources) => CliError::validation_with_help(
                message,
                "pass --from-file, --from-literal or --from-env-file",
            ),
            (_, CoreError::ContextNotFound { .. }) => CliError::NotFound {
                message,
                help: Some("list the available contexts with `kubeconf config get-contexts`".to_string()),
            },
            (ErrorKind::Validation | ErrorKind::SourceConflict | ErrorKind::MalformedInput, _) => {
                CliError::Validation { message, help: None }
            }
            (ErrorKind::NotFound, _) => CliError::NotFound { message, help: None },
            (ErrorKind::Conflict, _) => CliError::Conflict { message },
            (ErrorKind::Io, _) => CliError::Io { message },
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io {
            message: err.to_string(),
        }
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
