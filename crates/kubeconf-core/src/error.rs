//! Core error types

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("new name must not be empty")]
    EmptyContextName,

    #[error("no context named \"{name}\" in {}", .path.display())]
    ContextNotFound { name: String, path: PathBuf },

    #[error(
        "cannot rename the context \"{old}\", the context \"{new}\" already exists in {}",
        .path.display()
    )]
    ContextAlreadyExists {
        old: String,
        new: String,
        path: PathBuf,
    },

    #[error("Invalid kubeconfig {}: {message}", .path.display())]
    InvalidConfig { path: PathBuf, message: String },

    #[error("name must be specified")]
    MissingName,

    #[error("env-file cannot be combined with file or literal sources")]
    ConflictingSources,

    #[error("at least one source must be supplied")]
    NoSources,

    #[error("invalid literal source \"{literal}\", expected key=value")]
    MalformedLiteral { literal: String },

    #[error("invalid file source \"{source_arg}\": {reason}")]
    MalformedFileSource { source_arg: String, reason: String },

    #[error("{}:{line}: invalid env line \"{content}\", expected key=value", .path.display())]
    MalformedEnvLine {
        path: PathBuf,
        line: usize,
        content: String,
    },

    #[error("{} is not valid UTF-8: {message}", .path.display())]
    InvalidEncoding { path: PathBuf, message: String },

    #[error("\"{key}\" is not a valid config map key (from {origin})")]
    InvalidKey { key: String, origin: String },

    #[error("cannot add key \"{key}\" from {second}: already set by {first}")]
    DuplicateKey {
        key: String,
        first: String,
        second: String,
    },

    #[error("Cannot access {}: {message}", .path.display())]
    FileAccess { path: PathBuf, message: String },

    #[error("Failed to parse kubeconfig: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to render JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Broad classification of a [`CoreError`], used to pick exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing arguments, caught before any mutation
    Validation,
    /// A referenced name is absent
    NotFound,
    /// A destination name or key is already taken
    Conflict,
    /// Mutually exclusive inputs were combined
    SourceConflict,
    /// Bad literal, env-line, key or document syntax
    MalformedInput,
    /// Filesystem failure
    Io,
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::EmptyContextName | CoreError::MissingName | CoreError::NoSources => {
                ErrorKind::Validation
            }
            CoreError::ContextNotFound { .. } => ErrorKind::NotFound,
            CoreError::ContextAlreadyExists { .. } | CoreError::DuplicateKey { .. } => {
                ErrorKind::Conflict
            }
            CoreError::ConflictingSources => ErrorKind::SourceConflict,
            CoreError::MalformedLiteral { .. }
            | CoreError::MalformedFileSource { .. }
            | CoreError::MalformedEnvLine { .. }
            | CoreError::InvalidEncoding { .. }
            | CoreError::InvalidKey { .. }
            | CoreError::InvalidConfig { .. }
            | CoreError::YamlParse(_)
            | CoreError::JsonParse(_) => ErrorKind::MalformedInput,
            CoreError::FileAccess { .. } | CoreError::Io(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn file_access(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        CoreError::FileAccess {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_values_and_path() {
        let err = CoreError::ContextNotFound {
            name: "prod".to_string(),
            path: PathBuf::from("/home/me/.kube/config"),
        };
        assert_eq!(
            err.to_string(),
            "no context named \"prod\" in /home/me/.kube/config"
        );

        let err = CoreError::ContextAlreadyExists {
            old: "a".to_string(),
            new: "b".to_string(),
            path: PathBuf::from("kubeconfig"),
        };
        assert_eq!(
            err.to_string(),
            "cannot rename the context \"a\", the context \"b\" already exists in kubeconfig"
        );
    }

    #[test]
    fn test_kinds() {
        assert_eq!(CoreError::EmptyContextName.kind(), ErrorKind::Validation);
        assert_eq!(CoreError::NoSources.kind(), ErrorKind::Validation);
        assert_eq!(
            CoreError::ConflictingSources.kind(),
            ErrorKind::SourceConflict
        );
        assert_eq!(
            CoreError::DuplicateKey {
                key: "k".to_string(),
                first: "a".to_string(),
                second: "b".to_string(),
            }
            .kind(),
            ErrorKind::Conflict
        );
        assert_eq!(
            CoreError::Io(std::io::Error::other("boom")).kind(),
            ErrorKind::Io
        );
    }
}
