//! Source descriptors for ConfigMap generation
//!
//! Each descriptor kind has its own parse and expansion step. Parsing never
//! touches the filesystem; [`Source::resolve`] and [`Source::expand`] do.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::env_file::read_env_file;
use super::key::is_valid_key;
use crate::error::{CoreError, Result};

/// Where ConfigMap data comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// `--from-literal=key=value`
    Literal { key: String, value: String },
    /// `--from-file=[key=]path`; without a key the file name is used
    File { key: Option<String>, path: PathBuf },
    /// Every regular file directly inside `path`
    Directory { path: PathBuf },
    /// `--from-env-file=path`
    EnvFile { path: PathBuf },
}

/// A single key produced by expanding a source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    pub key: String,
    pub value: Vec<u8>,
    /// Human readable origin, used in duplicate-key errors
    pub origin: String,
}

impl Source {
    /// Parse a `key=value` literal
    pub fn parse_literal(arg: &str) -> Result<Self> {
        match arg.split_once('=') {
            Some((key, value)) if !key.is_empty() => Ok(Source::Literal {
                key: key.to_string(),
                value: value.to_string(),
            }),
            _ => Err(CoreError::MalformedLiteral {
                literal: arg.to_string(),
            }),
        }
    }

    /// Parse a `path` or `key=path` file source
    pub fn parse_file(arg: &str) -> Result<Self> {
        let malformed = |reason: &str| CoreError::MalformedFileSource {
            source_arg: arg.to_string(),
            reason: reason.to_string(),
        };

        let Some((key, path)) = arg.split_once('=') else {
            if arg.is_empty() {
                return Err(malformed("file path missing"));
            }
            return Ok(Source::File {
                key: None,
                path: PathBuf::from(arg),
            });
        };

        if key.is_empty() {
            return Err(malformed("key name for file path missing"));
        }
        if path.is_empty() {
            return Err(malformed("file path for key name missing"));
        }
        if path.contains('=') {
            return Err(malformed("key names or file paths cannot contain '='"));
        }

        Ok(Source::File {
            key: Some(key.to_string()),
            path: PathBuf::from(path),
        })
    }

    pub fn env_file(path: impl Into<PathBuf>) -> Self {
        Source::EnvFile { path: path.into() }
    }

    /// Turn a keyless file source pointing at a directory into a
    /// [`Source::Directory`]
    pub fn resolve(self) -> Result<Self> {
        let (key, path) = match self {
            Source::File { key, path } => (key, path),
            other => return Ok(other),
        };

        let metadata = fs::metadata(&path).map_err(|e| CoreError::file_access(&path, e))?;
        if !metadata.is_dir() {
            return Ok(Source::File { key, path });
        }
        match key {
            None => Ok(Source::Directory { path }),
            Some(key) => Err(CoreError::MalformedFileSource {
                source_arg: format!("{}={}", key, path.display()),
                reason: "cannot give a key name for a directory path".to_string(),
            }),
        }
    }

    /// Read the source into key/value entries, validating every key
    pub fn expand(&self) -> Result<Vec<SourceEntry>> {
        match self {
            Source::Literal { key, value } => {
                let origin = self.to_string();
                check_key(key, &origin)?;
                Ok(vec![SourceEntry {
                    key: key.clone(),
                    value: value.clone().into_bytes(),
                    origin,
                }])
            }
            Source::File { key, path } => expand_file(key.as_deref(), path).map(|e| vec![e]),
            Source::Directory { path } => expand_directory(path),
            Source::EnvFile { path } => expand_env_file(path),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Literal { key, .. } => write!(f, "literal \"{key}\""),
            Source::File { path, .. } => write!(f, "file \"{}\"", path.display()),
            Source::Directory { path } => write!(f, "directory \"{}\"", path.display()),
            Source::EnvFile { path } => write!(f, "env-file \"{}\"", path.display()),
        }
    }
}

fn check_key(key: &str, origin: &str) -> Result<()> {
    if is_valid_key(key) {
        Ok(())
    } else {
        Err(CoreError::InvalidKey {
            key: key.to_string(),
            origin: origin.to_string(),
        })
    }
}

fn file_name_key(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn expand_file(key: Option<&str>, path: &Path) -> Result<SourceEntry> {
    let origin = format!("file \"{}\"", path.display());
    let key = key.map_or_else(|| file_name_key(path), str::to_string);
    check_key(&key, &origin)?;

    let value = fs::read(path).map_err(|e| CoreError::file_access(path, e))?;
    Ok(SourceEntry { key, value, origin })
}

fn expand_directory(dir: &Path) -> Result<Vec<SourceEntry>> {
    let mut entries = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(|e| CoreError::FileAccess {
            path: e.path().unwrap_or(dir).to_path_buf(),
            message: e.to_string(),
        })?;

        if !entry.file_type().is_file() {
            tracing::debug!(path = %entry.path().display(), "skipping non-regular file");
            continue;
        }
        let Some(key) = entry.file_name().to_str().filter(|name| is_valid_key(name)) else {
            tracing::debug!(path = %entry.path().display(), "skipping file with invalid key name");
            continue;
        };

        let value = fs::read(entry.path()).map_err(|e| CoreError::file_access(entry.path(), e))?;
        entries.push(SourceEntry {
            key: key.to_string(),
            value,
            origin: format!("file \"{}\"", entry.path().display()),
        });
    }

    Ok(entries)
}

fn expand_env_file(path: &Path) -> Result<Vec<SourceEntry>> {
    read_env_file(path)?
        .into_iter()
        .map(|entry| {
            let origin = format!("env-file \"{}\" line {}", path.display(), entry.line);
            check_key(&entry.key, &origin)?;
            Ok(SourceEntry {
                key: entry.key,
                value: entry.value.into_bytes(),
                origin,
            })
        })
        .collect()
}
