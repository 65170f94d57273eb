//! Env-file parsing (`key=value` per line, Docker `.env` style)

use std::path::Path;

use crate::error::{CoreError, Result};

const UTF8_BOM: char = '\u{feff}';

/// A `key=value` pair read from an env-file, with its 1-based line number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
    pub key: String,
    pub value: String,
    pub line: usize,
}

/// Read and parse an env-file
pub fn read_env_file(path: &Path) -> Result<Vec<EnvEntry>> {
    let bytes = std::fs::read(path).map_err(|e| CoreError::file_access(path, e))?;
    let content = String::from_utf8(bytes).map_err(|e| CoreError::InvalidEncoding {
        path: path.to_path_buf(),
        message: e.utf8_error().to_string(),
    })?;
    parse_env(&content, path)
}

/// Parse env-file content. `path` is only used in error messages.
///
/// Leading whitespace is ignored, blank lines and `#` comments are skipped.
/// Values are kept verbatim.
pub fn parse_env(content: &str, path: &Path) -> Result<Vec<EnvEntry>> {
    let mut entries = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line = if index == 0 {
            raw.trim_start_matches(UTF8_BOM)
        } else {
            raw
        };
        let line = line.trim_start();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let malformed = || CoreError::MalformedEnvLine {
            path: path.to_path_buf(),
            line: index + 1,
            content: raw.to_string(),
        };
        let (key, value) = line.split_once('=').ok_or_else(malformed)?;
        if key.is_empty() {
            return Err(malformed());
        }

        entries.push(EnvEntry {
            key: key.to_string(),
            value: value.to_string(),
            line: index + 1,
        });
    }

    Ok(entries)
}
