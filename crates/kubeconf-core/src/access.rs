//! Access to the kubeconfig file
//!
//! Commands never reach for the kubeconfig on their own; they are handed a
//! [`ConfigAccess`] which knows where the document lives and how to persist it:
//! - `PathOptions`: the real file (`--kubeconfig`, `$KUBECONFIG`, `~/.kube/config`)
//! - `MemoryConfigAccess`: an in-memory document for tests

use std::ffi::OsString;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::error::{CoreError, Result};
use crate::kubeconfig::Config;

/// Environment variable naming the kubeconfig file
pub const KUBECONFIG_ENV: &str = "KUBECONFIG";

/// Load/save access to a single kubeconfig document
pub trait ConfigAccess {
    /// Load the document as it currently is on disk
    fn starting_config(&self) -> Result<Config>;

    /// The file used when no explicit file was given
    fn default_filename(&self) -> PathBuf;

    fn is_explicit_file(&self) -> bool;

    fn explicit_file(&self) -> Option<PathBuf>;

    /// Persist the whole document
    fn save_config(&self, config: &Config) -> Result<()>;

    /// The file operations act on, for error messages
    fn config_file(&self) -> PathBuf {
        match self.explicit_file() {
            Some(path) if self.is_explicit_file() => path,
            _ => self.default_filename(),
        }
    }
}

/// Load the document, apply `f`, and save the result.
///
/// Nothing is written unless `f` succeeds.
pub fn modify_config<A, F>(access: &A, f: F) -> Result<Config>
where
    A: ConfigAccess + ?Sized,
    F: FnOnce(&Config, &Path) -> Result<Config>,
{
    let config_file = access.config_file();
    let config = access.starting_config()?;
    let updated = f(&config, &config_file)?;
    access.save_config(&updated)?;
    Ok(updated)
}

/// File-backed kubeconfig access
#[derive(Debug, Clone)]
pub struct PathOptions {
    /// `~/.kube/config`
    pub global_file: PathBuf,
    /// Value of `$KUBECONFIG`, if set
    pub env_value: Option<OsString>,
    /// `--kubeconfig`
    pub explicit_file: Option<PathBuf>,
}

impl PathOptions {
    /// Resolve locations from the process environment
    pub fn from_env(explicit_file: Option<PathBuf>) -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| CoreError::FileAccess {
            path: PathBuf::from("~"),
            message: "Could not determine home directory".to_string(),
        })?;
        Ok(Self {
            global_file: home.join(".kube").join("config"),
            env_value: std::env::var_os(KUBECONFIG_ENV),
            explicit_file,
        })
    }

    /// Use exactly one file, ignoring the environment
    pub fn for_file(path: impl Into<PathBuf>) -> Self {
        Self {
            global_file: path.into(),
            env_value: None,
            explicit_file: None,
        }
    }

    /// First non-empty entry of `$KUBECONFIG`. Later entries are ignored since
    /// documents are never merged.
    fn env_file(&self) -> Option<PathBuf> {
        let value = self.env_value.as_ref()?;
        let mut paths = std::env::split_paths(value).filter(|p| !p.as_os_str().is_empty());
        let first = paths.next()?;
        if paths.next().is_some() {
            tracing::warn!(
                file = %first.display(),
                "{} lists several files, only the first is used",
                KUBECONFIG_ENV
            );
        }
        Some(first)
    }
}

impl ConfigAccess for PathOptions {
    fn starting_config(&self) -> Result<Config> {
        let path = self.config_file();
        tracing::debug!(path = %path.display(), "loading kubeconfig");
        Config::load_from(&path)
    }

    fn default_filename(&self) -> PathBuf {
        self.env_file().unwrap_or_else(|| self.global_file.clone())
    }

    fn is_explicit_file(&self) -> bool {
        self.explicit_file.is_some()
    }

    fn explicit_file(&self) -> Option<PathBuf> {
        self.explicit_file.clone()
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        let path = self.config_file();
        let content = config.to_yaml()?;
        write_atomic(&path, content.as_bytes())?;
        tracing::debug!(path = %path.display(), "saved kubeconfig");
        Ok(())
    }
}

/// Write to a temporary sibling, then rename it over `path`, so readers see
/// either the old or the new document and never a partial one.
///
/// A symlinked `path` is followed and its target replaced, keeping the link.
/// The new file keeps the old file's permissions; a brand-new file is
/// created owner-only since kubeconfigs hold credentials.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| CoreError::file_access(parent, e))?;
    }
    let permissions = fs::metadata(&target).ok().map(|m| m.permissions());

    let temp_name = format!(
        ".{}.{}.tmp",
        target
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = target.with_file_name(temp_name);
    let _ = fs::remove_file(&temp_path);

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let written = options
        .open(&temp_path)
        .and_then(|mut file| {
            if let Some(permissions) = permissions {
                file.set_permissions(permissions)?;
            }
            file.write_all(content)?;
            file.sync_all()
        })
        .and_then(|()| fs::rename(&temp_path, &target));

    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(CoreError::file_access(path, e));
    }
    Ok(())
}

/// In-memory kubeconfig access for tests
#[derive(Clone)]
pub struct MemoryConfigAccess {
    config: Arc<RwLock<Config>>,
    filename: PathBuf,
    operations: Arc<RwLock<OperationCounts>>,
}

/// Counts of operations performed, for assertions
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OperationCounts {
    pub loads: usize,
    pub saves: usize,
}

impl MemoryConfigAccess {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            filename: PathBuf::from("/memory/kubeconfig"),
            operations: Arc::new(RwLock::new(OperationCounts::default())),
        }
    }

    /// Report a different file name in error messages
    pub fn with_filename(mut self, filename: impl Into<PathBuf>) -> Self {
        self.filename = filename.into();
        self
    }

    /// The document as last saved
    pub fn config(&self) -> Config {
        self.config.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn operation_counts(&self) -> OperationCounts {
        self.operations
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl ConfigAccess for MemoryConfigAccess {
    fn starting_config(&self) -> Result<Config> {
        self.operations
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .loads += 1;
        Ok(self.config())
    }

    fn default_filename(&self) -> PathBuf {
        self.filename.clone()
    }

    fn is_explicit_file(&self) -> bool {
        false
    }

    fn explicit_file(&self) -> Option<PathBuf> {
        None
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        self.operations
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .saves += 1;
        *self.config.write().unwrap_or_else(|e| e.into_inner()) = config.clone();
        Ok(())
    }
}
