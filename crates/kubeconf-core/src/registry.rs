//! Context registry operations
//!
//! The operations here are pure: they take a document and return an updated
//! copy, leaving the input untouched. Persisting the result is the caller's
//! business, normally through [`modify_config`].

use std::path::Path;

use crate::access::{ConfigAccess, modify_config};
use crate::error::{CoreError, Result};
use crate::kubeconfig::Config;

/// Rename the context `old` to `new`.
///
/// The entry keeps its position and value. If `old` was the current context,
/// the current context follows the rename. `config_file` is only used in
/// error messages.
pub fn rename_context(config: &Config, old: &str, new: &str, config_file: &Path) -> Result<Config> {
    if new.is_empty() {
        return Err(CoreError::EmptyContextName);
    }
    if !config.has_context(old) {
        return Err(CoreError::ContextNotFound {
            name: old.to_string(),
            path: config_file.to_path_buf(),
        });
    }
    if config.has_context(new) {
        return Err(CoreError::ContextAlreadyExists {
            old: old.to_string(),
            new: new.to_string(),
            path: config_file.to_path_buf(),
        });
    }

    let mut updated = config.clone();
    updated.contexts = config
        .contexts
        .iter()
        .map(|(name, context)| {
            let name = if name == old { new } else { name.as_str() };
            (name.to_string(), context.clone())
        })
        .collect();

    if updated.current_context == old {
        updated.current_context = new.to_string();
    }

    tracing::debug!(old, new, "renamed context");
    Ok(updated)
}

/// Make `name` the current context
pub fn use_context(config: &Config, name: &str, config_file: &Path) -> Result<Config> {
    if name.is_empty() {
        return Err(CoreError::EmptyContextName);
    }
    if !config.has_context(name) {
        return Err(CoreError::ContextNotFound {
            name: name.to_string(),
            path: config_file.to_path_buf(),
        });
    }

    let mut updated = config.clone();
    updated.current_context = name.to_string();
    Ok(updated)
}

/// Arguments of `config rename-context`
#[derive(Debug, Clone)]
pub struct RenameContextOptions {
    pub context_name: String,
    pub new_name: String,
}

impl RenameContextOptions {
    pub fn new(context_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            context_name: context_name.into(),
            new_name: new_name.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.new_name.is_empty() {
            return Err(CoreError::EmptyContextName);
        }
        Ok(())
    }

    /// Validate, rename, and save the document
    pub fn run(&self, access: &(impl ConfigAccess + ?Sized)) -> Result<()> {
        self.validate()?;
        modify_config(access, |config, config_file| {
            rename_context(config, &self.context_name, &self.new_name, config_file)
        })?;
        Ok(())
    }
}

/// Arguments of `config use-context`
#[derive(Debug, Clone)]
pub struct UseContextOptions {
    pub context_name: String,
}

impl UseContextOptions {
    pub fn new(context_name: impl Into<String>) -> Self {
        Self {
            context_name: context_name.into(),
        }
    }

    pub fn run(&self, access: &(impl ConfigAccess + ?Sized)) -> Result<()> {
        modify_config(access, |config, config_file| {
            use_context(config, &self.context_name, config_file)
        })?;
        Ok(())
    }
}
