//! Kubeconfig document model
//!
//! Only `contexts` and `current-context` are interpreted. Clusters, users,
//! preferences and any field this crate does not know about are carried as
//! opaque YAML and written back untouched, so a load/save round trip does not
//! clobber edits made by other tooling.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

use crate::error::{CoreError, Result};

/// A kubeconfig document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(rename = "apiVersion", default = "default_api_version")]
    pub api_version: String,

    #[serde(default = "default_kind")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Value>,

    /// Cluster entries, not interpreted
    #[serde(default, deserialize_with = "null_as_default")]
    pub clusters: Vec<Value>,

    /// Credential entries, not interpreted
    #[serde(default, deserialize_with = "null_as_default")]
    pub users: Vec<Value>,

    /// Contexts keyed by name, in file order
    #[serde(default, with = "named_contexts")]
    pub contexts: IndexMap<String, Context>,

    /// Name of the active context, empty when unset
    #[serde(
        rename = "current-context",
        default,
        deserialize_with = "null_as_default"
    )]
    pub current_context: String,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A context: a named pairing of a cluster and a credential
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Context {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cluster: String,

    /// Credential (auth info) reference
    #[serde(default, deserialize_with = "null_as_default")]
    pub user: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Context {
    pub fn new(cluster: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            cluster: cluster.into(),
            user: user.into(),
            ..Self::default()
        }
    }
}

fn default_api_version() -> String {
    "v1".to_string()
}

fn default_kind() -> String {
    "Config".to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_version: default_api_version(),
            kind: default_kind(),
            preferences: None,
            clusters: Vec::new(),
            users: Vec::new(),
            contexts: IndexMap::new(),
            current_context: String::new(),
            extra: IndexMap::new(),
        }
    }
}

impl Config {
    /// Parse a kubeconfig. `path` is only used in error messages.
    ///
    /// An empty file is an empty document.
    pub fn from_yaml(content: &str, path: &Path) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| CoreError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load a kubeconfig file; a missing file is an empty document
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_yaml(&content, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "kubeconfig missing, starting empty");
                Ok(Self::default())
            }
            Err(e) => Err(CoreError::file_access(path, e)),
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Get a context by name
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.get(name)
    }

    pub fn has_context(&self, name: &str) -> bool {
        self.contexts.contains_key(name)
    }

    /// List all context names in file order
    pub fn context_names(&self) -> Vec<&str> {
        self.contexts.keys().map(String::as_str).collect()
    }

    /// The active context name, `None` when unset
    pub fn current_context(&self) -> Option<&str> {
        if self.current_context.is_empty() {
            None
        } else {
            Some(&self.current_context)
        }
    }
}

/// Encodes the context map as the kubeconfig named list
/// `[{name, context}]`, rejecting repeated names on the way in
mod named_contexts {
    use indexmap::IndexMap;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Context;

    #[derive(Serialize)]
    struct NamedContextRef<'a> {
        name: &'a str,
        context: &'a Context,
    }

    #[derive(Deserialize)]
    struct NamedContext {
        name: String,
        #[serde(default)]
        context: Option<Context>,
    }

    pub fn serialize<S>(contexts: &IndexMap<String, Context>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(
            contexts
                .iter()
                .map(|(name, context)| NamedContextRef { name, context }),
        )
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<IndexMap<String, Context>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entries = Option::<Vec<NamedContext>>::deserialize(deserializer)?.unwrap_or_default();
        let mut contexts = IndexMap::with_capacity(entries.len());
        for entry in entries {
            if contexts.contains_key(&entry.name) {
                return Err(D::Error::custom(format!(
                    "duplicate context name \"{}\"",
                    entry.name
                )));
            }
            contexts.insert(entry.name, entry.context.unwrap_or_default());
        }
        Ok(contexts)
    }
}
