//! ConfigMap generation
//!
//! A [`ConfigMapGenerator`] turns `--from-file`, `--from-literal` and
//! `--from-env-file` arguments into a [`ConfigMapArtifact`]:
//!
//! 1. `validate()` checks the argument combination without any I/O
//! 2. arguments are parsed into [`Source`] descriptors
//! 3. each source is resolved and expanded into entries
//! 4. entries are collected, rejecting any key seen twice
//!
//! Either every source is read cleanly and an artifact is returned, or
//! nothing is.

mod env_file;
mod key;
mod source;

pub use env_file::{EnvEntry, parse_env, read_env_file};
pub use key::{MAX_KEY_LENGTH, is_valid_key};
pub use source::{Source, SourceEntry};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use k8s_openapi::ByteString;
use k8s_openapi::api::core::v1::ConfigMap;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use crate::error::{CoreError, Result};

/// Arguments of `update configmap`
#[derive(Debug, Clone, Default)]
pub struct ConfigMapGenerator {
    pub name: String,
    /// `[key=]path` arguments
    pub file_sources: Vec<String>,
    /// `key=value` arguments
    pub literal_sources: Vec<String>,
    pub env_file_source: Option<PathBuf>,
}

impl ConfigMapGenerator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_file(mut self, source: impl Into<String>) -> Self {
        self.file_sources.push(source.into());
        self
    }

    pub fn with_literal(mut self, source: impl Into<String>) -> Self {
        self.literal_sources.push(source.into());
        self
    }

    pub fn with_env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.env_file_source = Some(path.into());
        self
    }

    fn env_file(&self) -> Option<&Path> {
        self.env_file_source
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    /// Check the argument combination. Performs no I/O.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(CoreError::MissingName);
        }

        let has_env_file = self.env_file().is_some();
        let has_other = !self.file_sources.is_empty() || !self.literal_sources.is_empty();

        if has_env_file && has_other {
            return Err(CoreError::ConflictingSources);
        }
        if !has_env_file && !has_other {
            return Err(CoreError::NoSources);
        }
        Ok(())
    }

    /// Parse the arguments into descriptors: files, then literals, then the
    /// env-file
    pub fn sources(&self) -> Result<Vec<Source>> {
        let mut sources = Vec::with_capacity(self.file_sources.len() + self.literal_sources.len() + 1);
        for arg in &self.file_sources {
            sources.push(Source::parse_file(arg)?);
        }
        for arg in &self.literal_sources {
            sources.push(Source::parse_literal(arg)?);
        }
        if let Some(path) = self.env_file() {
            sources.push(Source::env_file(path));
        }
        Ok(sources)
    }

    /// Validate, read every source, and build the artifact
    pub fn generate(&self) -> Result<ConfigMapArtifact> {
        self.validate()?;

        let mut data = BTreeMap::new();
        let mut origins: BTreeMap<String, String> = BTreeMap::new();

        for source in self.sources()? {
            let source = source.resolve()?;
            for entry in source.expand()? {
                if let Some(first) = origins.get(&entry.key) {
                    return Err(CoreError::DuplicateKey {
                        key: entry.key,
                        first: first.clone(),
                        second: entry.origin,
                    });
                }
                origins.insert(entry.key.clone(), entry.origin);
                data.insert(entry.key, entry.value);
            }
        }

        tracing::debug!(name = %self.name, keys = data.len(), "generated configmap");
        Ok(ConfigMapArtifact {
            name: self.name.clone(),
            data,
        })
    }
}

/// Output format of a rendered manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Yaml,
    Json,
}

/// A generated ConfigMap: a name and its key/value data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigMapArtifact {
    name: String,
    data: BTreeMap<String, Vec<u8>>,
}

impl ConfigMapArtifact {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.data
    }

    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.data.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Build the Kubernetes object. UTF-8 values go to `data`, anything else
    /// to `binaryData`.
    pub fn to_config_map(&self, namespace: Option<&str>) -> ConfigMap {
        let mut data = BTreeMap::new();
        let mut binary_data = BTreeMap::new();

        for (key, value) in &self.data {
            match std::str::from_utf8(value) {
                Ok(text) => {
                    data.insert(key.clone(), text.to_string());
                }
                Err(_) => {
                    binary_data.insert(key.clone(), ByteString(value.clone()));
                }
            }
        }

        ConfigMap {
            metadata: ObjectMeta {
                name: Some(self.name.clone()),
                namespace: namespace.map(str::to_string),
                ..ObjectMeta::default()
            },
            data: (!data.is_empty()).then_some(data),
            binary_data: (!binary_data.is_empty()).then_some(binary_data),
            ..ConfigMap::default()
        }
    }

    pub fn to_manifest(&self, namespace: Option<&str>, format: ManifestFormat) -> Result<String> {
        let config_map = self.to_config_map(namespace);
        match format {
            ManifestFormat::Yaml => Ok(serde_yaml::to_string(&config_map)?),
            ManifestFormat::Json => Ok(serde_json::to_string_pretty(&config_map)?),
        }
    }
}
