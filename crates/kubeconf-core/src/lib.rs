//! kubeconf Core - kubeconfig context registry and ConfigMap generation
//!
//! This crate provides:
//! - `Config`: the kubeconfig document, with contexts keyed by name
//! - `ConfigAccess`: load/save access to the kubeconfig file
//! - `rename_context` / `use_context`: context registry operations
//! - `ConfigMapGenerator`: builds ConfigMap data from files, literals and env-files

pub mod access;
pub mod error;
pub mod generator;
pub mod kubeconfig;
pub mod registry;

pub use access::{
    ConfigAccess, KUBECONFIG_ENV, MemoryConfigAccess, OperationCounts, PathOptions, modify_config,
    write_atomic,
};
pub use error::{CoreError, ErrorKind, Result};
pub use generator::{ConfigMapArtifact, ConfigMapGenerator, ManifestFormat, Source};
pub use kubeconfig::{Config, Context};
pub use registry::{RenameContextOptions, UseContextOptions, rename_context, use_context};
