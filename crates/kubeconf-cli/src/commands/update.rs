//! Update command - generate ConfigMap data from local sources
//!
//! Applying the result to a cluster is not supported; the generated ConfigMap
//! is summarised or printed as a manifest.

use clap::ValueEnum;
use console::style;
use kubeconf_core::{ConfigMapGenerator, ManifestFormat};
use std::io::Write;
use std::path::PathBuf;

use crate::error::Result;

/// Manifest output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ManifestOutput {
    Yaml,
    Json,
}

impl From<ManifestOutput> for ManifestFormat {
    fn from(output: ManifestOutput) -> Self {
        match output {
            ManifestOutput::Yaml => ManifestFormat::Yaml,
            ManifestOutput::Json => ManifestFormat::Json,
        }
    }
}

/// Arguments of `update configmap`
#[derive(Debug, Clone, Default)]
pub struct ConfigMapArgs {
    pub name: String,
    pub from_file: Vec<String>,
    pub from_literal: Vec<String>,
    pub from_env_file: Option<PathBuf>,
    pub namespace: Option<String>,
    pub output: Option<ManifestOutput>,
}

/// Run `update configmap`
pub fn configmap(out: &mut dyn Write, args: ConfigMapArgs) -> Result<()> {
    let generator = ConfigMapGenerator {
        name: args.name,
        file_sources: args.from_file,
        literal_sources: args.from_literal,
        env_file_source: args.from_env_file,
    };
    let artifact = generator.generate()?;

    match args.output {
        Some(format) => {
            let manifest = artifact.to_manifest(args.namespace.as_deref(), format.into())?;
            write!(out, "{}", manifest)?;
            if !manifest.ends_with('\n') {
                writeln!(out)?;
            }
        }
        None => {
            writeln!(
                out,
                "{} configmap/{} generated ({} keys)",
                style("✓").green(),
                artifact.name(),
                artifact.len()
            )?;
            for key in artifact.keys() {
                writeln!(out, "  {}", key)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_codes;

    fn args(name: &str) -> ConfigMapArgs {
        ConfigMapArgs {
            name: name.to_string(),
            ..ConfigMapArgs::default()
        }
    }

    #[test]
    fn test_summary_lists_keys() {
        let mut out = Vec::new();
        configmap(
            &mut out,
            ConfigMapArgs {
                from_literal: vec!["key2=val2".to_string(), "key1=val1".to_string()],
                ..args("cfg")
            },
        )
        .unwrap();

        let text = console::strip_ansi_codes(&String::from_utf8(out).unwrap()).to_string();
        assert_eq!(text, "✓ configmap/cfg generated (2 keys)\n  key1\n  key2\n");
    }

    #[test]
    fn test_yaml_manifest() {
        let mut out = Vec::new();
        configmap(
            &mut out,
            ConfigMapArgs {
                from_literal: vec!["key1=val1".to_string()],
                namespace: Some("apps".to_string()),
                output: Some(ManifestOutput::Yaml),
                ..args("cfg")
            },
        )
        .unwrap();

        let manifest: serde_yaml::Value = serde_yaml::from_slice(&out).unwrap();
        assert_eq!(manifest["kind"], "ConfigMap");
        assert_eq!(manifest["metadata"]["namespace"], "apps");
        assert_eq!(manifest["data"]["key1"], "val1");
    }

    #[test]
    fn test_conflicting_sources() {
        let err = configmap(
            &mut Vec::new(),
            ConfigMapArgs {
                from_file: vec!["a.txt".to_string()],
                from_env_file: Some(PathBuf::from("env.list")),
                ..args("cfg")
            },
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "env-file cannot be combined with file or literal sources"
        );
        assert_eq!(err.exit_code(), exit_codes::VALIDATION_ERROR);
    }
}
