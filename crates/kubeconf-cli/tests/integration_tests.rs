//! Integration tests for CLI commands

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

const KUBECONFIG: &str = r#"apiVersion: v1
kind: Config
clusters:
- name: cluster
  cluster:
    server: https://127.0.0.1:6443
users:
- name: auth-info
  user:
    token: secret-token
contexts:
- name: old-name
  context:
    cluster: cluster
    user: auth-info
- name: taken
  context:
    cluster: cluster
    user: auth-info
current-context: old-name
"#;

/// Helper to run kubeconf command
fn kubeconf(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_kubeconf"))
        .args(args)
        .env_remove("KUBECONFIG")
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute kubeconf")
}

fn write_kubeconfig(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("config");
    fs::write(&path, KUBECONFIG).unwrap();
    path
}

fn with_kubeconfig<'a>(path: &'a Path, args: &[&'a str]) -> Vec<&'a str> {
    let mut full = vec!["--kubeconfig", path.to_str().unwrap()];
    full.extend_from_slice(args);
    full
}

mod rename_context_command {
    use super::*;

    #[test]
    fn test_rename_updates_file_and_current_context() {
        let dir = TempDir::new().unwrap();
        let path = write_kubeconfig(&dir);

        let output = kubeconf(&with_kubeconfig(
            &path,
            &["config", "rename-context", "old-name", "new-name"],
        ));

        assert!(output.status.success(), "Expected success: {:?}", output);
        assert_eq!(
            String::from_utf8_lossy(&output.stdout),
            "Context \"old-name\" was renamed to \"new-name\".\n"
        );

        let saved: serde_yaml::Value =
            serde_yaml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["current-context"], "new-name");
        assert_eq!(saved["contexts"][0]["name"], "new-name");
        assert_eq!(saved["contexts"][0]["context"]["user"], "auth-info");
        assert_eq!(saved["contexts"][1]["name"], "taken");
        assert_eq!(saved["users"][0]["user"]["token"], "secret-token");
    }

    #[test]
    fn test_rename_missing_context_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = write_kubeconfig(&dir);

        let output = kubeconf(&with_kubeconfig(
            &path,
            &["config", "rename-context", "nope", "new-name"],
        ));

        assert_eq!(output.status.code(), Some(3));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("no context named \"nope\""), "{stderr}");
        assert!(stderr.contains(path.to_str().unwrap()), "{stderr}");
        assert!(output.stdout.is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), KUBECONFIG);
    }

    #[test]
    fn test_rename_onto_existing_context() {
        let dir = TempDir::new().unwrap();
        let path = write_kubeconfig(&dir);

        let output = kubeconf(&with_kubeconfig(
            &path,
            &["config", "rename-context", "old-name", "taken"],
        ));

        assert_eq!(output.status.code(), Some(4));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("the context \"taken\" already exists"), "{stderr}");
        assert_eq!(fs::read_to_string(&path).unwrap(), KUBECONFIG);
    }

    #[test]
    fn test_rename_to_empty_name() {
        let dir = TempDir::new().unwrap();
        let path = write_kubeconfig(&dir);

        let output = kubeconf(&with_kubeconfig(
            &path,
            &["config", "rename-context", "old-name", ""],
        ));

        assert_eq!(output.status.code(), Some(2));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("new name must not be empty"), "{stderr}");
    }

    #[test]
    fn test_rename_twice_fails_second_time() {
        let dir = TempDir::new().unwrap();
        let path = write_kubeconfig(&dir);
        let args = with_kubeconfig(&path, &["config", "rename-context", "old-name", "new-name"]);

        assert!(kubeconf(&args).status.success());
        assert_eq!(kubeconf(&args).status.code(), Some(3));
    }

    #[test]
    fn test_wrong_argument_count() {
        let output = kubeconf(&["config", "rename-context", "only-one"]);
        assert_eq!(output.status.code(), Some(64));
        assert!(!output.stderr.is_empty());

        let output = kubeconf(&["config", "rename-context", "a", "b", "c"]);
        assert_eq!(output.status.code(), Some(64));
    }

    #[test]
    fn test_help_exits_zero() {
        let output = kubeconf(&["config", "rename-context", "--help"]);
        assert_eq!(output.status.code(), Some(0));
        assert!(String::from_utf8_lossy(&output.stdout).contains("New name for the context"));
    }
}

mod context_commands {
    use super::*;

    #[test]
    fn test_use_and_current_context() {
        let dir = TempDir::new().unwrap();
        let path = write_kubeconfig(&dir);

        let output = kubeconf(&with_kubeconfig(&path, &["config", "use-context", "taken"]));
        assert!(output.status.success());
        assert_eq!(
            String::from_utf8_lossy(&output.stdout),
            "Switched to context \"taken\".\n"
        );

        let output = kubeconf(&with_kubeconfig(&path, &["config", "current-context"]));
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout), "taken\n");
    }

    #[test]
    fn test_get_contexts_names() {
        let dir = TempDir::new().unwrap();
        let path = write_kubeconfig(&dir);

        let output = kubeconf(&with_kubeconfig(&path, &["config", "get-contexts", "-o", "name"]));
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout), "old-name\ntaken\n");
    }

    #[test]
    fn test_missing_kubeconfig_has_no_contexts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing");

        let output = kubeconf(&with_kubeconfig(&path, &["config", "current-context"]));
        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&output.stderr).contains("current-context is not set"));
        assert!(!path.exists());
    }
}

mod update_configmap_command {
    use super::*;

    #[test]
    fn test_literals_to_yaml() {
        let output = kubeconf(&[
            "update",
            "configmap",
            "cfg",
            "--from-literal=key1=val1",
            "--from-literal=key2=val2",
            "-o",
            "yaml",
        ]);

        assert!(output.status.success(), "{:?}", output);
        let manifest: serde_yaml::Value = serde_yaml::from_slice(&output.stdout).unwrap();
        assert_eq!(manifest["metadata"]["name"], "cfg");
        assert_eq!(manifest["data"]["key1"], "val1");
        assert_eq!(manifest["data"]["key2"], "val2");
    }

    #[test]
    fn test_directory_source() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("game.properties"), "lives=3\n").unwrap();
        fs::write(dir.path().join("ui.properties"), "color=blue\n").unwrap();

        let output = kubeconf(&[
            "update",
            "cm",
            "game-config",
            &format!("--from-file={}", dir.path().display()),
        ]);

        assert!(output.status.success(), "{:?}", output);
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("configmap/game-config generated (2 keys)"));
        assert!(stdout.contains("  game.properties\n  ui.properties\n"));
    }

    #[test]
    fn test_env_file_with_file_source_is_rejected_before_reading() {
        let output = kubeconf(&[
            "update",
            "configmap",
            "cfg",
            "--from-file=a.txt",
            "--from-env-file=env.list",
        ]);

        assert_eq!(output.status.code(), Some(2));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("env-file cannot be combined with file or literal sources"),
            "{stderr}"
        );
    }

    #[test]
    fn test_no_sources() {
        let output = kubeconf(&["update", "configmap", "cfg"]);

        assert_eq!(output.status.code(), Some(2));
        assert!(String::from_utf8_lossy(&output.stderr).contains("at least one source must be supplied"));
    }

    #[test]
    fn test_malformed_env_line() {
        let dir = TempDir::new().unwrap();
        let env = dir.path().join("app.env");
        fs::write(&env, "A=1\nbroken\n").unwrap();

        let output = kubeconf(&[
            "update",
            "configmap",
            "cfg",
            &format!("--from-env-file={}", env.display()),
        ]);

        assert_eq!(output.status.code(), Some(2));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains(":2: invalid env line"), "{stderr}");
    }

    #[test]
    fn test_duplicate_key() {
        let output = kubeconf(&[
            "update",
            "configmap",
            "cfg",
            "--from-literal=k=1",
            "--from-literal=k=2",
        ]);

        assert_eq!(output.status.code(), Some(4));
        assert!(String::from_utf8_lossy(&output.stderr).contains("cannot add key \"k\""));
    }
}
