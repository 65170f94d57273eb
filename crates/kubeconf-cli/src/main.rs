//! kubeconf CLI - rename and switch kubeconfig contexts, generate ConfigMaps

use clap::{Parser, Subcommand};
use kubeconf_core::PathOptions;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;
mod error;
mod exit_codes;

use commands::config::ContextsOutput;
use commands::update::{ConfigMapArgs, ManifestOutput};
use error::{CliError, Result};

#[derive(Parser)]
#[command(name = "kubeconf")]
#[command(author = "kubeconf Contributors")]
#[command(version)]
#[command(about = "Manage kubeconfig contexts and generate ConfigMaps", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the kubeconfig file to use
    #[arg(long, global = true)]
    kubeconfig: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Modify kubeconfig files
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Update a resource from local files or literal values
    #[command(subcommand)]
    Update(UpdateCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Rename a context in the kubeconfig file
    RenameContext {
        /// Context to rename
        context_name: String,

        /// New name for the context
        new_name: String,
    },

    /// Set the current context
    UseContext {
        /// Context to switch to
        context_name: String,
    },

    /// Display the current context
    CurrentContext,

    /// List the contexts in the kubeconfig file
    GetContexts {
        /// Output format
        #[arg(short, long, value_enum)]
        output: Option<ContextsOutput>,
    },
}

#[derive(Subcommand)]
enum UpdateCommands {
    /// Update a configmap from a local file, directory or literal value
    #[command(visible_alias = "cm")]
    Configmap {
        /// ConfigMap name
        name: String,

        /// File or directory to read ([key=]path); a directory adds every
        /// regular file whose name is a valid key
        #[arg(long = "from-file")]
        from_file: Vec<String>,

        /// Literal value to insert (key=value)
        #[arg(long = "from-literal")]
        from_literal: Vec<String>,

        /// File of key=value lines (e.g. a Docker .env file)
        #[arg(long = "from-env-file")]
        from_env_file: Option<PathBuf>,

        /// Namespace to put in the generated manifest
        #[arg(short, long)]
        namespace: Option<String>,

        /// Print the generated manifest
        #[arg(short, long, value_enum)]
        output: Option<ManifestOutput>,
    },
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli, out: &mut dyn Write) -> Result<()> {
    match cli.command {
        Commands::Config(command) => {
            let access = PathOptions::from_env(cli.kubeconfig)?;
            match command {
                ConfigCommands::RenameContext {
                    context_name,
                    new_name,
                } => commands::config::rename_context(&access, out, &context_name, &new_name),
                ConfigCommands::UseContext { context_name } => {
                    commands::config::use_context(&access, out, &context_name)
                }
                ConfigCommands::CurrentContext => commands::config::current_context(&access, out),
                ConfigCommands::GetContexts { output } => {
                    commands::config::get_contexts(&access, out, output)
                }
            }
        }

        Commands::Update(UpdateCommands::Configmap {
            name,
            from_file,
            from_literal,
            from_env_file,
            namespace,
            output,
        }) => commands::update::configmap(
            out,
            ConfigMapArgs {
                name,
                from_file,
                from_literal,
                from_env_file,
                namespace,
                output,
            },
        ),
    }
}

fn main() -> ExitCode {
    miette::set_panic_hook();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            let code = if err.use_stderr() {
                exit_codes::USAGE_ERROR
            } else {
                exit_codes::SUCCESS
            };
            return ExitCode::from(code as u8);
        }
    };
    init_tracing(cli.debug);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = run(cli, &mut out).and_then(|()| out.flush().map_err(CliError::from));

    match result {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            display::print_error(&err);
            ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_configmap_alias() {
        let cli = Cli::try_parse_from([
            "kubeconf",
            "update",
            "cm",
            "cfg",
            "--from-literal=key1=val1",
            "--from-literal",
            "key2=val2",
        ])
        .unwrap();

        match cli.command {
            Commands::Update(UpdateCommands::Configmap {
                name, from_literal, ..
            }) => {
                assert_eq!(name, "cfg");
                assert_eq!(from_literal, vec!["key1=val1", "key2=val2"]);
            }
            _ => panic!("expected update configmap"),
        }
    }
}
