//! Config commands - inspect and modify contexts in the kubeconfig file

use clap::ValueEnum;
use kubeconf_core::{ConfigAccess, RenameContextOptions, UseContextOptions};
use std::io::Write;

use crate::display;
use crate::error::{CliError, Result};

/// Output format of `get-contexts`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ContextsOutput {
    /// Context names only, one per line
    Name,
}

/// Rename a context, keeping the current context pointed at it
pub fn rename_context(
    access: &dyn ConfigAccess,
    out: &mut dyn Write,
    context_name: &str,
    new_name: &str,
) -> Result<()> {
    RenameContextOptions::new(context_name, new_name).run(access)?;
    tracing::info!(from = context_name, to = new_name, "context renamed");
    writeln!(out, "Context {:?} was renamed to {:?}.", context_name, new_name)?;
    Ok(())
}

/// Switch the current context
pub fn use_context(access: &dyn ConfigAccess, out: &mut dyn Write, context_name: &str) -> Result<()> {
    UseContextOptions::new(context_name).run(access)?;
    writeln!(out, "Switched to context {:?}.", context_name)?;
    Ok(())
}

/// Print the current context
pub fn current_context(access: &dyn ConfigAccess, out: &mut dyn Write) -> Result<()> {
    let config = access.starting_config()?;
    let current = config
        .current_context()
        .ok_or_else(|| CliError::other("current-context is not set"))?;
    writeln!(out, "{}", current)?;
    Ok(())
}

/// List contexts
pub fn get_contexts(
    access: &dyn ConfigAccess,
    out: &mut dyn Write,
    output: Option<ContextsOutput>,
) -> Result<()> {
    let config = access.starting_config()?;
    match output {
        Some(ContextsOutput::Name) => {
            for name in config.context_names() {
                writeln!(out, "{}", name)?;
            }
        }
        None => display::write_contexts_table(out, &config)?,
    }
    Ok(())
}
