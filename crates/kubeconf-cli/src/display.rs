//! Display formatting for CLI output

use console::style;
use kubeconf_core::Config;
use miette::Diagnostic;
use std::io::{self, Write};

use crate::error::CliError;

/// Print an error (and its help, if any) to stderr on a single line each
pub fn print_error(err: &CliError) {
    let stderr = io::stderr();
    let mut stderr = stderr.lock();
    let _ = writeln!(stderr, "{} {}", style("error:").red().bold(), err);
    if let Some(help) = err.help() {
        let _ = writeln!(stderr, "  {} {}", style("help:").cyan(), help);
    }
}

/// Render the `get-contexts` table
pub fn write_contexts_table(out: &mut dyn Write, config: &Config) -> io::Result<()> {
    let headers = ["CURRENT", "NAME", "CLUSTER", "AUTHINFO", "NAMESPACE"];
    let rows: Vec<[&str; 5]> = config
        .contexts
        .iter()
        .map(|(name, context)| {
            let current = if config.current_context() == Some(name.as_str()) {
                "*"
            } else {
                ""
            };
            [
                current,
                name.as_str(),
                context.cluster.as_str(),
                context.user.as_str(),
                context.namespace.as_deref().unwrap_or(""),
            ]
        })
        .collect();

    let mut widths = headers.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    write_row(out, &headers, &widths)?;
    for row in &rows {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

fn write_row(out: &mut dyn Write, cells: &[&str; 5], widths: &[usize; 5]) -> io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("   ");
    writeln!(out, "{}", line.trim_end())
}
