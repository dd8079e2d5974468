//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules to avoid code duplication.

use console::style;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::cli::GlobalOpts;
use crate::core::catalog::SqliteCatalog;
use crate::core::config::Config;
use crate::core::project::Project;
use crate::export::format_amount;

/// Everything a catalog-backed command needs
pub struct Workspace {
    pub project: Project,
    pub config: Config,
    pub catalog: SqliteCatalog,
}

/// Locate the project (from `--project` or cwd), load config, open the catalog
pub fn open_workspace(global: &GlobalOpts) -> Result<Workspace> {
    let project = discover_project(global.project.as_deref())?;
    let config = Config::load_for(Some(&project));
    let catalog = SqliteCatalog::open_project(&project, config.database.as_deref())
        .map_err(|e| miette::miette!("{}", e))?;

    tracing::debug!(
        root = %project.root().display(),
        catalog = ?catalog.path(),
        "workspace opened"
    );

    Ok(Workspace {
        project,
        config,
        catalog,
    })
}

pub fn discover_project(start: Option<&Path>) -> Result<Project> {
    match start {
        Some(path) => Project::discover_from(path),
        None => Project::discover(),
    }
    .map_err(|e| miette::miette!("{}", e))
}

/// Write report content to a file, or stdout when no path is given
pub fn write_output(content: &str, output_path: Option<PathBuf>, quiet: bool) -> Result<()> {
    if let Some(path) = output_path {
        let file = File::create(&path).into_diagnostic()?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content.as_bytes()).into_diagnostic()?;
        writer.flush().into_diagnostic()?;
        if !quiet {
            eprintln!(
                "{} Report written to {}",
                style("✓").green(),
                style(path.display()).cyan()
            );
        }
    } else {
        print!("{}", content);
    }
    Ok(())
}

/// Money with a currency symbol, rounded to two decimals
pub fn format_money(symbol: &str, amount: Decimal) -> String {
    format!("{}{}", symbol, format_amount(amount))
}

/// Truncate a string to max_len characters, adding "..." if truncated
///
/// Useful for table columns that need fixed-width output.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
