//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    bom::BomArgs, catalog::CatalogCommands, completions::CompletionsArgs, init::InitArgs,
    where_used::WhereUsedArgs,
};

#[derive(Parser)]
#[command(name = "mcfg")]
#[command(author, version, about = "Modular product configurator")]
#[command(long_about = "Pick one option per category, and mcfg derives the consolidated, priced bill of materials from the catalog's option→module→part links.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose output (debug logging on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Project root (default: auto-detect by finding .mcfg/)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new mcfg project
    Init(InitArgs),

    /// Browse and maintain the catalog
    #[command(subcommand)]
    Catalog(CatalogCommands),

    /// Generate a bill of materials for a set of options
    Bom(BomArgs),

    /// Show which modules and options pull in a part
    WhereUsed(WhereUsedArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (table on a terminal)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV report with header and summary blocks
    Csv,
    /// Markdown tables
    Md,
    /// Standalone HTML report
    Html,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}
