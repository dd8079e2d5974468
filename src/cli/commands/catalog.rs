//! `mcfg catalog` command - Browse and maintain the catalog
//!
//! The catalog is the project's SQLite database of categories, options,
//! modules and parts. It is filled by importing YAML catalog documents.

use clap::Subcommand;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{escape_csv, format_money, open_workspace, truncate_str};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::catalog::CatalogDocument;
use crate::core::entity::Entity;
use crate::core::store::CatalogStore;
use crate::core::tree::catalog_tree;
use crate::export::format_amount;

#[derive(Subcommand, Debug)]
pub enum CatalogCommands {
    /// Show categories with their selectable options
    Show,

    /// List modules with their part counts
    Modules,

    /// List parts with price and supplier
    Parts,

    /// Import a YAML catalog document
    Import {
        /// Catalog document to import
        file: PathBuf,

        /// Import into a catalog that already has data
        #[arg(long)]
        append: bool,
    },

    /// Show row counts per table
    Stats,
}

pub fn run(cmd: CatalogCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        CatalogCommands::Show => run_show(global),
        CatalogCommands::Modules => run_modules(global),
        CatalogCommands::Parts => run_parts(global),
        CatalogCommands::Import { file, append } => run_import(file, append, global),
        CatalogCommands::Stats => run_stats(global),
    }
}

fn store_err(e: impl std::fmt::Display) -> miette::Report {
    miette::miette!("{}", e)
}

/// Footer line under a listing, e.g. "9 part(s)"
fn print_count<E: Entity>(rows: &[E]) {
    println!();
    println!("{} {}(s)", style(rows.len()).cyan(), E::KIND);
}

fn run_show(global: &GlobalOpts) -> Result<()> {
    let ws = open_workspace(global)?;
    let tree = catalog_tree(&ws.catalog).map_err(store_err)?;

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&tree).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&tree).into_diagnostic()?);
        }
        OutputFormat::Tsv | OutputFormat::Csv => {
            let sep = if global.format == OutputFormat::Tsv { "\t" } else { "," };
            println!("{}", ["category", "option_id", "option_code", "option_name", "default"].join(sep));
            for category in &tree {
                for option in &category.options {
                    println!(
                        "{}",
                        [
                            escape_csv(&category.code),
                            option.id.to_string(),
                            escape_csv(&option.code),
                            escape_csv(&option.name),
                            option.is_default.to_string(),
                        ]
                        .join(sep)
                    );
                }
            }
        }
        _ => {
            if tree.is_empty() {
                println!("{}", style("Catalog is empty.").yellow());
                return Ok(());
            }
            for category in &tree {
                println!(
                    "{} {}",
                    style(&category.name).bold(),
                    style(format!("({})", category.code)).dim()
                );
                for option in &category.options {
                    let marker = if option.is_default {
                        style("*").green().to_string()
                    } else {
                        " ".to_string()
                    };
                    println!(
                        "  {} {}  {:<16} {}",
                        marker,
                        style(format!("{:>4}", option.id)).cyan(),
                        option.code,
                        option.name
                    );
                }
                println!();
            }
            if !global.quiet {
                println!("{} marks the default option", style("*").green());
            }
        }
    }
    Ok(())
}

fn run_modules(global: &GlobalOpts) -> Result<()> {
    let ws = open_workspace(global)?;
    let modules = ws.catalog.modules().map_err(store_err)?;

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&modules).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&modules).into_diagnostic()?);
        }
        _ => {
            let mut builder = Builder::default();
            builder.push_record(["ID", "Code", "Name", "Parts", "Master Assembly"]);
            for module in &modules {
                let parts = ws
                    .catalog
                    .module_parts_for_module(module.id)
                    .map_err(store_err)?;
                builder.push_record([
                    module.id.to_string(),
                    module.code.clone(),
                    truncate_str(&module.name, 40),
                    parts.len().to_string(),
                    module.master_assembly_path.clone(),
                ]);
            }
            println!("{}", builder.build().with(Style::markdown()));
            if !global.quiet {
                print_count(&modules);
            }
        }
    }
    Ok(())
}

fn run_parts(global: &GlobalOpts) -> Result<()> {
    let ws = open_workspace(global)?;
    let parts = ws.catalog.parts().map_err(store_err)?;
    let currency = ws.config.currency_symbol();

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&parts).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yml::to_string(&parts).into_diagnostic()?);
        }
        OutputFormat::Csv => {
            println!("id,code,name,part_number,unit_price,unit,supplier");
            for part in &parts {
                println!(
                    "{},{},{},{},{},{},{}",
                    part.id,
                    escape_csv(&part.code),
                    escape_csv(&part.name),
                    escape_csv(&part.part_number),
                    format_amount(part.unit_price),
                    escape_csv(&part.unit),
                    escape_csv(&part.supplier)
                );
            }
        }
        _ => {
            let mut builder = Builder::default();
            builder.push_record(["ID", "Code", "Name", "Part Number", "Unit Price", "Unit", "Supplier"]);
            for part in &parts {
                builder.push_record([
                    part.id.to_string(),
                    part.code.clone(),
                    truncate_str(&part.name, 40),
                    part.part_number.clone(),
                    format_money(currency, part.unit_price),
                    part.unit.clone(),
                    part.supplier.clone(),
                ]);
            }
            println!("{}", builder.build().with(Style::markdown()));
            if !global.quiet {
                print_count(&parts);
            }
        }
    }
    Ok(())
}

fn run_import(file: PathBuf, append: bool, global: &GlobalOpts) -> Result<()> {
    let mut ws = open_workspace(global)?;
    let document = CatalogDocument::from_path(&file).map_err(|e| {
        miette::miette!("failed to read {}: {}", file.display(), e)
    })?;

    let stats = ws
        .catalog
        .import(&document, append)
        .map_err(store_err)?;

    if !global.quiet {
        println!(
            "{} Imported {}",
            style("✓").green(),
            style(file.display()).cyan()
        );
        println!("  Categories:     {}", stats.categories);
        println!("  Options:        {}", stats.options);
        println!("  Modules:        {}", stats.modules);
        println!("  Parts:          {}", stats.parts);
        println!("  Option links:   {}", stats.option_modules);
        println!("  Module links:   {}", stats.module_parts);
    }
    Ok(())
}

fn run_stats(global: &GlobalOpts) -> Result<()> {
    let ws = open_workspace(global)?;
    let stats = ws.catalog.statistics().map_err(store_err)?;

    if global.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&stats).into_diagnostic()?);
        return Ok(());
    }

    println!("{}", style("Catalog Status").bold());
    println!("{}", style("─".repeat(40)).dim());
    if let Some(path) = ws.catalog.path() {
        println!("  Location:        {}", path.display());
    }
    println!("  Categories:      {}", style(stats.categories).cyan());
    println!("  Options:         {}", style(stats.options).cyan());
    println!("  Modules:         {}", style(stats.modules).cyan());
    println!("  Parts:           {}", style(stats.parts).cyan());
    println!("  Option links:    {}", style(stats.option_modules).cyan());
    println!("  Module links:    {}", style(stats.module_parts).cyan());
    println!(
        "  Database size:   {} KB",
        style(stats.db_size_bytes / 1024).cyan()
    );
    Ok(())
}
