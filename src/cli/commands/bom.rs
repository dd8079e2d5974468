//! `mcfg bom` command - Generate a bill of materials

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};
use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::{format_money, open_workspace, write_output};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::engine::{BomEngine, BomResult, SelectionPolicy, TracingObserver};
use crate::core::identity::OptionId;
use crate::core::store::CatalogStore;
use crate::core::tree::{catalog_tree, default_selection, CategoryNode};
use crate::export::{render_csv, render_html, render_tsv};

#[derive(clap::Args, Debug)]
pub struct BomArgs {
    /// Option id to select (repeatable); ids not in the catalog are ignored
    #[arg(long = "option", value_name = "ID", allow_negative_numbers = true)]
    pub options: Vec<OptionId>,

    /// Option code to select (repeatable)
    #[arg(long = "code", value_name = "CODE")]
    pub codes: Vec<String>,

    /// Add each category's default option
    #[arg(long)]
    pub defaults: bool,

    /// Pick one option per category interactively
    #[arg(long, short = 'i', conflicts_with = "defaults")]
    pub interactive: bool,

    /// Configuration name shown in the report
    #[arg(long, short = 'n', default_value = "Configuration")]
    pub name: String,

    /// Count repeated options once
    #[arg(long)]
    pub distinct: bool,

    /// Output to file instead of stdout
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

pub fn run(args: BomArgs, global: &GlobalOpts) -> Result<()> {
    let ws = open_workspace(global)?;
    let store = &ws.catalog;

    let mut selection: Vec<OptionId> = args.options.clone();

    for code in &args.codes {
        match store
            .option_by_code(code)
            .map_err(|e| miette::miette!("{}", e))?
        {
            Some(option) => selection.push(option.id),
            None => {
                tracing::warn!(code = %code, "unknown option code");
                if !global.quiet {
                    eprintln!(
                        "{} Unknown option code '{}' ignored",
                        style("!").yellow(),
                        code
                    );
                }
            }
        }
    }

    if args.defaults || args.interactive {
        let tree = catalog_tree(store).map_err(|e| miette::miette!("{}", e))?;
        if args.interactive {
            selection.extend(prompt_selection(&tree)?);
        } else {
            selection.extend(default_selection(&tree));
        }
    }

    let policy = if args.distinct {
        SelectionPolicy::Distinct
    } else {
        ws.config.selection_policy()
    };

    let observer = TracingObserver;
    let engine = BomEngine::new(store)
        .with_policy(policy)
        .with_observer(&observer);
    tracing::debug!(policy = %engine.policy(), selected = selection.len(), "generating BOM");
    let bom = engine
        .generate(&selection, &args.name)
        .map_err(|e| miette::miette!("{}", e))?;

    let format = resolve_format(
        global.format,
        ws.config.default_format.as_deref(),
        args.output.as_deref(),
    );
    let currency = ws.config.currency_symbol();

    let content = match format {
        OutputFormat::Csv => render_csv(&bom).into_diagnostic()?,
        OutputFormat::Tsv => render_tsv(&bom).into_diagnostic()?,
        OutputFormat::Html => render_html(&bom, currency).into_diagnostic()?,
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&bom).into_diagnostic()?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => serde_yml::to_string(&bom).into_diagnostic()?,
        OutputFormat::Md | OutputFormat::Auto => render_markdown(&bom, currency),
    };

    write_output(&content, args.output, global.quiet)
}

/// Explicit `--format` wins, then the configured default, then the output
/// file's extension, then a markdown table
fn resolve_format(
    requested: OutputFormat,
    configured: Option<&str>,
    output: Option<&Path>,
) -> OutputFormat {
    if requested != OutputFormat::Auto {
        return requested;
    }
    if let Some(format) = configured.and_then(|f| f.parse::<OutputFormat>().ok()) {
        if format != OutputFormat::Auto {
            return format;
        }
    }
    let ext = output
        .and_then(|p| p.extension())
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("csv") => OutputFormat::Csv,
        Some("tsv") => OutputFormat::Tsv,
        Some("html") | Some("htm") => OutputFormat::Html,
        Some("json") => OutputFormat::Json,
        Some("yaml") | Some("yml") => OutputFormat::Yaml,
        _ => OutputFormat::Md,
    }
}

fn prompt_selection(tree: &[CategoryNode]) -> Result<Vec<OptionId>> {
    use dialoguer::{theme::ColorfulTheme, Select};
    let theme = ColorfulTheme::default();

    let mut picked = Vec::new();
    for category in tree.iter().filter(|c| !c.options.is_empty()) {
        let labels: Vec<String> = category
            .options
            .iter()
            .map(|o| format!("{} ({})", o.name, o.code))
            .collect();
        let default = category
            .options
            .iter()
            .position(|o| o.is_default)
            .unwrap_or(0);

        let choice = Select::with_theme(&theme)
            .with_prompt(&category.name)
            .items(&labels)
            .default(default)
            .interact()
            .into_diagnostic()?;
        picked.push(category.options[choice].id);
    }
    Ok(picked)
}

fn render_markdown(bom: &BomResult, currency: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Bill of Materials - {}\n\n", bom.configuration_name));
    output.push_str(&format!(
        "Generated: {}\n\n",
        bom.generated_at.format(crate::export::TIMESTAMP_FORMAT)
    ));
    output.push_str(&format!(
        "Selected Options: {}\n",
        bom.selected_options.join(", ")
    ));
    output.push_str(&format!(
        "Activated Modules: {}\n\n",
        bom.activated_modules.join(", ")
    ));

    if bom.is_empty() {
        output.push_str("_No parts._\n");
    } else {
        let mut builder = Builder::default();
        builder.push_record(crate::export::COLUMNS);
        for line in bom.line_items() {
            builder.push_record([
                line.part_code.clone(),
                line.part_name.clone(),
                line.part_number.clone(),
                line.description.clone(),
                line.quantity.to_string(),
                line.unit.clone(),
                format_money(currency, line.unit_price),
                format_money(currency, line.line_total),
                line.supplier.clone(),
                line.source_modules.join("; "),
            ]);
        }
        output.push_str(&builder.build().with(Style::markdown()).to_string());
        output.push('\n');
    }

    let summary = bom.summary();
    output.push_str("\n## Summary\n\n");
    output.push_str(&format!("- **Unique Parts:** {}\n", summary.unique_part_count));
    output.push_str(&format!("- **Total Items:** {}\n", summary.total_items));
    output.push_str(&format!(
        "- **Total Cost:** {}\n",
        format_money(currency, summary.total_cost)
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_format_wins() {
        assert_eq!(
            resolve_format(OutputFormat::Json, Some("csv"), Some(Path::new("x.html"))),
            OutputFormat::Json
        );
    }

    #[test]
    fn test_configured_format_beats_extension() {
        assert_eq!(
            resolve_format(OutputFormat::Auto, Some("csv"), Some(Path::new("x.html"))),
            OutputFormat::Csv
        );
    }

    #[test]
    fn test_extension_picks_format() {
        assert_eq!(
            resolve_format(OutputFormat::Auto, None, Some(Path::new("out/BOM.HTML"))),
            OutputFormat::Html
        );
        assert_eq!(
            resolve_format(OutputFormat::Auto, Some("nonsense"), Some(Path::new("b.yml"))),
            OutputFormat::Yaml
        );
        assert_eq!(resolve_format(OutputFormat::Auto, None, None), OutputFormat::Md);
    }

    #[test]
    fn test_markdown_summary() {
        let store = crate::core::catalog::sample_catalog().unwrap();
        let ids: Vec<OptionId> = ["COL_700x1000", "ROOF_YES", "HBB_1600"]
            .iter()
            .map(|c| store.option_by_code(c).unwrap().unwrap().id)
            .collect();
        let bom = BomEngine::new(&store).generate(&ids, "md").unwrap();
        let md = render_markdown(&bom, "$");
        assert!(md.starts_with("# Bill of Materials - md\n"));
        assert!(md.contains("| PART_009 "));
        assert!(md.contains("- **Total Cost:** $2762.00\n"));
    }
}
