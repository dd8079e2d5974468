//! `mcfg where-used` command - Find the modules and options that pull in a part

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::helpers::open_workspace;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::where_used::{find_part, where_used, PartUsage};
use crate::entities::Part;

#[derive(clap::Args, Debug)]
pub struct WhereUsedArgs {
    /// Part code or numeric id (e.g., PART_009 or 9)
    pub part: String,
}

#[derive(Serialize)]
struct WhereUsedReport<'a> {
    part: &'a Part,
    used_in: &'a [PartUsage],
}

pub fn run(args: WhereUsedArgs, global: &GlobalOpts) -> Result<()> {
    let ws = open_workspace(global)?;

    let part = find_part(&ws.catalog, &args.part)
        .map_err(|e| miette::miette!("{}", e))?
        .ok_or_else(|| miette::miette!("Part '{}' not found", args.part))?;
    let usages = where_used(&ws.catalog, &part).map_err(|e| miette::miette!("{}", e))?;

    match global.format {
        OutputFormat::Json => {
            let report = WhereUsedReport {
                part: &part,
                used_in: &usages,
            };
            println!("{}", serde_json::to_string_pretty(&report).into_diagnostic()?);
        }
        OutputFormat::Yaml => {
            let report = WhereUsedReport {
                part: &part,
                used_in: &usages,
            };
            print!("{}", serde_yml::to_string(&report).into_diagnostic()?);
        }
        OutputFormat::Tsv | OutputFormat::Csv => {
            let sep = if global.format == OutputFormat::Tsv { "\t" } else { "," };
            println!("{}", ["module", "qty_per_module", "option", "activation_qty"].join(sep));
            for usage in &usages {
                if usage.activated_by.is_empty() {
                    println!("{}{sep}{}{sep}{sep}", usage.module_code, usage.quantity_per_module);
                }
                for activator in &usage.activated_by {
                    println!(
                        "{}{sep}{}{sep}{}{sep}{}",
                        usage.module_code,
                        usage.quantity_per_module,
                        activator.option_code,
                        activator.quantity
                    );
                }
            }
        }
        _ => {
            println!(
                "{} {} {}",
                style("Where used:").bold(),
                style(&part.code).cyan(),
                style(format!("({})", part.name)).dim()
            );
            println!();

            if usages.is_empty() {
                println!("{}", style("No modules use this part.").yellow());
                return Ok(());
            }

            for usage in &usages {
                println!(
                    "  {} {} {}",
                    style(&usage.module_code).cyan(),
                    usage.module_name,
                    style(format!("x{} per module", usage.quantity_per_module)).dim()
                );
                if usage.activated_by.is_empty() {
                    println!("      {}", style("not activated by any option").dim());
                }
                for activator in &usage.activated_by {
                    println!(
                        "      ← {} {} {}",
                        style(&activator.option_code).yellow(),
                        activator.option_name,
                        style(format!("(activates x{})", activator.quantity)).dim()
                    );
                }
            }
            println!();
            println!("{} module(s) found.", style(usages.len()).cyan());
        }
    }
    Ok(())
}
