//! HTML renderer backed by an embedded Tera template

use rust_embed::Embed;
use serde::Serialize;
use tera::Tera;

use super::{format_amount, ExportError, COLUMNS, TIMESTAMP_FORMAT};
use crate::core::engine::BomResult;

#[derive(Embed)]
#[folder = "assets/templates/"]
struct ReportTemplates;

const BOM_TEMPLATE: &str = "bom.html";

#[derive(Serialize)]
struct Row {
    code: String,
    name: String,
    part_number: String,
    description: String,
    quantity: u64,
    unit: String,
    unit_price: String,
    total_price: String,
    supplier: String,
    source_modules: String,
}

fn load_templates() -> Result<Tera, ExportError> {
    let mut tera = Tera::default();
    for file in ReportTemplates::iter() {
        let filename = file.as_ref();
        if let Some(content) = ReportTemplates::get(filename) {
            if let Ok(template_str) = std::str::from_utf8(&content.data) {
                tera.add_raw_template(filename, template_str)?;
            }
        }
    }
    Ok(tera)
}

/// Standalone HTML page with the BOM table and a summary panel
///
/// Text from the catalog is HTML-escaped; money is shown with `currency`.
pub fn render_html(bom: &BomResult, currency: &str) -> Result<String, ExportError> {
    let tera = load_templates()?;

    let rows: Vec<Row> = bom
        .line_items()
        .iter()
        .map(|line| Row {
            code: line.part_code.clone(),
            name: line.part_name.clone(),
            part_number: line.part_number.clone(),
            description: line.description.clone(),
            quantity: line.quantity,
            unit: line.unit.clone(),
            unit_price: format!("{}{}", currency, format_amount(line.unit_price)),
            total_price: format!("{}{}", currency, format_amount(line.line_total)),
            supplier: line.supplier.clone(),
            source_modules: line.source_modules.join(", "),
        })
        .collect();

    let summary = bom.summary();
    let mut context = tera::Context::new();
    context.insert("name", &bom.configuration_name);
    context.insert(
        "generated",
        &bom.generated_at.format(TIMESTAMP_FORMAT).to_string(),
    );
    context.insert("selected_options", &bom.selected_options);
    context.insert("activated_modules", &bom.activated_modules);
    context.insert("columns", &COLUMNS);
    context.insert("rows", &rows);
    context.insert("unique_parts", &summary.unique_part_count);
    context.insert("total_items", &summary.total_items);
    context.insert(
        "total_cost",
        &format!("{}{}", currency, format_amount(summary.total_cost)),
    );

    Ok(tera.render(BOM_TEMPLATE, &context)?)
}
