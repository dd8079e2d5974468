//! CSV and TSV renderers

use std::fmt::Write as _;

use ::csv::{QuoteStyle, Terminator, WriterBuilder};

use super::{format_amount, ExportError, TIMESTAMP_FORMAT};
use crate::core::engine::{BomLineItem, BomResult};

/// Column header row shared by every tabular export
pub const COLUMNS: [&str; 10] = [
    "Part Code",
    "Part Name",
    "Part Number",
    "Description",
    "Quantity",
    "Unit",
    "Unit Price",
    "Total Price",
    "Supplier",
    "Source Modules",
];

fn record(line: &BomLineItem) -> [String; 10] {
    [
        line.part_code.clone(),
        line.part_name.clone(),
        line.part_number.clone(),
        line.description.clone(),
        line.quantity.to_string(),
        line.unit.clone(),
        format_amount(line.unit_price),
        format_amount(line.line_total),
        line.supplier.clone(),
        line.source_modules.join("; "),
    ]
}

/// Wrap a text column in quotes, doubling embedded quotes
fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Text columns are quoted whatever they contain; quantity and money
/// columns never are
fn csv_row(line: &BomLineItem) -> String {
    [
        quoted(&line.part_code),
        quoted(&line.part_name),
        quoted(&line.part_number),
        quoted(&line.description),
        line.quantity.to_string(),
        quoted(&line.unit),
        format_amount(line.unit_price),
        format_amount(line.line_total),
        quoted(&line.supplier),
        quoted(&line.source_modules.join("; ")),
    ]
    .join(",")
}

/// Full CSV report: header block, quoted rows, summary block
pub fn render_csv(bom: &BomResult) -> Result<String, ExportError> {
    let mut out = String::new();
    // writing to a String cannot fail
    let _ = writeln!(out, "Bill of Materials - {}", bom.configuration_name);
    let _ = writeln!(out, "Generated: {}", bom.generated_at.format(TIMESTAMP_FORMAT));
    out.push('\n');
    let _ = writeln!(out, "Selected Options: {}", bom.selected_options.join(", "));
    let _ = writeln!(out, "Activated Modules: {}", bom.activated_modules.join(", "));
    out.push('\n');
    out.push_str(&COLUMNS.join(","));
    out.push('\n');

    for line in bom.line_items() {
        out.push_str(&csv_row(line));
        out.push('\n');
    }

    let summary = bom.summary();
    out.push('\n');
    out.push_str("Summary:\n");
    let _ = writeln!(out, "Unique Parts: {}", summary.unique_part_count);
    let _ = writeln!(out, "Total Items: {}", summary.total_items);
    let _ = writeln!(out, "Total Cost: ${}", format_amount(summary.total_cost));
    Ok(out)
}

/// Bare tab-separated rows with a header line, for piping into other tools
pub fn render_tsv(bom: &BomResult) -> Result<String, ExportError> {
    let mut wtr = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    wtr.write_record(COLUMNS)?;
    for line in bom.line_items() {
        wtr.write_record(record(line))?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::sample_catalog;
    use crate::core::engine::BomEngine;
    use crate::core::store::CatalogStore;
    use chrono::{Local, TimeZone};
    use std::str::FromStr;

    fn standard_bom() -> BomResult {
        let store = sample_catalog().unwrap();
        let ids: Vec<_> = ["COL_700x1000", "ROOF_YES", "HBB_1600"]
            .iter()
            .map(|code| store.option_by_code(code).unwrap().unwrap().id)
            .collect();
        let at = Local.with_ymd_and_hms(2024, 5, 17, 14, 5, 9).unwrap();
        BomEngine::new(&store)
            .generate_at(&ids, "Standard", at)
            .unwrap()
    }

    #[test]
    fn test_csv_report() {
        let csv = render_csv(&standard_bom()).unwrap();
        insta::assert_snapshot!(csv, @r#"
Bill of Materials - Standard
Generated: 2024-05-17 14:05:09

Selected Options: 700x1000 (COL_700x1000), Yes (ROOF_YES), 1600A (HBB_1600)
Activated Modules: Column 700x1000 Module (x4), Ventilated Roof Module (x1), Busbar 1600A Module (x1)

Part Code,Part Name,Part Number,Description,Quantity,Unit,Unit Price,Total Price,Supplier,Source Modules
"PART_001","Steel Column Profile","SC-700-001","Steel profile for 700x1000 column",4,"pcs",150.00,600.00,"SteelCorp","Column 700x1000 Module"
"PART_003","Mounting Bracket","MB-001","Universal mounting bracket",16,"pcs",25.00,400.00,"FastenerInc","Column 700x1000 Module"
"PART_004","Roof Panel","RP-001","Ventilated roof panel",2,"pcs",80.00,160.00,"RoofMaster","Ventilated Roof Module"
"PART_005","Ventilation Grill","VG-001","Air ventilation grill",4,"pcs",30.00,120.00,"VentCo","Ventilated Roof Module"
"PART_006","Copper Busbar 1600A","BB-1600-CU","Copper busbar 1600A",3,"pcs",450.00,1350.00,"ElectricSupply","Busbar 1600A Module"
"PART_008","Busbar Insulator","BI-001","Busbar insulator",6,"pcs",15.00,90.00,"ElectricSupply","Busbar 1600A Module"
"PART_009","Bolt M8x40","BOLT-M8-40","M8x40 bolt",84,"pcs",0.50,42.00,"FastenerInc","Column 700x1000 Module; Ventilated Roof Module; Busbar 1600A Module"

Summary:
Unique Parts: 7
Total Items: 119
Total Cost: $2762.00
"#);
    }

    #[test]
    fn test_csv_escapes_embedded_quotes() {
        let mut store = crate::core::memory::MemoryCatalog::new();
        let cat = store.add_category(crate::entities::Category::new("C", "Cat", 1));
        let opt = store.add_option(crate::entities::ConfigOption::new("O", "Opt", cat, 1));
        let module = store.add_module(crate::entities::Module::new("M", "Mod"));
        let part = store.add_part(
            crate::entities::Part::new("P", "Plate 3/8\"", rust_decimal::Decimal::ONE)
                .with_description("steel, galvanized"),
        );
        store.link_option_module(opt, module, 1);
        store.link_module_part(module, part, 2);

        let bom = BomEngine::new(&store).generate(&[opt], "q").unwrap();
        let csv = render_csv(&bom).unwrap();
        assert!(csv.contains(r#""P","Plate 3/8""","","steel, galvanized",2,"pcs",1.00,2.00,"","Mod""#));
    }

    fn single_part_bom(part: crate::entities::Part, quantity: u32) -> BomResult {
        let mut store = crate::core::memory::MemoryCatalog::new();
        let cat = store.add_category(crate::entities::Category::new("C", "Cat", 1));
        let opt = store.add_option(crate::entities::ConfigOption::new("O", "Opt", cat, 1));
        let module = store.add_module(crate::entities::Module::new("M", "Mod"));
        let part = store.add_part(part);
        store.link_option_module(opt, module, 1);
        store.link_module_part(module, part, quantity);
        BomEngine::new(&store).generate(&[opt], "n").unwrap()
    }

    #[test]
    fn test_numeric_looking_text_is_still_quoted() {
        let part = crate::entities::Part::new(
            "1001",
            "2024",
            rust_decimal::Decimal::from_str("0.127").unwrap(),
        )
        .with_part_number("12345")
        .with_supplier("3.5");
        let csv = render_csv(&single_part_bom(part, 1)).unwrap();
        assert!(csv.contains("\n\"1001\",\"2024\",\"12345\",\"\",1,\"pcs\",0.13,0.13,\"3.5\",\"Mod\"\n"));
    }

    #[test]
    fn test_money_is_rounded_not_truncated() {
        let part = crate::entities::Part::new(
            "P",
            "Shim",
            rust_decimal::Decimal::from_str("0.125").unwrap(),
        );
        let csv = render_csv(&single_part_bom(part, 3)).unwrap();
        // 3 x 0.125 = 0.375
        assert!(csv.contains(",3,\"pcs\",0.13,0.38,"));
        assert!(csv.ends_with("Total Cost: $0.38\n"));
    }

    #[test]
    fn test_empty_bom_csv_has_zero_summary() {
        let store = sample_catalog().unwrap();
        let bom = BomEngine::new(&store).generate(&[], "Empty").unwrap();
        let csv = render_csv(&bom).unwrap();
        assert!(csv.contains("Selected Options: \n"));
        assert!(csv.ends_with("Unique Parts: 0\nTotal Items: 0\nTotal Cost: $0.00\n"));
    }

    #[test]
    fn test_tsv_rows() {
        let tsv = render_tsv(&standard_bom()).unwrap();
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines[0].starts_with("Part Code\tPart Name\t"));
        assert!(lines[7].starts_with("PART_009\tBolt M8x40\tBOLT-M8-40\tM8x40 bolt\t84\tpcs\t0.50\t42.00\t"));
    }
}
