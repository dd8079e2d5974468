//! BOM result types handed to callers and report renderers

use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::core::identity::PartId;
use crate::entities::Part;

use super::BomError;

/// One consolidated, priced BOM line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BomLineItem {
    pub part_id: PartId,
    pub part_code: String,
    pub part_name: String,
    pub part_number: String,
    pub description: String,
    pub quantity: u64,
    pub unit: String,
    pub unit_price: Decimal,
    /// `unit_price × quantity`
    pub line_total: Decimal,
    pub supplier: String,
    pub source_modules: Vec<String>,
}

impl BomLineItem {
    pub fn new(
        part: &Part,
        quantity: u64,
        source_modules: Vec<String>,
    ) -> Result<Self, BomError> {
        let line_total = part
            .unit_price
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| BomError::Overflow(format!("line total of part {}", part.code)))?;

        Ok(Self {
            part_id: part.id,
            part_code: part.code.clone(),
            part_name: part.name.clone(),
            part_number: part.part_number.clone(),
            description: part.description.clone(),
            quantity,
            unit: part.unit.clone(),
            unit_price: part.unit_price,
            line_total,
            supplier: part.supplier.clone(),
            source_modules,
        })
    }
}

/// Summary statistics derived from the line items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BomSummary {
    pub total_cost: Decimal,
    pub total_items: u64,
    pub unique_part_count: usize,
}

impl BomSummary {
    fn from_lines(lines: &[BomLineItem]) -> Result<Self, BomError> {
        let mut total_cost = Decimal::ZERO;
        let mut total_items: u64 = 0;
        for line in lines {
            total_cost = total_cost
                .checked_add(line.line_total)
                .ok_or_else(|| BomError::Overflow("total cost".to_string()))?;
            total_items = total_items
                .checked_add(line.quantity)
                .ok_or_else(|| BomError::Overflow("total items".to_string()))?;
        }

        Ok(Self {
            total_cost,
            total_items,
            unique_part_count: lines.len(),
        })
    }
}

/// A complete bill of materials for one configuration
///
/// Line items are kept sorted by part code (ordinal, ties by part id) and
/// the summary is computed once from them, so both are read-only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BomResult {
    pub configuration_name: String,
    pub generated_at: DateTime<Local>,
    /// `"{name} ({code})"` per resolved option, in selection order
    pub selected_options: Vec<String>,
    /// `"{name} (x{qty})"` per activated module, ascending module id
    pub activated_modules: Vec<String>,
    line_items: Vec<BomLineItem>,
    summary: BomSummary,
}

impl BomResult {
    pub fn new(
        configuration_name: impl Into<String>,
        generated_at: DateTime<Local>,
        selected_options: Vec<String>,
        activated_modules: Vec<String>,
        mut line_items: Vec<BomLineItem>,
    ) -> Result<Self, BomError> {
        line_items.sort_by(|a, b| {
            a.part_code
                .cmp(&b.part_code)
                .then(a.part_id.cmp(&b.part_id))
        });
        let summary = BomSummary::from_lines(&line_items)?;

        Ok(Self {
            configuration_name: configuration_name.into(),
            generated_at,
            selected_options,
            activated_modules,
            line_items,
            summary,
        })
    }

    pub fn line_items(&self) -> &[BomLineItem] {
        &self.line_items
    }

    pub fn summary(&self) -> BomSummary {
        self.summary
    }

    pub fn total_cost(&self) -> Decimal {
        self.summary.total_cost
    }

    pub fn total_items(&self) -> u64 {
        self.summary.total_items
    }

    pub fn unique_part_count(&self) -> usize {
        self.summary.unique_part_count
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Find a line by part code
    pub fn line(&self, part_code: &str) -> Option<&BomLineItem> {
        self.line_items.iter().find(|l| l.part_code == part_code)
    }

    /// SHA-256 over the ordered lines, independent of name and timestamp
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for line in &self.line_items {
            hasher.update(
                format!(
                    "{}|{}|{}|{}\n",
                    line.part_id,
                    line.part_code,
                    line.quantity,
                    line.unit_price.normalize()
                )
                .as_bytes(),
            );
        }
        format!("{:x}", hasher.finalize())
    }
}
