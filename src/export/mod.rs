//! Report renderers for generated BOMs
//!
//! Renderers are pure text formatting over a [`BomResult`]; all business
//! logic happens in the engine.
//!
//! [`BomResult`]: crate::core::engine::BomResult

pub mod csv;
pub mod html;

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

pub use self::csv::{render_csv, render_tsv, COLUMNS};
pub use self::html::render_html;

/// Timestamp layout used in report headers
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Round to cents, halves away from zero
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Money as text with exactly two decimals and no currency symbol
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", round_money(amount))
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] ::csv::Error),

    #[error("template rendering failed: {0}")]
    Template(#[from] tera::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
