//! Part entity type - procurable leaf components with pricing

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::category::default_active;
use crate::core::entity::Entity;
use crate::core::identity::PartId;

/// A Part is a leaf procurable item with price and supplier metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub id: PartId,

    /// Mutable business code (e.g., "PART_009"); BOM lines sort by this
    pub code: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Supplier or internal part number
    #[serde(default)]
    pub part_number: String,

    /// Price per `unit`; never negative
    #[serde(default)]
    pub unit_price: Decimal,

    #[serde(default)]
    pub supplier: String,

    /// Measurement unit (pcs, kg, m, ...)
    #[serde(default = "default_unit")]
    pub unit: String,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_unit() -> String {
    "pcs".to_string()
}

impl Part {
    pub fn new(code: impl Into<String>, name: impl Into<String>, unit_price: Decimal) -> Self {
        Self {
            id: PartId::default(),
            code: code.into(),
            name: name.into(),
            description: String::new(),
            part_number: String::new(),
            unit_price,
            supplier: String::new(),
            unit: default_unit(),
            is_active: true,
        }
    }

    pub fn with_part_number(mut self, part_number: impl Into<String>) -> Self {
        self.part_number = part_number.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.supplier = supplier.into();
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }
}

impl Entity for Part {
    const KIND: &'static str = "part";
    type Id = PartId;

    fn id(&self) -> PartId {
        self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}
