//! YAML catalog documents
//!
//! A document describes a whole catalog with rows referring to each other by
//! business code rather than id, so it can be written by hand and imported
//! into an empty database. Ids are assigned in document order.
//!
//! ```yaml
//! categories:
//!   - { code: ROOF, name: Roof, display_order: 3 }
//! options:
//!   - { code: ROOF_YES, name: "Yes", category: ROOF, is_default: true }
//! modules:
//!   - { code: MOD_ROOF, name: Ventilated Roof Module }
//! parts:
//!   - { code: PART_004, name: Roof Panel, unit_price: "80.00" }
//! option_modules:
//!   - { option: ROOF_YES, module: MOD_ROOF, quantity: 1 }
//! module_parts:
//!   - { module: MOD_ROOF, part: PART_004, quantity: 2 }
//! ```

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::writer::{CatalogWriter, RefKind};
use super::CatalogError;
use crate::core::identity::{CategoryId, ModuleId, OptionId, PartId};
use crate::entities::category::default_active;
use crate::entities::{Category, ConfigOption, Module, ModulePart, OptionModule, Part};

/// A whole catalog in portable form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub options: Vec<OptionDef>,
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default)]
    pub parts: Vec<Part>,
    #[serde(default)]
    pub option_modules: Vec<OptionModuleDef>,
    #[serde(default)]
    pub module_parts: Vec<ModulePartDef>,
}

/// An option naming its category by code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionDef {
    pub code: String,
    pub name: String,
    /// Category code
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionModuleDef {
    pub option: String,
    pub module: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModulePartDef {
    pub module: String,
    pub part: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Rows written by an import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub categories: usize,
    pub options: usize,
    pub modules: usize,
    pub parts: usize,
    pub option_modules: usize,
    pub module_parts: usize,
}

impl CatalogDocument {
    pub fn from_yaml(text: &str) -> Result<Self, CatalogError> {
        Ok(serde_yml::from_str(text)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn to_yaml(&self) -> Result<String, CatalogError> {
        Ok(serde_yml::to_string(self)?)
    }

    /// Write every row through `writer`, resolving codes as it goes
    ///
    /// Stops at the first unknown reference, duplicate code or zero
    /// quantity. Callers that need all-or-nothing semantics run this inside
    /// a transaction.
    pub fn apply(&self, writer: &mut dyn CatalogWriter) -> Result<ImportStats, CatalogError> {
        let mut stats = ImportStats::default();

        for category in &self.categories {
            ensure_new(writer, RefKind::Category, &category.code)?;
            writer.insert_category(category)?;
            stats.categories += 1;
        }

        for def in &self.options {
            ensure_new(writer, RefKind::Option, &def.code)?;
            let category_id = CategoryId(resolve(writer, RefKind::Category, &def.category)?);
            let option = ConfigOption {
                id: OptionId::default(),
                code: def.code.clone(),
                name: def.name.clone(),
                description: def.description.clone(),
                category_id,
                display_order: def.display_order,
                is_active: def.is_active,
                is_default: def.is_default,
            };
            writer.insert_option(&option)?;
            stats.options += 1;
        }

        for module in &self.modules {
            ensure_new(writer, RefKind::Module, &module.code)?;
            writer.insert_module(module)?;
            stats.modules += 1;
        }

        for part in &self.parts {
            ensure_new(writer, RefKind::Part, &part.code)?;
            if part.unit_price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice {
                    code: part.code.clone(),
                    price: part.unit_price,
                });
            }
            writer.insert_part(part)?;
            stats.parts += 1;
        }

        for link in &self.option_modules {
            ensure_positive("option-module", &link.option, &link.module, link.quantity)?;
            let option_id = OptionId(resolve(writer, RefKind::Option, &link.option)?);
            let module_id = ModuleId(resolve(writer, RefKind::Module, &link.module)?);
            writer.insert_option_module(OptionModule::new(option_id, module_id, link.quantity))?;
            stats.option_modules += 1;
        }

        for link in &self.module_parts {
            ensure_positive("module-part", &link.module, &link.part, link.quantity)?;
            let module_id = ModuleId(resolve(writer, RefKind::Module, &link.module)?);
            let part_id = PartId(resolve(writer, RefKind::Part, &link.part)?);
            writer.insert_module_part(ModulePart::new(module_id, part_id, link.quantity))?;
            stats.module_parts += 1;
        }

        Ok(stats)
    }
}

fn resolve(writer: &dyn CatalogWriter, kind: RefKind, code: &str) -> Result<i64, CatalogError> {
    writer
        .find_id(kind, code)?
        .ok_or_else(|| CatalogError::UnknownReference {
            kind,
            code: code.to_string(),
        })
}

fn ensure_new(writer: &dyn CatalogWriter, kind: RefKind, code: &str) -> Result<(), CatalogError> {
    match writer.find_id(kind, code)? {
        Some(_) => Err(CatalogError::DuplicateCode {
            kind,
            code: code.to_string(),
        }),
        None => Ok(()),
    }
}

fn ensure_positive(
    kind: &'static str,
    from: &str,
    to: &str,
    quantity: u32,
) -> Result<(), CatalogError> {
    if quantity == 0 {
        return Err(CatalogError::ZeroQuantity {
            kind,
            from: from.to_string(),
            to: to.to_string(),
        });
    }
    Ok(())
}
