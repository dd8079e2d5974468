//! Catalog store contract
//!
//! The BOM engine only ever reads the catalog through this trait. Lookups
//! that find nothing return `Ok(None)` or an empty list; `Err` is reserved
//! for the store itself being unable to answer.

use thiserror::Error;

use crate::core::identity::{CategoryId, ModuleId, OptionId, PartId};
use crate::entities::{Category, ConfigOption, Module, ModulePart, OptionModule, Part};

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Failures of the catalog store itself (never "row not found")
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("catalog store unavailable: {0}")]
    Unavailable(#[from] rusqlite::Error),

    #[error("corrupt row in {table}: {reason}")]
    Corrupt { table: &'static str, reason: String },
}

/// Read-only point and bulk lookups over the catalog
pub trait CatalogStore {
    fn category(&self, id: CategoryId) -> StoreResult<Option<Category>>;
    fn category_by_code(&self, code: &str) -> StoreResult<Option<Category>>;
    /// All categories ordered by display order
    fn categories(&self) -> StoreResult<Vec<Category>>;

    fn option(&self, id: OptionId) -> StoreResult<Option<ConfigOption>>;
    fn option_by_code(&self, code: &str) -> StoreResult<Option<ConfigOption>>;
    /// Options of one category ordered by display order
    fn options_in_category(&self, category_id: CategoryId) -> StoreResult<Vec<ConfigOption>>;

    fn module(&self, id: ModuleId) -> StoreResult<Option<Module>>;
    fn module_by_code(&self, code: &str) -> StoreResult<Option<Module>>;
    /// All modules ordered by id
    fn modules(&self) -> StoreResult<Vec<Module>>;

    fn part(&self, id: PartId) -> StoreResult<Option<Part>>;
    fn part_by_code(&self, code: &str) -> StoreResult<Option<Part>>;
    /// All parts ordered by code
    fn parts(&self) -> StoreResult<Vec<Part>>;

    fn option_modules_for_option(&self, option_id: OptionId) -> StoreResult<Vec<OptionModule>>;
    fn option_modules_for_module(&self, module_id: ModuleId) -> StoreResult<Vec<OptionModule>>;

    fn module_parts_for_module(&self, module_id: ModuleId) -> StoreResult<Vec<ModulePart>>;
    fn module_parts_for_part(&self, part_id: PartId) -> StoreResult<Vec<ModulePart>>;
}
