//! Core module - catalog model, storage and BOM generation

pub mod catalog;
pub mod config;
pub mod engine;
pub mod entity;
pub mod identity;
pub mod memory;
pub mod project;
pub mod store;
pub mod tree;
pub mod where_used;

pub use catalog::{CatalogDocument, CatalogError, SqliteCatalog};
pub use config::Config;
pub use engine::{BomEngine, BomError, BomObserver, BomResult, SelectionPolicy};
pub use entity::Entity;
pub use identity::{CategoryId, ModuleId, OptionId, PartId};
pub use memory::MemoryCatalog;
pub use project::{Project, ProjectError};
pub use store::{CatalogStore, StoreError, StoreResult};
pub use tree::{catalog_tree, default_selection, CategoryNode, OptionSummary};
pub use where_used::{find_part, where_used, PartUsage};
