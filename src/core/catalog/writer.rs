//! Write side of the catalog
//!
//! Imports are written through [`CatalogWriter`] so the same document can
//! populate a SQLite transaction or an in-memory catalog.

use std::fmt;

use rusqlite::{params, OptionalExtension, Transaction};

use super::CatalogError;
use crate::core::identity::{CategoryId, ModuleId, OptionId, PartId};
use crate::core::memory::MemoryCatalog;
use crate::core::store::CatalogStore;
use crate::entities::{Category, ConfigOption, Module, ModulePart, OptionModule, Part};

/// Entity kinds that can be referenced by code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefKind {
    Category,
    Option,
    Module,
    Part,
}

impl RefKind {
    fn table(self) -> &'static str {
        match self {
            RefKind::Category => "categories",
            RefKind::Option => "options",
            RefKind::Module => "modules",
            RefKind::Part => "parts",
        }
    }
}

impl fmt::Display for RefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RefKind::Category => "category",
            RefKind::Option => "option",
            RefKind::Module => "module",
            RefKind::Part => "part",
        };
        write!(f, "{}", s)
    }
}

/// Insert-only access to a catalog
///
/// Inserted rows get a fresh id from the writer; any id on the passed
/// entity is ignored.
pub trait CatalogWriter {
    fn insert_category(&mut self, category: &Category) -> Result<CategoryId, CatalogError>;
    fn insert_option(&mut self, option: &ConfigOption) -> Result<OptionId, CatalogError>;
    fn insert_module(&mut self, module: &Module) -> Result<ModuleId, CatalogError>;
    fn insert_part(&mut self, part: &Part) -> Result<PartId, CatalogError>;
    fn insert_option_module(&mut self, link: OptionModule) -> Result<(), CatalogError>;
    fn insert_module_part(&mut self, link: ModulePart) -> Result<(), CatalogError>;

    /// Raw id of the row with this code, if any
    fn find_id(&self, kind: RefKind, code: &str) -> Result<Option<i64>, CatalogError>;
}

impl CatalogWriter for Transaction<'_> {
    fn insert_category(&mut self, c: &Category) -> Result<CategoryId, CatalogError> {
        self.execute(
            "INSERT INTO categories (code, name, description, display_order, is_active)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![c.code, c.name, c.description, c.display_order, c.is_active],
        )?;
        Ok(CategoryId(self.last_insert_rowid()))
    }

    fn insert_option(&mut self, o: &ConfigOption) -> Result<OptionId, CatalogError> {
        self.execute(
            "INSERT INTO options (code, name, description, category_id, display_order, is_active, is_default)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                o.code,
                o.name,
                o.description,
                o.category_id,
                o.display_order,
                o.is_active,
                o.is_default
            ],
        )?;
        Ok(OptionId(self.last_insert_rowid()))
    }

    fn insert_module(&mut self, m: &Module) -> Result<ModuleId, CatalogError> {
        self.execute(
            "INSERT INTO modules (code, name, description, master_assembly_path, is_active)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                m.code,
                m.name,
                m.description,
                m.master_assembly_path,
                m.is_active
            ],
        )?;
        Ok(ModuleId(self.last_insert_rowid()))
    }

    fn insert_part(&mut self, p: &Part) -> Result<PartId, CatalogError> {
        self.execute(
            "INSERT INTO parts (code, name, description, part_number, unit_price, supplier, unit, is_active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                p.code,
                p.name,
                p.description,
                p.part_number,
                p.unit_price.to_string(),
                p.supplier,
                p.unit,
                p.is_active
            ],
        )?;
        Ok(PartId(self.last_insert_rowid()))
    }

    fn insert_option_module(&mut self, link: OptionModule) -> Result<(), CatalogError> {
        self.execute(
            "INSERT INTO option_modules (option_id, module_id, quantity) VALUES (?1, ?2, ?3)",
            params![link.option_id, link.module_id, link.quantity],
        )?;
        Ok(())
    }

    fn insert_module_part(&mut self, link: ModulePart) -> Result<(), CatalogError> {
        self.execute(
            "INSERT INTO module_parts (module_id, part_id, quantity) VALUES (?1, ?2, ?3)",
            params![link.module_id, link.part_id, link.quantity],
        )?;
        Ok(())
    }

    fn find_id(&self, kind: RefKind, code: &str) -> Result<Option<i64>, CatalogError> {
        let id = self
            .query_row(
                &format!("SELECT id FROM {} WHERE code = ?1", kind.table()),
                params![code],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }
}

impl CatalogWriter for MemoryCatalog {
    fn insert_category(&mut self, category: &Category) -> Result<CategoryId, CatalogError> {
        Ok(self.add_category(category.clone()))
    }

    fn insert_option(&mut self, option: &ConfigOption) -> Result<OptionId, CatalogError> {
        Ok(self.add_option(option.clone()))
    }

    fn insert_module(&mut self, module: &Module) -> Result<ModuleId, CatalogError> {
        Ok(self.add_module(module.clone()))
    }

    fn insert_part(&mut self, part: &Part) -> Result<PartId, CatalogError> {
        Ok(self.add_part(part.clone()))
    }

    fn insert_option_module(&mut self, link: OptionModule) -> Result<(), CatalogError> {
        self.link_option_module(link.option_id, link.module_id, link.quantity);
        Ok(())
    }

    fn insert_module_part(&mut self, link: ModulePart) -> Result<(), CatalogError> {
        self.link_module_part(link.module_id, link.part_id, link.quantity);
        Ok(())
    }

    fn find_id(&self, kind: RefKind, code: &str) -> Result<Option<i64>, CatalogError> {
        let id = match kind {
            RefKind::Category => self.category_by_code(code)?.map(|c| c.id.get()),
            RefKind::Option => self.option_by_code(code)?.map(|o| o.id.get()),
            RefKind::Module => self.module_by_code(code)?.map(|m| m.id.get()),
            RefKind::Part => self.part_by_code(code)?.map(|p| p.id.get()),
        };
        Ok(id)
    }
}
