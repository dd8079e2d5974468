//! Read queries backing the `CatalogStore` implementation

use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ValueRef};
use rusqlite::{params, OptionalExtension, Params, Row};
use rust_decimal::Decimal;

use super::SqliteCatalog;
use crate::core::identity::{CategoryId, ModuleId, OptionId, PartId};
use crate::core::store::{CatalogStore, StoreError, StoreResult};
use crate::entities::{Category, ConfigOption, Module, ModulePart, OptionModule, Part};

const CATEGORY_COLUMNS: &str = "id, code, name, description, display_order, is_active";
const OPTION_COLUMNS: &str =
    "id, code, name, description, category_id, display_order, is_active, is_default";
const MODULE_COLUMNS: &str = "id, code, name, description, master_assembly_path, is_active";
const PART_COLUMNS: &str =
    "id, code, name, description, part_number, unit_price, supplier, unit, is_active";

/// Decimal column stored as TEXT, tolerating REAL/INTEGER written by other tools
struct SqlDecimal(Decimal);

impl FromSql for SqlDecimal {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Text(bytes) => {
                let text = std::str::from_utf8(bytes).map_err(|e| FromSqlError::Other(Box::new(e)))?;
                Decimal::from_str(text.trim())
                    .map(SqlDecimal)
                    .map_err(|e| FromSqlError::Other(Box::new(e)))
            }
            ValueRef::Integer(i) => Ok(SqlDecimal(Decimal::from(i))),
            ValueRef::Real(f) => Decimal::try_from(f)
                .map(SqlDecimal)
                .map_err(|e| FromSqlError::Other(Box::new(e))),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

/// Row decoding failures mean bad data; everything else is the store failing
fn classify(table: &'static str, err: rusqlite::Error) -> StoreError {
    match err {
        rusqlite::Error::FromSqlConversionFailure(idx, _, source) => StoreError::Corrupt {
            table,
            reason: format!("column {}: {}", idx, source),
        },
        rusqlite::Error::InvalidColumnType(idx, name, ty) => StoreError::Corrupt {
            table,
            reason: format!("column {} ({}) has unexpected type {}", idx, name, ty),
        },
        rusqlite::Error::IntegralValueOutOfRange(idx, value) => StoreError::Corrupt {
            table,
            reason: format!("column {} value {} out of range", idx, value),
        },
        other => StoreError::Unavailable(other),
    }
}

fn category_from_row(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        display_order: row.get(4)?,
        is_active: row.get(5)?,
    })
}

fn option_from_row(row: &Row<'_>) -> rusqlite::Result<ConfigOption> {
    Ok(ConfigOption {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        category_id: row.get(4)?,
        display_order: row.get(5)?,
        is_active: row.get(6)?,
        is_default: row.get(7)?,
    })
}

fn module_from_row(row: &Row<'_>) -> rusqlite::Result<Module> {
    Ok(Module {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        master_assembly_path: row.get(4)?,
        is_active: row.get(5)?,
    })
}

fn part_from_row(row: &Row<'_>) -> rusqlite::Result<Part> {
    let SqlDecimal(unit_price) = row.get(5)?;
    Ok(Part {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        part_number: row.get(4)?,
        unit_price,
        supplier: row.get(6)?,
        unit: row.get(7)?,
        is_active: row.get(8)?,
    })
}

fn option_module_from_row(row: &Row<'_>) -> rusqlite::Result<OptionModule> {
    Ok(OptionModule {
        option_id: row.get(0)?,
        module_id: row.get(1)?,
        quantity: row.get(2)?,
    })
}

fn module_part_from_row(row: &Row<'_>) -> rusqlite::Result<ModulePart> {
    Ok(ModulePart {
        module_id: row.get(0)?,
        part_id: row.get(1)?,
        quantity: row.get(2)?,
    })
}

impl SqliteCatalog {
    fn query_one<T, P: Params>(
        &self,
        table: &'static str,
        sql: &str,
        params: P,
        map: fn(&Row<'_>) -> rusqlite::Result<T>,
    ) -> StoreResult<Option<T>> {
        self.conn
            .query_row(sql, params, map)
            .optional()
            .map_err(|e| classify(table, e))
    }

    fn query_all<T, P: Params>(
        &self,
        table: &'static str,
        sql: &str,
        params: P,
        map: fn(&Row<'_>) -> rusqlite::Result<T>,
    ) -> StoreResult<Vec<T>> {
        let mut stmt = self.conn.prepare(sql).map_err(|e| classify(table, e))?;
        let rows = stmt
            .query_map(params, map)
            .map_err(|e| classify(table, e))?;
        rows.collect::<rusqlite::Result<Vec<T>>>()
            .map_err(|e| classify(table, e))
    }
}

impl CatalogStore for SqliteCatalog {
    fn category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        self.query_one(
            "categories",
            &format!("SELECT {} FROM categories WHERE id = ?1", CATEGORY_COLUMNS),
            params![id],
            category_from_row,
        )
    }

    fn category_by_code(&self, code: &str) -> StoreResult<Option<Category>> {
        self.query_one(
            "categories",
            &format!("SELECT {} FROM categories WHERE code = ?1", CATEGORY_COLUMNS),
            params![code],
            category_from_row,
        )
    }

    fn categories(&self) -> StoreResult<Vec<Category>> {
        self.query_all(
            "categories",
            &format!(
                "SELECT {} FROM categories ORDER BY display_order, id",
                CATEGORY_COLUMNS
            ),
            [],
            category_from_row,
        )
    }

    fn option(&self, id: OptionId) -> StoreResult<Option<ConfigOption>> {
        self.query_one(
            "options",
            &format!("SELECT {} FROM options WHERE id = ?1", OPTION_COLUMNS),
            params![id],
            option_from_row,
        )
    }

    fn option_by_code(&self, code: &str) -> StoreResult<Option<ConfigOption>> {
        self.query_one(
            "options",
            &format!("SELECT {} FROM options WHERE code = ?1", OPTION_COLUMNS),
            params![code],
            option_from_row,
        )
    }

    fn options_in_category(&self, category_id: CategoryId) -> StoreResult<Vec<ConfigOption>> {
        self.query_all(
            "options",
            &format!(
                "SELECT {} FROM options WHERE category_id = ?1 ORDER BY display_order, id",
                OPTION_COLUMNS
            ),
            params![category_id],
            option_from_row,
        )
    }

    fn module(&self, id: ModuleId) -> StoreResult<Option<Module>> {
        self.query_one(
            "modules",
            &format!("SELECT {} FROM modules WHERE id = ?1", MODULE_COLUMNS),
            params![id],
            module_from_row,
        )
    }

    fn module_by_code(&self, code: &str) -> StoreResult<Option<Module>> {
        self.query_one(
            "modules",
            &format!("SELECT {} FROM modules WHERE code = ?1", MODULE_COLUMNS),
            params![code],
            module_from_row,
        )
    }

    fn modules(&self) -> StoreResult<Vec<Module>> {
        self.query_all(
            "modules",
            &format!("SELECT {} FROM modules ORDER BY id", MODULE_COLUMNS),
            [],
            module_from_row,
        )
    }

    fn part(&self, id: PartId) -> StoreResult<Option<Part>> {
        self.query_one(
            "parts",
            &format!("SELECT {} FROM parts WHERE id = ?1", PART_COLUMNS),
            params![id],
            part_from_row,
        )
    }

    fn part_by_code(&self, code: &str) -> StoreResult<Option<Part>> {
        self.query_one(
            "parts",
            &format!("SELECT {} FROM parts WHERE code = ?1", PART_COLUMNS),
            params![code],
            part_from_row,
        )
    }

    fn parts(&self) -> StoreResult<Vec<Part>> {
        self.query_all(
            "parts",
            &format!("SELECT {} FROM parts ORDER BY code, id", PART_COLUMNS),
            [],
            part_from_row,
        )
    }

    fn option_modules_for_option(&self, option_id: OptionId) -> StoreResult<Vec<OptionModule>> {
        self.query_all(
            "option_modules",
            "SELECT option_id, module_id, quantity FROM option_modules WHERE option_id = ?1 ORDER BY id",
            params![option_id],
            option_module_from_row,
        )
    }

    fn option_modules_for_module(&self, module_id: ModuleId) -> StoreResult<Vec<OptionModule>> {
        self.query_all(
            "option_modules",
            "SELECT option_id, module_id, quantity FROM option_modules WHERE module_id = ?1 ORDER BY id",
            params![module_id],
            option_module_from_row,
        )
    }

    fn module_parts_for_module(&self, module_id: ModuleId) -> StoreResult<Vec<ModulePart>> {
        self.query_all(
            "module_parts",
            "SELECT module_id, part_id, quantity FROM module_parts WHERE module_id = ?1 ORDER BY id",
            params![module_id],
            module_part_from_row,
        )
    }

    fn module_parts_for_part(&self, part_id: PartId) -> StoreResult<Vec<ModulePart>> {
        self.query_all(
            "module_parts",
            "SELECT module_id, part_id, quantity FROM module_parts WHERE part_id = ?1 ORDER BY id",
            params![part_id],
            module_part_from_row,
        )
    }
}
