//! SQLite-backed catalog store
//!
//! The catalog database lives at `.mcfg/catalog.db` inside a project (or any
//! path given in config). It is the system of record for categories,
//! options, modules, parts and the two weighted link tables.
//!
//! Reads go through [`CatalogStore`](crate::core::store::CatalogStore);
//! writes go through [`CatalogWriter`] inside a transaction, normally by
//! importing a [`CatalogDocument`].

mod document;
mod queries;
mod sample;
mod schema;
mod writer;

pub use document::{
    CatalogDocument, ImportStats, ModulePartDef, OptionDef, OptionModuleDef,
};
pub use sample::{bundled_document, sample_catalog, sample_document, SAMPLE_CATALOG};
pub use writer::{CatalogWriter, RefKind};

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::core::identity::{ModuleId, PartId};
use crate::core::project::Project;
use crate::core::store::StoreError;

/// Catalog file location within a project
pub const CATALOG_FILE: &str = ".mcfg/catalog.db";

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Errors opening, importing into, or maintaining the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("catalog I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid catalog document: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("unknown {kind} '{code}' referenced in catalog document")]
    UnknownReference { kind: RefKind, code: String },

    #[error("duplicate {kind} code '{code}'")]
    DuplicateCode { kind: RefKind, code: String },

    #[error("{kind} link {from} -> {to} has quantity 0; link quantities must be positive")]
    ZeroQuantity {
        kind: &'static str,
        from: String,
        to: String,
    },

    #[error("part '{code}' has negative unit price {price}")]
    NegativePrice { code: String, price: Decimal },

    #[error("catalog already contains data (use --append to import anyway)")]
    NotEmpty,

    #[error("catalog schema version {found} is not supported (expected {expected})")]
    SchemaMismatch { found: i32, expected: i32 },

    #[error("bundled catalog '{0}' not found")]
    MissingBundle(String),
}

impl From<rusqlite::Error> for CatalogError {
    fn from(e: rusqlite::Error) -> Self {
        CatalogError::Store(StoreError::Unavailable(e))
    }
}

/// Row counts per catalog table
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct CatalogStats {
    pub categories: usize,
    pub options: usize,
    pub modules: usize,
    pub parts: usize,
    pub option_modules: usize,
    pub module_parts: usize,
    pub db_size_bytes: u64,
}

/// The catalog database
pub struct SqliteCatalog {
    conn: Connection,
    path: Option<PathBuf>,
}

impl SqliteCatalog {
    /// Open or create the catalog for a project at its configured location
    pub fn open_project(project: &Project, database: Option<&Path>) -> Result<Self, CatalogError> {
        let path = match database {
            Some(p) if p.is_absolute() => p.to_path_buf(),
            Some(p) => project.root().join(p),
            None => project.root().join(CATALOG_FILE),
        };
        Self::open(&path)
    }

    /// Open or create a catalog database file
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // Enable WAL mode so concurrent readers don't block each other
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        let mut catalog = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        catalog.ensure_schema()?;
        Ok(catalog)
    }

    /// Open a private in-memory catalog (tests, one-off tooling)
    pub fn open_in_memory() -> Result<Self, CatalogError> {
        let conn = Connection::open_in_memory()?;
        let mut catalog = Self { conn, path: None };
        catalog.ensure_schema()?;
        Ok(catalog)
    }

    /// Location of the database file, if file-backed
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn ensure_schema(&mut self) -> Result<(), CatalogError> {
        let has_version_table: bool = self
            .conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version'",
                [],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);

        if has_version_table {
            let found: i32 = self
                .conn
                .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
                    row.get::<_, Option<i32>>(0)
                })?
                .unwrap_or(0);
            // The catalog is the system of record: never drop data on mismatch
            if found != SCHEMA_VERSION {
                return Err(CatalogError::SchemaMismatch {
                    found,
                    expected: SCHEMA_VERSION,
                });
            }
            return Ok(());
        }

        schema::init_schema(&self.conn)?;
        Ok(())
    }

    /// True when no category, option, module or part rows exist
    pub fn is_empty(&self) -> Result<bool, CatalogError> {
        let stats = self.statistics()?;
        Ok(stats.categories + stats.options + stats.modules + stats.parts == 0)
    }

    /// Import a catalog document in one transaction
    ///
    /// Refuses to import into a non-empty catalog unless `append` is set.
    pub fn import(
        &mut self,
        document: &CatalogDocument,
        append: bool,
    ) -> Result<ImportStats, CatalogError> {
        if !append && !self.is_empty()? {
            return Err(CatalogError::NotEmpty);
        }

        let mut tx = self.conn.transaction()?;
        let stats = document.apply(&mut tx)?;
        tx.commit()?;

        tracing::info!(
            categories = stats.categories,
            options = stats.options,
            modules = stats.modules,
            parts = stats.parts,
            links = stats.option_modules + stats.module_parts,
            "catalog imported"
        );
        Ok(stats)
    }

    /// Delete a part row; links that reference it are left in place
    pub fn delete_part(&mut self, id: PartId) -> Result<bool, CatalogError> {
        let n = self
            .conn
            .execute("DELETE FROM parts WHERE id = ?1", params![id])?;
        Ok(n > 0)
    }

    /// Delete a module row; links that reference it are left in place
    pub fn delete_module(&mut self, id: ModuleId) -> Result<bool, CatalogError> {
        let n = self
            .conn
            .execute("DELETE FROM modules WHERE id = ?1", params![id])?;
        Ok(n > 0)
    }

    /// Get catalog statistics
    pub fn statistics(&self) -> Result<CatalogStats, CatalogError> {
        let count = |table: &str| -> Result<usize, CatalogError> {
            let n: i64 = self.conn.query_row(
                &format!("SELECT COUNT(*) FROM {}", table),
                [],
                |row| row.get(0),
            )?;
            Ok(n as usize)
        };

        let db_size_bytes = self
            .path
            .as_ref()
            .and_then(|p| fs::metadata(p).ok())
            .map(|m| m.len())
            .unwrap_or(0);

        Ok(CatalogStats {
            categories: count("categories")?,
            options: count("options")?,
            modules: count("modules")?,
            parts: count("parts")?,
            option_modules: count("option_modules")?,
            module_parts: count("module_parts")?,
            db_size_bytes,
        })
    }
}
