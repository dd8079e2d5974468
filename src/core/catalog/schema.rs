//! Database schema initialization

use rusqlite::{params, Connection};

use super::SCHEMA_VERSION;

/// Create all catalog tables and record the schema version
///
/// Link tables declare their references but SQLite leaves them unenforced:
/// a deleted part or module must not take its links with it, BOM generation
/// skips dangling references instead.
pub(super) fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        -- Schema version tracking
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );

        CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            display_order INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS options (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            category_id INTEGER NOT NULL REFERENCES categories(id),
            display_order INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1,
            is_default INTEGER NOT NULL DEFAULT 0
        );
        CREATE INDEX IF NOT EXISTS idx_options_category ON options(category_id);

        CREATE TABLE IF NOT EXISTS modules (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            master_assembly_path TEXT NOT NULL DEFAULT '',
            is_active INTEGER NOT NULL DEFAULT 1
        );

        -- unit_price is TEXT so decimal prices round-trip exactly
        CREATE TABLE IF NOT EXISTS parts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            part_number TEXT NOT NULL DEFAULT '',
            unit_price TEXT NOT NULL DEFAULT '0',
            supplier TEXT NOT NULL DEFAULT '',
            unit TEXT NOT NULL DEFAULT 'pcs',
            is_active INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS option_modules (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            option_id INTEGER NOT NULL REFERENCES options(id),
            module_id INTEGER NOT NULL REFERENCES modules(id),
            quantity INTEGER NOT NULL DEFAULT 1 CHECK (quantity > 0)
        );
        CREATE INDEX IF NOT EXISTS idx_option_modules_option ON option_modules(option_id);
        CREATE INDEX IF NOT EXISTS idx_option_modules_module ON option_modules(module_id);

        CREATE TABLE IF NOT EXISTS module_parts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            module_id INTEGER NOT NULL REFERENCES modules(id),
            part_id INTEGER NOT NULL REFERENCES parts(id),
            quantity INTEGER NOT NULL DEFAULT 1 CHECK (quantity > 0)
        );
        CREATE INDEX IF NOT EXISTS idx_module_parts_module ON module_parts(module_id);
        CREATE INDEX IF NOT EXISTS idx_module_parts_part ON module_parts(part_id);
        "#,
    )?;

    conn.execute(
        "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
        params![SCHEMA_VERSION],
    )?;

    Ok(())
}
