//! Catalogs bundled into the binary

use rust_embed::Embed;

use super::{CatalogDocument, CatalogError};
use crate::core::memory::MemoryCatalog;

#[derive(Embed)]
#[folder = "assets/catalogs/"]
struct BundledCatalogs;

/// File name of the bundled sample catalog
pub const SAMPLE_CATALOG: &str = "sample.yaml";

/// Load a bundled catalog document by file name
pub fn bundled_document(name: &str) -> Result<CatalogDocument, CatalogError> {
    let file = BundledCatalogs::get(name)
        .ok_or_else(|| CatalogError::MissingBundle(name.to_string()))?;
    let text = String::from_utf8_lossy(&file.data);
    CatalogDocument::from_yaml(&text)
}

/// The sample switchgear catalog used by `mcfg init --seed`
pub fn sample_document() -> Result<CatalogDocument, CatalogError> {
    bundled_document(SAMPLE_CATALOG)
}

/// The sample catalog loaded into memory
pub fn sample_catalog() -> Result<MemoryCatalog, CatalogError> {
    let mut catalog = MemoryCatalog::new();
    sample_document()?.apply(&mut catalog)?;
    Ok(catalog)
}
