//! BOM assembly: consolidated totals → priced, ordered result

use chrono::{DateTime, Local};

use crate::core::entity::Entity;
use crate::core::store::CatalogStore;
use crate::entities::ConfigOption;

use super::consolidation::Consolidation;
use super::observer::BomObserver;
use super::result::{BomLineItem, BomResult};
use super::BomError;

/// Price every consolidated part and wrap it all into a [`BomResult`]
///
/// Parts that no longer exist in the catalog are dropped rather than
/// emitted as zero-priced placeholders.
pub fn assemble_bom<S: CatalogStore + ?Sized>(
    store: &S,
    configuration_name: &str,
    generated_at: DateTime<Local>,
    options: &[ConfigOption],
    consolidation: &Consolidation,
    observer: &dyn BomObserver,
) -> Result<BomResult, BomError> {
    let selected_options = options.iter().map(|o| o.label()).collect();
    let activated_modules = consolidation.modules.iter().map(|m| m.label()).collect();

    let mut line_items = Vec::with_capacity(consolidation.parts.len());
    for (part_id, consolidated) in &consolidation.parts {
        match store.part(*part_id)? {
            Some(part) => line_items.push(BomLineItem::new(
                &part,
                consolidated.quantity,
                consolidated.source_modules.clone(),
            )?),
            None => observer.part_missing(*part_id),
        }
    }

    BomResult::new(
        configuration_name,
        generated_at,
        selected_options,
        activated_modules,
        line_items,
    )
}
