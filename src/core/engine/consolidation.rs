//! Part consolidation: activated modules → per-part totals with provenance

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::identity::PartId;
use crate::core::store::CatalogStore;
use crate::entities::Module;

use super::activation::ActivationMap;
use super::observer::BomObserver;
use super::BomError;

/// Total demand for one part across every activated module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsolidatedPart {
    pub part_id: PartId,
    pub quantity: u64,
    /// Names of contributing modules, first contribution first, no repeats
    pub source_modules: Vec<String>,
}

/// A module that resolved in the catalog, with its activation quantity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivatedModule {
    pub module: Module,
    pub quantity: u64,
}

impl ActivatedModule {
    /// Report label: `"{name} (x{qty})"`
    pub fn label(&self) -> String {
        format!("{} (x{})", self.module.name, self.quantity)
    }
}

/// Output of the consolidation step
#[derive(Debug, Clone, Default)]
pub struct Consolidation {
    /// Keyed and iterated by ascending part id
    pub parts: BTreeMap<PartId, ConsolidatedPart>,
    /// Modules that were found, ascending module id
    pub modules: Vec<ActivatedModule>,
}

/// Expand each activated module's parts list and accumulate per part
///
/// Modules are visited in ascending id order, which fixes the order of
/// every part's `source_modules`. Missing modules are reported and skipped.
pub fn consolidate_parts<S: CatalogStore + ?Sized>(
    store: &S,
    activations: &ActivationMap,
    observer: &dyn BomObserver,
) -> Result<Consolidation, BomError> {
    let mut consolidation = Consolidation::default();

    for (module_id, activation) in activations {
        let Some(module) = store.module(*module_id)? else {
            observer.module_missing(*module_id);
            continue;
        };

        for link in store.module_parts_for_module(*module_id)? {
            let entry = consolidation
                .parts
                .entry(link.part_id)
                .or_insert_with(|| ConsolidatedPart {
                    part_id: link.part_id,
                    quantity: 0,
                    source_modules: Vec::new(),
                });

            let current = entry.quantity;
            entry.quantity = u64::from(link.quantity)
                .checked_mul(activation.quantity)
                .and_then(|added| current.checked_add(added))
                .ok_or_else(|| BomError::Overflow(format!("quantity of part {}", link.part_id)))?;
            if !entry.source_modules.iter().any(|name| *name == module.name) {
                entry.source_modules.push(module.name.clone());
            }
        }

        consolidation.modules.push(ActivatedModule {
            module,
            quantity: activation.quantity,
        });
    }

    observer.parts_consolidated(consolidation.parts.len());
    Ok(consolidation)
}
