//! Where-used lookup: which modules and options pull in a part

use serde::Serialize;

use crate::core::identity::{ModuleId, OptionId};
use crate::core::store::{CatalogStore, StoreResult};
use crate::entities::Part;

/// An option that activates a module, with its activation multiplier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activator {
    pub option_id: OptionId,
    pub option_code: String,
    pub option_name: String,
    pub quantity: u32,
}

/// A module using the part
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartUsage {
    pub module_id: ModuleId,
    pub module_code: String,
    pub module_name: String,
    /// Part quantity per module instance
    pub quantity_per_module: u32,
    pub activated_by: Vec<Activator>,
}

/// Resolve a part by code, falling back to a numeric id
pub fn find_part<S: CatalogStore + ?Sized>(store: &S, key: &str) -> StoreResult<Option<Part>> {
    if let Some(part) = store.part_by_code(key)? {
        return Ok(Some(part));
    }
    match key.parse() {
        Ok(id) => store.part(id),
        Err(_) => Ok(None),
    }
}

/// Modules linking to `part`, ascending module id
///
/// Links to modules that no longer exist are skipped, as are activations
/// from missing options.
pub fn where_used<S: CatalogStore + ?Sized>(store: &S, part: &Part) -> StoreResult<Vec<PartUsage>> {
    let mut links = store.module_parts_for_part(part.id)?;
    links.sort_by_key(|l| l.module_id);

    let mut usages: Vec<PartUsage> = Vec::new();
    for link in links {
        // Repeated links to the same module add up, as they do in a BOM
        if let Some(existing) = usages.iter_mut().find(|u| u.module_id == link.module_id) {
            existing.quantity_per_module += link.quantity;
            continue;
        }

        let Some(module) = store.module(link.module_id)? else {
            continue;
        };

        let mut activated_by = Vec::new();
        for activation in store.option_modules_for_module(module.id)? {
            if let Some(option) = store.option(activation.option_id)? {
                activated_by.push(Activator {
                    option_id: option.id,
                    option_code: option.code,
                    option_name: option.name,
                    quantity: activation.quantity,
                });
            }
        }

        usages.push(PartUsage {
            module_id: module.id,
            module_code: module.code,
            module_name: module.name,
            quantity_per_module: link.quantity,
            activated_by,
        });
    }
    Ok(usages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::sample_catalog;

    #[test]
    fn test_bolt_is_used_everywhere() {
        let store = sample_catalog().unwrap();
        let bolt = find_part(&store, "PART_009").unwrap().unwrap();
        let usages = where_used(&store, &bolt).unwrap();

        let modules: Vec<&str> = usages.iter().map(|u| u.module_code.as_str()).collect();
        assert_eq!(
            modules,
            vec!["MOD_COL_700", "MOD_COL_800", "MOD_ROOF", "MOD_HBB_1600", "MOD_HBB_2500"]
        );
        assert_eq!(usages[0].quantity_per_module, 16);
        assert_eq!(usages[0].activated_by.len(), 1);
        assert_eq!(usages[0].activated_by[0].option_code, "COL_700x1000");
        assert_eq!(usages[0].activated_by[0].quantity, 4);
    }

    #[test]
    fn test_find_part_by_id() {
        let store = sample_catalog().unwrap();
        let by_code = find_part(&store, "PART_004").unwrap().unwrap();
        let by_id = find_part(&store, &by_code.id.to_string()).unwrap().unwrap();
        assert_eq!(by_code, by_id);
        assert!(find_part(&store, "nothing").unwrap().is_none());
    }

    #[test]
    fn test_missing_module_is_skipped() {
        let mut store = sample_catalog().unwrap();
        let roof = store.module_by_code("MOD_ROOF").unwrap().unwrap();
        store.remove_module(roof.id);

        let panel = find_part(&store, "PART_004").unwrap().unwrap();
        assert!(where_used(&store, &panel).unwrap().is_empty());
    }
}
