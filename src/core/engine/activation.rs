//! Module activation: resolved options → module multipliers

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::identity::ModuleId;
use crate::core::store::CatalogStore;
use crate::entities::ConfigOption;

use super::BomError;

/// Net number of instances of one module the configuration needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModuleActivation {
    pub module_id: ModuleId,
    pub quantity: u64,
}

/// Activations keyed and iterated by ascending module id
pub type ActivationMap = BTreeMap<ModuleId, ModuleActivation>;

/// Sum every option→module link quantity per module
///
/// Options are taken as given: an option listed twice contributes twice.
pub fn aggregate_activations<S: CatalogStore + ?Sized>(
    store: &S,
    options: &[ConfigOption],
) -> Result<ActivationMap, BomError> {
    let mut activations = ActivationMap::new();

    for option in options {
        for link in store.option_modules_for_option(option.id)? {
            let entry = activations
                .entry(link.module_id)
                .or_insert(ModuleActivation {
                    module_id: link.module_id,
                    quantity: 0,
                });
            entry.quantity = entry
                .quantity
                .checked_add(u64::from(link.quantity))
                .ok_or_else(|| {
                    BomError::Overflow(format!("activation of module {}", link.module_id))
                })?;
        }
    }

    Ok(activations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::identity::CategoryId;
    use crate::core::memory::MemoryCatalog;
    use crate::entities::Module;

    #[test]
    fn test_shared_module_quantities_add_up() {
        let mut cat = MemoryCatalog::new();
        let a = cat.add_option(ConfigOption::new("A", "Alpha", CategoryId(1), 1));
        let b = cat.add_option(ConfigOption::new("B", "Beta", CategoryId(2), 1));
        let frame = cat.add_module(Module::new("FRAME", "Frame"));
        let door = cat.add_module(Module::new("DOOR", "Door"));
        cat.link_option_module(a, frame, 4);
        cat.link_option_module(b, frame, 2);
        cat.link_option_module(b, door, 1);

        let options = vec![cat.option(a).unwrap().unwrap(), cat.option(b).unwrap().unwrap()];
        let activations = aggregate_activations(&cat, &options).unwrap();

        assert_eq!(activations.len(), 2);
        assert_eq!(activations[&frame].quantity, 6);
        assert_eq!(activations[&door].quantity, 1);
    }

    #[test]
    fn test_repeated_option_double_counts() {
        let mut cat = MemoryCatalog::new();
        let a = cat.add_option(ConfigOption::new("A", "Alpha", CategoryId(1), 1));
        let m = cat.add_module(Module::new("M", "Module"));
        cat.link_option_module(a, m, 3);

        let option = cat.option(a).unwrap().unwrap();
        let activations = aggregate_activations(&cat, &[option.clone(), option]).unwrap();
        assert_eq!(activations[&m].quantity, 6);
    }

    #[test]
    fn test_option_without_links_contributes_nothing() {
        let mut cat = MemoryCatalog::new();
        let a = cat.add_option(ConfigOption::new("A", "Alpha", CategoryId(1), 1));
        let option = cat.option(a).unwrap().unwrap();

        let activations = aggregate_activations(&cat, &[option]).unwrap();
        assert!(activations.is_empty());
    }

    #[test]
    fn test_iteration_is_ascending_module_id() {
        let mut cat = MemoryCatalog::new();
        let a = cat.add_option(ConfigOption::new("A", "Alpha", CategoryId(1), 1));
        let m1 = cat.add_module(Module::new("M1", "First"));
        let m2 = cat.add_module(Module::new("M2", "Second"));
        let m3 = cat.add_module(Module::new("M3", "Third"));
        cat.link_option_module(a, m3, 1);
        cat.link_option_module(a, m1, 1);
        cat.link_option_module(a, m2, 1);

        let option = cat.option(a).unwrap().unwrap();
        let order: Vec<ModuleId> = aggregate_activations(&cat, &[option])
            .unwrap()
            .keys()
            .copied()
            .collect();
        assert_eq!(order, vec![m1, m2, m3]);
    }
}
