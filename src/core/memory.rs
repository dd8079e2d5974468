//! In-process catalog store
//!
//! `MemoryCatalog` holds the whole catalog in ordered maps. It backs unit
//! tests and lets library users run the engine over data they already hold
//! without going through SQLite.

use std::collections::BTreeMap;

use crate::core::identity::{CategoryId, ModuleId, OptionId, PartId};
use crate::core::store::{CatalogStore, StoreResult};
use crate::entities::{Category, ConfigOption, Module, ModulePart, OptionModule, Part};

#[derive(Debug, Default, Clone)]
pub struct MemoryCatalog {
    categories: BTreeMap<CategoryId, Category>,
    options: BTreeMap<OptionId, ConfigOption>,
    modules: BTreeMap<ModuleId, Module>,
    parts: BTreeMap<PartId, Part>,
    option_modules: Vec<OptionModule>,
    module_parts: Vec<ModulePart>,
}

/// Next id after the largest key, starting at 1
fn next_key<K: Copy, V>(map: &BTreeMap<K, V>, raw: impl Fn(K) -> i64) -> i64 {
    map.keys().next_back().map(|k| raw(*k) + 1).unwrap_or(1)
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a category, assigning it a fresh id
    pub fn add_category(&mut self, mut category: Category) -> CategoryId {
        let id = CategoryId(next_key(&self.categories, CategoryId::get));
        category.id = id;
        self.categories.insert(id, category);
        id
    }

    pub fn add_option(&mut self, mut option: ConfigOption) -> OptionId {
        let id = OptionId(next_key(&self.options, OptionId::get));
        option.id = id;
        self.options.insert(id, option);
        id
    }

    pub fn add_module(&mut self, mut module: Module) -> ModuleId {
        let id = ModuleId(next_key(&self.modules, ModuleId::get));
        module.id = id;
        self.modules.insert(id, module);
        id
    }

    pub fn add_part(&mut self, mut part: Part) -> PartId {
        let id = PartId(next_key(&self.parts, PartId::get));
        part.id = id;
        self.parts.insert(id, part);
        id
    }

    pub fn link_option_module(&mut self, option_id: OptionId, module_id: ModuleId, quantity: u32) {
        self.option_modules
            .push(OptionModule::new(option_id, module_id, quantity));
    }

    pub fn link_module_part(&mut self, module_id: ModuleId, part_id: PartId, quantity: u32) {
        self.module_parts
            .push(ModulePart::new(module_id, part_id, quantity));
    }

    /// Delete a part record, leaving any links that reference it dangling
    pub fn remove_part(&mut self, id: PartId) -> Option<Part> {
        self.parts.remove(&id)
    }

    /// Delete a module record, leaving any links that reference it dangling
    pub fn remove_module(&mut self, id: ModuleId) -> Option<Module> {
        self.modules.remove(&id)
    }
}

impl CatalogStore for MemoryCatalog {
    fn category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        Ok(self.categories.get(&id).cloned())
    }

    fn category_by_code(&self, code: &str) -> StoreResult<Option<Category>> {
        Ok(self.categories.values().find(|c| c.code == code).cloned())
    }

    fn categories(&self) -> StoreResult<Vec<Category>> {
        let mut all: Vec<Category> = self.categories.values().cloned().collect();
        all.sort_by_key(|c| (c.display_order, c.id));
        Ok(all)
    }

    fn option(&self, id: OptionId) -> StoreResult<Option<ConfigOption>> {
        Ok(self.options.get(&id).cloned())
    }

    fn option_by_code(&self, code: &str) -> StoreResult<Option<ConfigOption>> {
        Ok(self.options.values().find(|o| o.code == code).cloned())
    }

    fn options_in_category(&self, category_id: CategoryId) -> StoreResult<Vec<ConfigOption>> {
        let mut found: Vec<ConfigOption> = self
            .options
            .values()
            .filter(|o| o.category_id == category_id)
            .cloned()
            .collect();
        found.sort_by_key(|o| (o.display_order, o.id));
        Ok(found)
    }

    fn module(&self, id: ModuleId) -> StoreResult<Option<Module>> {
        Ok(self.modules.get(&id).cloned())
    }

    fn module_by_code(&self, code: &str) -> StoreResult<Option<Module>> {
        Ok(self.modules.values().find(|m| m.code == code).cloned())
    }

    fn modules(&self) -> StoreResult<Vec<Module>> {
        Ok(self.modules.values().cloned().collect())
    }

    fn part(&self, id: PartId) -> StoreResult<Option<Part>> {
        Ok(self.parts.get(&id).cloned())
    }

    fn part_by_code(&self, code: &str) -> StoreResult<Option<Part>> {
        Ok(self.parts.values().find(|p| p.code == code).cloned())
    }

    fn parts(&self) -> StoreResult<Vec<Part>> {
        let mut all: Vec<Part> = self.parts.values().cloned().collect();
        all.sort_by(|a, b| a.code.cmp(&b.code).then(a.id.cmp(&b.id)));
        Ok(all)
    }

    fn option_modules_for_option(&self, option_id: OptionId) -> StoreResult<Vec<OptionModule>> {
        Ok(self
            .option_modules
            .iter()
            .filter(|l| l.option_id == option_id)
            .copied()
            .collect())
    }

    fn option_modules_for_module(&self, module_id: ModuleId) -> StoreResult<Vec<OptionModule>> {
        Ok(self
            .option_modules
            .iter()
            .filter(|l| l.module_id == module_id)
            .copied()
            .collect())
    }

    fn module_parts_for_module(&self, module_id: ModuleId) -> StoreResult<Vec<ModulePart>> {
        Ok(self
            .module_parts
            .iter()
            .filter(|l| l.module_id == module_id)
            .copied()
            .collect())
    }

    fn module_parts_for_part(&self, part_id: PartId) -> StoreResult<Vec<ModulePart>> {
        Ok(self
            .module_parts
            .iter()
            .filter(|l| l.part_id == part_id)
            .copied()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_ids_are_assigned_sequentially() {
        let mut cat = MemoryCatalog::new();
        let a = cat.add_part(Part::new("A", "Part A", Decimal::ONE));
        let b = cat.add_part(Part::new("B", "Part B", Decimal::ONE));
        assert_eq!(a, PartId(1));
        assert_eq!(b, PartId(2));
        assert_eq!(cat.part(b).unwrap().unwrap().id, b);
    }

    #[test]
    fn test_removed_part_is_not_found() {
        let mut cat = MemoryCatalog::new();
        let id = cat.add_part(Part::new("A", "Part A", Decimal::ONE));
        cat.remove_part(id);
        assert!(cat.part(id).unwrap().is_none());
    }

    #[test]
    fn test_options_in_category_sorted_by_display_order() {
        let mut cat = MemoryCatalog::new();
        let c = cat.add_category(Category::new("IP", "IP Rating", 1));
        cat.add_option(ConfigOption::new("IP42", "IP42", c, 2));
        cat.add_option(ConfigOption::new("IP54", "IP54", c, 1));

        let codes: Vec<String> = cat
            .options_in_category(c)
            .unwrap()
            .into_iter()
            .map(|o| o.code)
            .collect();
        assert_eq!(codes, vec!["IP54", "IP42"]);
    }

    #[test]
    fn test_parts_sorted_by_code() {
        let mut cat = MemoryCatalog::new();
        cat.add_part(Part::new("Z", "Last", Decimal::ONE));
        cat.add_part(Part::new("A", "First", Decimal::ONE));
        let codes: Vec<String> = cat.parts().unwrap().into_iter().map(|p| p.code).collect();
        assert_eq!(codes, vec!["A", "Z"]);
    }
}
