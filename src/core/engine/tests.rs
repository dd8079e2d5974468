use std::cell::RefCell;
use std::str::FromStr;

use chrono::TimeZone;
use rust_decimal::Decimal;

use super::*;
use crate::core::catalog::sample_catalog;
use crate::core::identity::{CategoryId, ModuleId, PartId};
use crate::core::memory::MemoryCatalog;
use crate::core::store::{CatalogStore, StoreResult};
use crate::entities::{Category, ConfigOption, Module, ModulePart, OptionModule, Part};

fn option_id(store: &MemoryCatalog, code: &str) -> OptionId {
    store.option_by_code(code).unwrap().unwrap().id
}

fn part_id(store: &MemoryCatalog, code: &str) -> PartId {
    store.part_by_code(code).unwrap().unwrap().id
}

fn fixed_time() -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 5, 17, 14, 5, 9).unwrap()
}

fn standard_selection(store: &MemoryCatalog) -> Vec<OptionId> {
    vec![
        option_id(store, "COL_700x1000"),
        option_id(store, "ROOF_YES"),
        option_id(store, "HBB_1600"),
    ]
}

#[test]
fn test_sample_configuration_totals() {
    let store = sample_catalog().unwrap();
    let selection = standard_selection(&store);

    let bom = generate_bom(&store, &selection, "Standard Panel").unwrap();

    assert_eq!(bom.line("PART_009").unwrap().quantity, 84);
    assert_eq!(bom.unique_part_count(), 7);
    assert_eq!(bom.total_items(), 119);
    assert_eq!(bom.total_cost(), Decimal::from_str("2762.00").unwrap());
}

#[test]
fn test_sample_configuration_labels_and_provenance() {
    let store = sample_catalog().unwrap();
    let bom = generate_bom(&store, &standard_selection(&store), "Standard Panel").unwrap();

    assert_eq!(
        bom.selected_options,
        vec![
            "700x1000 (COL_700x1000)",
            "Yes (ROOF_YES)",
            "1600A (HBB_1600)"
        ]
    );
    assert_eq!(
        bom.activated_modules,
        vec![
            "Column 700x1000 Module (x4)",
            "Ventilated Roof Module (x1)",
            "Busbar 1600A Module (x1)"
        ]
    );
    assert_eq!(
        bom.line("PART_009").unwrap().source_modules,
        vec![
            "Column 700x1000 Module",
            "Ventilated Roof Module",
            "Busbar 1600A Module"
        ]
    );
    assert_eq!(
        bom.line("PART_001").unwrap().source_modules,
        vec!["Column 700x1000 Module"]
    );
}

#[test]
fn test_sample_configuration_line_order() {
    let store = sample_catalog().unwrap();
    let bom = generate_bom(&store, &standard_selection(&store), "Standard Panel").unwrap();

    let codes: Vec<&str> = bom
        .line_items()
        .iter()
        .map(|l| l.part_code.as_str())
        .collect();
    assert_eq!(
        codes,
        vec!["PART_001", "PART_003", "PART_004", "PART_005", "PART_006", "PART_008", "PART_009"]
    );
}

#[test]
fn test_additivity_matches_link_arithmetic() {
    let store = sample_catalog().unwrap();
    let selection = vec![
        option_id(&store, "COL_800x1200"),
        option_id(&store, "ROOF_YES"),
        option_id(&store, "HBB_2500"),
        option_id(&store, "IP42"),
    ];
    let bom = generate_bom(&store, &selection, "check").unwrap();

    // Recompute every part total straight from the link tables
    let mut activation: std::collections::BTreeMap<ModuleId, u64> = Default::default();
    for id in &selection {
        for link in store.option_modules_for_option(*id).unwrap() {
            *activation.entry(link.module_id).or_default() += u64::from(link.quantity);
        }
    }
    for line in bom.line_items() {
        let expected: u64 = store
            .module_parts_for_part(line.part_id)
            .unwrap()
            .iter()
            .map(|mp| {
                u64::from(mp.quantity) * activation.get(&mp.module_id).copied().unwrap_or(0)
            })
            .sum();
        assert_eq!(line.quantity, expected, "part {}", line.part_code);
    }
}

#[test]
fn test_derived_totals_hold() {
    let store = sample_catalog().unwrap();
    let bom = generate_bom(&store, &standard_selection(&store), "x").unwrap();

    let cost: Decimal = bom
        .line_items()
        .iter()
        .map(|l| l.unit_price * Decimal::from(l.quantity))
        .sum();
    let items: u64 = bom.line_items().iter().map(|l| l.quantity).sum();

    assert_eq!(bom.total_cost(), cost);
    assert_eq!(bom.total_items(), items);
    assert_eq!(bom.unique_part_count(), bom.line_items().len());
}

#[test]
fn test_generation_is_stable() {
    let store = sample_catalog().unwrap();
    let selection = standard_selection(&store);
    let engine = BomEngine::new(&store);

    let first = engine.generate_at(&selection, "p", fixed_time()).unwrap();
    let second = engine.generate_at(&selection, "p", fixed_time()).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[test]
fn test_selection_order_does_not_change_lines() {
    let store = sample_catalog().unwrap();
    let mut selection = standard_selection(&store);
    let forward = generate_bom(&store, &selection, "p").unwrap();
    selection.reverse();
    let backward = generate_bom(&store, &selection, "p").unwrap();

    assert_eq!(forward.line_items(), backward.line_items());
    assert_eq!(forward.fingerprint(), backward.fingerprint());
}

#[test]
fn test_removed_part_drops_its_line() {
    let mut store = sample_catalog().unwrap();
    let selection = standard_selection(&store);
    let bolt = part_id(&store, "PART_009");
    store.remove_part(bolt);

    let bom = generate_bom(&store, &selection, "p").unwrap();
    assert!(bom.line("PART_009").is_none());
    assert_eq!(bom.unique_part_count(), 6);
    assert_eq!(bom.total_items(), 119 - 84);
    assert_eq!(bom.total_cost(), Decimal::from_str("2720.00").unwrap());
}

#[test]
fn test_unknown_option_ids_have_no_effect() {
    let store = sample_catalog().unwrap();
    let selection = standard_selection(&store);
    let mut noisy = selection.clone();
    noisy.extend([OptionId(9_999), OptionId(-4), OptionId(0)]);

    let clean = generate_bom(&store, &selection, "p").unwrap();
    let with_noise = generate_bom(&store, &noisy, "p").unwrap();
    assert_eq!(clean.line_items(), with_noise.line_items());
    assert_eq!(clean.selected_options, with_noise.selected_options);
}

#[test]
fn test_empty_selection_gives_empty_bom() {
    let store = sample_catalog().unwrap();
    let bom = generate_bom(&store, &[], "nothing").unwrap();

    assert!(bom.is_empty());
    assert!(bom.selected_options.is_empty());
    assert!(bom.activated_modules.is_empty());
    assert_eq!(bom.total_cost(), Decimal::ZERO);
    assert_eq!(bom.total_items(), 0);
}

#[test]
fn test_option_without_modules_only_adds_label() {
    let store = sample_catalog().unwrap();
    let mut selection = standard_selection(&store);
    let baseline = generate_bom(&store, &selection, "p").unwrap();
    selection.push(option_id(&store, "IP54"));

    let bom = generate_bom(&store, &selection, "p").unwrap();
    assert_eq!(bom.line_items(), baseline.line_items());
    assert_eq!(bom.selected_options.last().unwrap(), "IP54 (IP54)");
}

#[test]
fn test_duplicate_selection_policies() {
    let store = sample_catalog().unwrap();
    let roof = option_id(&store, "ROOF_YES");
    let selection = [roof, roof];

    let additive = BomEngine::new(&store).generate(&selection, "p").unwrap();
    assert_eq!(additive.line("PART_004").unwrap().quantity, 4);
    assert_eq!(additive.activated_modules, vec!["Ventilated Roof Module (x2)"]);
    assert_eq!(additive.selected_options.len(), 2);

    let distinct = BomEngine::new(&store)
        .with_policy(SelectionPolicy::Distinct)
        .generate(&selection, "p")
        .unwrap();
    assert_eq!(distinct.line("PART_004").unwrap().quantity, 2);
    assert_eq!(distinct.activated_modules, vec!["Ventilated Roof Module (x1)"]);
    assert_eq!(distinct.selected_options.len(), 1);
}

#[test]
fn test_equal_codes_tie_break_on_part_id() {
    let mut store = MemoryCatalog::new();
    let cat = store.add_category(Category::new("C", "Cat", 1));
    let opt = store.add_option(ConfigOption::new("O", "Opt", cat, 1));
    let module = store.add_module(Module::new("M", "Mod"));
    let first = store.add_part(Part::new("DUP", "First", Decimal::ONE));
    let second = store.add_part(Part::new("DUP", "Second", Decimal::from(2)));
    store.link_option_module(opt, module, 1);
    store.link_module_part(module, second, 1);
    store.link_module_part(module, first, 1);

    let bom = generate_bom(&store, &[opt], "p").unwrap();
    let ids: Vec<PartId> = bom.line_items().iter().map(|l| l.part_id).collect();
    assert_eq!(ids, vec![first, second]);
}

#[derive(Default)]
struct RecordingObserver {
    events: RefCell<Vec<String>>,
}

impl BomObserver for RecordingObserver {
    fn generation_started(&self, configuration: &str, _selected: &[OptionId]) {
        self.events.borrow_mut().push(format!("start {}", configuration));
    }

    fn option_unresolved(&self, id: OptionId) {
        self.events.borrow_mut().push(format!("unresolved option {}", id));
    }

    fn module_missing(&self, id: ModuleId) {
        self.events.borrow_mut().push(format!("missing module {}", id));
    }

    fn part_missing(&self, id: PartId) {
        self.events.borrow_mut().push(format!("missing part {}", id));
    }

    fn generation_finished(&self, result: &BomResult) {
        self.events
            .borrow_mut()
            .push(format!("finish {}", result.unique_part_count()));
    }
}

#[test]
fn test_observer_sees_skipped_rows() {
    let mut store = MemoryCatalog::new();
    let cat = store.add_category(Category::new("C", "Cat", 1));
    let opt = store.add_option(ConfigOption::new("O", "Opt", cat, 1));
    let kept = store.add_module(Module::new("KEEP", "Kept"));
    let gone = store.add_module(Module::new("GONE", "Gone"));
    let part = store.add_part(Part::new("P", "Part", Decimal::ONE));
    let dropped = store.add_part(Part::new("Q", "Dropped", Decimal::ONE));
    store.link_option_module(opt, kept, 1);
    store.link_option_module(opt, gone, 1);
    store.link_module_part(kept, part, 1);
    store.link_module_part(kept, dropped, 1);
    store.remove_module(gone);
    store.remove_part(dropped);

    let observer = RecordingObserver::default();
    let bom = BomEngine::new(&store)
        .with_observer(&observer)
        .generate(&[opt, OptionId(77)], "watched")
        .unwrap();

    assert_eq!(bom.unique_part_count(), 1);
    assert_eq!(
        observer.events.into_inner(),
        vec![
            "start watched".to_string(),
            "unresolved option 77".to_string(),
            format!("missing module {}", gone),
            format!("missing part {}", dropped),
            "finish 1".to_string(),
        ]
    );
}

/// Store whose link tables cannot be read
struct BrokenLinks(MemoryCatalog);

impl CatalogStore for BrokenLinks {
    fn category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        self.0.category(id)
    }
    fn category_by_code(&self, code: &str) -> StoreResult<Option<Category>> {
        self.0.category_by_code(code)
    }
    fn categories(&self) -> StoreResult<Vec<Category>> {
        self.0.categories()
    }
    fn option(&self, id: OptionId) -> StoreResult<Option<ConfigOption>> {
        self.0.option(id)
    }
    fn option_by_code(&self, code: &str) -> StoreResult<Option<ConfigOption>> {
        self.0.option_by_code(code)
    }
    fn options_in_category(&self, category_id: CategoryId) -> StoreResult<Vec<ConfigOption>> {
        self.0.options_in_category(category_id)
    }
    fn module(&self, id: ModuleId) -> StoreResult<Option<Module>> {
        self.0.module(id)
    }
    fn module_by_code(&self, code: &str) -> StoreResult<Option<Module>> {
        self.0.module_by_code(code)
    }
    fn modules(&self) -> StoreResult<Vec<Module>> {
        self.0.modules()
    }
    fn part(&self, id: PartId) -> StoreResult<Option<Part>> {
        self.0.part(id)
    }
    fn part_by_code(&self, code: &str) -> StoreResult<Option<Part>> {
        self.0.part_by_code(code)
    }
    fn parts(&self) -> StoreResult<Vec<Part>> {
        self.0.parts()
    }
    fn option_modules_for_option(&self, _option_id: OptionId) -> StoreResult<Vec<OptionModule>> {
        Err(StoreError::Corrupt {
            table: "option_modules",
            reason: "disk read failed".to_string(),
        })
    }
    fn option_modules_for_module(&self, module_id: ModuleId) -> StoreResult<Vec<OptionModule>> {
        self.0.option_modules_for_module(module_id)
    }
    fn module_parts_for_module(&self, module_id: ModuleId) -> StoreResult<Vec<ModulePart>> {
        self.0.module_parts_for_module(module_id)
    }
    fn module_parts_for_part(&self, part_id: PartId) -> StoreResult<Vec<ModulePart>> {
        self.0.module_parts_for_part(part_id)
    }
}

#[test]
fn test_store_failure_propagates() {
    let inner = sample_catalog().unwrap();
    let selection = standard_selection(&inner);
    let store = BrokenLinks(inner);

    let err = generate_bom(&store, &selection, "p").unwrap_err();
    assert!(matches!(err, BomError::StoreUnavailable(StoreError::Corrupt { .. })));
    assert!(err.to_string().contains("option_modules"));
}

#[test]
fn test_engine_works_through_trait_object() {
    let store = sample_catalog().unwrap();
    let selection = standard_selection(&store);
    let dyn_store: &dyn CatalogStore = &store;

    let bom = BomEngine::new(dyn_store).generate(&selection, "p").unwrap();
    assert_eq!(bom.total_items(), 119);
}

#[test]
fn test_overflowing_quantities_fail_instead_of_wrapping() {
    let mut store = MemoryCatalog::new();
    let cat = store.add_category(Category::new("C", "Cat", 1));
    let opt = store.add_option(ConfigOption::new("O", "Opt", cat, 1));
    let module = store.add_module(Module::new("M", "Mod"));
    let bolt = store.add_part(Part::new("BOLT", "Bolt", Decimal::ONE));
    store.link_option_module(opt, module, u32::MAX);
    store.link_module_part(module, bolt, u32::MAX);
    store.link_module_part(module, bolt, u32::MAX);

    let err = generate_bom(&store, &[opt], "big").unwrap_err();
    assert!(matches!(err, BomError::Overflow(_)));
    assert!(err.to_string().starts_with("overflow computing quantity of part"));
}
