//! Progress hooks for BOM generation
//!
//! The engine performs no I/O of its own. Callers that want diagnostics pass
//! a [`BomObserver`]; every hook has an empty default so observers only
//! implement what they care about.

use crate::core::identity::{ModuleId, OptionId, PartId};
use crate::entities::ConfigOption;

use super::activation::ActivationMap;
use super::result::BomResult;

pub trait BomObserver {
    fn generation_started(&self, _configuration: &str, _selected: &[OptionId]) {}

    /// A selected id did not resolve to an option record
    fn option_unresolved(&self, _id: OptionId) {}

    fn options_resolved(&self, _options: &[ConfigOption]) {}

    fn modules_activated(&self, _activations: &ActivationMap) {}

    /// An activated module id has no module record; its parts are skipped
    fn module_missing(&self, _id: ModuleId) {}

    fn parts_consolidated(&self, _unique_parts: usize) {}

    /// A consolidated part id has no part record; its line is dropped
    fn part_missing(&self, _id: PartId) {}

    fn generation_finished(&self, _result: &BomResult) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl BomObserver for NoopObserver {}

/// Observer that forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl BomObserver for TracingObserver {
    fn generation_started(&self, configuration: &str, selected: &[OptionId]) {
        tracing::info!(
            configuration,
            selected = ?selected,
            "generating BOM"
        );
    }

    fn option_unresolved(&self, id: OptionId) {
        tracing::debug!(option_id = %id, "selected option not found; skipping");
    }

    fn options_resolved(&self, options: &[ConfigOption]) {
        let codes: Vec<&str> = options.iter().map(|o| o.code.as_str()).collect();
        tracing::info!(count = options.len(), codes = ?codes, "options resolved");
    }

    fn modules_activated(&self, activations: &ActivationMap) {
        tracing::info!(count = activations.len(), "modules activated");
        for activation in activations.values() {
            tracing::debug!(
                module_id = %activation.module_id,
                quantity = activation.quantity,
                "module activation"
            );
        }
    }

    fn module_missing(&self, id: ModuleId) {
        tracing::warn!(module_id = %id, "activated module not found in catalog; skipping its parts");
    }

    fn parts_consolidated(&self, unique_parts: usize) {
        tracing::info!(unique_parts, "parts consolidated");
    }

    fn part_missing(&self, id: PartId) {
        tracing::warn!(part_id = %id, "consolidated part not found in catalog; dropping line");
    }

    fn generation_finished(&self, result: &BomResult) {
        tracing::info!(
            unique_parts = result.unique_part_count(),
            total_items = result.total_items(),
            total_cost = %result.total_cost(),
            "BOM generated"
        );
    }
}
