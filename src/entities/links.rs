//! Link rows - the two weighted many-to-many tables driving BOM derivation

use serde::{Deserialize, Serialize};

use crate::core::identity::{ModuleId, OptionId, PartId};

/// Selecting `option_id` activates `quantity` instances of `module_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionModule {
    pub option_id: OptionId,
    pub module_id: ModuleId,
    /// Strictly positive multiplier
    pub quantity: u32,
}

/// One instance of `module_id` needs `quantity` of `part_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePart {
    pub module_id: ModuleId,
    pub part_id: PartId,
    /// Strictly positive per-instance quantity
    pub quantity: u32,
}

impl OptionModule {
    pub fn new(option_id: OptionId, module_id: ModuleId, quantity: u32) -> Self {
        Self {
            option_id,
            module_id,
            quantity,
        }
    }
}

impl ModulePart {
    pub fn new(module_id: ModuleId, part_id: PartId, quantity: u32) -> Self {
        Self {
            module_id,
            part_id,
            quantity,
        }
    }
}
