//! Module entity type - buildable assembly units activated by options

use serde::{Deserialize, Serialize};

use super::category::default_active;
use crate::core::entity::Entity;
use crate::core::identity::ModuleId;

/// A Module is an intermediate assembly carrying its own parts list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    #[serde(default)]
    pub id: ModuleId,

    pub code: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Master assembly file for CAD generation; opaque to BOM derivation
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub master_assembly_path: String,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl Module {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ModuleId::default(),
            code: code.into(),
            name: name.into(),
            description: String::new(),
            master_assembly_path: String::new(),
            is_active: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_master_assembly(mut self, path: impl Into<String>) -> Self {
        self.master_assembly_path = path.into();
        self
    }
}

impl Entity for Module {
    const KIND: &'static str = "module";
    type Id = ModuleId;

    fn id(&self) -> ModuleId {
        self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}
