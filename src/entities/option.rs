//! Option entity type - one selectable choice within a category

use serde::{Deserialize, Serialize};

use super::category::default_active;
use crate::core::entity::Entity;
use crate::core::identity::{CategoryId, OptionId};

/// A selectable configuration option (e.g., "IP54" in the "IP Rating" category)
///
/// Named `ConfigOption` to stay clear of `std::option::Option`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigOption {
    #[serde(default)]
    pub id: OptionId,

    pub code: String,

    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Owning category
    #[serde(default)]
    pub category_id: CategoryId,

    #[serde(default)]
    pub display_order: i32,

    #[serde(default = "default_active")]
    pub is_active: bool,

    /// Preselected choice for its category
    #[serde(default)]
    pub is_default: bool,
}

impl ConfigOption {
    /// Create a new active, non-default option in the given category
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        category_id: CategoryId,
        display_order: i32,
    ) -> Self {
        Self {
            id: OptionId::default(),
            code: code.into(),
            name: name.into(),
            description: String::new(),
            category_id,
            display_order,
            is_active: true,
            is_default: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

impl Entity for ConfigOption {
    const KIND: &'static str = "option";
    type Id = OptionId;

    fn id(&self) -> OptionId {
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
