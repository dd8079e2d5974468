//! Category entity type - user-facing groups of mutually exclusive options

use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::CategoryId;

/// A Category groups the options a user chooses between (e.g., "IP Rating")
///
/// Categories only drive presentation; they take no part in BOM math.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Store-assigned identifier
    #[serde(default)]
    pub id: CategoryId,

    /// Mutable business code (e.g., "IP")
    pub code: String,

    /// Display name
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Sort key for display
    #[serde(default)]
    pub display_order: i32,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

pub(crate) fn default_active() -> bool {
    true
}

impl Category {
    /// Create a new active category; the id is assigned when stored
    pub fn new(code: impl Into<String>, name: impl Into<String>, display_order: i32) -> Self {
        Self {
            id: CategoryId::default(),
            code: code.into(),
            name: name.into(),
            description: String::new(),
            display_order,
            is_active: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

impl Entity for Category {
    const KIND: &'static str = "category";
    type Id = CategoryId;

    fn id(&self) -> CategoryId {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_defaults_from_yaml() {
        let yaml = "code: IP\nname: IP Rating\n";
        let cat: Category = serde_yml::from_str(yaml).unwrap();

        assert_eq!(cat.id, CategoryId(0));
        assert_eq!(cat.code, "IP");
        assert!(cat.is_active);
        assert_eq!(cat.display_order, 0);
        assert!(cat.description.is_empty());
    }

    #[test]
    fn test_category_label() {
        let cat = Category::new("ROOF", "Ventilated Roof", 3);
        assert_eq!(cat.label(), "Ventilated Roof (ROOF)");
    }
}
