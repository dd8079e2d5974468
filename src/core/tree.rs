//! Categories with their selectable options

use serde::Serialize;

use crate::core::entity::Entity;
use crate::core::identity::{CategoryId, OptionId};
use crate::core::store::{CatalogStore, StoreResult};

/// An option as shown to someone choosing a configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionSummary {
    pub id: OptionId,
    pub code: String,
    pub name: String,
    pub description: String,
    pub is_default: bool,
}

/// A category and its active options, both in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryNode {
    pub id: CategoryId,
    pub code: String,
    pub name: String,
    pub description: String,
    pub options: Vec<OptionSummary>,
}

impl CategoryNode {
    /// The option flagged default, else the first one listed
    pub fn default_option(&self) -> Option<&OptionSummary> {
        self.options
            .iter()
            .find(|o| o.is_default)
            .or_else(|| self.options.first())
    }
}

/// Keep the rows offered for new configurations, preserving order
pub fn active_only<E: Entity>(rows: Vec<E>) -> Vec<E> {
    rows.into_iter()
        .filter(|row| {
            if !row.is_active() {
                tracing::trace!(kind = E::KIND, code = row.code(), "skipping inactive row");
            }
            row.is_active()
        })
        .collect()
}

/// Active categories with their active options
pub fn catalog_tree<S: CatalogStore + ?Sized>(store: &S) -> StoreResult<Vec<CategoryNode>> {
    let mut tree = Vec::new();
    for category in active_only(store.categories()?) {
        let options = active_only(store.options_in_category(category.id)?)
            .into_iter()
            .map(|o| OptionSummary {
                id: o.id,
                code: o.code,
                name: o.name,
                description: o.description,
                is_default: o.is_default,
            })
            .collect();

        tree.push(CategoryNode {
            id: category.id,
            code: category.code,
            name: category.name,
            description: category.description,
            options,
        });
    }
    Ok(tree)
}

/// One default option per category, in category display order
///
/// Categories with no active options contribute nothing.
pub fn default_selection(tree: &[CategoryNode]) -> Vec<OptionId> {
    tree.iter()
        .filter_map(|c| c.default_option().map(|o| o.id))
        .collect()
}
