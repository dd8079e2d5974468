//! Option resolution: selected ids → option records

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::core::identity::OptionId;
use crate::core::store::CatalogStore;
use crate::entities::ConfigOption;

use super::observer::BomObserver;
use super::BomError;

/// How repeated ids in a selection are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPolicy {
    /// Every occurrence counts; selecting an option twice doubles its modules
    #[default]
    Additive,
    /// Repeated ids collapse to their first occurrence
    Distinct,
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionPolicy::Additive => write!(f, "additive"),
            SelectionPolicy::Distinct => write!(f, "distinct"),
        }
    }
}

impl FromStr for SelectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "additive" => Ok(SelectionPolicy::Additive),
            "distinct" => Ok(SelectionPolicy::Distinct),
            _ => Err(format!(
                "Invalid selection policy: {}. Use 'additive' or 'distinct'",
                s
            )),
        }
    }
}

impl SelectionPolicy {
    /// Apply the policy to a raw selection, preserving caller order
    pub fn apply(self, selected: &[OptionId]) -> Vec<OptionId> {
        match self {
            SelectionPolicy::Additive => selected.to_vec(),
            SelectionPolicy::Distinct => {
                let mut seen = HashSet::new();
                selected
                    .iter()
                    .copied()
                    .filter(|id| seen.insert(*id))
                    .collect()
            }
        }
    }
}

/// Look up each selected id, dropping ids the catalog does not know
pub fn resolve_options<S: CatalogStore + ?Sized>(
    store: &S,
    selected: &[OptionId],
    policy: SelectionPolicy,
    observer: &dyn BomObserver,
) -> Result<Vec<ConfigOption>, BomError> {
    let mut resolved = Vec::with_capacity(selected.len());

    for id in policy.apply(selected) {
        match store.option(id)? {
            Some(option) => resolved.push(option),
            None => observer.option_unresolved(id),
        }
    }

    observer.options_resolved(&resolved);
    Ok(resolved)
}
