//! Entity trait - common interface for all catalog entity types

use serde::Serialize;
use std::fmt::Display;

/// Common trait for catalog entities that carry a business code
pub trait Entity: Serialize {
    /// Human-readable kind (e.g., "category", "part")
    const KIND: &'static str;

    /// Store-assigned identifier type
    type Id: Copy + Ord + Display;

    /// Get the entity's store-assigned ID
    fn id(&self) -> Self::Id;

    /// Get the mutable business code
    fn code(&self) -> &str;

    /// Get the display name
    fn name(&self) -> &str;

    /// Whether the entity is offered for new configurations
    fn is_active(&self) -> bool;

    /// Label used in reports: `"{name} ({code})"`
    fn label(&self) -> String {
        format!("{} ({})", self.name(), self.code())
    }
}
