//! Entity type definitions
//!
//! The catalog holds four entity kinds and two weighted link tables:
//!
//! - [`Category`] - Groups of mutually exclusive options (display only)
//! - [`ConfigOption`] - One selectable choice within a category
//! - [`Module`] - Assembly units activated by options
//! - [`Part`] - Procurable leaf items with price and supplier
//! - [`OptionModule`] - Option → Module activation with a multiplier
//! - [`ModulePart`] - Module → Part bill of materials per module instance

pub mod category;
pub mod links;
pub mod module;
pub mod option;
pub mod part;

pub use category::Category;
pub use links::{ModulePart, OptionModule};
pub use module::Module;
pub use option::ConfigOption;
pub use part::Part;
