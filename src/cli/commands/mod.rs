//! CLI command implementations

pub mod bom;
pub mod catalog;
pub mod completions;
pub mod init;
pub mod where_used;
