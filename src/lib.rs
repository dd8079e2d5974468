//! mcfg: modular product configurator
//!
//! Derives a consolidated, priced bill of materials from a set of selected
//! configuration options, using a catalog of option → module → part links.

pub mod cli;
pub mod core;
pub mod entities;
pub mod export;
