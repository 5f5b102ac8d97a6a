//! mg-assets: authoring data for the map generator.
//!
//! A template map is an editor-exported JSON map whose top-left corner holds
//! one reference cell per symbol. The loaders turn it into a symbol table and
//! an event catalog, and read generator settings from their own JSON file.

pub mod loader;
pub mod template;

pub use loader::*;
pub use template::*;
