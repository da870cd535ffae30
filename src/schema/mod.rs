//! Tool schemas - option definitions and the catalog of known tools

mod catalog;
mod definition;

pub use catalog::{BoundTool, ToolCatalog};
pub use definition::{OptionKind, OptionSpec, ToolSchema};
