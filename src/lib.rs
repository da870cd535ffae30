//! Toolbridge - schema-driven bridge to an MCP REST gateway
//!
//! Each remote tool is described by a `ToolSchema`. One generic driver turns
//! command-line style input into a validated argument map, posts it to the
//! gateway's `/call` endpoint, and renders the multi-part result as text.

pub mod args;
pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod format;
pub mod schema;
pub mod transport;

pub use error::{BridgeError, Result};
