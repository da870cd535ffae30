//! CLI module for toolbridge - command-line interface and subcommands.
//!
//! The top-level command is a clap derive parser. Each tool's flags are
//! generated at runtime from its schema with the clap builder API.

pub mod commands;
pub mod tool_args;

pub use commands::{Cli, Commands};
pub use tool_args::{parse_tool_args, tool_command};
