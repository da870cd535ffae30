//! Transport layer - gateway client, wire envelope, and result types
//!
//! This module provides:
//! - Transport trait for gateway abstraction
//! - HttpTransport implementation over reqwest
//! - Request/result types shared with the driver and formatter

mod client;
mod types;
mod wire;

pub use client::{DEFAULT_GATEWAY_URL, DEFAULT_TIMEOUT_MS, GatewayConfig, HttpTransport, Transport};
pub use types::{ContentPart, InvocationRequest, InvocationResult, ToolOutput};
pub use wire::{UNKNOWN_ERROR_CODE, UNKNOWN_ERROR_MESSAGE};
