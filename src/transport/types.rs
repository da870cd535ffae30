//! Invocation request and result types

use std::time::Duration;

use serde_json::Value;

use crate::args::ArgumentMap;
use crate::error::{BridgeError, TransportErrorKind};

/// One call to a remote tool
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationRequest {
    pub server: String,
    pub tool: String,
    pub arguments: ArgumentMap,
    /// Overrides the transport's default timeout
    pub timeout: Option<Duration>,
}

impl InvocationRequest {
    pub fn new(server: impl Into<String>, tool: impl Into<String>, arguments: ArgumentMap) -> Self {
        Self {
            server: server.into(),
            tool: tool.into(),
            arguments,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// One typed fragment of a tool result
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Text(String),
    /// Image payload, reduced to the length of its encoded data
    Image { byte_length: usize },
    Resource(Value),
}

/// Successful tool output
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    pub content: Vec<ContentPart>,
    /// The gateway's `result` object as received
    pub raw: Value,
}

impl ToolOutput {
    pub fn new(content: Vec<ContentPart>, raw: Value) -> Self {
        Self { content, raw }
    }
}

/// Outcome of one round trip to the gateway
#[derive(Debug, Clone, PartialEq)]
pub enum InvocationResult {
    Success(ToolOutput),
    ToolError { code: String, message: String },
    TransportError { kind: TransportErrorKind, message: String },
}

impl InvocationResult {
    pub fn transport(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self::TransportError {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Split into the output or the matching bridge error
    pub fn into_output(self) -> Result<ToolOutput, BridgeError> {
        match self {
            Self::Success(output) => Ok(output),
            Self::ToolError { code, message } => Err(BridgeError::Tool { code, message }),
            Self::TransportError { kind, message } => Err(BridgeError::Transport { kind, message }),
        }
    }
}
