//! Invocation driver - build, invoke, format for one bound tool
//!
//! The driver owns a transport and nothing else. Every call is a single
//! round trip; arguments that fail validation never reach the transport.

use std::time::Duration;

use log::{debug, info};

use crate::args::{RawInput, build_arguments};
use crate::error::Result;
use crate::format::format_output;
use crate::schema::BoundTool;
use crate::transport::{InvocationRequest, Transport};

/// Runs tool invocations through a transport
pub struct InvocationDriver<T: Transport> {
    transport: T,
}

impl<T: Transport> InvocationDriver<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Build the request for `tool` from `input` without sending it
    pub fn prepare(&self, tool: &BoundTool<'_>, input: &RawInput) -> Result<InvocationRequest> {
        let arguments = build_arguments(tool.schema, input)?;
        let mut request = InvocationRequest::new(tool.server, tool.name(), arguments);
        if let Some(ms) = tool.schema.timeout_ms {
            request = request.with_timeout(Duration::from_millis(ms));
        }
        Ok(request)
    }

    /// Invoke `tool` and return the formatted output
    pub async fn run(&self, tool: &BoundTool<'_>, input: &RawInput) -> Result<String> {
        let request = self.prepare(tool, input)?;
        info!(
            "Invoking {}/{} via {} with {} argument(s)",
            request.server,
            request.tool,
            self.transport.endpoint(),
            request.arguments.len()
        );

        let output = self.transport.invoke(&request).await.into_output()?;
        debug!("{}/{} returned {} content part(s)", request.server, request.tool, output.content.len());

        Ok(format_output(&output))
    }
}
