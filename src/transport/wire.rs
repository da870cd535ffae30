//! JSON envelope exchanged with the gateway's `/call` endpoint

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::args::ArgumentMap;

use super::types::{ContentPart, InvocationResult, ToolOutput};

/// Code used when the gateway omits `error.code`
pub const UNKNOWN_ERROR_CODE: &str = "UNKNOWN";

/// Message used when the gateway omits `error.message`
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// Request body for `POST /call`
#[derive(Debug, Serialize)]
pub struct CallRequest<'a> {
    pub server: &'a str,
    pub tool: &'a str,
    pub arguments: &'a ArgumentMap,
}

/// Response body for `POST /call`
#[derive(Debug, Deserialize)]
pub struct CallResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<GatewayError>,
}

/// Gateway error object; JSON-RPC style servers send integer codes
#[derive(Debug, Default, Deserialize)]
pub struct GatewayError {
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
}

/// Render an error field; null and empty strings count as missing
fn error_field(value: Option<Value>, fallback: &str) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s,
        Some(Value::Null) | Some(Value::String(_)) | None => fallback.to_string(),
        Some(other) => other.to_string(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum WireContent {
    #[serde(rename = "text")]
    Text {
        #[serde(default)]
        text: Option<String>,
    },

    #[serde(rename = "image")]
    Image {
        #[serde(default)]
        data: Option<String>,
    },

    #[serde(rename = "resource")]
    Resource {
        #[serde(default)]
        resource: Option<Value>,
    },
}

impl From<WireContent> for ContentPart {
    fn from(content: WireContent) -> Self {
        match content {
            WireContent::Text { text } => ContentPart::Text(text.unwrap_or_default()),
            WireContent::Image { data } => ContentPart::Image {
                byte_length: data.map_or(0, |d| d.len()),
            },
            WireContent::Resource { resource } => {
                ContentPart::Resource(resource.unwrap_or_else(|| Value::Object(Default::default())))
            }
        }
    }
}

impl CallResponse {
    /// Map the envelope onto a success or tool error
    pub fn into_result(self) -> InvocationResult {
        if !self.success {
            let error = self.error.unwrap_or_default();
            return InvocationResult::ToolError {
                code: error_field(error.code, UNKNOWN_ERROR_CODE),
                message: error_field(error.message, UNKNOWN_ERROR_MESSAGE),
            };
        }

        let raw = self.result.unwrap_or_else(|| Value::Object(Default::default()));
        let content = decode_content(&raw);
        InvocationResult::Success(ToolOutput::new(content, raw))
    }
}

/// Decode `result.content`; items with an unknown `type` are skipped
fn decode_content(result: &Value) -> Vec<ContentPart> {
    let Some(items) = result.get("content").and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value::<WireContent>(item.clone()) {
            Ok(content) => Some(content.into()),
            Err(e) => {
                log::debug!("Skipping content item: {}", e);
                None
            }
        })
        .collect()
}
