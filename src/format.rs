//! Response formatting - renders a tool output as one display string

use serde_json::Value;

use crate::transport::{ContentPart, ToolOutput};

/// Render every content part in order, one per line
///
/// Output with no content parts falls back to a pretty dump of the raw
/// `result` payload so nothing the gateway returned is hidden.
pub fn format_output(output: &ToolOutput) -> String {
    if output.content.is_empty() {
        return pretty(&output.raw);
    }

    output.content.iter().map(format_part).collect::<Vec<_>>().join("\n")
}

fn format_part(part: &ContentPart) -> String {
    match part {
        ContentPart::Text(text) => text.clone(),
        ContentPart::Image { byte_length } => format!("[Image data: {} bytes]", byte_length),
        ContentPart::Resource(resource) => pretty(resource),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_single_text() {
        let output = ToolOutput::new(vec![ContentPart::Text("ok".into())], json!({}));
        assert_eq!(format_output(&output), "ok");
    }

    #[test]
    fn test_parts_joined_in_order() {
        let output = ToolOutput::new(
            vec![
                ContentPart::Text("Page 1".into()),
                ContentPart::Image { byte_length: 1024 },
                ContentPart::Text("done".into()),
            ],
            json!({}),
        );
        assert_eq!(format_output(&output), "Page 1\n[Image data: 1024 bytes]\ndone");
    }

    #[test]
    fn test_resource_keeps_gateway_key_order() {
        let output = ToolOutput::new(
            vec![ContentPart::Resource(json!({
                "uri": "file:///x",
                "mimeType": "text/plain",
                "text": "hi"
            }))],
            json!({}),
        );
        assert_eq!(
            format_output(&output),
            "{\n  \"uri\": \"file:///x\",\n  \"mimeType\": \"text/plain\",\n  \"text\": \"hi\"\n}"
        );
    }

    #[test]
    fn test_decoded_resource_keeps_key_order() {
        let raw: Value = serde_json::from_str(r#"{"uri": "u", "mimeType": "m", "text": "t"}"#).unwrap();
        let output = ToolOutput::new(vec![ContentPart::Resource(raw)], json!({}));
        let formatted = format_output(&output);
        let keys: Vec<&str> = formatted
            .lines()
            .filter_map(|line| line.trim().split('"').nth(1))
            .collect();
        assert_eq!(keys, vec!["uri", "mimeType", "text"]);
    }

    #[test]
    fn test_empty_content_dumps_raw_result() {
        let raw = json!({"content": [], "isError": false});
        let output = ToolOutput::new(Vec::new(), raw.clone());
        assert_eq!(format_output(&output), serde_json::to_string_pretty(&raw).unwrap());
    }

    #[test]
    fn test_empty_text_part_is_kept() {
        let output = ToolOutput::new(
            vec![ContentPart::Text(String::new()), ContentPart::Text("b".into())],
            json!({}),
        );
        assert_eq!(format_output(&output), "\nb");
    }
}
