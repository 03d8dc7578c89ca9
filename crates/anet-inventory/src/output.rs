use serde_json::Value;

/// Render the command output; `pretty` indents by two spaces
///
/// Object keys come out sorted either way since `serde_json::Map` is ordered.
pub fn render(value: &Value, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
