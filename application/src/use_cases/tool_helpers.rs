//! Shared helpers for tool use cases.

use toolloop_domain::ToolArguments;

/// Extract a short preview string from tool arguments.
///
/// Free text is previewed as-is. For JSON objects, well-known keys
/// (`expression`, `query`, `city`, `operation`) are tried first, then the
/// first string value, then the compact JSON.
pub(crate) fn tool_args_preview(args: &ToolArguments) -> String {
    let object = match args {
        ToolArguments::Text(s) => return truncate_preview(s, 60),
        ToolArguments::Structured(serde_json::Value::Object(map)) => map,
        ToolArguments::Structured(other) => return truncate_preview(&other.to_string(), 60),
    };

    let keys = ["expression", "query", "city", "operation"];
    for key in &keys {
        if let Some(serde_json::Value::String(s)) = object.get(*key) {
            return truncate_preview(s, 60);
        }
    }
    // Fallback: first string value
    for value in object.values() {
        if let Some(s) = value.as_str() {
            return truncate_preview(s, 60);
        }
    }
    truncate_preview(&args.render(), 60)
}

pub(crate) fn truncate_preview(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_arguments_previewed_directly() {
        assert_eq!(
            tool_args_preview(&ToolArguments::text("(15+25)*3")),
            "(15+25)*3"
        );
    }

    #[test]
    fn test_known_key_preferred() {
        let args = ToolArguments::Structured(json!({"unit": "celsius", "city": "Paris"}));
        assert_eq!(tool_args_preview(&args), "Paris");
    }

    #[test]
    fn test_fallback_to_first_string() {
        let args = ToolArguments::Structured(json!({"days": 3, "date": "2024-01-01"}));
        assert_eq!(tool_args_preview(&args), "2024-01-01");
    }

    #[test]
    fn test_fallback_to_json() {
        let args = ToolArguments::Structured(json!({"days": 3}));
        assert_eq!(tool_args_preview(&args), r#"{"days":3}"#);
    }

    #[test]
    fn test_truncate_preview() {
        assert_eq!(truncate_preview("short", 10), "short");
        assert_eq!(truncate_preview("abcdefghij", 5), "abcd…");
    }
}
