//! Tool arguments in either protocol form

use serde::{Deserialize, Serialize};

/// Arguments handed to a tool.
///
/// The text protocol carries a single free-form line (`Action Input:`);
/// structured calls carry a decoded JSON object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolArguments {
    Text(String),
    Structured(serde_json::Value),
}

impl ToolArguments {
    pub fn text(input: impl Into<String>) -> Self {
        ToolArguments::Text(input.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ToolArguments::Text(s) => Some(s),
            ToolArguments::Structured(_) => None,
        }
    }

    pub fn as_structured(&self) -> Option<&serde_json::Value> {
        match self {
            ToolArguments::Structured(v) => Some(v),
            ToolArguments::Text(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ToolArguments::Text(_))
    }

    /// Get a string field from structured arguments.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.as_structured()?.get(key)?.as_str()
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.as_structured()?.get(key)?.as_i64()
    }

    /// The main input of the call: the whole text for the text protocol,
    /// or the string field `key` for structured arguments.
    pub fn primary(&self, key: &str) -> Option<&str> {
        match self {
            ToolArguments::Text(s) => Some(s.as_str()),
            ToolArguments::Structured(_) => self.get_string(key),
        }
    }

    /// Like [`primary`](Self::primary) but returns an error message when absent.
    pub fn require_primary(&self, key: &str) -> Result<&str, String> {
        self.primary(key)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| format!("Missing required parameter: {}", key))
    }

    /// Render the arguments the way they are recorded in traces and logs.
    pub fn render(&self) -> String {
        match self {
            ToolArguments::Text(s) => s.clone(),
            ToolArguments::Structured(v) => v.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primary_for_text_is_whole_input() {
        let args = ToolArguments::text("(15 + 25) * 3");
        assert_eq!(args.primary("expression"), Some("(15 + 25) * 3"));
        assert!(args.get_string("expression").is_none());
    }

    #[test]
    fn test_primary_for_structured_reads_field() {
        let args = ToolArguments::Structured(json!({"city": "Tokyo", "days": 3}));
        assert_eq!(args.primary("city"), Some("Tokyo"));
        assert_eq!(args.get_i64("days"), Some(3));
        assert!(args.primary("unit").is_none());
    }

    #[test]
    fn test_require_primary_rejects_blank() {
        let args = ToolArguments::text("   ");
        let err = args.require_primary("query").unwrap_err();
        assert_eq!(err, "Missing required parameter: query");
    }

    #[test]
    fn test_render() {
        assert_eq!(ToolArguments::text("Paris").render(), "Paris");
        assert_eq!(
            ToolArguments::Structured(json!({"city": "Paris"})).render(),
            r#"{"city":"Paris"}"#
        );
    }
}
