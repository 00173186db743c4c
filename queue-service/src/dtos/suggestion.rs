use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `text` and `context` accept any scalar, so `{"type": "themes", "text": 4}`
/// is a party of four.
#[derive(Debug, Deserialize)]
pub struct SuggestionRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub text: Value,
    /// Extra detail for the template, e.g. the customer's name for emails.
    #[serde(default)]
    pub context: Value,
}

impl SuggestionRequest {
    /// `None` when absent, null, empty or not a scalar.
    pub fn text(&self) -> Option<String> {
        scalar_text(&self.text)
    }

    pub fn context(&self) -> Option<String> {
        scalar_text(&self.context)
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    Some(text).filter(|t| !t.is_empty())
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestionResponse {
    pub suggestion: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> SuggestionRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_numeric_text_is_rendered() {
        let req = request(json!({"type": "themes", "text": 4}));
        assert_eq!(req.kind.as_deref(), Some("themes"));
        assert_eq!(req.text().as_deref(), Some("4"));

        let req = request(json!({"type": "themes", "text": 2.5}));
        assert_eq!(req.text().as_deref(), Some("2.5"));
    }

    #[test]
    fn test_missing_null_and_empty_text_are_none() {
        for body in [
            json!({"type": "triage"}),
            json!({"type": "triage", "text": null}),
            json!({"type": "triage", "text": ""}),
            json!({"type": "triage", "text": ["fever"]}),
        ] {
            assert!(request(body).text().is_none());
        }
    }

    #[test]
    fn test_context_accepts_strings_and_numbers() {
        let req = request(json!({"type": "email", "text": "Loan", "context": "Ada"}));
        assert_eq!(req.context().as_deref(), Some("Ada"));

        let req = request(json!({"type": "email", "text": "Loan", "context": 42}));
        assert_eq!(req.context().as_deref(), Some("42"));

        let req = request(json!({"type": "email", "text": "Loan"}));
        assert!(req.context().is_none());
    }
}
