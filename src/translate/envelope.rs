use serde::Deserialize;

/// Upstream response body as sent. Both shapes may be partially present.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEnvelope {
    #[serde(default)]
    pub output: Vec<OutputItem>,
    #[serde(default)]
    pub output_text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputItem {
    #[serde(default)]
    pub content: Vec<ContentPart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentPart {
    #[serde(default)]
    pub text: Option<String>,
}

/// Where the model's text was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    /// `output[].content[].text`
    Legacy(String),
    /// top-level `output_text`
    Flattened(String),
}

impl Envelope {
    /// Resolve the shape once. Nested content wins over `output_text`.
    pub fn resolve(raw: RawEnvelope) -> Option<Self> {
        let nested = raw
            .output
            .into_iter()
            .flat_map(|item| item.content)
            .find_map(|part| part.text.filter(|text| !text.trim().is_empty()));

        match nested {
            Some(text) => Some(Self::Legacy(text)),
            None => raw
                .output_text
                .filter(|text| !text.trim().is_empty())
                .map(Self::Flattened),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Legacy(text) | Self::Flattened(text) => text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(json: &str) -> Option<Envelope> {
        Envelope::resolve(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_nested_content() {
        let envelope = resolve(
            r#"{"output":[{"type":"message","content":[{"type":"output_text","text":"{\"a\":1}"}]}]}"#,
        );
        assert_eq!(envelope, Some(Envelope::Legacy("{\"a\":1}".to_string())));
    }

    #[test]
    fn test_flattened_output_text() {
        let envelope = resolve(r#"{"output_text":"{}"}"#);
        assert_eq!(envelope, Some(Envelope::Flattened("{}".to_string())));
    }

    #[test]
    fn test_nested_wins_over_flattened() {
        let envelope = resolve(r#"{"output":[{"content":[{"text":"nested"}]}],"output_text":"flat"}"#);
        assert_eq!(envelope.unwrap().text(), "nested");
    }

    #[test]
    fn test_skips_items_without_text() {
        let envelope = resolve(
            r#"{"output":[{"type":"reasoning","content":[]},{"content":[{"text":"second"}]}]}"#,
        );
        assert_eq!(envelope, Some(Envelope::Legacy("second".to_string())));
    }

    #[test]
    fn test_absent_output() {
        assert_eq!(resolve(r#"{"id":"resp_1","output":[]}"#), None);
        assert_eq!(resolve(r#"{"output_text":"  "}"#), None);
    }
}
