use serde::Serialize;
use serde_json::{Value, json};

/// Name of the JSON schema attached to the structured-output request.
pub const SCHEMA_NAME: &str = "translation_result";

const SYSTEM_PROMPT: &str = "You are a precise assistant that transcribes audio, detects the spoken language, \
and translates the transcript into a requested target language. Return concise, well formatted output.";

const FORMAT_PROMPT: &str = "Respond strictly in JSON with keys: detectedLanguage (string), \
translation (string), paragraphs (array of strings), confidence (number).";

/// Structured-output request for the upstream responses endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredRequest {
    pub model: String,
    pub input: Vec<InputMessage>,
    pub text: TextOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputMessage {
    pub role: String,
    pub content: Vec<InputText>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputText {
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextOptions {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputFormat {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub schema: Value,
}

impl InputText {
    fn new(text: impl Into<String>) -> Self {
        Self {
            kind: "input_text".to_string(),
            text: text.into(),
        }
    }
}

impl InputMessage {
    fn new(role: &str, parts: Vec<InputText>) -> Self {
        Self {
            role: role.to_string(),
            content: parts,
        }
    }
}

/// Map a target language code to the name used in the prompt.
/// Unknown codes pass through; an empty code means English.
pub fn target_language_name(code: &str) -> String {
    let code = code.trim();
    match code.to_lowercase().as_str() {
        "" => "english".to_string(),
        "pl" => "polish".to_string(),
        "en" => "english".to_string(),
        "de" => "german".to_string(),
        "fr" => "french".to_string(),
        "es" => "spanish".to_string(),
        "it" => "italian".to_string(),
        _ => code.to_string(),
    }
}

/// Strict schema: exactly four fields, no extras, confidence in [0, 1].
pub fn translation_schema() -> Value {
    json!({
        "type": "object",
        "required": ["detectedLanguage", "translation", "paragraphs", "confidence"],
        "additionalProperties": false,
        "properties": {
            "detectedLanguage": { "type": "string" },
            "translation": { "type": "string" },
            "paragraphs": {
                "type": "array",
                "items": { "type": "string" }
            },
            "confidence": {
                "type": "number",
                "minimum": 0,
                "maximum": 1
            }
        }
    })
}

/// Build the one-pass detect-and-translate request.
pub fn build_translation_request(
    model: &str,
    transcript: &str,
    original_language: &str,
    target_language: &str,
) -> StructuredRequest {
    let target = target_language_name(target_language);

    StructuredRequest {
        model: model.to_string(),
        input: vec![
            InputMessage::new("system", vec![InputText::new(SYSTEM_PROMPT)]),
            InputMessage::new(
                "user",
                vec![
                    InputText::new(format!(
                        "The original language is \"{}\". Translate the following transcript into {}. \
                         Return a fluent, well-structured translation and include the detected language \
                         with a confidence between 0 and 1.",
                        original_language, target
                    )),
                    InputText::new(FORMAT_PROMPT),
                    InputText::new(format!("Transcript:\n{}", transcript)),
                ],
            ),
        ],
        text: TextOptions {
            format: OutputFormat {
                kind: "json_schema".to_string(),
                name: SCHEMA_NAME.to_string(),
                schema: translation_schema(),
            },
        },
    }
}
