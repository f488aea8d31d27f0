// multipart/form-data body for the transcription upload.
//
// Built by hand so the byte layout is exact: every part is CRLF-terminated
// and the body ends with `--boundary--\r\n`.

use uuid::Uuid;

/// Fixed decoding parameters so the same audio always transcribes the same way.
pub const RESPONSE_FORMAT: &str = "json";
pub const TEMPERATURE: &str = "0";

/// An encoded body together with its `Content-Type` header value.
#[derive(Debug, Clone)]
pub struct EncodedForm {
    pub boundary: String,
    pub content_type: String,
    pub body: Vec<u8>,
}

impl EncodedForm {
    pub fn content_length(&self) -> usize {
        self.body.len()
    }
}

pub struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartForm {
    /// New form with a boundary unique to this request.
    pub fn new() -> Self {
        Self::with_boundary(format!("----TraislateBoundary{}", Uuid::new_v4().simple()))
    }

    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            body: Vec::new(),
        }
    }

    pub fn add_text(&mut self, name: &str, value: &str) {
        self.body
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
        );
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
    }

    pub fn add_file(&mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) {
        self.body
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                name, file_name
            )
            .as_bytes(),
        );
        self.body
            .extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
    }

    pub fn finish(mut self) -> EncodedForm {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        EncodedForm {
            content_type: format!("multipart/form-data; boundary={}", self.boundary),
            boundary: self.boundary,
            body: self.body,
        }
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Replace everything outside `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.is_empty() {
        "audio-file".to_string()
    } else {
        sanitized
    }
}

/// Keep a client-supplied MIME type from breaking out of its header line.
fn sanitize_content_type(mime_type: &str) -> String {
    let cleaned: String = mime_type
        .chars()
        .filter(|c| !c.is_control() && *c != '"')
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        "audio/mpeg".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Encode the four transcription fields in their fixed order:
/// `model`, `response_format`, `temperature`, `file`.
pub fn encode_transcription_form(
    model: &str,
    audio: &[u8],
    file_name: &str,
    mime_type: &str,
) -> EncodedForm {
    encode_with(MultipartForm::new(), model, audio, file_name, mime_type)
}

fn encode_with(
    mut form: MultipartForm,
    model: &str,
    audio: &[u8],
    file_name: &str,
    mime_type: &str,
) -> EncodedForm {
    form.add_text("model", model);
    form.add_text("response_format", RESPONSE_FORMAT);
    form.add_text("temperature", TEMPERATURE);
    form.add_file(
        "file",
        &sanitize_file_name(file_name),
        &sanitize_content_type(mime_type),
        audio,
    );
    form.finish()
}
