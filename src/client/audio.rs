use std::path::Path;

const FEEDBACK_NAME_LIMIT: usize = 42;
const FEEDBACK_NAME_KEEP: usize = 39;

/// Audio format hint sent with the payload: MIME subtype without `x-`,
/// else the lower-cased extension, else `mpeg`.
pub fn infer_audio_format(file_name: &str, mime_type: Option<&str>) -> String {
    if let Some(subtype) = mime_type
        .and_then(|mime| mime.strip_prefix("audio/"))
        .filter(|subtype| !subtype.is_empty())
    {
        return subtype.replacen("x-", "", 1);
    }

    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_else(|| "mpeg".to_string())
}

/// MIME type for a local audio file, from its extension.
pub fn mime_for_extension(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "mp3" => "audio/mpeg",
        "m4a" => "audio/x-m4a",
        "mp4" => "audio/mp4",
        "wav" => "audio/wav",
        "caf" => "audio/x-caf",
        "ogg" | "oga" => "audio/ogg",
        "webm" => "audio/webm",
        "flac" => "audio/flac",
        "aac" => "audio/aac",
        _ => return None,
    };
    Some(mime)
}

pub fn format_bytes(bytes: u64) -> String {
    const THRESHOLD: f64 = 1024.0;
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    value /= THRESHOLD;
    while value >= THRESHOLD && unit < UNITS.len() - 1 {
        value /= THRESHOLD;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

/// `name (size)` shown after a file is chosen.
pub fn file_feedback(file_name: &str, size: u64) -> String {
    let name = if file_name.chars().count() > FEEDBACK_NAME_LIMIT {
        let kept: String = file_name.chars().take(FEEDBACK_NAME_KEEP).collect();
        format!("{}…", kept)
    } else {
        file_name.to_string()
    };
    format!("{} ({})", name, format_bytes(size))
}
