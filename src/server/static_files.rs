// Static front-end assets.
// Unknown paths fall back to the entry document; `..` is refused.

use std::path::{Path, PathBuf};

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use tracing::{debug, warn};

use super::AppState;
use crate::error::ErrorBody;

pub const ENTRY_DOCUMENT: &str = "index.html";

/// Content type from the file extension; `application/octet-stream` otherwise.
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("ico") => "image/x-icon",
        Some("webmanifest") => "application/manifest+json",
        _ => "application/octet-stream",
    }
}

/// Decode `%XX` escapes. Invalid escapes are kept verbatim.
fn percent_decode(path: &str) -> String {
    let bytes = path.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
            if let Some(value) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                decoded.push(value);
                i += 3;
                continue;
            }
        }
        decoded.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&decoded).into_owned()
}

/// Map a request path onto `root`. `None` means the path tried to escape.
pub fn resolve_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let decoded = percent_decode(request_path);
    if decoded.contains("..") {
        return None;
    }

    let relative = decoded.trim_start_matches('/');
    if relative.is_empty() {
        return Some(root.join(ENTRY_DOCUMENT));
    }
    Some(root.join(relative))
}

async fn serve_file(path: &Path) -> Response {
    match tokio::fs::read(path).await {
        Ok(data) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type_for(path))],
            data,
        )
            .into_response(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => (
            StatusCode::NOT_FOUND,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            "404 Not Found",
        )
            .into_response(),
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                "500 Internal Server Error",
            )
                .into_response()
        }
    }
}

pub async fn static_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let root = state.static_dir.as_path();
    let Some(path) = resolve_path(root, uri.path()) else {
        warn!("Rejected path traversal attempt: {}", uri.path());
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: "Path not allowed".to_string(),
                details: None,
            }),
        )
            .into_response();
    };

    let target = match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_dir() => path.join(ENTRY_DOCUMENT),
        Ok(_) => path,
        Err(_) => root.join(ENTRY_DOCUMENT),
    };
    debug!("Serving static file {}", target.display());
    serve_file(&target).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types() {
        assert_eq!(content_type_for(Path::new("a/index.HTML")), "text/html; charset=utf-8");
        assert_eq!(content_type_for(Path::new("logo.jpeg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("site.webmanifest")), "application/manifest+json");
        assert_eq!(content_type_for(Path::new("archive.tar.gz")), "application/octet-stream");
        assert_eq!(content_type_for(Path::new("README")), "application/octet-stream");
    }

    #[test]
    fn test_resolve_path() {
        let root = Path::new("/srv/public");
        assert_eq!(resolve_path(root, "/"), Some(root.join("index.html")));
        assert_eq!(resolve_path(root, "/css/app.css"), Some(root.join("css/app.css")));
        assert_eq!(resolve_path(root, "/my%20file.js"), Some(root.join("my file.js")));
        assert_eq!(resolve_path(root, "/../etc/passwd"), None);
        assert_eq!(resolve_path(root, "/%2e%2e/secret"), None);
    }
}
