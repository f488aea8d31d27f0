//! `.env` loading.
//!
//! Lines are `KEY=VALUE`; blank lines and `#` comments are skipped, matching
//! single or double quotes around the value are stripped and `\n` is
//! unescaped. Variables already present in the process environment win.

use std::path::Path;
use tracing::debug;

/// Parse `.env` content into ordered key/value pairs.
pub fn parse_env_file(content: &str) -> Vec<(String, String)> {
    content
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                return None;
            }
            let (key, value) = trimmed.split_once('=')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), unquote(value.trim()).replace("\\n", "\n")))
        })
        .collect()
}

fn unquote(value: &str) -> &str {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted { &value[1..value.len() - 1] } else { value }
}

/// Pairs from `content` whose key is not already set according to `is_set`.
pub fn pending_vars<F>(content: &str, is_set: F) -> Vec<(String, String)>
where
    F: Fn(&str) -> bool,
{
    parse_env_file(content)
        .into_iter()
        .filter(|(key, _)| !is_set(key))
        .collect()
}

/// Load `path` into the process environment. A missing file is not an error.
///
/// Must run before any other thread is started: it mutates the process
/// environment.
pub fn load_env_file(path: &Path) -> std::io::Result<usize> {
    if !path.exists() {
        return Ok(0);
    }

    let content = std::fs::read_to_string(path)?;
    let vars = pending_vars(&content, |key| std::env::var_os(key).is_some());
    for (key, value) in &vars {
        // SAFETY: called from `main` before the async runtime spawns workers.
        unsafe { std::env::set_var(key, value) };
        debug!("Loaded {} from {}", key, path.display());
    }
    Ok(vars.len())
}
