use crate::model::{RawTranslation, TranslationResult};

/// Split on runs of two or more newlines, trimming and dropping empty blocks.
pub fn split_paragraphs(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut newlines = 0usize;

    for c in text.chars() {
        if c == '\n' {
            newlines += 1;
            continue;
        }
        if newlines >= 2 {
            push_trimmed(&mut paragraphs, &current);
            current.clear();
        } else if newlines == 1 {
            current.push('\n');
        }
        newlines = 0;
        current.push(c);
    }
    push_trimmed(&mut paragraphs, &current);
    paragraphs
}

fn push_trimmed(paragraphs: &mut Vec<String>, block: &str) {
    let block = block.trim();
    if !block.is_empty() {
        paragraphs.push(block.to_string());
    }
}

/// Never fails. Upstream paragraphs are kept when present and non-empty,
/// otherwise they are derived from `translation`; the result may still be
/// empty, which the presentation layer handles.
pub fn normalize(raw: RawTranslation) -> TranslationResult {
    let translation = raw.translation.unwrap_or_default();

    let paragraphs = match raw.paragraphs {
        Some(paragraphs) if !paragraphs.is_empty() => paragraphs,
        _ => split_paragraphs(&translation),
    };

    let confidence = raw
        .confidence
        .filter(|c| c.is_finite())
        .map(|c| c.clamp(0.0, 1.0))
        .unwrap_or(0.0);

    TranslationResult {
        detected_language: raw
            .detected_language
            .unwrap_or_else(|| "unknown".to_string()),
        translation,
        paragraphs,
        confidence,
    }
}
