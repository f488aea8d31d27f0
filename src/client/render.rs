//! Text presentation of a translation result.

use std::fmt;

use super::locale::{Locale, render, text};
use crate::model::TranslationResult;
use crate::translate::normalize::split_paragraphs;

pub const UNKNOWN_LANGUAGE_MARK: &str = "—";

#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub detected_language_line: String,
    pub paragraphs: Vec<String>,
    pub confidence_line: Option<String>,
}

/// `"<label>: <value>"`, with `—` when nothing was detected.
pub fn detected_language_line(locale: Locale, detected: Option<&str>) -> String {
    let value = detected
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(UNKNOWN_LANGUAGE_MARK);
    format!("{}: {}", text(locale, "detectedLanguageLabel"), value)
}

pub fn present(locale: Locale, result: &TranslationResult) -> Presentation {
    let mut paragraphs: Vec<String> = result
        .paragraphs
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect();
    if paragraphs.is_empty() {
        paragraphs = split_paragraphs(&result.translation);
    }
    if paragraphs.is_empty() {
        paragraphs.push(text(locale, "emptyParagraphFallback").to_string());
    }

    let confidence_line = (result.confidence > 0.0).then(|| {
        let value = (result.confidence * 100.0).round().to_string();
        render(text(locale, "confidenceText"), &[("value", &value)])
    });

    Presentation {
        detected_language_line: detected_language_line(
            locale,
            Some(result.detected_language.as_str()),
        ),
        paragraphs,
        confidence_line,
    }
}

impl fmt::Display for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.detected_language_line)?;
        for paragraph in &self.paragraphs {
            writeln!(f)?;
            writeln!(f, "{}", paragraph)?;
        }
        if let Some(line) = &self.confidence_line {
            writeln!(f)?;
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
