//! Locally synthesized result shown when the gateway cannot be reached.

use super::locale::{Locale, language_display_name, render, text};
use crate::model::TranslationResult;

pub fn synthesize_demo(
    locale: Locale,
    file_name: &str,
    target_language: &str,
    confidence: f64,
) -> TranslationResult {
    let target = language_display_name(locale, target_language);
    let translation = render(
        text(locale, "demo.translationIntro"),
        &[("file", file_name), ("target", &target)],
    );
    let paragraph = render(text(locale, "demo.paragraph"), &[("target", &target)]);

    TranslationResult {
        detected_language: text(locale, "demo.detectedLanguageName").to_string(),
        translation,
        paragraphs: vec![paragraph],
        confidence,
    }
}
