//! UI locales and their string tables.
//!
//! Strings are looked up by `(locale, path)`. A missing key yields an empty
//! string; no locale falls back to another.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    De,
    Pl,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::En, Locale::De, Locale::Pl];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::De => "de",
            Locale::Pl => "pl",
        }
    }

    /// Name of the locale in its own language.
    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::De => "Deutsch",
            Locale::Pl => "Polski",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|locale| locale.code().eq_ignore_ascii_case(code.trim()))
    }

    fn table(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Locale::En => EN,
            Locale::De => DE,
            Locale::Pl => PL,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| {
            format!("Invalid locale '{}'. Valid locales: en, de, pl", s)
        })
    }
}

/// Look up `path` in `locale`'s table; empty string when absent.
pub fn text(locale: Locale, path: &str) -> &'static str {
    lookup(locale, path).unwrap_or("")
}

pub fn lookup(locale: Locale, path: &str) -> Option<&'static str> {
    locale
        .table()
        .iter()
        .find(|(key, _)| *key == path)
        .map(|(_, value)| *value)
}

/// Display name of a target language in the active UI locale, then its
/// native name, then the upper-cased code.
pub fn language_display_name(locale: Locale, code: &str) -> String {
    if let Some(name) = lookup(locale, &format!("languageNames.{}", code)) {
        return name.to_string();
    }
    match Locale::from_code(code) {
        Some(target) => target.native_name().to_string(),
        None => code.to_uppercase(),
    }
}

/// Fill `{name}` placeholders of a template.
pub fn render(template: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{}}}", name), value)
    })
}

const EN: &[(&str, &str)] = &[
    ("status.noFile", "Choose an audio file first (MP3, M4A, WAV, CAF)."),
    ("status.loading", "Uploading and analyzing your recording…"),
    ("status.success", "Translation finished successfully."),
    ("status.demo", "Could not reach the API. Displaying a demo translation."),
    ("status.readError", "Unable to read the audio file."),
    ("errors.translationFailed", "Unable to retrieve the translation."),
    ("demo.detectedLanguageName", "Polish"),
    (
        "demo.translationIntro",
        "Sample translation of the audio “{file}” into {target}. This placeholder shows how the interface will look with real data.",
    ),
    (
        "demo.paragraph",
        "This placeholder paragraph is translated into {target} to illustrate how the transcript will be formatted once the live API responds.",
    ),
    ("demo.logHint", "Demo translation rendered (offline mode)."),
    ("languageNames.en", "English"),
    ("languageNames.de", "German"),
    ("languageNames.pl", "Polish"),
    ("resultTitle", "Translation result"),
    ("detectedLanguageLabel", "Detected language"),
    ("translationPlaceholder", "Your translation will appear here."),
    ("emptyParagraphFallback", "No textual data to display. Please try again."),
    ("confidenceText", "Language detection confidence: {value}%"),
];

const DE: &[(&str, &str)] = &[
    ("status.noFile", "Wähle zuerst eine Audiodatei aus (MP3, M4A, WAV, CAF)."),
    ("status.loading", "Aufnahme wird hochgeladen und analysiert…"),
    ("status.success", "Übersetzung erfolgreich abgeschlossen."),
    ("status.demo", "API nicht erreichbar. Demo-Übersetzung wird angezeigt."),
    ("status.readError", "Audiodatei konnte nicht gelesen werden."),
    ("errors.translationFailed", "Übersetzung konnte nicht abgerufen werden."),
    ("demo.detectedLanguageName", "Polnisch"),
    (
        "demo.translationIntro",
        "Beispielübersetzung der Audiodatei „{file}“ ins {target}. So sieht die Oberfläche mit echten Daten aus.",
    ),
    (
        "demo.paragraph",
        "Dieser Platzhalterabsatz ist ins {target} übersetzt und zeigt, wie das Transkript formatiert wird, sobald echte Daten eintreffen.",
    ),
    ("demo.logHint", "Demo-Übersetzung angezeigt (Offline-Modus)."),
    ("languageNames.en", "Englisch"),
    ("languageNames.de", "Deutsch"),
    ("languageNames.pl", "Polnisch"),
    ("resultTitle", "Übersetzungsergebnis"),
    ("detectedLanguageLabel", "Erkannte Sprache"),
    ("translationPlaceholder", "Deine Übersetzung erscheint hier."),
    ("emptyParagraphFallback", "Keine Daten vorhanden. Versuche es erneut."),
    ("confidenceText", "Zuordnungssicherheit: {value}%"),
];

const PL: &[(&str, &str)] = &[
    ("status.noFile", "Najpierw wybierz plik audio (MP3, M4A, WAV, CAF)."),
    ("status.loading", "Ładowanie i analiza nagrania…"),
    ("status.success", "Tłumaczenie zakończone sukcesem."),
    ("status.demo", "Nie udało się połączyć z API. Wyświetlono tłumaczenie demonstracyjne."),
    ("status.readError", "Nie udało się odczytać pliku audio."),
    ("errors.translationFailed", "Nie udało się pobrać tłumaczenia."),
    ("demo.detectedLanguageName", "Polski"),
    (
        "demo.translationIntro",
        "Przykładowe tłumaczenie nagrania „{file}” na język {target}. Ten tekst pokazuje docelowy układ.",
    ),
    (
        "demo.paragraph",
        "To demonstracyjny akapit przetłumaczony na język {target}. Pokazuje finalne formatowanie transkrypcji, które zobaczysz po uzyskaniu odpowiedzi API.",
    ),
    ("demo.logHint", "Wyświetlono tłumaczenie demonstracyjne (tryb offline)."),
    ("languageNames.en", "Angielski"),
    ("languageNames.de", "Niemiecki"),
    ("languageNames.pl", "Polski"),
    ("resultTitle", "Wynik tłumaczenia"),
    ("detectedLanguageLabel", "Wykryty język"),
    ("translationPlaceholder", "Twoje tłumaczenie pojawi się tutaj."),
    ("emptyParagraphFallback", "Brak treści do wyświetlenia. Spróbuj ponownie."),
    ("confidenceText", "Pewność detekcji języka: {value}%"),
];
