use super::locale::{Locale, text};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Pending,
    Success,
    Warning,
    Error,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Neutral => "neutral",
            Tone::Pending => "pending",
            Tone::Success => "success",
            Tone::Warning => "warning",
            Tone::Error => "error",
        }
    }
}

/// Status shown to the user. Replaced on every action, never queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiStatus {
    #[default]
    Idle,
    NoFile,
    Loading,
    Success,
    Demo,
    ReadError,
    TranslationFailed,
}

impl UiStatus {
    pub fn tone(&self) -> Tone {
        match self {
            UiStatus::Idle => Tone::Neutral,
            UiStatus::Loading => Tone::Pending,
            UiStatus::Success => Tone::Success,
            UiStatus::Demo => Tone::Warning,
            UiStatus::NoFile | UiStatus::ReadError | UiStatus::TranslationFailed => Tone::Error,
        }
    }

    /// Table key of the message, if the status has one.
    pub fn message_key(&self) -> Option<&'static str> {
        match self {
            UiStatus::Idle => None,
            UiStatus::NoFile => Some("status.noFile"),
            UiStatus::Loading => Some("status.loading"),
            UiStatus::Success => Some("status.success"),
            UiStatus::Demo => Some("status.demo"),
            UiStatus::ReadError => Some("status.readError"),
            UiStatus::TranslationFailed => Some("errors.translationFailed"),
        }
    }

    pub fn message(&self, locale: Locale) -> &'static str {
        self.message_key().map_or("", |key| text(locale, key))
    }

    /// A submission is running; the trigger is disabled.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, UiStatus::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tones() {
        assert_eq!(UiStatus::Idle.tone(), Tone::Neutral);
        assert_eq!(UiStatus::Loading.tone(), Tone::Pending);
        assert_eq!(UiStatus::Demo.tone(), Tone::Warning);
        assert_eq!(UiStatus::ReadError.tone(), Tone::Error);
        assert_eq!(UiStatus::Success.tone().as_str(), "success");
    }

    #[test]
    fn test_messages_follow_locale() {
        assert_eq!(UiStatus::Idle.message(Locale::En), "");
        assert_eq!(
            UiStatus::ReadError.message(Locale::De),
            "Audiodatei konnte nicht gelesen werden."
        );
        assert_eq!(
            UiStatus::TranslationFailed.message(Locale::En),
            "Unable to retrieve the translation."
        );
    }
}
