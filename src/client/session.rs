//! Session state and its single update function.
//!
//! The session is an explicit value: every event produces the next context,
//! nothing is held in globals. Events that do not apply to the current
//! status are ignored.

use super::locale::Locale;
use super::status::UiStatus;
use crate::model::TranslationResult;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionContext {
    pub locale: Locale,
    pub last_status: UiStatus,
    pub last_detected_language: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Submit { file_selected: bool },
    GatewayResponded(TranslationResult),
    /// `demo` is `None` when demo fallback is disabled.
    GatewayFailed { demo: Option<TranslationResult> },
    ReadFailed,
    Reset,
    LocaleChanged(Locale),
}

impl SessionContext {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            ..Self::default()
        }
    }

    /// Status line in the active locale.
    pub fn status_message(&self) -> &'static str {
        self.last_status.message(self.locale)
    }
}

pub fn update(ctx: SessionContext, event: Event) -> SessionContext {
    let loading = ctx.last_status == UiStatus::Loading;

    match event {
        // The trigger is disabled while a request is in flight.
        Event::Submit { .. } if loading => ctx,
        Event::Submit {
            file_selected: false,
        } => SessionContext {
            last_status: UiStatus::NoFile,
            ..ctx
        },
        Event::Submit {
            file_selected: true,
        } => SessionContext {
            last_status: UiStatus::Loading,
            ..ctx
        },

        Event::GatewayResponded(result) if loading => SessionContext {
            last_status: UiStatus::Success,
            last_detected_language: Some(result.detected_language),
            ..ctx
        },
        Event::GatewayFailed { demo: Some(result) } if loading => SessionContext {
            last_status: UiStatus::Demo,
            last_detected_language: Some(result.detected_language),
            ..ctx
        },
        Event::GatewayFailed { demo: None } if loading => SessionContext {
            last_status: UiStatus::TranslationFailed,
            ..ctx
        },
        Event::ReadFailed if loading => SessionContext {
            last_status: UiStatus::ReadError,
            ..ctx
        },
        Event::GatewayResponded(_) | Event::GatewayFailed { .. } | Event::ReadFailed => ctx,

        Event::Reset => SessionContext {
            locale: ctx.locale,
            last_status: UiStatus::Idle,
            last_detected_language: None,
        },
        Event::LocaleChanged(locale) => SessionContext { locale, ..ctx },
    }
}
