use dioxus_i18n::prelude::*;
use dioxus_i18n::t;
use media_grid::{ButtonLabel, FailureKind, Localizer};

/// Initialize i18n configuration with English as default language
pub fn init_i18n() -> I18nConfig {
    I18nConfig::new(unic_langid::langid!("en-US"))
        .with_locale(Locale::new_static(
            unic_langid::langid!("en-US"),
            include_str!("../locales/en-US.ftl"),
        ))
        .with_locale(Locale::new_static(
            unic_langid::langid!("de-DE"),
            include_str!("../locales/de-DE.ftl"),
        ))
}

/// Localizer backed by the Fluent bundles; only usable inside a component
#[derive(Debug, Clone, Copy, Default)]
pub struct FluentLocalizer;

impl Localizer for FluentLocalizer {
    fn button(&self, label: &ButtonLabel) -> String {
        match label {
            ButtonLabel::PhotoOrVideo => t!("button-photo-or-video"),
            ButtonLabel::File => t!("button-file"),
            ButtonLabel::Location => t!("button-location"),
            ButtonLabel::Contact => t!("button-contact"),
            ButtonLabel::Photos { count } => t!("button-send-photos", count: *count),
            ButtonLabel::Videos { count } => t!("button-send-videos", count: *count),
            ButtonLabel::Medias { count } => t!("button-send-medias", count: *count),
            ButtonLabel::SendDocumentAsFile => t!("button-document"),
            ButtonLabel::SendPhotoAsFile => t!("button-send-as-file"),
            ButtonLabel::AddContact => t!("button-add-contact"),
        }
    }

    fn failure(&self, failure: &FailureKind) -> String {
        match failure {
            FailureKind::NoAccessToCamera => t!("error-no-camera-access"),
            FailureKind::NoAccessToPhoto => t!("error-no-photo-access"),
            FailureKind::Error(msg) => t!("error-generic", error: msg.clone()),
        }
    }
}
