//! Translation layer with a persisted language preference.
//!
//! A small static catalog keyed the same way as the translation files the
//! UI shipped with. Lookups fall back to the key itself so a missing phrase
//! never breaks an export. The active language is chosen once from the
//! stored preference and can be switched explicitly; switching persists the
//! preference, tolerating storage failures the same way autosave does.

use std::fmt;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{LogframeError, Result};
use crate::settings::{AppSettings, LANGUAGE_KEY};
use crate::store::KeyValueStore;

/// Supported interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Nl,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Nl => "nl",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = LogframeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "en" => Ok(Language::En),
            "nl" => Ok(Language::Nl),
            other => Err(LogframeError::UnsupportedLanguage {
                code: other.to_string(),
            }),
        }
    }
}

/// English catalog.
const CATALOG_EN: &[(&str, &str)] = &[
    ("LOGFRAME.LOGICAL_FRAMEWORK.TITLE", "Logical Framework"),
    ("LOGFRAME.LOGICAL_FRAMEWORK.LEVEL_TYPES.GOAL", "Goal"),
    ("LOGFRAME.LOGICAL_FRAMEWORK.LEVEL_TYPES.OUTCOME", "Outcome"),
    ("LOGFRAME.LOGICAL_FRAMEWORK.LEVEL_TYPES.OUTPUT", "Output"),
    ("LOGFRAME.LOGICAL_FRAMEWORK.LEVEL_TYPES.ACTIVITY", "Activity"),
    ("LOGFRAME.EXPORT.UNTITLED_PROJECT", "Untitled Project"),
    ("LOGFRAME.EXPORT.ORGANIZATION_LABEL", "Organization"),
    ("LOGFRAME.EXPORT.DONOR_LABEL", "Donor"),
    ("LOGFRAME.EXPORT.DURATION_LABEL", "Duration"),
    ("LOGFRAME.EXPORT.TABLE_HEADER_LEVEL", "Level"),
    ("LOGFRAME.EXPORT.TABLE_HEADER_DESCRIPTION", "Description"),
    ("LOGFRAME.EXPORT.TABLE_HEADER_INDICATORS", "Indicators"),
    (
        "LOGFRAME.EXPORT.TABLE_HEADER_VERIFICATION",
        "Means of Verification",
    ),
    ("LOGFRAME.EXPORT.TABLE_HEADER_ASSUMPTIONS", "Assumptions"),
    (
        "LOGFRAME.EXPORT.ERROR_NO_CONTENT",
        "Add at least one level before exporting.",
    ),
    (
        "LOGFRAME.EXPORT.ERROR_NO_CONTENT_IMAGE",
        "Add at least one level before exporting an image.",
    ),
    (
        "LOGFRAME.EXPORT.ERROR_MATRIX_NOT_FOUND",
        "The logframe matrix could not be found.",
    ),
    (
        "LOGFRAME.EXPORT.ERROR_EXPORT_FAILED",
        "Export failed. Please try again.",
    ),
    (
        "LOGFRAME.EXPORT.CONFIRM_REMOVE_LEVEL",
        "Remove this level? This cannot be undone.",
    ),
    ("GENERAL.REMOVE", "Remove"),
];

/// Dutch catalog.
const CATALOG_NL: &[(&str, &str)] = &[
    ("LOGFRAME.LOGICAL_FRAMEWORK.TITLE", "Logisch Raamwerk"),
    ("LOGFRAME.LOGICAL_FRAMEWORK.LEVEL_TYPES.GOAL", "Doel"),
    ("LOGFRAME.LOGICAL_FRAMEWORK.LEVEL_TYPES.OUTCOME", "Resultaat"),
    ("LOGFRAME.LOGICAL_FRAMEWORK.LEVEL_TYPES.OUTPUT", "Output"),
    ("LOGFRAME.LOGICAL_FRAMEWORK.LEVEL_TYPES.ACTIVITY", "Activiteit"),
    ("LOGFRAME.EXPORT.UNTITLED_PROJECT", "Naamloos Project"),
    ("LOGFRAME.EXPORT.ORGANIZATION_LABEL", "Organisatie"),
    ("LOGFRAME.EXPORT.DONOR_LABEL", "Donor"),
    ("LOGFRAME.EXPORT.DURATION_LABEL", "Looptijd"),
    ("LOGFRAME.EXPORT.TABLE_HEADER_LEVEL", "Niveau"),
    ("LOGFRAME.EXPORT.TABLE_HEADER_DESCRIPTION", "Beschrijving"),
    ("LOGFRAME.EXPORT.TABLE_HEADER_INDICATORS", "Indicatoren"),
    (
        "LOGFRAME.EXPORT.TABLE_HEADER_VERIFICATION",
        "Verificatiemiddelen",
    ),
    ("LOGFRAME.EXPORT.TABLE_HEADER_ASSUMPTIONS", "Aannames"),
    (
        "LOGFRAME.EXPORT.ERROR_NO_CONTENT",
        "Voeg minstens een niveau toe voordat je exporteert.",
    ),
    (
        "LOGFRAME.EXPORT.ERROR_NO_CONTENT_IMAGE",
        "Voeg minstens een niveau toe voordat je een afbeelding exporteert.",
    ),
    (
        "LOGFRAME.EXPORT.ERROR_MATRIX_NOT_FOUND",
        "De logframe matrix kon niet worden gevonden.",
    ),
    (
        "LOGFRAME.EXPORT.ERROR_EXPORT_FAILED",
        "Exporteren mislukt. Probeer het opnieuw.",
    ),
    (
        "LOGFRAME.EXPORT.CONFIRM_REMOVE_LEVEL",
        "Dit niveau verwijderen? Dit kan niet ongedaan worden gemaakt.",
    ),
    ("GENERAL.REMOVE", "Verwijderen"),
];

fn catalog(lang: Language) -> &'static [(&'static str, &'static str)] {
    match lang {
        Language::En => CATALOG_EN,
        Language::Nl => CATALOG_NL,
    }
}

/// Resolves translation keys for the active language.
#[derive(Debug, Clone)]
pub struct Translator {
    active: Language,
    default_language: Language,
    supported: Vec<Language>,
}

impl Translator {
    /// Translator using the default language, ignoring any stored preference.
    pub fn new(settings: &AppSettings) -> Self {
        Self {
            active: settings.default_language,
            default_language: settings.default_language,
            supported: settings.supported_languages.clone(),
        }
    }

    /// Translator using the stored preference when present and supported.
    /// A missing, unreadable, or unsupported preference falls back to the
    /// default language.
    pub fn from_store(settings: &AppSettings, store: &dyn KeyValueStore) -> Self {
        let mut translator = Self::new(settings);

        match store.get(LANGUAGE_KEY) {
            Ok(Some(raw)) => {
                let code = raw.trim().trim_matches('"');
                match code.parse::<Language>() {
                    Ok(lang) if translator.supported.contains(&lang) => {
                        translator.active = lang;
                    }
                    _ => warn!("Ignoring stored language preference: {}", code),
                }
            }
            Ok(None) => {}
            Err(e) => warn!("Failed to read language preference: {}", e),
        }

        translator
    }

    /// The active language.
    pub fn current_language(&self) -> Language {
        self.active
    }

    /// Switch the active language and persist the preference. An
    /// unsupported language falls back to the default. Storage failures are
    /// logged and do not fail the switch.
    pub fn set_language(&mut self, lang: Language, store: &dyn KeyValueStore) {
        let lang = if self.supported.contains(&lang) {
            lang
        } else {
            self.default_language
        };

        self.active = lang;

        if let Err(e) = store.set(LANGUAGE_KEY, lang.code()) {
            warn!("Failed to persist language preference: {}", e);
        }
    }

    /// Look up a phrase for the active language. Unknown keys come back
    /// unchanged.
    pub fn translate<'a>(&self, key: &'a str) -> &'a str {
        catalog(self.active)
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, phrase)| *phrase)
            .unwrap_or(key)
    }
}
