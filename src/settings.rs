//! Application settings.
//!
//! Settings are constructed once at process start and passed explicitly to
//! the parts that need them; they are read-only after construction.

use std::time::Duration;

use crate::i18n::Language;

/// Store key for the autosaved snapshot.
pub const AUTOSAVE_KEY: &str = "logframe-autosave";

/// Store key for the persisted language preference.
pub const LANGUAGE_KEY: &str = "preferredLanguage";

/// Default autosave interval in seconds.
const DEFAULT_AUTOSAVE_INTERVAL: u64 = 30;

/// App-wide configuration values.
#[derive(Debug, Clone)]
pub struct AppSettings {
    /// Application name used in artifact filename prefixes.
    pub app_name: String,

    /// Application version.
    pub app_version: String,

    /// Language used when no preference is stored.
    pub default_language: Language,

    /// Languages a stored preference may select.
    pub supported_languages: Vec<Language>,

    /// Period of the autosave timer.
    pub autosave_interval: Duration,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            app_name: "logframe".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            default_language: Language::En,
            supported_languages: vec![Language::En, Language::Nl],
            autosave_interval: Duration::from_secs(DEFAULT_AUTOSAVE_INTERVAL),
        }
    }
}

impl AppSettings {
    /// Whether a language is one of the supported languages.
    pub fn supports(&self, lang: Language) -> bool {
        self.supported_languages.contains(&lang)
    }
}
