//! Export pipeline.
//!
//! Three independent, stateless renderers over a point-in-time snapshot:
//! a Word-compatible document, a CSV table, and a rasterized PNG of the
//! matrix. None of them mutate state; each reads a fresh snapshot at call
//! time and produces a downloadable artifact.

pub mod csv;
pub mod image;
pub mod word;

use crate::i18n::Translator;
use crate::model::LevelType;

/// Filename slug used when the project title is blank.
const UNTITLED_SLUG: &str = "untitled";

/// A produced export: filename, media type, and the raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Derive an artifact filename from the project title: whitespace runs
/// collapse to single hyphens, the result is lowercased, and a blank title
/// falls back to a fixed placeholder.
pub fn artifact_file_name(prefix: &str, title: &str, extension: &str) -> String {
    let slug = if title.trim().is_empty() {
        UNTITLED_SLUG.to_string()
    } else {
        title
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase()
    };
    format!("{}-{}.{}", prefix, slug, extension)
}

/// Translated table header row shared by the document and CSV exports.
pub(crate) fn table_headers(translator: &Translator) -> [&str; 5] {
    [
        translator.translate("LOGFRAME.EXPORT.TABLE_HEADER_LEVEL"),
        translator.translate("LOGFRAME.EXPORT.TABLE_HEADER_DESCRIPTION"),
        translator.translate("LOGFRAME.EXPORT.TABLE_HEADER_INDICATORS"),
        translator.translate("LOGFRAME.EXPORT.TABLE_HEADER_VERIFICATION"),
        translator.translate("LOGFRAME.EXPORT.TABLE_HEADER_ASSUMPTIONS"),
    ]
}

/// Translated display label for a level category.
pub(crate) fn level_type_label(translator: &Translator, level_type: LevelType) -> &'static str {
    match level_type {
        LevelType::Goal => translator.translate("LOGFRAME.LOGICAL_FRAMEWORK.LEVEL_TYPES.GOAL"),
        LevelType::Outcome => {
            translator.translate("LOGFRAME.LOGICAL_FRAMEWORK.LEVEL_TYPES.OUTCOME")
        }
        LevelType::Output => translator.translate("LOGFRAME.LOGICAL_FRAMEWORK.LEVEL_TYPES.OUTPUT"),
        LevelType::Activity => {
            translator.translate("LOGFRAME.LOGICAL_FRAMEWORK.LEVEL_TYPES.ACTIVITY")
        }
    }
}

/// Project title, or the translated placeholder when blank.
pub(crate) fn display_title<'a>(translator: &Translator, title: &'a str) -> &'a str {
    if title.trim().is_empty() {
        translator.translate("LOGFRAME.EXPORT.UNTITLED_PROJECT")
    } else {
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::AppSettings;
    use pretty_assertions::assert_eq;

    #[test]
    fn file_name_collapses_whitespace_and_lowercases() {
        assert_eq!(
            artifact_file_name("logframe", "My  Great   Project", "doc"),
            "logframe-my-great-project.doc"
        );
    }

    #[test]
    fn file_name_blank_title_uses_placeholder() {
        assert_eq!(
            artifact_file_name("logframe-matrix", "", "png"),
            "logframe-matrix-untitled.png"
        );
        assert_eq!(
            artifact_file_name("logframe", "   ", "csv"),
            "logframe-untitled.csv"
        );
    }

    #[test]
    fn display_title_uses_translated_placeholder() {
        let translator = Translator::new(&AppSettings::default());
        assert_eq!(display_title(&translator, ""), "Untitled Project");
        assert_eq!(display_title(&translator, "Water"), "Water");
    }
}
