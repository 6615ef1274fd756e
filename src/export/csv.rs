//! CSV export.
//!
//! Comma-delimited UTF-8 text: a project metadata preamble, the table
//! header row, then one quoted record per level with embedded quotes
//! doubled. Unlike the document export there is no empty-list guard; an
//! empty logframe yields a header-only artifact.

use crate::i18n::Translator;
use crate::model::PersistedSnapshot;

use super::{artifact_file_name, display_title, table_headers, Artifact};

/// Double embedded quote characters, the standard CSV escape.
fn escape(value: &str) -> String {
    value.replace('"', "\"\"")
}

/// Render the snapshot as a `.csv` artifact.
pub fn export_csv(snapshot: &PersistedSnapshot, translator: &Translator) -> Artifact {
    let info = &snapshot.project_info;
    let title = display_title(translator, &info.title);
    let headers = table_headers(translator);

    let mut csv = format!(
        "{} - {}\n{}: {}\n{}: {}\n{}: {}\n\n",
        translator.translate("LOGFRAME.LOGICAL_FRAMEWORK.TITLE"),
        title,
        translator.translate("LOGFRAME.EXPORT.ORGANIZATION_LABEL"),
        info.organization,
        translator.translate("LOGFRAME.EXPORT.DONOR_LABEL"),
        info.donor,
        translator.translate("LOGFRAME.EXPORT.DURATION_LABEL"),
        info.duration,
    );

    csv.push_str(&headers.join(","));
    csv.push('\n');

    for level in &snapshot.logframe {
        csv.push_str(&format!(
            "\"{}\",\"{}\",\"{}\",\"{}\",\"{}\"\n",
            level.level_type,
            escape(&level.description),
            escape(&level.indicators),
            escape(&level.verification),
            escape(&level.assumptions),
        ));
    }

    Artifact {
        file_name: artifact_file_name("logframe", &info.title, "csv"),
        media_type: "text/csv",
        bytes: csv.into_bytes(),
    }
}
