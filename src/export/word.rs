//! Word document export.
//!
//! Builds a styled HTML document in a Word-compatible wrapper: project
//! header, metadata block, and the full matrix as a table with one
//! color-coded row per level, in insertion order.

use crate::error::{LogframeError, Result};
use crate::i18n::Translator;
use crate::model::{LevelType, PersistedSnapshot};

use super::{artifact_file_name, display_title, level_type_label, table_headers, Artifact};

/// Row background per level category, matching the on-screen palette.
fn row_class(level_type: LevelType) -> &'static str {
    match level_type {
        LevelType::Goal => "level-goal",
        LevelType::Outcome => "level-outcome",
        LevelType::Output => "level-output",
        LevelType::Activity => "level-activity",
    }
}

/// Render the snapshot as a `.doc` artifact.
///
/// Refuses an empty level list with [`LogframeError::NothingToExport`]; no
/// partial artifact is produced.
pub fn export_word(snapshot: &PersistedSnapshot, translator: &Translator) -> Result<Artifact> {
    if snapshot.is_empty() {
        return Err(LogframeError::NothingToExport);
    }

    let info = &snapshot.project_info;
    let title = display_title(translator, &info.title);
    let matrix_title = translator.translate("LOGFRAME.LOGICAL_FRAMEWORK.TITLE");
    let headers = table_headers(translator);

    let mut html = format!(
        r#"<html>
<head>
<meta charset="utf-8">
<title>Logframe - {title}</title>
<style>
  body {{ font-family: Arial, sans-serif; margin: 40px; }}
  .header {{ text-align: center; margin-bottom: 30px; }}
  .project-info {{ margin-bottom: 30px; }}
  table {{ width: 100%; border-collapse: collapse; margin-top: 20px; }}
  th, td {{ border: 1px solid #000; padding: 8px; text-align: left; vertical-align: top; }}
  th {{ background-color: #f0f0f0; font-weight: bold; }}
  .level-goal {{ background-color: #d4edda; }}
  .level-outcome {{ background-color: #cce5ff; }}
  .level-output {{ background-color: #fff3cd; }}
  .level-activity {{ background-color: #e2d9f3; }}
</style>
</head>
<body>
<div class="header">
<h1>{matrix_title}</h1>
<h2>{title}</h2>
</div>
<div class="project-info">
<p><strong>{org_label}:</strong> {org}</p>
<p><strong>{donor_label}:</strong> {donor}</p>
<p><strong>{duration_label}:</strong> {duration}</p>
</div>
<table>
<tr>
"#,
        title = title,
        matrix_title = matrix_title,
        org_label = translator.translate("LOGFRAME.EXPORT.ORGANIZATION_LABEL"),
        org = info.organization,
        donor_label = translator.translate("LOGFRAME.EXPORT.DONOR_LABEL"),
        donor = info.donor,
        duration_label = translator.translate("LOGFRAME.EXPORT.DURATION_LABEL"),
        duration = info.duration,
    );

    for header in headers {
        html.push_str(&format!("<th>{}</th>\n", header));
    }
    html.push_str("</tr>\n");

    for level in &snapshot.logframe {
        html.push_str(&format!(
            "<tr class=\"{class}\">\n<td><strong>{label}</strong></td>\n<td>{description}</td>\n<td>{indicators}</td>\n<td>{verification}</td>\n<td>{assumptions}</td>\n</tr>\n",
            class = row_class(level.level_type),
            label = level_type_label(translator, level.level_type),
            description = level.description,
            indicators = level.indicators,
            verification = level.verification,
            assumptions = level.assumptions,
        ));
    }

    html.push_str("</table></body></html>");

    Ok(Artifact {
        file_name: artifact_file_name("logframe", &info.title, "doc"),
        media_type: "application/msword",
        bytes: html.into_bytes(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LogframeLevel, ProjectInfo};
    use crate::settings::AppSettings;
    use pretty_assertions::assert_eq;

    fn translator() -> Translator {
        Translator::new(&AppSettings::default())
    }

    fn snapshot_with_one_goal() -> PersistedSnapshot {
        let mut level = LogframeLevel::new("level-1".to_string(), LevelType::Goal);
        level.description = "Improve water access".to_string();
        PersistedSnapshot {
            project_info: ProjectInfo {
                title: "Water Project".to_string(),
                organization: "Acme".to_string(),
                donor: "EU".to_string(),
                duration: "24 months".to_string(),
            },
            logframe: vec![level],
        }
    }

    #[test]
    fn empty_logframe_refuses_to_export() {
        let result = export_word(&PersistedSnapshot::default(), &translator());
        assert!(matches!(result, Err(LogframeError::NothingToExport)));
    }

    #[test]
    fn document_embeds_rows_and_palette() {
        let artifact = export_word(&snapshot_with_one_goal(), &translator()).unwrap();
        let html = String::from_utf8(artifact.bytes).unwrap();

        assert!(html.contains("class=\"level-goal\""));
        assert!(html.contains("#d4edda"));
        assert!(html.contains("Improve water access"));
        assert!(html.contains("<strong>Goal</strong>"));
        assert!(html.contains("<strong>Organization:</strong> Acme"));
    }

    #[test]
    fn document_filename_and_media_type() {
        let artifact = export_word(&snapshot_with_one_goal(), &translator()).unwrap();
        assert_eq!(artifact.file_name, "logframe-water-project.doc");
        assert_eq!(artifact.media_type, "application/msword");
    }

    #[test]
    fn rows_keep_insertion_order() {
        let mut snapshot = snapshot_with_one_goal();
        snapshot
            .logframe
            .insert(0, LogframeLevel::new("level-2".to_string(), LevelType::Activity));

        let artifact = export_word(&snapshot, &translator()).unwrap();
        let html = String::from_utf8(artifact.bytes).unwrap();
        let activity_pos = html.find("class=\"level-activity\"").unwrap();
        let goal_pos = html.find("class=\"level-goal\"").unwrap();
        assert!(
            activity_pos < goal_pos,
            "rows are ordered as stored, not by type"
        );
    }
}
