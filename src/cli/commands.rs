//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command. Every command opens
//! the workspace from the store directory, performs its work, and closes
//! the workspace so the final state is persisted.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, info};

use crate::cli::ExportFormat;
use crate::document::InfoField;
use crate::error::{LogframeError, Result};
use crate::export::image::MatrixRenderer;
use crate::export::{csv::export_csv, image::export_image, word::export_word, Artifact};
use crate::i18n::{Language, Translator};
use crate::model::{LevelField, LevelType};
use crate::settings::{AppSettings, AUTOSAVE_KEY};
use crate::store::{FileStore, KeyValueStore};
use crate::workspace::{AlwaysConfirm, ConfirmPrompt, Workspace};

/// Confirmation prompt backed by stdin.
pub struct StdinPrompt;

impl ConfirmPrompt for StdinPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        print!("{} [y/N] ", message);
        let _ = io::stdout().flush();

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line).is_err() {
            return false;
        }
        matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

fn open_store(dir: &Path) -> Result<Arc<dyn KeyValueStore>> {
    Ok(Arc::new(FileStore::open(dir)?))
}

/// Set project metadata fields. Unset flags leave their field unchanged.
pub fn set_info(
    dir: &Path,
    title: Option<&str>,
    organization: Option<&str>,
    donor: Option<&str>,
    duration: Option<&str>,
) -> Result<()> {
    let store = open_store(dir)?;
    let settings = AppSettings::default();
    let ws = Workspace::open(store, &settings);

    let edits = [
        (InfoField::Title, title),
        (InfoField::Organization, organization),
        (InfoField::Donor, donor),
        (InfoField::Duration, duration),
    ];
    for (field, value) in edits {
        if let Some(value) = value {
            ws.set_info(field, value);
        }
    }

    let info = ws.info();
    ws.close();

    println!("Project info updated:");
    println!("  title:        {}", info.title);
    println!("  organization: {}", info.organization);
    println!("  donor:        {}", info.donor);
    println!("  duration:     {}", info.duration);

    Ok(())
}

/// Add a new level of the given category.
pub fn add(dir: &Path, level_type: LevelType) -> Result<()> {
    let store = open_store(dir)?;
    let settings = AppSettings::default();
    let ws = Workspace::open(store, &settings);

    let id = ws.add_level(level_type);
    info!("Added {} level: {}", level_type, id);
    ws.close();

    println!("Added {}: {}", level_type, id);
    Ok(())
}

/// Remove a level by id, gated behind a confirmation prompt.
pub fn remove(dir: &Path, id: &str, yes: bool) -> Result<()> {
    let store = open_store(dir)?;
    let settings = AppSettings::default();
    let translator = Translator::from_store(&settings, store.as_ref());
    let ws = Workspace::open(Arc::clone(&store), &settings);

    let message = translator.translate("LOGFRAME.EXPORT.CONFIRM_REMOVE_LEVEL");
    let removed = if yes {
        ws.remove_level(id, &mut AlwaysConfirm, message)
    } else {
        ws.remove_level(id, &mut StdinPrompt, message)
    };
    ws.close();

    if removed {
        println!("Removed {}", id);
    } else {
        println!("Nothing removed.");
    }
    Ok(())
}

/// Replace one free-text field of a level. An absent id is a silent no-op,
/// matching the in-app behavior.
pub fn update(dir: &Path, id: &str, field: LevelField, value: &str) -> Result<()> {
    let store = open_store(dir)?;
    let settings = AppSettings::default();
    let ws = Workspace::open(store, &settings);

    let known = ws.document().levels().iter().any(|level| level.id == id);
    ws.update_level(id, field, value);
    ws.close();

    if known {
        println!("Updated {}", id);
    } else {
        debug!("update ignored: no level with id {}", id);
        println!("No level with id {}; nothing changed.", id);
    }
    Ok(())
}

/// Print the current state as pretty JSON.
pub fn show(dir: &Path) -> Result<()> {
    let store = open_store(dir)?;
    let settings = AppSettings::default();
    let ws = Workspace::open(store, &settings);

    let snapshot = ws.snapshot();
    let counter = ws.document().counter();
    ws.close();

    let json = serde_json::to_string_pretty(&snapshot)?;
    println!("{}", json);
    println!();
    println!("Levels: {} | id counter: {}", snapshot.logframe.len(), counter);

    Ok(())
}

/// Export the matrix in the requested format, writing the artifact into
/// the output directory. Unmet export preconditions are shown as messages
/// rather than failures.
pub fn export(dir: &Path, format: ExportFormat, out: Option<&Path>) -> Result<()> {
    let store = open_store(dir)?;
    let settings = AppSettings::default();
    let translator = Translator::from_store(&settings, store.as_ref());
    let ws = Workspace::open(Arc::clone(&store), &settings);
    let snapshot = ws.snapshot();
    ws.close();

    let result = match format {
        ExportFormat::Word => export_word(&snapshot, &translator),
        ExportFormat::Csv => Ok(export_csv(&snapshot, &translator)),
        ExportFormat::Png => {
            let backend = MatrixRenderer::new(&snapshot);
            export_image(&snapshot, &backend)
        }
    };

    let artifact = match result {
        Ok(artifact) => artifact,
        Err(e) if e.is_user_facing() => {
            println!("{}", alert_message(&translator, format, &e));
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    let out_dir = out
        .map(Path::to_path_buf)
        .unwrap_or_else(|| dir.join("exports"));
    let path = write_artifact(&out_dir, &artifact)?;
    println!("Exported: {}", path.display());

    Ok(())
}

/// Translated alert text for an unmet export precondition.
fn alert_message(translator: &Translator, format: ExportFormat, error: &LogframeError) -> String {
    let key = match error {
        LogframeError::NothingToExport => match format {
            ExportFormat::Png => "LOGFRAME.EXPORT.ERROR_NO_CONTENT_IMAGE",
            _ => "LOGFRAME.EXPORT.ERROR_NO_CONTENT",
        },
        LogframeError::RenderTargetNotFound { .. } => "LOGFRAME.EXPORT.ERROR_MATRIX_NOT_FOUND",
        LogframeError::EmptyRaster { .. } => "LOGFRAME.EXPORT.ERROR_EXPORT_FAILED",
        _ => return error.to_string(),
    };
    translator.translate(key).to_string()
}

fn write_artifact(out_dir: &Path, artifact: &Artifact) -> Result<PathBuf> {
    fs::create_dir_all(out_dir).map_err(|e| LogframeError::DirectoryCreate {
        path: out_dir.to_path_buf(),
        source: e,
    })?;

    let path = out_dir.join(&artifact.file_name);
    fs::write(&path, &artifact.bytes).map_err(|e| LogframeError::FileWrite {
        path: path.clone(),
        source: e,
    })?;

    info!(
        "Wrote {} ({} bytes, {})",
        path.display(),
        artifact.bytes.len(),
        artifact.media_type
    );
    Ok(path)
}

/// Switch the interface language and persist the preference.
pub fn lang(dir: &Path, code: Language) -> Result<()> {
    let store = open_store(dir)?;
    let settings = AppSettings::default();
    let mut translator = Translator::from_store(&settings, store.as_ref());

    translator.set_language(code, store.as_ref());
    println!("Language set to {}", translator.current_language());

    Ok(())
}

/// Delete the autosaved state.
pub fn clear(dir: &Path, yes: bool) -> Result<()> {
    let store = open_store(dir)?;

    let confirmed = yes || StdinPrompt.confirm("Delete the autosaved logframe?");
    if !confirmed {
        println!("Nothing removed.");
        return Ok(());
    }

    store.remove(AUTOSAVE_KEY)?;
    println!("Autosaved state cleared.");
    Ok(())
}
