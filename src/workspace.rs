//! Session lifecycle.
//!
//! A [`Workspace`] owns the live document for its lifetime, wires it to the
//! store, and manages the autosave timer: one synchronous load attempt on
//! open, periodic snapshots while open, a final save plus timer shutdown on
//! close. Destructive edits are gated behind a confirmation prompt and
//! persisted immediately when confirmed.

use std::sync::{Arc, Mutex, MutexGuard};

use log::{debug, info};

use crate::autosave::{load_snapshot, save_snapshot, AutosaveTimer};
use crate::document::{InfoField, LogframeDocument};
use crate::model::{LevelField, LevelType, PersistedSnapshot, ProjectInfo};
use crate::settings::AppSettings;
use crate::store::KeyValueStore;

/// Blocking yes/no prompt shown before destructive actions.
pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> bool;
}

/// Prompt that always answers yes. Used by tests and `--yes` flows.
pub struct AlwaysConfirm;

impl ConfirmPrompt for AlwaysConfirm {
    fn confirm(&mut self, _message: &str) -> bool {
        true
    }
}

/// Prompt that always answers no.
pub struct NeverConfirm;

impl ConfirmPrompt for NeverConfirm {
    fn confirm(&mut self, _message: &str) -> bool {
        false
    }
}

/// An open editing session over a stored logframe.
pub struct Workspace {
    doc: Arc<Mutex<LogframeDocument>>,
    store: Arc<dyn KeyValueStore>,
    timer: Option<AutosaveTimer>,
}

impl Workspace {
    /// Open a session: load the stored snapshot when present and
    /// well-formed (anything else starts empty), then start the autosave
    /// timer with the configured interval.
    pub fn open(store: Arc<dyn KeyValueStore>, settings: &AppSettings) -> Self {
        let doc = match load_snapshot(store.as_ref()) {
            Some(snapshot) => {
                info!(
                    "Restored autosaved logframe with {} level(s)",
                    snapshot.logframe.len()
                );
                LogframeDocument::from_snapshot(snapshot)
            }
            None => LogframeDocument::new(),
        };

        let doc = Arc::new(Mutex::new(doc));
        let timer = AutosaveTimer::start(
            Arc::clone(&doc),
            Arc::clone(&store),
            settings.autosave_interval,
        );

        Self {
            doc,
            store,
            timer: Some(timer),
        }
    }

    /// Lock the live document for direct reads or edits.
    pub fn document(&self) -> MutexGuard<'_, LogframeDocument> {
        self.doc.lock().unwrap()
    }

    /// Append a new level and return its id.
    pub fn add_level(&self, level_type: LevelType) -> String {
        self.document().add_level(level_type)
    }

    /// Remove a level after user confirmation. A confirmed removal is
    /// persisted immediately; declining leaves the document untouched.
    pub fn remove_level(&self, id: &str, prompt: &mut dyn ConfirmPrompt, message: &str) -> bool {
        if !prompt.confirm(message) {
            debug!("Level removal declined: {}", id);
            return false;
        }

        let removed = self.document().remove_level(id);
        if removed {
            self.save_now();
        }
        removed
    }

    /// Replace one free-text field of a level. Absent ids are ignored.
    pub fn update_level(&self, id: &str, field: LevelField, value: &str) {
        self.document().update_level(id, field, value);
    }

    /// Edit one project metadata field.
    pub fn set_info(&self, field: InfoField, value: &str) {
        self.document().set_info(field, value);
    }

    /// Current project metadata.
    pub fn info(&self) -> ProjectInfo {
        self.document().info().clone()
    }

    /// Point-in-time copy of the full state.
    pub fn snapshot(&self) -> PersistedSnapshot {
        self.document().snapshot()
    }

    /// Write the current snapshot to the store now. Failures degrade to a
    /// logged warning, like every other persistence write.
    pub fn save_now(&self) {
        let snapshot = self.snapshot();
        save_snapshot(self.store.as_ref(), &snapshot);
    }

    /// End the session: stop the autosave timer and write a final
    /// snapshot.
    pub fn close(mut self) {
        if let Some(mut timer) = self.timer.take() {
            timer.stop();
        }
        self.save_now();
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        // close() already stopped the timer; an un-closed workspace still
        // stops it here via the timer's own Drop.
        self.timer.take();
    }
}
