//! Autosave persistence.
//!
//! Mirrors the current document into the key-value store: one synchronous
//! load attempt at startup, a repeating background timer that overwrites
//! the stored snapshot, and explicit writes after destructive edits.
//! Storage failures are logged as warnings and never surface to the
//! caller; a malformed or absent stored entry is treated as no prior state.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::document::LogframeDocument;
use crate::model::PersistedSnapshot;
use crate::settings::AUTOSAVE_KEY;
use crate::store::KeyValueStore;

/// Read the stored snapshot. Absent, unreadable, or malformed entries all
/// come back as `None`.
pub fn load_snapshot(store: &dyn KeyValueStore) -> Option<PersistedSnapshot> {
    let raw = match store.get(AUTOSAVE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("Failed to load autosave: {}", e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!("Ignoring malformed autosave entry: {}", e);
            None
        }
    }
}

/// Overwrite the stored snapshot. Failures are logged, never propagated.
pub fn save_snapshot(store: &dyn KeyValueStore, snapshot: &PersistedSnapshot) {
    let json = match serde_json::to_string(snapshot) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to serialize autosave snapshot: {}", e);
            return;
        }
    };

    if let Err(e) = store.set(AUTOSAVE_KEY, &json) {
        warn!("Failed to write autosave: {}", e);
    }
}

/// Repeating background timer that snapshots the document into the store.
///
/// The timer holds its own references to the shared document and store;
/// writes are idempotent overwrites, so racing an explicit save is
/// harmless (last write wins). Dropping the timer stops the worker and
/// joins it, so no write happens after disposal.
pub struct AutosaveTimer {
    stop: Sender<()>,
    worker: Option<JoinHandle<()>>,
    last_save: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AutosaveTimer {
    /// Spawn the timer. Every `interval`, the current snapshot is written
    /// under the autosave key.
    pub fn start(
        doc: Arc<Mutex<LogframeDocument>>,
        store: Arc<dyn KeyValueStore>,
        interval: Duration,
    ) -> Self {
        let (stop, ticks) = mpsc::channel();
        let last_save = Arc::new(Mutex::new(None));
        let observed = Arc::clone(&last_save);

        let worker = std::thread::spawn(move || loop {
            match ticks.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    let snapshot = doc.lock().unwrap().snapshot();
                    save_snapshot(store.as_ref(), &snapshot);
                    *observed.lock().unwrap() = Some(Utc::now());
                    debug!("Autosave tick complete");
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });

        Self {
            stop,
            worker: Some(worker),
            last_save,
        }
    }

    /// Timestamp of the most recent timer-driven save, if any.
    pub fn last_save_time(&self) -> Option<DateTime<Utc>> {
        *self.last_save.lock().unwrap()
    }

    /// Stop the timer and wait for the worker to exit.
    pub fn stop(&mut self) {
        let _ = self.stop.send(());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for AutosaveTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
