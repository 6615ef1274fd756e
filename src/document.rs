//! In-memory logframe state.
//!
//! `LogframeDocument` owns the project metadata and the ordered level list
//! for the lifetime of a session. Reads go through [`LogframeDocument::snapshot`];
//! writes publish a [`DocumentEvent`] to registered listeners, which is how
//! the persistence side reacts to mutations without the document knowing
//! about storage.

use crate::model::{
    parse_level_number, LevelField, LevelType, LogframeLevel, PersistedSnapshot, ProjectInfo,
    LEVEL_ID_PREFIX,
};

/// Change notification published after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEvent {
    LevelAdded { id: String },
    LevelRemoved { id: String },
    LevelUpdated { id: String },
    InfoChanged,
}

type Listener = Box<dyn FnMut(&DocumentEvent) + Send>;

/// Editable field of the project metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoField {
    Title,
    Organization,
    Donor,
    Duration,
}

/// The logframe under construction: project metadata plus the ordered
/// level list and the id counter.
#[derive(Default)]
pub struct LogframeDocument {
    info: ProjectInfo,
    levels: Vec<LogframeLevel>,
    counter: u64,
    listeners: Vec<Listener>,
}

impl LogframeDocument {
    /// Empty document with a zeroed counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Document restored from a persisted snapshot. The counter is
    /// recomputed as the maximum numeric id suffix, not the item count, so
    /// new ids never collide with restored ones even after deletions.
    pub fn from_snapshot(snapshot: PersistedSnapshot) -> Self {
        let counter = snapshot
            .logframe
            .iter()
            .filter_map(|level| parse_level_number(&level.id))
            .max()
            .unwrap_or(0);

        Self {
            info: snapshot.project_info,
            levels: snapshot.logframe,
            counter,
            listeners: Vec::new(),
        }
    }

    /// Register a listener invoked after every mutation.
    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    fn publish(&mut self, event: DocumentEvent) {
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    /// Append a new empty level of the given category. The counter is
    /// incremented first, so ids are strictly increasing and never reused.
    pub fn add_level(&mut self, level_type: LevelType) -> String {
        self.counter += 1;
        let id = format!("{}{}", LEVEL_ID_PREFIX, self.counter);
        self.levels
            .push(LogframeLevel::new(id.clone(), level_type));
        self.publish(DocumentEvent::LevelAdded { id: id.clone() });
        id
    }

    /// Remove the level with the given id. Returns false (and publishes
    /// nothing) when no such level exists.
    pub fn remove_level(&mut self, id: &str) -> bool {
        let before = self.levels.len();
        self.levels.retain(|level| level.id != id);

        if self.levels.len() == before {
            return false;
        }

        self.publish(DocumentEvent::LevelRemoved { id: id.to_string() });
        true
    }

    /// Replace one free-text field of the level with the given id. Silently
    /// no-ops when the id is absent. The category is not editable.
    pub fn update_level(&mut self, id: &str, field: LevelField, value: &str) {
        let Some(level) = self.levels.iter_mut().find(|level| level.id == id) else {
            return;
        };

        let slot = match field {
            LevelField::Description => &mut level.description,
            LevelField::Indicators => &mut level.indicators,
            LevelField::Verification => &mut level.verification,
            LevelField::Assumptions => &mut level.assumptions,
        };
        *slot = value.to_string();

        self.publish(DocumentEvent::LevelUpdated { id: id.to_string() });
    }

    /// Edit one project metadata field.
    pub fn set_info(&mut self, field: InfoField, value: &str) {
        let slot = match field {
            InfoField::Title => &mut self.info.title,
            InfoField::Organization => &mut self.info.organization,
            InfoField::Donor => &mut self.info.donor,
            InfoField::Duration => &mut self.info.duration,
        };
        *slot = value.to_string();
        self.publish(DocumentEvent::InfoChanged);
    }

    /// Replace the project metadata wholesale.
    pub fn patch_info(&mut self, info: ProjectInfo) {
        self.info = info;
        self.publish(DocumentEvent::InfoChanged);
    }

    pub fn info(&self) -> &ProjectInfo {
        &self.info
    }

    pub fn levels(&self) -> &[LogframeLevel] {
        &self.levels
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Value of the id counter; restored sessions report the maximum suffix
    /// seen in the snapshot.
    pub fn counter(&self) -> u64 {
        self.counter
    }

    /// Point-in-time copy of the state, in the persisted wire shape.
    pub fn snapshot(&self) -> PersistedSnapshot {
        PersistedSnapshot {
            project_info: self.info.clone(),
            logframe: self.levels.clone(),
        }
    }
}

impl std::fmt::Debug for LogframeDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogframeDocument")
            .field("info", &self.info)
            .field("levels", &self.levels)
            .field("counter", &self.counter)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use test_case::test_case;

    #[test]
    fn add_level_produces_distinct_increasing_ids() {
        let mut doc = LogframeDocument::new();
        let ids: Vec<String> = (0..5)
            .map(|i| doc.add_level(LevelType::ALL[i % 4]))
            .collect();

        for window in ids.windows(2) {
            assert_ne!(window[0], window[1]);
            assert!(
                parse_level_number(&window[0]).unwrap() < parse_level_number(&window[1]).unwrap()
            );
        }
        assert_eq!(ids[0], "level-1");
        assert_eq!(ids[4], "level-5");
    }

    #[test]
    fn removing_a_middle_level_leaves_a_gap() {
        let mut doc = LogframeDocument::new();
        doc.add_level(LevelType::Goal);
        let middle = doc.add_level(LevelType::Outcome);
        doc.add_level(LevelType::Output);

        assert!(doc.remove_level(&middle));
        let next = doc.add_level(LevelType::Activity);
        assert_eq!(next, "level-4", "removed ids are never reused");
    }

    #[test]
    fn remove_level_missing_id_is_a_no_op() {
        let mut doc = LogframeDocument::new();
        doc.add_level(LevelType::Goal);
        assert!(!doc.remove_level("level-99"));
        assert_eq!(doc.levels().len(), 1);
    }

    #[test_case(LevelField::Description)]
    #[test_case(LevelField::Indicators)]
    #[test_case(LevelField::Verification)]
    #[test_case(LevelField::Assumptions)]
    fn update_level_replaces_one_field(field: LevelField) {
        let mut doc = LogframeDocument::new();
        let id = doc.add_level(LevelType::Goal);

        doc.update_level(&id, field, "text");

        let level = &doc.levels()[0];
        let value = match field {
            LevelField::Description => &level.description,
            LevelField::Indicators => &level.indicators,
            LevelField::Verification => &level.verification,
            LevelField::Assumptions => &level.assumptions,
        };
        assert_eq!(value, "text");
    }

    #[test]
    fn update_level_absent_id_is_silent() {
        let mut doc = LogframeDocument::new();
        doc.add_level(LevelType::Goal);
        doc.update_level("level-42", LevelField::Description, "x");
        assert_eq!(doc.levels()[0].description, "");
    }

    #[test]
    fn counter_restores_from_max_suffix_not_count() {
        let snapshot = PersistedSnapshot {
            project_info: ProjectInfo::default(),
            logframe: vec![
                LogframeLevel::new("level-1".to_string(), LevelType::Goal),
                LogframeLevel::new("level-3".to_string(), LevelType::Output),
            ],
        };

        let mut doc = LogframeDocument::from_snapshot(snapshot);
        assert_eq!(doc.counter(), 3);
        assert_eq!(doc.add_level(LevelType::Activity), "level-4");
    }

    #[test]
    fn counter_ignores_malformed_ids() {
        let snapshot = PersistedSnapshot {
            project_info: ProjectInfo::default(),
            logframe: vec![LogframeLevel::new("custom-id".to_string(), LevelType::Goal)],
        };

        let mut doc = LogframeDocument::from_snapshot(snapshot);
        assert_eq!(doc.counter(), 0);
        assert_eq!(doc.add_level(LevelType::Goal), "level-1");
    }

    #[test]
    fn mutations_publish_events() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);

        let mut doc = LogframeDocument::new();
        doc.subscribe(Box::new(move |_event| {
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        let id = doc.add_level(LevelType::Goal);
        doc.update_level(&id, LevelField::Description, "d");
        doc.set_info(InfoField::Title, "T");
        doc.remove_level(&id);

        assert_eq!(count.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn failed_remove_publishes_nothing() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);

        let mut doc = LogframeDocument::new();
        doc.subscribe(Box::new(move |_event| {
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        doc.remove_level("level-1");
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn snapshot_preserves_insertion_order() {
        let mut doc = LogframeDocument::new();
        doc.add_level(LevelType::Activity);
        doc.add_level(LevelType::Goal);
        doc.add_level(LevelType::Outcome);

        let snapshot = doc.snapshot();
        let order: Vec<LevelType> = snapshot
            .logframe
            .iter()
            .map(|level| level.level_type)
            .collect();
        assert_eq!(
            order,
            vec![LevelType::Activity, LevelType::Goal, LevelType::Outcome]
        );
    }
}
