//! Logframe - Logical Framework Generator
//!
//! A tool for building logical framework matrices (goal / outcome /
//! output / activity rows with indicators, verification means, and
//! assumptions) and exporting them to Word, CSV, or PNG.
//!
//! # Architecture
//!
//! - State lives in a [`document::LogframeDocument`], an event-publishing
//!   container owned by a [`workspace::Workspace`] for the session.
//! - Persistence mirrors the document into a [`store::KeyValueStore`]
//!   (autosave timer + explicit writes); it never owns data.
//! - The export pipeline renders point-in-time snapshots; it never
//!   mutates state.

pub mod autosave;
pub mod cli;
pub mod document;
pub mod error;
pub mod export;
pub mod i18n;
pub mod model;
pub mod settings;
pub mod store;
pub mod workspace;

pub use document::LogframeDocument;
pub use error::{LogframeError, Result};
pub use model::{LevelField, LevelType, LogframeLevel, PersistedSnapshot, ProjectInfo};
pub use settings::AppSettings;
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use workspace::Workspace;
