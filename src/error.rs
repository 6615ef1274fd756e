//! Error types for logframe operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for logframe operations.
pub type Result<T> = std::result::Result<T, LogframeError>;

/// Errors that can occur while building, persisting, or exporting a logframe.
#[derive(Error, Debug)]
pub enum LogframeError {
    // Storage Errors
    #[error("Failed to read stored entry '{key}': {source}")]
    StorageRead {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write stored entry '{key}': {source}")]
    StorageWrite {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory creation failed: {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Export Errors
    #[error("Nothing to export: the logframe has no levels")]
    NothingToExport,

    #[error("Render target not found: {target}")]
    RenderTargetNotFound { target: String },

    #[error("Render produced an empty raster for target '{target}'")]
    EmptyRaster { target: String },

    #[error("Render failed: {reason}")]
    RenderFailed { reason: String },

    #[error("PNG encoding error: {0}")]
    ImageEncode(#[from] image::ImageError),

    // Language Errors
    #[error("Unsupported language code: {code}")]
    UnsupportedLanguage { code: String },

    // Serialization Errors
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // I/O Errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LogframeError {
    /// Returns true when the error is an unmet export precondition that
    /// should be shown to the user as-is, rather than a fault in the tool.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            LogframeError::NothingToExport
                | LogframeError::RenderTargetNotFound { .. }
                | LogframeError::EmptyRaster { .. }
                | LogframeError::UnsupportedLanguage { .. }
        )
    }

    /// Returns a short suggestion the CLI can print alongside the error.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            LogframeError::NothingToExport => {
                Some("Add at least one goal, outcome, output, or activity first.")
            }
            LogframeError::RenderTargetNotFound { .. } => {
                Some("The matrix view is not available to the render backend.")
            }
            LogframeError::EmptyRaster { .. } => {
                Some("The rendered matrix had zero size; nothing was written.")
            }
            LogframeError::UnsupportedLanguage { .. } => Some("Supported languages: en, nl."),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_precondition_errors_are_user_facing() {
        assert!(LogframeError::NothingToExport.is_user_facing());
        assert!(LogframeError::RenderTargetNotFound {
            target: "logframe-matrix".to_string()
        }
        .is_user_facing());
        let io = LogframeError::Io(std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert!(!io.is_user_facing());
    }

    #[test]
    fn suggestions_exist_for_export_guards() {
        assert!(LogframeError::NothingToExport.suggestion().is_some());
        assert!(LogframeError::EmptyRaster {
            target: "logframe-matrix".to_string()
        }
        .suggestion()
        .is_some());
    }
}
