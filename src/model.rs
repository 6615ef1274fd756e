//! Logframe data model.
//!
//! Defines the matrix rows, project metadata, and the persisted snapshot
//! wire format. The JSON field names match the autosave documents written
//! by earlier versions of the tool, so existing stored state keeps loading.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Prefix for level ids. Ids take the form `level-N`.
pub const LEVEL_ID_PREFIX: &str = "level-";

/// Project metadata captured by the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub organization: String,

    #[serde(default)]
    pub donor: String,

    #[serde(default)]
    pub duration: String,
}

/// Category of a logframe row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelType {
    Goal,
    Outcome,
    Output,
    Activity,
}

impl LevelType {
    /// All level types in matrix order.
    pub const ALL: [LevelType; 4] = [
        LevelType::Goal,
        LevelType::Outcome,
        LevelType::Output,
        LevelType::Activity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LevelType::Goal => "goal",
            LevelType::Outcome => "outcome",
            LevelType::Output => "output",
            LevelType::Activity => "activity",
        }
    }
}

impl fmt::Display for LevelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LevelType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "goal" => Ok(LevelType::Goal),
            "outcome" => Ok(LevelType::Outcome),
            "output" => Ok(LevelType::Output),
            "activity" => Ok(LevelType::Activity),
            other => Err(format!("unknown level type: {}", other)),
        }
    }
}

/// One row of the logframe matrix.
///
/// `id` is unique within a session and never renumbered; `level_type` is
/// fixed at creation (no mutator exists for it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogframeLevel {
    pub id: String,

    #[serde(rename = "type")]
    pub level_type: LevelType,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub indicators: String,

    #[serde(default)]
    pub verification: String,

    #[serde(default)]
    pub assumptions: String,
}

impl LogframeLevel {
    /// Create an empty row with the given id and category.
    pub fn new(id: String, level_type: LevelType) -> Self {
        Self {
            id,
            level_type,
            description: String::new(),
            indicators: String::new(),
            verification: String::new(),
            assumptions: String::new(),
        }
    }

    /// Numeric suffix of the id, or 0 when the id does not follow the
    /// `level-N` format.
    pub fn id_number(&self) -> u64 {
        parse_level_number(&self.id).unwrap_or(0)
    }
}

/// Parse the numeric suffix of a `level-N` id.
pub fn parse_level_number(id: &str) -> Option<u64> {
    id.strip_prefix(LEVEL_ID_PREFIX)?.parse().ok()
}

/// Free-text field of a row that can be edited after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelField {
    Description,
    Indicators,
    Verification,
    Assumptions,
}

impl FromStr for LevelField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "description" => Ok(LevelField::Description),
            "indicators" => Ok(LevelField::Indicators),
            "verification" => Ok(LevelField::Verification),
            "assumptions" => Ok(LevelField::Assumptions),
            other => Err(format!("unknown level field: {}", other)),
        }
    }
}

/// The serialized form written to the store under the autosave key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSnapshot {
    #[serde(rename = "projectInfo", default)]
    pub project_info: ProjectInfo,

    #[serde(default)]
    pub logframe: Vec<LogframeLevel>,
}

impl PersistedSnapshot {
    pub fn is_empty(&self) -> bool {
        self.logframe.is_empty()
    }
}
