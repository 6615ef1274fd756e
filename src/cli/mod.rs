//! CLI Module
//!
//! Command-line interface for the logframe generator.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::i18n::Language;
use crate::model::{LevelField, LevelType};

/// Logframe Generator - build and export logical framework matrices
#[derive(Parser, Debug)]
#[command(name = "logframe")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Workspace directory holding the autosaved state
    #[arg(short, long, global = true, default_value = ".logframe")]
    pub dir: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set project metadata fields
    #[command(name = "set-info")]
    SetInfo {
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        organization: Option<String>,

        #[arg(long)]
        donor: Option<String>,

        #[arg(long)]
        duration: Option<String>,
    },

    /// Add a new level to the matrix
    #[command(name = "add")]
    Add {
        /// Level category
        #[arg(value_enum)]
        level_type: LevelTypeArg,
    },

    /// Remove a level by id (asks for confirmation)
    #[command(name = "remove")]
    Remove {
        /// Level id, e.g. level-3
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Update one field of a level
    #[command(name = "update")]
    Update {
        /// Level id, e.g. level-3
        id: String,

        /// Field to replace
        #[arg(value_enum)]
        field: LevelFieldArg,

        /// New value
        value: String,
    },

    /// Print the current state as JSON
    #[command(name = "show")]
    Show,

    /// Export the matrix to a downloadable artifact
    #[command(name = "export")]
    Export {
        /// Output format
        #[arg(value_enum)]
        format: ExportFormat,

        /// Output directory (defaults to <dir>/exports)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Switch the interface language and persist the preference
    #[command(name = "lang")]
    Lang {
        /// Language code
        #[arg(value_enum)]
        code: LanguageArg,
    },

    /// Delete the autosaved state (asks for confirmation)
    #[command(name = "clear")]
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LevelTypeArg {
    Goal,
    Outcome,
    Output,
    Activity,
}

impl From<LevelTypeArg> for LevelType {
    fn from(arg: LevelTypeArg) -> Self {
        match arg {
            LevelTypeArg::Goal => LevelType::Goal,
            LevelTypeArg::Outcome => LevelType::Outcome,
            LevelTypeArg::Output => LevelType::Output,
            LevelTypeArg::Activity => LevelType::Activity,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LevelFieldArg {
    Description,
    Indicators,
    Verification,
    Assumptions,
}

impl From<LevelFieldArg> for LevelField {
    fn from(arg: LevelFieldArg) -> Self {
        match arg {
            LevelFieldArg::Description => LevelField::Description,
            LevelFieldArg::Indicators => LevelField::Indicators,
            LevelFieldArg::Verification => LevelField::Verification,
            LevelFieldArg::Assumptions => LevelField::Assumptions,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ExportFormat {
    Word,
    Csv,
    Png,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LanguageArg {
    En,
    Nl,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::En => Language::En,
            LanguageArg::Nl => Language::Nl,
        }
    }
}
