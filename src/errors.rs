/*!
 * Error types for the bechdelscript application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 *
 * Structural parsing never fails: ambiguity is reported through the script's
 * coherence flag instead of an error variant.
 */

use thiserror::Error;

/// Errors raised while validating or loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Policy flags that cannot be combined
    #[error("Conflicting Bechdel rules: {0}")]
    ConflictingRules(String),

    /// A numeric threshold outside its allowed range
    #[error("Invalid threshold `{name}`: {value} (expected {expected})")]
    InvalidThreshold {
        /// Name of the config field
        name: String,
        /// Offending value
        value: f64,
        /// Human readable range
        expected: String,
    },

    /// A keyword set that must not be empty
    #[error("Keyword set `{0}` must not be empty")]
    EmptyKeywordSet(String),

    /// A word list or lexicon file that could not be read or parsed
    #[error("Failed to load resource {path}: {message}")]
    Resource {
        /// Path of the resource
        path: String,
        /// Underlying cause
        message: String,
    },
}

/// Errors related to gender labels
#[derive(Error, Debug, PartialEq)]
pub enum GenderError {
    /// Label is not one of m, f, nb
    #[error("Unknown gender label: {0}")]
    UnknownLabel(String),

    /// Malformed `NAME=gender` override
    #[error("Invalid gender override `{0}`, expected NAME=gender")]
    InvalidOverride(String),
}

/// Errors raised by the script aggregate accessors
#[derive(Error, Debug, PartialEq)]
pub enum ScriptError {
    /// Scene index past the end of the scene list
    #[error("Scene {index} out of range (script has {count} scenes)")]
    SceneOutOfRange {
        /// Requested index
        index: usize,
        /// Number of scenes
        count: usize,
    },

    /// Scoring requested before the structure was parsed
    #[error("Script structure not loaded, call load_format first")]
    NotLoaded,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Error from gender handling
    #[error("Gender error: {0}")]
    Gender(#[from] GenderError),

    /// Error from the script aggregate
    #[error("Script error: {0}")]
    Script(#[from] ScriptError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
