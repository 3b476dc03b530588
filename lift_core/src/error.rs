//! Error types for the lift_core library.
//!
//! Only configuration and data defects are errors. Missing history, missing
//! equipment matches and short candidate pools are ordinary outcomes and are
//! modelled with `Option`s and enums in the modules that produce them.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for lift_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// Split name outside the known vocabulary
    #[error("Unknown split: {0}")]
    UnknownSplit(String),

    /// Goal without a phase/modality mapping
    #[error("Unknown goal: {0}")]
    UnknownGoal(String),

    /// Exercise name not present in the catalog
    #[error("Exercise not found in catalog: {0}")]
    UnknownExercise(String),

    /// Equipment requirement that cannot be parsed
    #[error("Malformed equipment requirement: {0}")]
    MalformedEquipment(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
