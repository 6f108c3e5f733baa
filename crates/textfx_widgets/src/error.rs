//! Option loading errors

use thiserror::Error;

/// Errors raised while loading TextFX options from text
#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("Failed to parse TOML options: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON options: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to serialize options: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Unknown leg completion gate: {0}")]
    UnknownGate(String),
}

pub type Result<T> = std::result::Result<T, OptionsError>;
