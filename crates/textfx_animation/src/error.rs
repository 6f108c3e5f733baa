//! Curve parsing errors

use thiserror::Error;

/// Errors raised while resolving a named curve
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveParseError {
    #[error("Unknown curve: {0}")]
    UnknownCurve(String),

    #[error("Unknown spring preset: {0}")]
    UnknownSpringPreset(String),

    #[error("Invalid cubic-bezier parameters: {0}")]
    InvalidBezier(String),

    #[error("Invalid spring parameters: {0}")]
    InvalidSpring(String),
}

pub type Result<T> = std::result::Result<T, CurveParseError>;
