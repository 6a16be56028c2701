//! Setup errors. Rendering itself never fails; cancellation is a status.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    #[error("failed to parse number '{input}': {reason}")]
    Parse { input: String, reason: String },

    #[error("canvas must be at least 1x1 pixels, got {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("plane bounds are degenerate: {0}")]
    DegenerateBounds(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("configuration JSON is malformed: {0}")]
    ConfigJson(String),

    #[error("unknown fractal type '{0}'")]
    UnknownFractal(String),

    #[error("unknown calculation mode '{0}'")]
    UnknownCalcMode(String),
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::ConfigJson(err.to_string())
    }
}
