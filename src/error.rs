//! Error types for certificate rendering

use thiserror::Error;

/// Result type alias for render operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while producing a certificate image
#[derive(Error, Debug)]
pub enum Error {
    /// A required request field is missing or blank
    #[error("missing required field: {0}")]
    Validation(String),

    /// The background template could not be read or decoded
    #[error("certificate template unavailable: {0}")]
    TemplateMissing(String),

    /// A font asset could not be read or registered
    #[error("font asset failed to load: {0}")]
    FontLoad(String),

    /// The overlay could not be parsed, rendered, or encoded
    #[error("rendering failed: {0}")]
    Render(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}
