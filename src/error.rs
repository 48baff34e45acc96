//! Error types for the captcha generator

use thiserror::Error;

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating a challenge
#[derive(Error, Debug)]
pub enum Error {
    /// A caller-supplied parameter is outside its supported range, or an
    /// unrecognized return mode was requested
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The drawing surface or the encoded output could not be produced
    #[error("Rendering failed: {0}")]
    RenderError(String),
}
