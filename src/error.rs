//! Error types for VisionClaw QR generation

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for configuration building and QR processing
#[derive(Error, Debug)]
pub enum Error {
    /// A required answer or flag value was empty
    #[error("{0} is required.")]
    MissingInput(String),

    /// An answer was present but could not be interpreted
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration JSON file does not exist
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Configuration JSON file could not be parsed
    #[error("Invalid JSON in {}", path.display())]
    InvalidJson {
        /// File that failed to parse
        path: PathBuf,
        /// Underlying parser error
        source: serde_json::Error,
    },

    /// QR code encoding failed
    #[error("Failed to encode QR code: {0}")]
    QrEncode(String),

    /// QR code decoding failed
    #[error("Failed to decode QR code: {0}")]
    QrDecode(String),

    /// No QR code found in image
    #[error("No QR code found in image")]
    NoQrCodeFound,

    /// Written image did not decode back to the original payload
    #[error("QR verification failed: {0}")]
    Verify(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Payload serialization error
    #[error("JSON error: {0}")]
    Serialize(String),

    /// Tool settings error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialize(e.to_string())
    }
}
