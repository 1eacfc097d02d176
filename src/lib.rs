//! visionclaw-qr - QR codes that carry VisionClaw app configuration
//!
//! The VisionClaw iOS and Android apps can import their settings (Gemini API
//! key, OpenClaw gateway, WebRTC signaling server) by scanning a QR code.
//! This crate builds that configuration and renders it as a PNG.
//!
//! # Features
//!
//! - **Config building**: interactive prompts, a bare API key, or an existing JSON file
//! - **QR rendering**: low error correction, fixed module size and border, smallest fitting version
//! - **Verification**: every image is decoded again before it is written
//! - **Inspection**: report what the apps would import from an existing image
//!
//! # Example
//!
//! ```no_run
//! use visionclaw_qr::{Configuration, Payload, QrGenerator};
//!
//! fn main() -> visionclaw_qr::Result<()> {
//!     let config = Configuration::new("AIzaSyExample").with_openclaw("http://192.168.1.100", None);
//!     let payload = Payload::from_configuration(&config)?;
//!
//!     QrGenerator::default().generate(&payload, "visionclaw_config.png".as_ref())?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod builder;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod qr;
pub mod visionclaw;

// Re-exports for convenience
pub use error::{Error, Result};

pub use builder::{InteractiveOutcome, InteractiveSession, Payload};
pub use config::{ErrorCorrection, GeneratorSettings, LoggingOptions, QrOptions};
pub use qr::{QrDecoder, QrEncoder};
pub use visionclaw::{Configuration, DEFAULT_OPENCLAW_PORT, ImportedConfig, interpret_scanned};

use std::path::{Path, PathBuf};

/// High-level interface combining encoding, verification and file output
pub struct QrGenerator {
    encoder: QrEncoder,
    decoder: QrDecoder,
    verify: bool,
}

/// Details about an image written by [`QrGenerator::generate`]
#[derive(Debug, Clone)]
pub struct GeneratedQr {
    /// Where the PNG was written
    pub path: PathBuf,
    /// Image width and height in pixels
    pub size: u32,
    /// Payload length in bytes
    pub payload_bytes: usize,
}

impl QrGenerator {
    /// Create a generator from resolved QR options
    pub fn new(options: &QrOptions) -> Self {
        Self {
            encoder: QrEncoder::from_options(options),
            decoder: QrDecoder::new(),
            verify: options.verify,
        }
    }

    /// Encode `payload` and write it to `path` as a PNG.
    ///
    /// With verification enabled the rendered image is decoded first and
    /// nothing is written unless it reproduces the payload byte-for-byte.
    pub fn generate(&self, payload: &Payload, path: &Path) -> Result<GeneratedQr> {
        let image = self.encoder.encode(payload.as_bytes())?;

        if self.verify {
            let decoded = self.decoder.decode_gray(&image)?;
            if decoded != payload.as_str() {
                return Err(Error::Verify(format!(
                    "decoded {} bytes, expected {}",
                    decoded.len(),
                    payload.as_bytes().len()
                )));
            }
            tracing::debug!("Rendered QR decodes to the original payload");
        }

        image.save_with_format(path, image::ImageFormat::Png)?;
        tracing::info!(path = %path.display(), size = image.width(), "Wrote QR image");

        Ok(GeneratedQr {
            path: path.to_path_buf(),
            size: image.width(),
            payload_bytes: payload.as_bytes().len(),
        })
    }

    /// Decode an existing image and interpret it the way the apps would
    pub fn inspect(&self, path: &Path) -> Result<ImportedConfig> {
        let text = self.decoder.decode_file(path)?;
        Ok(interpret_scanned(&text))
    }
}

impl Default for QrGenerator {
    fn default() -> Self {
        Self::new(&QrOptions::default())
    }
}
