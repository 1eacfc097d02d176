//! QR code decoder using rqrr

use crate::error::{Error, Result};
use image::{DynamicImage, GrayImage};
use std::path::Path;

/// QR code decoder for text payloads
pub struct QrDecoder {}

impl QrDecoder {
    /// Create a new QR decoder with default settings
    pub fn new() -> Self {
        Self {}
    }

    /// Open an image file and decode the first QR code in it
    pub fn decode_file(&self, path: &Path) -> Result<String> {
        let img = image::open(path)?;
        self.decode(&img)
    }

    /// Decode a QR code from an image
    pub fn decode(&self, img: &DynamicImage) -> Result<String> {
        self.decode_gray(&img.to_luma8())
    }

    /// Decode a QR code from a grayscale image.
    ///
    /// Contents that are not valid UTF-8 are reported as a decode error.
    pub fn decode_gray(&self, img: &GrayImage) -> Result<String> {
        let mut prepared = rqrr::PreparedImage::prepare(img.clone());
        let grids = prepared.detect_grids();
        let grid = grids.first().ok_or(Error::NoQrCodeFound)?;

        let (meta, content) = grid
            .decode()
            .map_err(|e| Error::QrDecode(format!("{e:?}")))?;
        tracing::debug!(
            version = ?meta.version,
            ecc_level = ?meta.ecc_level,
            bytes = content.len(),
            grids = grids.len(),
            "Decoded QR symbol"
        );

        Ok(content)
    }
}

impl Default for QrDecoder {
    fn default() -> Self {
        Self::new()
    }
}
