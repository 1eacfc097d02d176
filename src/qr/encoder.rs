//! QR code encoder

use crate::config::{ErrorCorrection, QrOptions};
use crate::error::{Error, Result};
use image::{GrayImage, Luma, imageops};
use qrcode::bits::Bits;
use qrcode::{EcLevel, QrCode, Version};

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Largest image side, in pixels, the encoder will produce
pub const MAX_IMAGE_SIDE: u32 = 16384;

/// QR code encoder
#[derive(Debug, Clone)]
pub struct QrEncoder {
    ecc: ErrorCorrection,
    /// Pixels per module
    module_size: u32,
    /// Quiet zone width, in modules
    border: u32,
}

impl QrEncoder {
    /// Create an encoder with low error correction, 10px modules and a 4-module border
    pub fn new() -> Self {
        Self::from_options(&QrOptions::default())
    }

    /// Create an encoder from resolved QR options
    pub fn from_options(options: &QrOptions) -> Self {
        Self {
            ecc: options.ecc,
            module_size: options.module_size.max(1),
            border: options.border,
        }
    }

    /// Override the error correction level
    pub fn with_ecc_level(mut self, ecc: ErrorCorrection) -> Self {
        self.ecc = ecc;
        self
    }

    /// Encode bytes into a grayscale image.
    ///
    /// The smallest QR version that holds the data is chosen. Fails before
    /// rendering when the bordered image would exceed [`MAX_IMAGE_SIDE`].
    pub fn encode(&self, data: &[u8]) -> Result<GrayImage> {
        let code = self.build_code(data)?;
        let side = self.image_side(code.width())?;

        tracing::debug!(
            version = ?code.version(),
            modules = code.width(),
            side,
            bytes = data.len(),
            "Encoded QR symbol"
        );

        let symbol = code
            .render::<Luma<u8>>()
            .dark_color(DARK)
            .light_color(LIGHT)
            .quiet_zone(false)
            .module_dimensions(self.module_size, self.module_size)
            .build();

        // qrcode only knows a fixed 4-module quiet zone, so pad by hand.
        let pad = (side - symbol.width()) / 2;
        let mut canvas = GrayImage::from_pixel(side, side, LIGHT);
        imageops::overlay(&mut canvas, &symbol, i64::from(pad), i64::from(pad));

        Ok(canvas)
    }

    /// Encode a string into a QR code image
    pub fn encode_str(&self, data: &str) -> Result<GrayImage> {
        self.encode(data.as_bytes())
    }

    fn image_side(&self, modules: usize) -> Result<u32> {
        u32::try_from(modules)
            .ok()
            .and_then(|m| self.border.checked_mul(2)?.checked_add(m))
            .and_then(|m| m.checked_mul(self.module_size))
            .filter(|side| *side <= MAX_IMAGE_SIDE)
            .ok_or_else(|| {
                Error::QrEncode(format!(
                    "{modules} modules with a {}-module border at {} px per module exceed {MAX_IMAGE_SIDE} px",
                    self.border, self.module_size
                ))
            })
    }

    // Always a single byte-mode segment: the automatic segmenter may pick
    // Kanji mode for UTF-8 sequences, which scanners hand back re-encoded.
    fn build_code(&self, data: &[u8]) -> Result<QrCode> {
        let ec_level = EcLevel::from(self.ecc);
        for version in 1..=40 {
            let mut bits = Bits::new(Version::Normal(version));
            if bits.push_byte_data(data).is_ok() && bits.push_terminator(ec_level).is_ok() {
                return QrCode::with_bits(bits, ec_level)
                    .map_err(|e| Error::QrEncode(format!("Failed to create QR code: {e}")));
            }
        }
        Err(Error::QrEncode(format!(
            "{} bytes do not fit in any QR version at {:?} error correction",
            data.len(),
            self.ecc
        )))
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::QrDecoder;

    fn encoder(module_size: u32, border: u32) -> QrEncoder {
        QrEncoder::from_options(&QrOptions {
            module_size,
            border,
            ..QrOptions::default()
        })
    }

    #[test]
    fn image_size_follows_module_and_border() {
        let image = QrEncoder::new().encode_str("abc123").unwrap();

        // "abc123" fits version 1 (21 modules) at level L.
        let expected = (21 + 2 * 4) * 10;
        assert_eq!(image.width(), expected);
        assert_eq!(image.height(), expected);
    }

    #[test]
    fn border_is_white() {
        let image = QrEncoder::new().encode_str("abc123").unwrap();

        for i in 0..40 {
            assert_eq!(*image.get_pixel(i, i), LIGHT);
            assert_eq!(*image.get_pixel(image.width() - 1 - i, 0), LIGHT);
        }
        // top-left finder pattern starts right after the border
        assert_eq!(*image.get_pixel(40, 40), DARK);
    }

    #[test]
    fn custom_border_and_module_size() {
        let image = encoder(3, 1).encode_str("abc123").unwrap();
        assert_eq!(image.width(), (21 + 2) * 3);
    }

    #[test]
    fn overflowing_border_is_an_error() {
        let result = encoder(10, 500_000_000).encode_str("abc123");
        assert!(matches!(result, Err(Error::QrEncode(_))));

        let result = encoder(u32::MAX, 0).encode_str("abc123");
        assert!(matches!(result, Err(Error::QrEncode(_))));
    }

    #[test]
    fn image_side_is_capped() {
        // 21 + 2 * 4 = 29 modules; 564 px/module is just under the cap, 565 over it.
        assert_eq!(encoder(564, 4).image_side(21).unwrap(), 29 * 564);
        assert!(encoder(565, 4).image_side(21).is_err());
    }

    #[test]
    fn oversized_payload_fails() {
        let encoder = QrEncoder::new().with_ecc_level(ErrorCorrection::High);
        let result = encoder.encode(&[b'x'; 4000]);
        assert!(matches!(result, Err(Error::QrEncode(_))));
    }

    #[test]
    fn non_ascii_text_round_trips() {
        let original = "{\"geminiSystemPrompt\":\"日本語で答えて ✓\"}";
        let image = QrEncoder::new().encode_str(original).unwrap();
        let decoded = QrDecoder::new().decode_gray(&image).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn round_trip() {
        let original = "{\"geminiAPIKey\":\"AIzaSyExample\",\"openClawPort\":18789}";
        let image = QrEncoder::new().encode_str(original).unwrap();
        let decoded = QrDecoder::new().decode_gray(&image).unwrap();

        assert_eq!(decoded, original);
    }
}
