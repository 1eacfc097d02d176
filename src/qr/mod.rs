//! QR code encoding and decoding
//!
//! The encoder renders payload bytes into grayscale PNG images with a fixed
//! module size and border; the decoder reads them back, both to verify freshly
//! rendered images and to inspect images produced elsewhere.

mod decoder;
mod encoder;

pub use decoder::QrDecoder;
pub use encoder::{MAX_IMAGE_SIDE, QrEncoder};
