//! Image codec for banter.
//!
//! Converts an arbitrary image file into a bounded-size, text-safe encoding
//! suitable for transmission as a plain string: the source is validated,
//! proportionally downscaled to fit the given bounds, re-encoded as JPEG at
//! a lossy quality factor, and wrapped as a base64 `data:` URL.
//!
//! All functions are pure and synchronous; callers decide where the work
//! runs. The engine runs [`compress`] on a blocking worker so the event loop
//! never stalls.

#![forbid(unsafe_code)]

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{codecs::jpeg::JpegEncoder, imageops::FilterType};
use thiserror::Error;

/// Maximum accepted raw input size: 100 MiB.
pub const MAX_SOURCE_BYTES: usize = 100 * 1024 * 1024;

/// Default width bound for [`compress`].
pub const DEFAULT_MAX_WIDTH: u32 = 10_000;

/// Default height bound for [`compress`].
pub const DEFAULT_MAX_HEIGHT: u32 = 10_000;

/// Default JPEG quality factor (0-100).
pub const DEFAULT_QUALITY: u8 = 80;

/// Data-URL prefix produced by [`compress`].
const DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// An image file as selected by the user, before any decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    /// Original file name, for diagnostics only.
    pub filename: String,
    /// Declared media type (e.g. `image/png`).
    pub media_type: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl ImageSource {
    /// Validate the declared type and raw size without touching the pixel
    /// data.
    ///
    /// This is the synchronous gate that runs before any encoding work is
    /// started: a rejected source never enters the busy state.
    pub fn precheck(&self) -> Result<(), CodecError> {
        if !self.media_type.starts_with("image/") {
            return Err(CodecError::NotAnImage { media_type: self.media_type.clone() });
        }
        if self.bytes.len() > MAX_SOURCE_BYTES {
            return Err(CodecError::TooLarge { size: self.bytes.len(), max: MAX_SOURCE_BYTES });
        }
        Ok(())
    }
}

/// Errors from image validation, decoding, or encoding.
///
/// Variants carry string reasons so the type stays `Clone`/`PartialEq` when
/// embedded in engine events.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Declared media type is not an image kind.
    #[error("not an image: {media_type}")]
    NotAnImage {
        /// The declared media type.
        media_type: String,
    },

    /// Raw input exceeds [`MAX_SOURCE_BYTES`].
    #[error("image too large: {size} bytes (max {max})")]
    TooLarge {
        /// Raw input size in bytes.
        size: usize,
        /// The enforced bound.
        max: usize,
    },

    /// Pixel data could not be decoded.
    #[error("image decode failed: {reason}")]
    Decode {
        /// Decoder failure description.
        reason: String,
    },

    /// Re-encoding failed.
    #[error("image encode failed: {reason}")]
    Encode {
        /// Encoder failure description.
        reason: String,
    },

    /// A rendered payload is not a well-formed image data URL.
    #[error("malformed image data URL")]
    InvalidDataUrl,
}

/// Compute target dimensions by proportional downscaling.
///
/// The width bound is applied first; the height bound is then applied to the
/// possibly already-scaled dimensions. The two passes are sequential, never
/// solved simultaneously; peers re-encode the same way, so output parity
/// depends on this exact order. Results are rounded to the nearest pixel.
pub fn scaled_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let mut w = f64::from(width);
    let mut h = f64::from(height);

    if w > f64::from(max_width) {
        h = h * f64::from(max_width) / w;
        w = f64::from(max_width);
    }
    if h > f64::from(max_height) {
        w = w * f64::from(max_height) / h;
        h = f64::from(max_height);
    }

    // A dimension can round to zero for extreme aspect ratios; the resize
    // backend requires at least one pixel per axis.
    ((w.round() as u32).max(1), (h.round() as u32).max(1))
}

/// Compress an image source into a data-URL string.
///
/// Validates the source, decodes it, downscales per [`scaled_dimensions`],
/// re-encodes as JPEG at `quality` (0-100), and returns a
/// `data:image/jpeg;base64,…` string.
pub fn compress(
    source: &ImageSource,
    max_width: u32,
    max_height: u32,
    quality: u8,
) -> Result<String, CodecError> {
    source.precheck()?;

    let decoded = image::load_from_memory(&source.bytes)
        .map_err(|e| CodecError::Decode { reason: e.to_string() })?;

    let (width, height) = (decoded.width(), decoded.height());
    let (target_w, target_h) = scaled_dimensions(width, height, max_width, max_height);

    let resized = if (target_w, target_h) == (width, height) {
        decoded
    } else {
        decoded.resize_exact(target_w, target_h, FilterType::Triangle)
    };

    // JPEG carries no alpha channel; flatten before encoding.
    let rgb = resized.to_rgb8();
    let mut jpeg = Vec::new();
    rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut jpeg, quality))
        .map_err(|e| CodecError::Encode { reason: e.to_string() })?;

    Ok(format!("{DATA_URL_PREFIX}{}", STANDARD.encode(&jpeg)))
}

/// Metadata of a rendered inline image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    /// Media type from the data URL.
    pub media_type: String,
    /// Decoded pixel width.
    pub width: u32,
    /// Decoded pixel height.
    pub height: u32,
}

/// Decode a received image payload into its display metadata.
///
/// Renderers call this asynchronously to learn the inline dimensions; its
/// completion (success or failure) drives the second phase of the
/// scroll-to-latest guarantee.
pub fn decode_data_url(url: &str) -> Result<InlineImage, CodecError> {
    let rest = url.strip_prefix("data:").ok_or(CodecError::InvalidDataUrl)?;
    let (media_type, b64) = rest.split_once(";base64,").ok_or(CodecError::InvalidDataUrl)?;
    if !media_type.starts_with("image/") {
        return Err(CodecError::NotAnImage { media_type: media_type.to_string() });
    }

    let bytes = STANDARD.decode(b64).map_err(|e| CodecError::Decode { reason: e.to_string() })?;
    let decoded =
        image::load_from_memory(&bytes).map_err(|e| CodecError::Decode { reason: e.to_string() })?;

    Ok(InlineImage { media_type: media_type.to_string(), width: decoded.width(), height: decoded.height() })
}
