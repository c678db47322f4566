//! Serializing surface pixels to encoded image bytes.

use image::{ImageFormat, Rgb, RgbImage, RgbaImage};
use std::io::Cursor;

use crate::error::{ImageError, ImageResult};

/// MIME type used by exports that do not name one.
pub const DEFAULT_TYPE: &str = "image/jpeg";

/// Encoder quality used by exports that do not name one.
pub const DEFAULT_QUALITY: f32 = 0.6;

/// JPEG quality applied when the requested quality is outside [0, 1].
const FALLBACK_JPEG_QUALITY: f32 = 0.92;

/// Requested output encoding: a MIME type and a quality in [0, 1].
///
/// Quality only affects lossy formats (JPEG).
#[derive(Debug, Clone, PartialEq)]
pub struct Encoding {
    pub mime: String,
    pub quality: f32,
}

impl Default for Encoding {
    fn default() -> Self {
        Self::new(DEFAULT_TYPE, DEFAULT_QUALITY)
    }
}

impl Encoding {
    pub fn new(mime: impl Into<String>, quality: f32) -> Self {
        Self {
            mime: mime.into(),
            quality,
        }
    }

    /// Default quality, given MIME type.
    pub fn with_type(mime: impl Into<String>) -> Self {
        Self::new(mime, DEFAULT_QUALITY)
    }
}

/// Encoded bytes and the MIME type actually produced.
#[derive(Debug, Clone)]
pub struct Encoded {
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

/// Encode RGBA pixels in the requested format.
///
/// Unsupported MIME types fall back to PNG, the way a canvas does; the
/// returned [`Encoded::mime`] reports what was written.
pub fn encode_pixels(pixels: &RgbaImage, encoding: &Encoding) -> ImageResult<Encoded> {
    let requested = encoding.mime.to_ascii_lowercase();
    let (mime, result) = match requested.as_str() {
        "image/jpeg" => ("image/jpeg", encode_jpeg(pixels, encoding.quality)),
        "image/webp" => ("image/webp", encode_with_format(pixels, ImageFormat::WebP)),
        "image/png" => ("image/png", encode_with_format(pixels, ImageFormat::Png)),
        other => {
            tracing::warn!("Unsupported export type '{other}', falling back to image/png");
            ("image/png", encode_with_format(pixels, ImageFormat::Png))
        }
    };

    let bytes = result.map_err(|e| ImageError::Encode {
        mime: mime.to_string(),
        message: e.to_string(),
    })?;
    Ok(Encoded { mime, bytes })
}

/// Map a [0, 1] quality onto the JPEG encoder's 1..=100 scale.
fn jpeg_quality(quality: f32) -> u8 {
    let quality = if (0.0..=1.0).contains(&quality) {
        quality
    } else {
        FALLBACK_JPEG_QUALITY
    };
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

fn encode_jpeg(pixels: &RgbaImage, quality: f32) -> image::ImageResult<Vec<u8>> {
    // JPEG has no alpha channel; composite onto black.
    let flattened = RgbImage::from_fn(pixels.width(), pixels.height(), |x, y| {
        let [r, g, b, a] = pixels.get_pixel(x, y).0;
        let scale = |c: u8| ((c as u16 * a as u16) / 255) as u8;
        Rgb([scale(r), scale(g), scale(b)])
    });

    let mut buffer = Vec::new();
    let mut encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, jpeg_quality(quality));
    encoder.encode_image(&flattened)?;
    Ok(buffer)
}

fn encode_with_format(pixels: &RgbaImage, format: ImageFormat) -> image::ImageResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    pixels.write_to(&mut buffer, format)?;
    Ok(buffer.into_inner())
}
