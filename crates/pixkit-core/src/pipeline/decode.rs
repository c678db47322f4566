//! Image decoding: turning data URLs into pixel handles.

use async_trait::async_trait;
use image::{DynamicImage, RgbaImage};
use std::fmt;
use std::sync::Arc;

use crate::config::LimitsConfig;
use crate::error::{ImageError, ImageResult};

use super::data_url::data_url_to_blob;

/// A decoded image: shared RGBA pixels with their natural dimensions.
///
/// Cloning is cheap; clones share the same pixel buffer.
#[derive(Clone, PartialEq)]
pub struct ImageHandle {
    pixels: Arc<RgbaImage>,
}

impl ImageHandle {
    /// Wrap an RGBA buffer.
    pub fn new(pixels: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
        }
    }

    /// Convert any decoded image into a handle.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self::new(image.into_rgba8())
    }

    /// Natural width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Natural height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Borrow the underlying pixels.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHandle")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Host capability that loads pixel data from a data URL.
#[async_trait]
pub trait ImageDecoder: Send + Sync {
    /// Decode the image carried by `data_url`.
    async fn decode(&self, data_url: &str) -> ImageResult<ImageHandle>;
}

/// Decoder backed by the `image` crate, with a dimension limit.
#[derive(Debug, Clone)]
pub struct RasterDecoder {
    max_dimension: u32,
}

impl Default for RasterDecoder {
    fn default() -> Self {
        Self::new(&LimitsConfig::default())
    }
}

impl RasterDecoder {
    /// Create a decoder with the given limits.
    pub fn new(limits: &LimitsConfig) -> Self {
        Self {
            max_dimension: limits.max_image_dimension,
        }
    }
}

#[async_trait]
impl ImageDecoder for RasterDecoder {
    async fn decode(&self, data_url: &str) -> ImageResult<ImageHandle> {
        let bytes = payload_bytes(data_url)?;

        let handle = tokio::task::spawn_blocking(move || decode_bytes(&bytes))
            .await
            .map_err(|e| ImageError::Decode(format!("Task join error: {}", e)))??;

        let (width, height) = handle.dimensions();
        if width > self.max_dimension || height > self.max_dimension {
            return Err(ImageError::ImageTooLarge {
                width,
                height,
                max_dim: self.max_dimension,
            });
        }

        tracing::debug!("Decoded {}x{} image", width, height);
        Ok(handle)
    }
}

/// Decode a data URL synchronously, without limits.
pub fn decode_data_url(data_url: &str) -> ImageResult<ImageHandle> {
    let bytes = payload_bytes(data_url)?;
    decode_bytes(&bytes)
}

/// Decode encoded image bytes (PNG, JPEG, WebP, ...) into a handle.
pub fn decode_bytes(bytes: &[u8]) -> ImageResult<ImageHandle> {
    image::load_from_memory(bytes)
        .map(ImageHandle::from_dynamic)
        .map_err(|e| ImageError::Decode(e.to_string()))
}

fn payload_bytes(data_url: &str) -> ImageResult<Vec<u8>> {
    data_url_to_blob(data_url)
        .and_then(|payload| payload.bytes)
        .ok_or_else(|| ImageError::Decode("data URL carries no image bytes".to_string()))
}
