//! Loading files into decoded images.
//!
//! Loading crosses two asynchronous boundaries in order: the file is read
//! into a data URL, then the data URL is decoded into pixels. Both steps are
//! host capabilities behind traits so they can be swapped in tests.

use async_trait::async_trait;

use crate::config::LimitsConfig;
use crate::error::{ImageError, ImageResult};

use super::data_url::encode_data_url;
use super::decode::{ImageDecoder, ImageHandle, RasterDecoder};
use super::file::FileHandle;

/// Host capability that reads a file into a base64 data URL.
#[async_trait]
pub trait FileReader: Send + Sync {
    /// Read `file` as a data URL.
    async fn read_as_data_url(&self, file: &FileHandle) -> ImageResult<String>;
}

/// Reader that encodes the file's in-memory bytes with its own MIME type.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUrlReader;

#[async_trait]
impl FileReader for DataUrlReader {
    async fn read_as_data_url(&self, file: &FileHandle) -> ImageResult<String> {
        Ok(encode_data_url(file.mime(), file.bytes()))
    }
}

/// A decoded image together with the data URL it was decoded from.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub image: ImageHandle,
    pub url: String,
}

/// Read `file` with `reader` and decode the result with `decoder`.
///
/// Resolves once both steps succeed. A read that yields an empty string or
/// something other than a data URL is rejected as [`ImageError::EmptyRead`].
pub async fn file_to_image(
    file: &FileHandle,
    reader: &dyn FileReader,
    decoder: &dyn ImageDecoder,
) -> ImageResult<LoadedImage> {
    let url = reader.read_as_data_url(file).await?;
    if url.is_empty() || !url.starts_with("data:") {
        return Err(ImageError::EmptyRead {
            name: file.name().to_string(),
        });
    }

    let image = decoder.decode(&url).await?;
    tracing::debug!(
        "Loaded {} as {}x{} image",
        file.name(),
        image.width(),
        image.height()
    );

    Ok(LoadedImage { image, url })
}

/// A file reader and image decoder bundled together.
pub struct ImageLoader {
    reader: Box<dyn FileReader>,
    decoder: Box<dyn ImageDecoder>,
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new(&LimitsConfig::default())
    }
}

impl ImageLoader {
    /// Create a loader from the default reader and a limit-aware decoder.
    pub fn new(limits: &LimitsConfig) -> Self {
        Self::with_capabilities(Box::new(DataUrlReader), Box::new(RasterDecoder::new(limits)))
    }

    /// Create a loader from caller-supplied capabilities.
    pub fn with_capabilities(reader: Box<dyn FileReader>, decoder: Box<dyn ImageDecoder>) -> Self {
        Self { reader, decoder }
    }

    /// Load `file` into a decoded image.
    pub async fn load(&self, file: &FileHandle) -> ImageResult<LoadedImage> {
        file_to_image(file, self.reader.as_ref(), self.decoder.as_ref()).await
    }
}
