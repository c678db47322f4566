//! In-memory named files: the input of image loading and the output of
//! surface exports.

use std::path::Path;

use crate::config::LimitsConfig;
use crate::error::{ImageError, ImageResult};

/// MIME type used when the content of a file is not a recognizable image.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// A named blob of bytes tagged with a MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    name: String,
    mime: String,
    bytes: Vec<u8>,
}

impl FileHandle {
    /// Create a file from its parts.
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file from disk, checking it against the configured limits.
    ///
    /// The MIME type is sniffed from the content, not the extension.
    pub async fn open(path: &Path, limits: &LimitsConfig) -> ImageResult<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        let metadata = match tokio::fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ImageError::FileNotFound(path.to_path_buf()));
            }
            Err(e) => {
                return Err(ImageError::Read {
                    name,
                    message: format!("Cannot read metadata: {}", e),
                });
            }
        };

        let max_bytes = limits.max_file_size_mb * 1024 * 1024;
        if metadata.len() > max_bytes {
            return Err(ImageError::FileTooLarge {
                path: path.to_path_buf(),
                size_mb: metadata.len() / (1024 * 1024),
                max_mb: limits.max_file_size_mb,
            });
        }

        let bytes = tokio::fs::read(path).await.map_err(|e| ImageError::Read {
            name: name.clone(),
            message: e.to_string(),
        })?;
        let mime = sniff_mime(&bytes);
        tracing::debug!("Opened {} ({} bytes, {})", name, bytes.len(), mime);

        Ok(Self::new(name, mime, bytes))
    }

    /// Write the file's bytes to disk.
    pub async fn write_to(&self, path: &Path) -> std::io::Result<()> {
        tokio::fs::write(path, &self.bytes).await
    }

    /// File name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// MIME type.
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// File contents.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Guess a MIME type from image magic bytes.
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or(OCTET_STREAM)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat};
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::new_rgba8(4, 4)
            .write_to(&mut buffer, ImageFormat::Png)
            .unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_sniff_mime() {
        assert_eq!(sniff_mime(&png_bytes()), "image/png");
        assert_eq!(sniff_mime(b"plain text"), OCTET_STREAM);
    }

    #[tokio::test]
    async fn test_open_detects_content_type() {
        // A PNG behind a .jpg extension is still reported as PNG.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("misnamed.jpg");
        std::fs::write(&path, png_bytes()).unwrap();

        let file = FileHandle::open(&path, &LimitsConfig::default()).await.unwrap();
        assert_eq!(file.name(), "misnamed.jpg");
        assert_eq!(file.mime(), "image/png");
        assert!(!file.is_empty());
    }

    #[tokio::test]
    async fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.png");
        let err = FileHandle::open(&path, &LimitsConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ImageError::FileNotFound(_)));
    }

    #[tokio::test]
    async fn test_write_to_round_trips_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        let file = FileHandle::new("out.bin", OCTET_STREAM, vec![1, 2, 3]);
        file.write_to(&path).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
    }
}
