//! Serializable summaries produced by the library.

use serde::{Deserialize, Serialize};

use crate::pipeline::{FileHandle, LoadedImage};

/// A summary of a loaded image file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// File name
    pub name: String,

    /// MIME type sniffed from the file content
    pub mime: String,

    /// Natural width in pixels
    pub width: u32,

    /// Natural height in pixels
    pub height: u32,

    /// File size in bytes
    pub file_size: u64,
}

impl ImageInfo {
    /// Summarize `file` as loaded into `loaded`.
    pub fn new(file: &FileHandle, loaded: &LoadedImage) -> Self {
        Self {
            name: file.name().to_string(),
            mime: file.mime().to_string(),
            width: loaded.image.width(),
            height: loaded.image.height(),
            file_size: file.len() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ImageHandle;
    use image::RgbaImage;

    #[test]
    fn test_image_info_serializes() {
        let file = FileHandle::new("a.png", "image/png", vec![0; 42]);
        let loaded = LoadedImage {
            image: ImageHandle::new(RgbaImage::new(3, 2)),
            url: "data:image/png;base64,".to_string(),
        };
        let info = ImageInfo::new(&file, &loaded);
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["name"], "a.png");
        assert_eq!(json["width"], 3);
        assert_eq!(json["file_size"], 42);
    }
}
