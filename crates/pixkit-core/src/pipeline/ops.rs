//! Composable drawing operations.
//!
//! Each operation is a value closing over its parameters; the constructor
//! functions in this module mirror the primitive set (clear, draw, resize,
//! export). Operations are applied in order by
//! [`ImageHandleContext::handle_image`](super::context::ImageHandleContext::handle_image).

use crate::error::ImageResult;

use super::data_url::{data_url_to_blob, DecodedPayload};
use super::decode::ImageHandle;
use super::encode::Encoding;
use super::file::FileHandle;
use super::surface::DrawingSurface;

/// A single unit of work against a drawing surface.
#[derive(Debug, Clone)]
pub enum DrawOperation {
    /// Clear a rectangle; absent sizes resolve to the surface's extent when applied
    Clear {
        width: Option<u32>,
        height: Option<u32>,
        x: i64,
        y: i64,
    },
    /// Draw an image; absent sizes resolve to the image's natural size
    DrawImage {
        image: ImageHandle,
        x: i64,
        y: i64,
        width: Option<u32>,
        height: Option<u32>,
    },
    /// Resize the surface, discarding its contents
    SetWidthHeight { width: u32, height: u32 },
    /// Serialize and decode back into an image
    ToImage(Encoding),
    /// Serialize into a named file
    ToFile { name: String, encoding: Encoding },
    /// Serialize into a data URL
    ToDataUrl(Encoding),
    /// Serialize and parse into a [`DecodedPayload`]
    ToBlobResult(Encoding),
}

/// A value produced by an operation.
#[derive(Debug, Clone)]
pub enum OperationOutput {
    Image(ImageHandle),
    File(FileHandle),
    DataUrl(String),
    Payload(DecodedPayload),
}

impl OperationOutput {
    pub fn as_image(&self) -> Option<&ImageHandle> {
        match self {
            Self::Image(image) => Some(image),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileHandle> {
        match self {
            Self::File(file) => Some(file),
            _ => None,
        }
    }

    pub fn as_data_url(&self) -> Option<&str> {
        match self {
            Self::DataUrl(url) => Some(url),
            _ => None,
        }
    }

    pub fn as_payload(&self) -> Option<&DecodedPayload> {
        match self {
            Self::Payload(payload) => Some(payload),
            _ => None,
        }
    }
}

impl DrawOperation {
    /// Apply this operation to `surface`, returning its output if it has one.
    pub fn apply<S: DrawingSurface + ?Sized>(
        &self,
        surface: &mut S,
    ) -> ImageResult<Option<OperationOutput>> {
        match self {
            Self::Clear {
                width,
                height,
                x,
                y,
            } => {
                let width = given(*width).unwrap_or_else(|| surface.width());
                let height = given(*height).unwrap_or_else(|| surface.height());
                surface.clear_rect(*x, *y, width, height);
                Ok(None)
            }
            Self::DrawImage {
                image,
                x,
                y,
                width,
                height,
            } => {
                let width = given(*width).unwrap_or_else(|| image.width());
                let height = given(*height).unwrap_or_else(|| image.height());
                surface.draw_image(image, *x, *y, width, height);
                Ok(None)
            }
            Self::SetWidthHeight { width, height } => {
                surface.set_size(*width, *height);
                Ok(None)
            }
            Self::ToImage(encoding) => Ok(Some(OperationOutput::Image(surface.to_image(encoding)?))),
            Self::ToFile { name, encoding } => Ok(export_file(&*surface, name, encoding)),
            Self::ToDataUrl(encoding) => {
                let url = surface.to_data_url(encoding)?;
                Ok((!url.is_empty()).then_some(OperationOutput::DataUrl(url)))
            }
            Self::ToBlobResult(encoding) => {
                let url = surface.to_data_url(encoding)?;
                Ok(data_url_to_blob(&url).map(OperationOutput::Payload))
            }
        }
    }
}

/// A zero dimension counts as not given.
fn given(value: Option<u32>) -> Option<u32> {
    value.filter(|v| *v > 0)
}

fn export_file<S: DrawingSurface + ?Sized>(
    surface: &S,
    name: &str,
    encoding: &Encoding,
) -> Option<OperationOutput> {
    let url = match surface.to_data_url(encoding) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("Cannot export {}: {}", name, e);
            return None;
        }
    };

    match data_url_to_blob(&url).map(|payload| payload.to_file(name)) {
        Some(Ok(file)) => Some(OperationOutput::File(file)),
        Some(Err(e)) => {
            tracing::warn!("Cannot export {}: {}", name, e);
            None
        }
        None => {
            tracing::warn!("Cannot export {}: surface produced no data URL", name);
            None
        }
    }
}

/// Clear a rectangle. `None` sizes default to the surface's current extent.
pub fn clear(width: Option<u32>, height: Option<u32>, x: i64, y: i64) -> DrawOperation {
    DrawOperation::Clear {
        width,
        height,
        x,
        y,
    }
}

/// Clear the whole surface, whatever its size is when applied.
pub fn clear_all() -> DrawOperation {
    clear(None, None, 0, 0)
}

/// Draw `image` at (x, y). `None` sizes default to the image's natural size.
pub fn draw_image(
    image: &ImageHandle,
    x: i64,
    y: i64,
    width: Option<u32>,
    height: Option<u32>,
) -> DrawOperation {
    DrawOperation::DrawImage {
        image: image.clone(),
        x,
        y,
        width,
        height,
    }
}

/// Draw `image` at (x, y) at its natural size.
pub fn draw_image_at(image: &ImageHandle, x: i64, y: i64) -> DrawOperation {
    draw_image(image, x, y, None, None)
}

/// Resize the surface. This also clears it.
pub fn set_width_height(width: u32, height: u32) -> DrawOperation {
    DrawOperation::SetWidthHeight { width, height }
}

pub fn to_image(encoding: Encoding) -> DrawOperation {
    DrawOperation::ToImage(encoding)
}

/// Export as a file named `name`. Yields nothing if the export fails.
pub fn to_file(name: impl Into<String>, encoding: Encoding) -> DrawOperation {
    DrawOperation::ToFile {
        name: name.into(),
        encoding,
    }
}

pub fn to_data_url(encoding: Encoding) -> DrawOperation {
    DrawOperation::ToDataUrl(encoding)
}

pub fn to_blob_result(encoding: Encoding) -> DrawOperation {
    DrawOperation::ToBlobResult(encoding)
}
