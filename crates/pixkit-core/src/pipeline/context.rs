//! The owner of a drawing surface and the runner for operation sequences.

use std::borrow::Borrow;

use crate::config::ImageConfig;
use crate::error::ImageResult;

use super::ops::{DrawOperation, OperationOutput};
use super::surface::{DrawingSurface, RasterSurface};

/// Owns one drawing surface and applies operation sequences to it.
///
/// The surface persists across calls, so later sequences see whatever
/// earlier ones left on it.
#[derive(Debug, Clone)]
pub struct ImageHandleContext<S: DrawingSurface = RasterSurface> {
    surface: S,
}

impl<S: DrawingSurface> ImageHandleContext<S> {
    /// Wrap a caller-supplied surface.
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Apply `operations` in order and collect their outputs in call order.
    ///
    /// Operations without an output contribute nothing to the result. The
    /// first failing operation stops the sequence; earlier mutations stay
    /// applied to the surface.
    pub fn handle_image<I>(&mut self, operations: I) -> ImageResult<Vec<OperationOutput>>
    where
        I: IntoIterator,
        I::Item: Borrow<DrawOperation>,
    {
        let mut outputs = Vec::new();
        for operation in operations {
            let operation = operation.borrow();
            tracing::trace!("Applying {:?}", operation);
            if let Some(output) = operation.apply(&mut self.surface)? {
                outputs.push(output);
            }
        }
        tracing::debug!(
            "Applied operations on {}x{} surface, {} output(s)",
            self.surface.width(),
            self.surface.height(),
            outputs.len()
        );
        Ok(outputs)
    }
}

impl ImageHandleContext<RasterSurface> {
    /// Create a context around a raster surface with the configured extent.
    pub fn from_config(config: &ImageConfig) -> Self {
        Self::new(RasterSurface::from_config(config))
    }
}

/// Create a context around a fresh default raster surface.
pub fn create_image_handle_context() -> ImageHandleContext<RasterSurface> {
    ImageHandleContext::new(RasterSurface::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImageError;
    use crate::pipeline::data_url::data_url_to_blob;
    use crate::pipeline::decode::ImageHandle;
    use crate::pipeline::encode::Encoding;
    use crate::pipeline::ops;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_resize_then_export_decodes_to_jpeg() {
        let mut context = create_image_handle_context();
        let outputs = context
            .handle_image([
                ops::set_width_height(100, 50),
                ops::to_data_url(Encoding::default()),
            ])
            .unwrap();

        assert_eq!(outputs.len(), 1);
        let payload = data_url_to_blob(outputs[0].as_data_url().unwrap()).unwrap();
        assert_eq!(payload.mime.as_deref(), Some("image/jpeg"));
        assert!(!payload.bytes.unwrap().is_empty());
    }

    #[test]
    fn test_outputs_are_collected_in_call_order() {
        let mut context = create_image_handle_context();
        let outputs = context
            .handle_image(vec![
                ops::to_data_url(Encoding::with_type("image/png")),
                ops::clear_all(),
                ops::to_blob_result(Encoding::default()),
                ops::to_file("a.jpg", Encoding::default()),
                ops::to_image(Encoding::default()),
            ])
            .unwrap();

        assert_eq!(outputs.len(), 4);
        assert!(outputs[0].as_data_url().is_some());
        assert!(outputs[1].as_payload().is_some());
        assert!(outputs[2].as_file().is_some());
        assert!(outputs[3].as_image().is_some());
    }

    #[test]
    fn test_export_after_shrinking_to_nothing_keeps_outputs() {
        let mut context = create_image_handle_context();
        let outputs = context
            .handle_image([
                ops::to_data_url(Encoding::default()),
                ops::set_width_height(0, 0),
                ops::to_image(Encoding::default()),
            ])
            .unwrap();

        assert_eq!(outputs.len(), 2);
        assert!(outputs[0].as_data_url().unwrap().starts_with("data:image/jpeg"));
        assert_eq!(outputs[1].as_image().unwrap().dimensions(), (0, 0));
    }

    #[test]
    fn test_surface_persists_between_calls() {
        let mut context = create_image_handle_context();
        let image = ImageHandle::new(RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 255])));

        context
            .handle_image([ops::set_width_height(2, 2), ops::draw_image_at(&image, 0, 0)])
            .unwrap();
        let outputs = context
            .handle_image([ops::to_image(Encoding::with_type("image/png"))])
            .unwrap();

        let snapshot = outputs[0].as_image().unwrap();
        assert_eq!(snapshot.pixels().get_pixel(1, 1), &Rgba([9, 9, 9, 255]));
    }

    #[test]
    fn test_operations_can_be_reused_by_reference() {
        let mut context = ImageHandleContext::new(RasterSurface::new(8, 8));
        let export = [ops::to_data_url(Encoding::with_type("image/png"))];
        let first = context.handle_image(&export).unwrap();
        let second = context.handle_image(&export).unwrap();
        assert_eq!(first[0].as_data_url(), second[0].as_data_url());
    }

    #[test]
    fn test_from_config_uses_configured_extent() {
        let config = ImageConfig {
            surface_width: 64,
            surface_height: 32,
            ..ImageConfig::default()
        };
        let context = ImageHandleContext::from_config(&config);
        assert_eq!(context.surface().width(), 64);
        assert_eq!(context.surface().height(), 32);
    }

    /// A surface whose serialization always fails.
    struct BrokenSurface {
        width: u32,
        height: u32,
    }

    impl DrawingSurface for BrokenSurface {
        fn width(&self) -> u32 {
            self.width
        }
        fn height(&self) -> u32 {
            self.height
        }
        fn set_size(&mut self, width: u32, height: u32) {
            self.width = width;
            self.height = height;
        }
        fn clear_rect(&mut self, _x: i64, _y: i64, _width: u32, _height: u32) {}
        fn draw_image(&mut self, _image: &ImageHandle, _x: i64, _y: i64, _w: u32, _h: u32) {}
        fn to_data_url(&self, encoding: &Encoding) -> ImageResult<String> {
            Err(ImageError::Encode {
                mime: encoding.mime.clone(),
                message: "encoder unavailable".to_string(),
            })
        }
    }

    #[test]
    fn test_failing_export_stops_the_sequence() {
        let mut context = ImageHandleContext::new(BrokenSurface {
            width: 1,
            height: 1,
        });
        let err = context
            .handle_image([
                ops::set_width_height(10, 10),
                ops::to_data_url(Encoding::default()),
                ops::set_width_height(20, 20),
            ])
            .unwrap_err();

        assert!(matches!(err, ImageError::Encode { .. }));
        assert_eq!(context.surface().width(), 10);
    }

    #[test]
    fn test_failing_file_export_is_skipped() {
        let mut context = ImageHandleContext::new(BrokenSurface {
            width: 1,
            height: 1,
        });
        let outputs = context
            .handle_image([ops::to_file("a.jpg", Encoding::default())])
            .unwrap();
        assert!(outputs.is_empty());
    }
}
