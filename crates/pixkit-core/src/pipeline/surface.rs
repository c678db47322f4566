//! Drawing surfaces: a persistent raster plus the 2D primitives that
//! operations apply to it.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::config::ImageConfig;
use crate::error::ImageResult;

use super::data_url::encode_data_url;
use super::decode::{decode_data_url, ImageHandle};
use super::encode::{encode_pixels, Encoding};

/// Data URL produced by a surface with no pixels.
pub const EMPTY_DATA_URL: &str = "data:,";

/// Host capability: an addressable raster with a 2D drawing context.
pub trait DrawingSurface {
    /// Current width in pixels.
    fn width(&self) -> u32;

    /// Current height in pixels.
    fn height(&self) -> u32;

    /// Resize the surface. Prior contents are discarded, even when the
    /// size does not change.
    fn set_size(&mut self, width: u32, height: u32);

    /// Reset a rectangle to fully transparent.
    fn clear_rect(&mut self, x: i64, y: i64, width: u32, height: u32);

    /// Draw `image` scaled to `width` x `height` with its top-left corner at (x, y).
    fn draw_image(&mut self, image: &ImageHandle, x: i64, y: i64, width: u32, height: u32);

    /// Serialize the current contents as a data URL.
    fn to_data_url(&self, encoding: &Encoding) -> ImageResult<String>;

    /// Serialize the current contents and decode them back into an image.
    ///
    /// A surface with no pixels yields an empty image.
    fn to_image(&self, encoding: &Encoding) -> ImageResult<ImageHandle> {
        if self.width() == 0 || self.height() == 0 {
            return Ok(ImageHandle::new(RgbaImage::new(0, 0)));
        }
        decode_data_url(&self.to_data_url(encoding)?)
    }
}

/// In-memory RGBA drawing surface.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    pixels: RgbaImage,
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::from_config(&ImageConfig::default())
    }
}

impl RasterSurface {
    /// Create a transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    /// Create a surface with the configured initial extent.
    pub fn from_config(config: &ImageConfig) -> Self {
        Self::new(config.surface_width, config.surface_height)
    }

    /// Borrow the current pixels.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

impl DrawingSurface for RasterSurface {
    fn width(&self) -> u32 {
        self.pixels.width()
    }

    fn height(&self) -> u32 {
        self.pixels.height()
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.pixels = RgbaImage::new(width, height);
    }

    fn clear_rect(&mut self, x: i64, y: i64, width: u32, height: u32) {
        let Some((x0, x1)) = visible_span(x, width, self.width()) else {
            return;
        };
        let Some((y0, y1)) = visible_span(y, height, self.height()) else {
            return;
        };

        for py in y0..y1 {
            for px in x0..x1 {
                self.pixels.put_pixel(px, py, Rgba([0, 0, 0, 0]));
            }
        }
    }

    fn draw_image(&mut self, image: &ImageHandle, x: i64, y: i64, width: u32, height: u32) {
        if width == 0 || height == 0 || image.width() == 0 || image.height() == 0 {
            return;
        }
        let Some((dx0, dx1)) = visible_span(x, width, self.width()) else {
            return;
        };
        let Some((dy0, dy1)) = visible_span(y, height, self.height()) else {
            return;
        };

        if image.dimensions() == (width, height) {
            imageops::overlay(&mut self.pixels, image.pixels(), x, y);
            return;
        }

        // Only resample the part of the source that lands on the surface.
        let (sx, sw) = source_span(dx0 as i64 - x, dx1 as i64 - x, width, image.width());
        let (sy, sh) = source_span(dy0 as i64 - y, dy1 as i64 - y, height, image.height());
        let visible = imageops::crop_imm(image.pixels(), sx, sy, sw, sh).to_image();
        let scaled = imageops::resize(&visible, dx1 - dx0, dy1 - dy0, FilterType::Triangle);
        imageops::overlay(&mut self.pixels, &scaled, dx0 as i64, dy0 as i64);
    }

    fn to_data_url(&self, encoding: &Encoding) -> ImageResult<String> {
        if self.width() == 0 || self.height() == 0 {
            return Ok(EMPTY_DATA_URL.to_string());
        }

        let encoded = encode_pixels(&self.pixels, encoding)?;
        Ok(encode_data_url(encoded.mime, &encoded.bytes))
    }
}

/// The part of `[offset, offset + len)` inside `[0, extent)`, if any.
fn visible_span(offset: i64, len: u32, extent: u32) -> Option<(u32, u32)> {
    let start = offset.max(0);
    let end = offset.saturating_add(len as i64).min(extent as i64);
    (start < end).then(|| (start as u32, end as u32))
}

/// Map destination span `[start, end)` of a `dest_len` draw back onto a
/// `src_len` source, returning the covering source offset and length.
fn source_span(start: i64, end: i64, dest_len: u32, src_len: u32) -> (u32, u32) {
    let scale = src_len as f64 / dest_len as f64;
    let first = ((start as f64 * scale).floor() as u32).min(src_len - 1);
    let last = ((end as f64 * scale).ceil() as u32).clamp(first + 1, src_len);
    (first, last - first)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

    fn red_image(width: u32, height: u32) -> ImageHandle {
        ImageHandle::new(RgbaImage::from_pixel(width, height, RED))
    }

    #[test]
    fn test_default_extent() {
        let surface = RasterSurface::default();
        assert_eq!((surface.width(), surface.height()), (300, 150));
        assert!(surface.pixels().pixels().all(|p| *p == CLEAR));
    }

    #[test]
    fn test_set_size_discards_contents() {
        let mut surface = RasterSurface::new(4, 4);
        surface.draw_image(&red_image(4, 4), 0, 0, 4, 4);
        surface.set_size(4, 4);
        assert!(surface.pixels().pixels().all(|p| *p == CLEAR));
    }

    #[test]
    fn test_draw_image_at_offset() {
        let mut surface = RasterSurface::new(4, 4);
        surface.draw_image(&red_image(2, 2), 1, 1, 2, 2);
        assert_eq!(surface.pixels().get_pixel(0, 0), &CLEAR);
        assert_eq!(surface.pixels().get_pixel(1, 1), &RED);
        assert_eq!(surface.pixels().get_pixel(2, 2), &RED);
        assert_eq!(surface.pixels().get_pixel(3, 3), &CLEAR);
    }

    #[test]
    fn test_draw_image_scales() {
        let mut surface = RasterSurface::new(8, 8);
        surface.draw_image(&red_image(2, 2), 0, 0, 8, 8);
        assert!(surface
            .pixels()
            .pixels()
            .all(|p| p[0] >= 250 && p[1] <= 5 && p[3] >= 250));
    }

    #[test]
    fn test_draw_image_clips_negative_offset() {
        let mut surface = RasterSurface::new(4, 4);
        surface.draw_image(&red_image(4, 4), -2, -2, 4, 4);
        assert_eq!(surface.pixels().get_pixel(1, 1), &RED);
        assert_eq!(surface.pixels().get_pixel(2, 2), &CLEAR);
    }

    #[test]
    fn test_huge_draw_only_resamples_visible_part() {
        let mut surface = RasterSurface::default();
        surface.draw_image(&red_image(1, 1), 0, 0, 60000, 60000);
        assert!(surface
            .pixels()
            .pixels()
            .all(|p| p[0] >= 250 && p[2] <= 5 && p[3] >= 250));
    }

    #[test]
    fn test_partially_visible_draw_samples_matching_source() {
        // Left half red, right half blue; only the blue half lands on the surface.
        let source = RgbaImage::from_fn(2, 2, |x, _| if x == 0 { RED } else { BLUE });
        let mut surface = RasterSurface::new(4, 4);
        surface.draw_image(&ImageHandle::new(source), -4, 0, 8, 4);
        assert!(surface
            .pixels()
            .pixels()
            .all(|p| p[0] <= 5 && p[2] >= 250 && p[3] >= 250));
    }

    #[test]
    fn test_far_offsets_do_not_overflow() {
        let mut surface = RasterSurface::new(4, 4);
        surface.draw_image(&red_image(4, 4), 0, 0, 4, 4);

        surface.clear_rect(i64::MAX - 1, 0, 10, 10);
        surface.clear_rect(0, i64::MAX - 1, 10, 10);
        surface.draw_image(&red_image(2, 2), i64::MAX - 1, i64::MIN, 10, 10);
        assert!(surface.pixels().pixels().all(|p| *p == RED));

        surface.clear_rect(i64::MIN, i64::MIN, u32::MAX, u32::MAX);
        assert!(surface.pixels().pixels().all(|p| *p == RED));
    }

    #[test]
    fn test_empty_surface_to_image_is_empty() {
        let surface = RasterSurface::new(0, 0);
        let image = surface.to_image(&Encoding::default()).unwrap();
        assert_eq!(image.dimensions(), (0, 0));
    }

    #[test]
    fn test_clear_rect_is_clipped() {
        let mut surface = RasterSurface::new(4, 4);
        surface.draw_image(&red_image(4, 4), 0, 0, 4, 4);
        surface.clear_rect(2, -1, 10, 2);
        assert_eq!(surface.pixels().get_pixel(2, 0), &CLEAR);
        assert_eq!(surface.pixels().get_pixel(3, 0), &CLEAR);
        assert_eq!(surface.pixels().get_pixel(2, 1), &RED);
        assert_eq!(surface.pixels().get_pixel(1, 0), &RED);
    }

    #[test]
    fn test_to_data_url_uses_requested_type() {
        let surface = RasterSurface::new(10, 10);
        let url = surface.to_data_url(&Encoding::default()).unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));

        let url = surface.to_data_url(&Encoding::with_type("image/png")).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_empty_surface_serializes_to_empty_data_url() {
        let surface = RasterSurface::new(0, 10);
        assert_eq!(surface.to_data_url(&Encoding::default()).unwrap(), "data:,");
    }

    #[test]
    fn test_to_image_round_trips_png() {
        let mut surface = RasterSurface::new(3, 2);
        surface.draw_image(&red_image(1, 1), 0, 0, 1, 1);
        let image = surface.to_image(&Encoding::with_type("image/png")).unwrap();
        assert_eq!(image.dimensions(), (3, 2));
        assert_eq!(image.pixels().get_pixel(0, 0), &RED);
        assert_eq!(image.pixels().get_pixel(2, 1), &CLEAR);
    }
}
