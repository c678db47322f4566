//! Image pipeline: loading files into images, parsing data URLs, and
//! running composable operations over a drawing surface.
//!
//! - **file**: in-memory named files
//! - **data_url**: data URL parsing and construction
//! - **decode**: image handles and the decoder capability
//! - **loader**: file reader capability and file-to-image loading
//! - **encode**: export encodings
//! - **surface**: the drawing surface capability and its raster implementation
//! - **ops**: the composable operations
//! - **context**: the surface owner that runs operation sequences

pub mod context;
pub mod data_url;
pub mod decode;
pub mod encode;
pub mod file;
pub mod loader;
pub mod ops;
pub mod surface;

// Re-exports for convenient access
pub use context::{create_image_handle_context, ImageHandleContext};
pub use data_url::{data_url_to_blob, encode_data_url, DecodedPayload};
pub use decode::{ImageDecoder, ImageHandle, RasterDecoder};
pub use encode::Encoding;
pub use file::FileHandle;
pub use loader::{file_to_image, DataUrlReader, FileReader, ImageLoader, LoadedImage};
pub use ops::{DrawOperation, OperationOutput};
pub use surface::{DrawingSurface, RasterSurface};
