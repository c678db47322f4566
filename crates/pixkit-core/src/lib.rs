//! Pixkit Core - image surface helpers and pseudo-random identifiers.
//!
//! Two independent components live here:
//!
//! - [`pipeline`]: load files into decoded images, parse data URLs, and run
//!   composable operations (clear, draw, resize, export) over a persistent
//!   drawing surface.
//! - [`ids`]: UUID v4-shaped strings and short alphabet tokens. These are
//!   **not** cryptographically secure.
//!
//! ```text
//! File → read as data URL → decode → ImageHandle
//!                                       │
//!          ImageHandleContext ── [set_width_height, draw_image, to_file, ...] → outputs
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use pixkit_core::pipeline::{ops, Encoding};
//! use pixkit_core::{Config, Pixkit};
//!
//! #[tokio::main]
//! async fn main() -> pixkit_core::Result<()> {
//!     let pixkit = Pixkit::new(Config::load()?);
//!     let (_, loaded) = pixkit.open("./photo.png".as_ref()).await?;
//!
//!     let mut context = pixkit.context();
//!     let outputs = context.handle_image([
//!         ops::set_width_height(64, 64),
//!         ops::draw_image(&loaded.image, 0, 0, Some(64), Some(64)),
//!         ops::to_data_url(Encoding::default()),
//!     ])?;
//!     println!("{:?}", outputs[0].as_data_url());
//!     println!("{}", pixkit_core::ids::uuid());
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod ids;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, IdError, ImageError, ImageResult, PixkitError, Result};
pub use ids::IdGenerator;
pub use pipeline::{
    create_image_handle_context, data_url_to_blob, file_to_image, DecodedPayload, DrawOperation,
    FileHandle, ImageHandle, ImageHandleContext, ImageLoader, LoadedImage, OperationOutput,
    RasterSurface,
};
pub use types::ImageInfo;

use std::path::Path;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configured entry point tying the components to one [`Config`].
pub struct Pixkit {
    config: Config,
    loader: ImageLoader,
}

impl Pixkit {
    /// Create a new instance with the given configuration.
    pub fn new(config: Config) -> Self {
        tracing::debug!("Initializing Pixkit v{}", VERSION);
        let loader = ImageLoader::new(&config.limits);
        Self { config, loader }
    }

    /// Get a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read a file from disk and decode it.
    pub async fn open(&self, path: &Path) -> Result<(FileHandle, LoadedImage)> {
        let file = FileHandle::open(path, &self.config.limits).await?;
        let loaded = self.loader.load(&file).await?;
        Ok((file, loaded))
    }

    /// A fresh context over a raster surface with the configured extent.
    pub fn context(&self) -> ImageHandleContext<RasterSurface> {
        ImageHandleContext::from_config(&self.config.image)
    }

    /// Short identifier over the configured alphabet.
    pub fn short_id(&self) -> Result<String> {
        Ok(ids::short_id(&self.config.ids.short_alphabet)?)
    }
}
