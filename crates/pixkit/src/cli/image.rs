//! The `pixkit image` command for loading, resizing and converting images.

use anyhow::Context;
use clap::{Args, Subcommand};
use pixkit_core::pipeline::{ops, Encoding};
use pixkit_core::{data_url_to_blob, Config, ImageInfo, Pixkit};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// Arguments for the `image` command.
#[derive(Args, Debug)]
pub struct ImageArgs {
    #[command(subcommand)]
    pub command: ImageCommand,
}

/// Subcommands for image handling.
#[derive(Subcommand, Debug)]
pub enum ImageCommand {
    /// Print name, type and dimensions of an image as JSON
    Info {
        /// Image file
        input: PathBuf,
    },

    /// Draw an image onto a surface of the given size and export it
    Resize {
        /// Image file
        input: PathBuf,

        /// Target width in pixels
        #[arg(long)]
        width: u32,

        /// Target height in pixels
        #[arg(long)]
        height: u32,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Output MIME type (defaults to image.default_type)
        #[arg(short = 't', long = "type")]
        mime: Option<String>,

        /// Encoder quality between 0.0 and 1.0 (defaults to image.default_quality)
        #[arg(short, long)]
        quality: Option<f32>,
    },

    /// Print an image file as a data URL
    ToDataUrl {
        /// Image file
        input: PathBuf,
    },

    /// Decode a data URL (read from a file, or stdin with "-") into a file
    FromDataUrl {
        /// File containing the data URL, or "-" for stdin
        input: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Execute the image command.
pub async fn execute(args: ImageArgs, config: Config) -> anyhow::Result<()> {
    let pixkit = Pixkit::new(config);

    match args.command {
        ImageCommand::Info { input } => {
            let (file, loaded) = pixkit.open(&expand(&input)).await?;
            let info = ImageInfo::new(&file, &loaded);
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        ImageCommand::Resize {
            input,
            width,
            height,
            output,
            mime,
            quality,
        } => {
            let encoding = resolve_encoding(pixkit.config(), mime, quality)?;
            let output = expand(&output);
            let (_, loaded) = pixkit.open(&expand(&input)).await?;

            let mut context = pixkit.context();
            let outputs = context.handle_image([
                ops::set_width_height(width, height),
                ops::draw_image(&loaded.image, 0, 0, Some(width), Some(height)),
                ops::to_file(file_name(&output), encoding),
            ])?;

            let file = outputs
                .iter()
                .find_map(|o| o.as_file())
                .context("Export produced no file (is the target size zero?)")?;
            file.write_to(&output).await?;
            tracing::info!(
                "Wrote {}x{} {} to {}",
                width,
                height,
                file.mime(),
                output.display()
            );
        }

        ImageCommand::ToDataUrl { input } => {
            let (_, loaded) = pixkit.open(&expand(&input)).await?;
            println!("{}", loaded.url);
        }

        ImageCommand::FromDataUrl { input, output } => {
            let text = read_input(&input).await?;
            let output = expand(&output);

            let payload = data_url_to_blob(text.trim())
                .context("Input is not a data URL (no ',' separator)")?;
            let file = payload.to_file(file_name(&output))?;
            file.write_to(&output).await?;
            tracing::info!(
                "Wrote {} bytes of {} to {}",
                file.len(),
                file.mime(),
                output.display()
            );
        }
    }

    Ok(())
}

/// Combine CLI overrides with the configured export defaults.
fn resolve_encoding(
    config: &Config,
    mime: Option<String>,
    quality: Option<f32>,
) -> anyhow::Result<Encoding> {
    let mut encoding = config.image.encoding();
    if let Some(mime) = mime {
        encoding.mime = mime;
    }
    if let Some(quality) = quality {
        if !(0.0..=1.0).contains(&quality) {
            anyhow::bail!("--quality must be between 0.0 and 1.0, got {quality}");
        }
        encoding.quality = quality;
    }
    Ok(encoding)
}

async fn read_input(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        Ok(text)
    } else {
        let path = expand(input);
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Cannot read {}", path.display()))
    }
}

/// Expand a leading `~` in a path argument.
fn expand(path: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    PathBuf::from(expanded)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("output")
        .to_string()
}
