//! Pixkit CLI - image surface helpers and pseudo-random identifiers.
//!
//! # Usage
//!
//! ```bash
//! # Identifiers
//! pixkit id uuid -n 3
//! pixkit id short --alphabet 0123456789abcdefghijklmnopqrstuv
//!
//! # Images
//! pixkit image info photo.png
//! pixkit image resize photo.png --width 128 --height 128 -o thumb.jpg
//! pixkit image to-data-url photo.png > photo.txt
//! pixkit image from-data-url photo.txt -o photo.png
//!
//! # View configuration
//! pixkit config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// Pixkit - image surface helpers and pseudo-random identifiers.
#[derive(Parser, Debug)]
#[command(name = "pixkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate identifiers (not suitable as security tokens)
    Id(cli::id::IdArgs),

    /// Load, resize and convert images
    Image(cli::image::ImageArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config = match pixkit_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `pixkit config path`."
            );
            pixkit_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Pixkit v{}", pixkit_core::VERSION);

    match cli.command {
        Commands::Id(args) => cli::id::execute(args, &config).await,
        Commands::Image(args) => cli::image::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
