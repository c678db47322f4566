//! The `pixkit id` command for identifier generation.

use clap::{Args, Subcommand};
use pixkit_core::{Config, IdGenerator};

/// Arguments for the `id` command.
#[derive(Args, Debug)]
pub struct IdArgs {
    #[command(subcommand)]
    pub command: IdCommand,
}

/// Subcommands for identifier generation.
#[derive(Subcommand, Debug)]
pub enum IdCommand {
    /// Print UUID v4-shaped identifiers
    Uuid {
        /// How many to print
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },

    /// Print 16-character identifiers drawn from an alphabet
    Short {
        /// Alphabet of at least 16 characters (defaults to ids.short_alphabet)
        #[arg(short, long)]
        alphabet: Option<String>,

        /// How many to print
        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },

    /// Print raw base-16 digits
    Digits {
        /// Number of digits (defaults to ids.digit_count)
        #[arg(short, long)]
        count: Option<usize>,
    },
}

/// Execute the id command.
pub async fn execute(args: IdArgs, config: &Config) -> anyhow::Result<()> {
    let mut generator = IdGenerator::new();

    match args.command {
        IdCommand::Uuid { count } => {
            for _ in 0..count {
                println!("{}", generator.uuid());
            }
        }

        IdCommand::Short { alphabet, count } => {
            let alphabet = alphabet.unwrap_or_else(|| config.ids.short_alphabet.clone());
            for _ in 0..count {
                println!("{}", generator.short_id(&alphabet)?);
            }
        }

        IdCommand::Digits { count } => {
            let digits = generator.next_numbers(count.unwrap_or(config.ids.digit_count));
            println!("{}", format_digits(&digits));
        }
    }

    Ok(())
}

/// Render digits as lowercase hex characters.
fn format_digits(digits: &[u8]) -> String {
    digits.iter().map(|d| format!("{:x}", d)).collect()
}
