// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Courier - relays contact-form messages to a Telegram chat.
//!
//! This is the binary entry point.

mod check;
mod doctor;
mod serve;
mod shutdown;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use courier_config::{ConfigError, CourierConfig};

/// Courier - relays contact-form messages to a Telegram chat.
#[derive(Parser, Debug)]
#[command(name = "courier", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP relay (the default).
    Serve,
    /// Load and validate configuration, then print a redacted summary.
    Check,
    /// Probe the Telegram bot and the message store.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            courier_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let outcome = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve::run_serve(config).await,
        Commands::Check => {
            print!("{}", check::summary(&config));
            Ok(())
        }
        Commands::Doctor { plain } => match doctor::run_doctor(&config, plain).await {
            Ok(0) => Ok(()),
            Ok(_) => std::process::exit(2),
            Err(e) => Err(e),
        },
    };

    if let Err(e) = outcome {
        eprintln!("courier: {e}");
        std::process::exit(1);
    }
}

fn load(path: Option<&std::path::Path>) -> Result<CourierConfig, Vec<ConfigError>> {
    match path {
        Some(path) => courier_config::load_and_validate_path(path),
        None => courier_config::load_and_validate(),
    }
}
