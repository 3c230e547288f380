//! Fruitforge: devil-fruit ability generator for One Piece-inspired DnD campaigns.
//!
//! This is the main entry point for the `fruitforge` CLI. It parses arguments,
//! sets up logging, dispatches to the appropriate command handler, and handles
//! errors with proper exit codes.

mod cli;
mod commands;
pub mod ability;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod export;
pub mod extract;
pub mod fs;
pub mod lenient;
pub mod prompt;
pub mod render;
pub mod session;
pub mod store;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Logs go to stderr so prompts and renders on stdout stay pipeable.
    let default_filter = if cli.verbose {
        "fruitforge=debug"
    } else {
        "fruitforge=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match commands::dispatch(cli.command).await {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            ExitCode::from(err.exit_code() as u8)
        }
    }
}
