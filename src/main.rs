//! Main application entry point (server binary).
//!
//! This is a thin wrapper around the `spx_tracker` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger initialization
//!
//! All request handling is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use spx_tracker::initialization::init_logger_with;
use spx_tracker::{serve, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; PORT and RUST_LOG can come from the real environment
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = serve(config).await {
        eprintln!("spx_tracker error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
