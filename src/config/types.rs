//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_BIND, DEFAULT_FALLBACK_URL, DEFAULT_PORT, DEFAULT_PRIMARY_URL,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Server configuration.
///
/// Parsed from the command line by the binary; library users can build it
/// directly and override only what they need.
///
/// # Examples
///
/// ```bash
/// # Listen on all interfaces
/// spx_tracker --bind 0.0.0.0 --port 8080
///
/// # Point the tracker at local mocks
/// spx_tracker --primary-url http://localhost:9000/track/ --fallback-url http://localhost:9001/api/
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "spx_tracker",
    about = "Serves SPX package tracking data scraped from the provider's tracking page."
)]
pub struct Config {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = DEFAULT_BIND)]
    pub bind: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Base URL of the tracking page; the code is appended as the last path segment
    #[arg(long, default_value = DEFAULT_PRIMARY_URL)]
    pub primary_url: String,

    /// Base URL of the fallback tracking API; the code is appended as the last path segment
    #[arg(long, default_value = DEFAULT_FALLBACK_URL)]
    pub fallback_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            primary_url: DEFAULT_PRIMARY_URL.to_string(),
            fallback_url: DEFAULT_FALLBACK_URL.to_string(),
        }
    }
}
