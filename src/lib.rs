//! spx_tracker library: SPX package tracking over HTTP
//!
//! This library serves a single tracking endpoint. For a tracking code it scrapes
//! the provider's tracking page, caches the result for two minutes, and falls back
//! to a secondary tracking API when the scrape fails.
//!
//! # Example
//!
//! ```no_run
//! use spx_tracker::{serve, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config {
//!     port: 8080,
//!     ..Default::default()
//! };
//!
//! // Serves until Ctrl-C
//! serve(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

pub mod cache;
pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod models;
pub mod scrape;
pub mod server;
pub mod tracker;

// Re-export public API
pub use cache::{CacheEntry, TrackingCache};
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::TrackingError;
pub use models::{TrackingEvent, TrackingResponse, TrackingResult};
pub use server::{router, serve, serve_with_shutdown};
pub use tracker::{TrackOutcome, Tracker};
