//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources of the
//! server:
//! - Logger (plain or JSON output)
//! - HTTP clients for the primary provider and the fallback API
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;

// Re-export public API
pub use client::{init_fallback_client, init_primary_client};
pub use logger::init_logger_with;
