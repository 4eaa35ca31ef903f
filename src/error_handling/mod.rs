//! Error handling.
//!
//! This module provides:
//! - Error type definitions for startup and for tracking requests
//! - Categorization of outbound HTTP failures for logging
//!
//! Tracking errors never reach the client as-is: the server maps each one to a
//! fixed JSON body (see `server::handlers`).

mod categorization;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use types::{FetchErrorKind, InitializationError, TrackingError};
