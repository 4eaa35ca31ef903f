//! HTTP client initialization.
//!
//! The primary provider and the fallback API get separate clients because they
//! differ in timeout and in the headers they send.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::ClientBuilder;

use crate::config::{BROWSER_ACCEPT, BROWSER_USER_AGENT};

/// Initializes the client used to fetch the tracking page.
///
/// Creates a `reqwest::Client` configured with:
/// - the given timeout (10s in production)
/// - a browser-like User-Agent and Accept header, since the provider may
///   reject requests that don't look like they come from a browser
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_primary_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(BROWSER_ACCEPT));

    ClientBuilder::new()
        .timeout(timeout)
        .user_agent(BROWSER_USER_AGENT)
        .default_headers(headers)
        .build()
}

/// Initializes the client used to call the fallback API.
///
/// Only a timeout is set (15s in production); no custom headers are sent.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_fallback_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new().timeout(timeout).build()
}
