//! Error type definitions.
//!
//! This module defines the error types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing an HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// A provider base URL could not be parsed.
    #[error("Invalid provider URL '{url}': {source}")]
    InvalidProviderUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Failures while serving a tracking request.
///
/// `FetchFailure` is recovered by the fallback call; `FallbackFailure` and
/// `FallbackBody` are terminal and surface as a 500.
#[derive(Error, Debug)]
pub enum TrackingError {
    /// The request path carried no tracking code.
    #[error("tracking code is missing")]
    MissingCode,

    /// The primary tracking page could not be fetched (network, timeout, non-2xx, body).
    ///
    /// Displays the underlying message unchanged, since it is echoed to the client.
    #[error("{0}")]
    FetchFailure(#[source] ReqwestError),

    /// The fallback API could not be reached or answered with a non-2xx status.
    #[error("fallback request failed: {0}")]
    FallbackFailure(#[source] ReqwestError),

    /// The fallback API answered 2xx but its body could not be forwarded as JSON.
    #[error("fallback body could not be forwarded: {0}")]
    FallbackBody(#[from] serde_json::Error),
}

/// Coarse category of an outbound HTTP failure, used in log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    Timeout,
    Connect,
    /// 403 Forbidden, usually the provider refusing a non-browser client
    BotDetection,
    NotFound,
    TooManyRequests,
    ClientError,
    ServerError,
    Redirect,
    Body,
    Decode,
    Builder,
    Other,
}

impl std::fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FetchErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchErrorKind::Timeout => "timeout",
            FetchErrorKind::Connect => "connect error",
            FetchErrorKind::BotDetection => "bot detection (403 Forbidden)",
            FetchErrorKind::NotFound => "not found (404)",
            FetchErrorKind::TooManyRequests => "too many requests (429)",
            FetchErrorKind::ClientError => "client error (4xx)",
            FetchErrorKind::ServerError => "server error (5xx)",
            FetchErrorKind::Redirect => "redirect error",
            FetchErrorKind::Body => "body error",
            FetchErrorKind::Decode => "decode error",
            FetchErrorKind::Builder => "request builder error",
            FetchErrorKind::Other => "other error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_code_display() {
        assert_eq!(
            TrackingError::MissingCode.to_string(),
            "tracking code is missing"
        );
    }

    #[test]
    fn test_fallback_body_from_serde_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err: TrackingError = parse_err.into();
        assert!(matches!(err, TrackingError::FallbackBody(_)));
        assert!(err.to_string().starts_with("fallback body could not be forwarded"));
    }

    #[test]
    fn test_fetch_error_kind_display_matches_as_str() {
        for kind in [
            FetchErrorKind::Timeout,
            FetchErrorKind::Connect,
            FetchErrorKind::BotDetection,
            FetchErrorKind::NotFound,
            FetchErrorKind::Other,
        ] {
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }
}
