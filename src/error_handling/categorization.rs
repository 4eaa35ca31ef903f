//! Error categorization.
//!
//! Maps `reqwest::Error` values onto [`FetchErrorKind`] so failure log lines
//! say what went wrong without dumping the whole error chain.

use super::types::FetchErrorKind;

/// Categorizes a `reqwest::Error` into a `FetchErrorKind`.
///
/// HTTP status codes are checked first (they come from `error_for_status`),
/// then the transport-level flags reqwest exposes.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> FetchErrorKind {
    if let Some(status) = error.status() {
        match status.as_u16() {
            403 => return FetchErrorKind::BotDetection,
            404 => return FetchErrorKind::NotFound,
            429 => return FetchErrorKind::TooManyRequests,
            _ if status.is_client_error() => return FetchErrorKind::ClientError,
            _ if status.is_server_error() => return FetchErrorKind::ServerError,
            _ => {
                // Non-standard status codes - fall through to check error type
            }
        }
    }

    if error.is_timeout() {
        FetchErrorKind::Timeout
    } else if error.is_connect() {
        FetchErrorKind::Connect
    } else if error.is_builder() {
        FetchErrorKind::Builder
    } else if error.is_redirect() {
        FetchErrorKind::Redirect
    } else if error.is_body() {
        FetchErrorKind::Body
    } else if error.is_decode() {
        FetchErrorKind::Decode
    } else {
        FetchErrorKind::Other
    }
}
