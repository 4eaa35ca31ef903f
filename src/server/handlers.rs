//! Tracking endpoint handler.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};

use crate::config::ROUTE_NAME;
use crate::error_handling::TrackingError;
use crate::models::{FailureBody, MissingCodeBody};
use crate::tracker::{TrackOutcome, Tracker};

/// Handles every request path; only the last path segment is read.
///
/// `OPTIONS` is answered with an empty 200 before anything else. Any other
/// method is treated as a lookup. CORS headers are added by the router.
pub async fn track_handler(
    State(tracker): State<Arc<Tracker>>,
    method: Method,
    uri: Uri,
) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    let Some(code) = extract_code(uri.path()) else {
        log::debug!("Rejecting {}: {}", uri.path(), TrackingError::MissingCode);
        return (StatusCode::BAD_REQUEST, Json(MissingCodeBody::default())).into_response();
    };

    outcome_response(tracker.track(code).await)
}

/// Returns the last path segment, unless it is empty or the route's own name.
pub(crate) fn extract_code(path: &str) -> Option<&str> {
    path.rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty() && *segment != ROUTE_NAME)
}

fn outcome_response(outcome: TrackOutcome) -> Response {
    match outcome {
        TrackOutcome::Cached(response) | TrackOutcome::Scraped(response) => {
            (StatusCode::OK, Json(response)).into_response()
        }
        TrackOutcome::Fallback { body, .. } => (
            StatusCode::OK,
            [(CONTENT_TYPE, "application/json")],
            String::from(body.get()),
        )
            .into_response(),
        TrackOutcome::Failed { primary, .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(FailureBody::new(primary.to_string())),
        )
            .into_response(),
    }
}
