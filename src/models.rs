//! Tracking data and JSON response bodies.

use serde::{Deserialize, Serialize};

use crate::config::{EXAMPLE_PATH, MISSING_CODE_MESSAGE, TRACKING_FAILED_MESSAGE};

/// One step of a shipment's journey as scraped from the tracking page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub date: String,
    pub time: String,
    pub description: String,
    /// Synthetic epoch-millisecond value (`now - index * 60s`), not read from the page.
    /// Only meant as a display/sort hint.
    #[serde(rename = "timestamp")]
    pub approximate_timestamp: i64,
}

/// Scraped tracking data for one code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingResult {
    pub code: String,
    pub status: String,
    pub events: Vec<TrackingEvent>,
    /// ISO-8601 UTC timestamp of when the page was scraped
    pub last_update: String,
}

/// Success body: `{ "success": true, "tracking": { ... } }`.
///
/// This is also what the cache stores, so a cache hit serializes to the same bytes
/// as the response that populated it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingResponse {
    pub success: bool,
    pub tracking: TrackingResult,
}

impl TrackingResponse {
    pub fn new(tracking: TrackingResult) -> Self {
        Self {
            success: true,
            tracking,
        }
    }
}

/// 400 body for a request without a tracking code.
#[derive(Debug, Serialize)]
pub struct MissingCodeBody {
    pub error: &'static str,
    pub example: &'static str,
}

impl Default for MissingCodeBody {
    fn default() -> Self {
        Self {
            error: MISSING_CODE_MESSAGE,
            example: EXAMPLE_PATH,
        }
    }
}

/// 500 body when both the primary provider and the fallback failed.
#[derive(Debug, Serialize)]
pub struct FailureBody {
    pub success: bool,
    pub error: &'static str,
    /// Message of the primary failure, not the fallback's
    pub message: String,
}

impl FailureBody {
    pub fn new(message: String) -> Self {
        Self {
            success: false,
            error: TRACKING_FAILED_MESSAGE,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tracking_response_wire_format() {
        let response = TrackingResponse::new(TrackingResult {
            code: "BR257514355146J".to_string(),
            status: "Entregue".to_string(),
            events: vec![TrackingEvent {
                date: "12 Mar".to_string(),
                time: "10:15".to_string(),
                description: "Pedido entregue".to_string(),
                approximate_timestamp: 1_700_000_000_000,
            }],
            last_update: "2024-03-12T10:15:00.000Z".to_string(),
        });

        let value = serde_json::to_value(&response).expect("serialize");
        assert_eq!(
            value,
            json!({
                "success": true,
                "tracking": {
                    "code": "BR257514355146J",
                    "status": "Entregue",
                    "events": [{
                        "date": "12 Mar",
                        "time": "10:15",
                        "description": "Pedido entregue",
                        "timestamp": 1_700_000_000_000i64
                    }],
                    "lastUpdate": "2024-03-12T10:15:00.000Z"
                }
            })
        );
    }

    #[test]
    fn test_missing_code_body() {
        let value = serde_json::to_value(MissingCodeBody::default()).expect("serialize");
        assert_eq!(
            value,
            json!({
                "error": "Código de rastreamento é obrigatório",
                "example": "/api/shopee-tracker-optimized/BR257514355146J"
            })
        );
    }

    #[test]
    fn test_failure_body_carries_primary_message() {
        let value =
            serde_json::to_value(FailureBody::new("connection refused".to_string())).expect("serialize");
        assert_eq!(
            value,
            json!({
                "success": false,
                "error": "Falha ao rastrear encomenda",
                "message": "connection refused"
            })
        );
    }
}
