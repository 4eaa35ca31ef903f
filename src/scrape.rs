//! Tracking page extraction.
//!
//! Pulls the shipment status and the list of tracking events out of the
//! provider's HTML. Selectors are fixed class names from the provider's markup:
//!
//! ```html
//! <div class="order-status">Entregue</div>
//! <div class="nss-comp-tracking-item">
//!   <div class="time"><span class="day">12 Mar</span><span class="second">10:15</span></div>
//!   <div class="message">Pedido entregue</div>
//! </div>
//! ```

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use scraper::{ElementRef, Html, Selector};

use crate::config::{EVENT_TIMESTAMP_STEP_MS, STATUS_PLACEHOLDER};
use crate::models::{TrackingEvent, TrackingResult};

// CSS selector strings
const ORDER_STATUS_SELECTOR_STR: &str = ".order-status";
const TRACKING_ITEM_SELECTOR_STR: &str = ".nss-comp-tracking-item";
const EVENT_TIME_BLOCK_SELECTOR_STR: &str = ".time";
const EVENT_DAY_SELECTOR_STR: &str = ".day";
const EVENT_TIME_SELECTOR_STR: &str = ".second";
const EVENT_MESSAGE_SELECTOR_STR: &str = ".message";

static ORDER_STATUS_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector(ORDER_STATUS_SELECTOR_STR, "order status"));
static TRACKING_ITEM_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector(TRACKING_ITEM_SELECTOR_STR, "tracking item"));
static EVENT_TIME_BLOCK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector(EVENT_TIME_BLOCK_SELECTOR_STR, "event time block"));
static EVENT_DAY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector(EVENT_DAY_SELECTOR_STR, "event day"));
static EVENT_TIME_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector(EVENT_TIME_SELECTOR_STR, "event time"));
static EVENT_MESSAGE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector(EVENT_MESSAGE_SELECTOR_STR, "event message"));

/// Parses a CSS selector, logging and falling back to one that matches nothing.
fn parse_selector(selector_str: &str, context: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        log::error!(
            "Failed to parse CSS selector '{}' for {}: {}. Using fallback selector.",
            selector_str,
            context,
            e
        );
        Selector::parse("*:not(*)").expect(
            "Fallback selector '*:not(*)' should always parse - this is a programming error",
        )
    })
}

/// Builds a [`TrackingResult`] from the tracking page HTML.
///
/// - `status` is the text of every `.order-status` element, trimmed, or
///   [`STATUS_PLACEHOLDER`] when that is empty.
/// - events are collected in document order, each stamped
///   `now - index * 60s`, and the list is then reversed. The reversal is kept
///   as a plain reversal rather than a sort on the synthetic timestamps, so the
///   final order depends on how the provider orders its items.
///
/// Extraction never fails: a page without the expected markup yields the
/// placeholder status and no events.
pub fn extract_tracking(html: &str, code: &str, now: DateTime<Utc>) -> TrackingResult {
    let document = Html::parse_document(html);

    let status = document
        .select(&ORDER_STATUS_SELECTOR)
        .flat_map(|element| element.text())
        .collect::<String>()
        .trim()
        .to_string();
    let status = if status.is_empty() {
        log::debug!("No status found for {code}, using placeholder");
        STATUS_PLACEHOLDER.to_string()
    } else {
        status
    };

    let now_ms = now.timestamp_millis();
    let mut events: Vec<TrackingEvent> = document
        .select(&TRACKING_ITEM_SELECTOR)
        .enumerate()
        .map(|(index, item)| TrackingEvent {
            date: nested_text(item, &EVENT_TIME_BLOCK_SELECTOR, &EVENT_DAY_SELECTOR),
            time: nested_text(item, &EVENT_TIME_BLOCK_SELECTOR, &EVENT_TIME_SELECTOR),
            description: descendant_text(item, &EVENT_MESSAGE_SELECTOR),
            approximate_timestamp: now_ms - index as i64 * EVENT_TIMESTAMP_STEP_MS,
        })
        .collect();
    events.reverse();

    log::debug!(
        "Extracted status '{}' and {} events for {code}",
        status,
        events.len()
    );

    TrackingResult {
        code: code.to_string(),
        status,
        events,
        last_update: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

/// Concatenated, trimmed text of all descendants of `element` matching `selector`.
fn descendant_text(element: ElementRef<'_>, selector: &Selector) -> String {
    element
        .select(selector)
        .flat_map(|matched| matched.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Like [`descendant_text`], but for `inner` matches inside an `outer` match
/// that is itself inside `element`. Ancestors of `element` are never consulted.
fn nested_text(element: ElementRef<'_>, outer: &Selector, inner: &Selector) -> String {
    let mut seen = HashSet::new();
    element
        .select(outer)
        .flat_map(|scope| scope.select(inner))
        .filter(|matched| seen.insert(matched.id()))
        .flat_map(|matched| matched.text())
        .collect::<String>()
        .trim()
        .to_string()
}
