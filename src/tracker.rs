//! Tracking lookup: cache, primary scrape, fallback.
//!
//! A lookup goes through two stages. The primary stage serves a fresh cache
//! entry or scrapes the provider's tracking page and caches the result. If that
//! fails, the fallback stage makes exactly one call to the fallback API and
//! forwards its JSON body untouched. Both stages return a plain `Result`; the
//! combination is reported as a [`TrackOutcome`].

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use log::{error, info, warn};
use serde_json::value::{to_raw_value, RawValue};
use url::Url;

use crate::cache::{FlightResult, TrackingCache};
use crate::config::{Config, FALLBACK_TIMEOUT, PRIMARY_TIMEOUT};
use crate::error_handling::{categorize_reqwest_error, InitializationError, TrackingError};
use crate::initialization::{init_fallback_client, init_primary_client};
use crate::models::TrackingResponse;
use crate::scrape::extract_tracking;

/// Result of a tracking lookup.
#[derive(Debug)]
pub enum TrackOutcome {
    /// A fresh cache entry was served; no outbound call was made.
    Cached(TrackingResponse),
    /// The tracking page was scraped, by this request or one it joined, and the result cached.
    Scraped(TrackingResponse),
    /// The primary stage failed and the fallback API answered; its body is forwarded as-is.
    Fallback {
        body: Box<RawValue>,
        primary: Arc<TrackingError>,
    },
    /// Both stages failed.
    Failed {
        primary: Arc<TrackingError>,
        fallback: TrackingError,
    },
}

/// Serves tracking lookups against the primary provider and the fallback API.
pub struct Tracker {
    primary: reqwest::Client,
    fallback: reqwest::Client,
    primary_url: Url,
    fallback_url: Url,
    cache: Arc<TrackingCache>,
}

impl Tracker {
    /// Creates a tracker with the production timeouts (10s primary, 15s fallback).
    ///
    /// # Errors
    ///
    /// Returns an `InitializationError` if a provider URL is invalid or an HTTP
    /// client cannot be built.
    pub fn new(config: &Config, cache: Arc<TrackingCache>) -> Result<Self, InitializationError> {
        Self::with_timeouts(config, cache, PRIMARY_TIMEOUT, FALLBACK_TIMEOUT)
    }

    /// Creates a tracker with custom outbound timeouts.
    pub fn with_timeouts(
        config: &Config,
        cache: Arc<TrackingCache>,
        primary_timeout: Duration,
        fallback_timeout: Duration,
    ) -> Result<Self, InitializationError> {
        Ok(Tracker {
            primary: init_primary_client(primary_timeout)?,
            fallback: init_fallback_client(fallback_timeout)?,
            primary_url: parse_base_url(&config.primary_url)?,
            fallback_url: parse_base_url(&config.fallback_url)?,
            cache,
        })
    }

    pub fn cache(&self) -> &Arc<TrackingCache> {
        &self.cache
    }

    /// Looks up tracking data for `code`.
    ///
    /// Never fails: every error ends up in [`TrackOutcome::Failed`].
    pub async fn track(&self, code: &str) -> TrackOutcome {
        info!("⚡ Looking up tracking for {code}");

        if let Some(entry) = self.cache.get(code).await {
            info!("Serving {code} from cache");
            return TrackOutcome::Cached(entry.data);
        }

        let flight = self.cache.join_flight(code);
        let primary = flight.run(|| self.primary_stage(code)).await;
        // Waiters already hold the result; the fallback call is per request
        drop(flight);

        let primary = match primary {
            Ok(response) => return TrackOutcome::Scraped(response),
            Err(e) => e,
        };

        match self.fetch_fallback(code).await {
            Ok(body) => {
                info!("Fallback API answered for {code}");
                TrackOutcome::Fallback { body, primary }
            }
            Err(fallback) => {
                warn!("Fallback API failed for {code}: {fallback}");
                TrackOutcome::Failed { primary, fallback }
            }
        }
    }

    /// Scrapes and caches `code`. Runs once per flight.
    async fn primary_stage(&self, code: &str) -> FlightResult {
        // A flight that ended just before this one may have filled the cache
        if let Some(entry) = self.cache.get(code).await {
            return Ok(entry.data);
        }

        match self.scrape(code).await {
            Ok(response) => {
                self.cache.put(code, response.clone()).await;
                info!(
                    "✅ Tracking for {code} complete: '{}' with {} events",
                    response.tracking.status,
                    response.tracking.events.len()
                );
                Ok(response)
            }
            Err(e) => {
                match &e {
                    TrackingError::FetchFailure(source) => error!(
                        "Tracking page fetch failed for {code} ({}): {e}",
                        categorize_reqwest_error(source)
                    ),
                    other => error!("Tracking lookup failed for {code}: {other}"),
                }
                Err(Arc::new(e))
            }
        }
    }

    /// Fetches the tracking page and extracts a response from it.
    async fn scrape(&self, code: &str) -> Result<TrackingResponse, TrackingError> {
        let url = provider_url(&self.primary_url, code);
        log::debug!("Fetching tracking page {url}");

        let response = self
            .primary
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(TrackingError::FetchFailure)?;
        let html = response.text().await.map_err(TrackingError::FetchFailure)?;

        let tracking = extract_tracking(&html, code, Utc::now());
        Ok(TrackingResponse::new(tracking))
    }

    /// Calls the fallback API once and returns its body for forwarding.
    ///
    /// A JSON body is kept byte for byte. Any other body is forwarded as a JSON
    /// string holding the text.
    async fn fetch_fallback(&self, code: &str) -> Result<Box<RawValue>, TrackingError> {
        let url = provider_url(&self.fallback_url, code);
        log::debug!("Calling fallback API {url}");

        let response = self
            .fallback
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(TrackingError::FallbackFailure)?;
        let body = response
            .text()
            .await
            .map_err(TrackingError::FallbackFailure)?;

        if serde_json::from_str::<&RawValue>(&body).is_ok() {
            Ok(RawValue::from_string(body)?)
        } else {
            log::debug!("Fallback body for {code} is not JSON, forwarding it as a string");
            Ok(to_raw_value(&body)?)
        }
    }
}

/// Parses a provider base URL that codes will be appended to.
fn parse_base_url(raw: &str) -> Result<Url, InitializationError> {
    let invalid = |source| InitializationError::InvalidProviderUrl {
        url: raw.to_string(),
        source,
    };
    let url = Url::parse(raw).map_err(invalid)?;
    if url.cannot_be_a_base() {
        return Err(invalid(url::ParseError::RelativeUrlWithCannotBeABaseBase));
    }
    Ok(url)
}

/// Appends `code` to `base` as the last path segment.
///
/// `.../track/` and `.../track` both yield `.../track/<code>`. The code is the
/// segment as it arrived, so existing percent-escapes are kept as they are and
/// only characters that aren't valid in a path get encoded.
fn provider_url(base: &Url, code: &str) -> Url {
    let mut url = base.clone();
    let path = format!("{}/{}", base.path().trim_end_matches('/'), code);
    url.set_path(&path);
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_url_with_trailing_slash() {
        let base = Url::parse("https://spx.com.br/track/").expect("valid");
        assert_eq!(
            provider_url(&base, "BR257514355146J").as_str(),
            "https://spx.com.br/track/BR257514355146J"
        );
    }

    #[test]
    fn test_provider_url_without_trailing_slash() {
        let base = Url::parse("https://recebasddsa.vercel.app/api/shopee-tracker").expect("valid");
        assert_eq!(
            provider_url(&base, "BR1").as_str(),
            "https://recebasddsa.vercel.app/api/shopee-tracker/BR1"
        );
    }

    #[test]
    fn test_provider_url_keeps_escaped_code() {
        let base = Url::parse("https://spx.com.br/track/").expect("valid");
        assert_eq!(
            provider_url(&base, "BR%201").as_str(),
            "https://spx.com.br/track/BR%201"
        );
    }

    #[test]
    fn test_provider_url_encodes_raw_space() {
        let base = Url::parse("https://spx.com.br/track/").expect("valid");
        assert_eq!(
            provider_url(&base, "BR 1").as_str(),
            "https://spx.com.br/track/BR%201"
        );
    }

    #[test]
    fn test_provider_url_on_bare_host() {
        let base = Url::parse("https://spx.com.br").expect("valid");
        assert_eq!(
            provider_url(&base, "BR1").as_str(),
            "https://spx.com.br/BR1"
        );
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        assert!(matches!(
            parse_base_url("not a url"),
            Err(InitializationError::InvalidProviderUrl { .. })
        ));
        assert!(matches!(
            parse_base_url("mailto:someone@example.com"),
            Err(InitializationError::InvalidProviderUrl { .. })
        ));
    }

    #[test]
    fn test_new_with_default_config() {
        let tracker = Tracker::new(&Config::default(), Arc::new(TrackingCache::new()));
        assert!(tracker.is_ok());
    }
}
