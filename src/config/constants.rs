//! Configuration constants.
//!
//! This module defines the fixed operational parameters of the tracker:
//! cache lifetime, outbound timeouts, provider URLs and the literal strings
//! returned to clients.

use std::time::Duration;

/// How long a scraped result is served from the cache (2 minutes)
pub const CACHE_TTL: Duration = Duration::from_millis(120_000);

// Outbound request timeouts
/// Timeout for the primary tracking page request
pub const PRIMARY_TIMEOUT: Duration = Duration::from_secs(10);
/// Timeout for the fallback API request
/// There is no deadline spanning both calls, so a request can take up to 25s in total.
pub const FALLBACK_TIMEOUT: Duration = Duration::from_secs(15);

// Provider endpoints (the tracking code is appended as the last path segment)
pub const DEFAULT_PRIMARY_URL: &str = "https://spx.com.br/track/";
pub const DEFAULT_FALLBACK_URL: &str = "https://recebasddsa.vercel.app/api/shopee-tracker/";

/// User-Agent sent to the primary provider.
///
/// The provider may reject requests that don't look like they come from a browser,
/// so this is paired with [`BROWSER_ACCEPT`].
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
/// Accept header sent to the primary provider
pub const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

// Routing
/// Route name; a request whose last path segment equals this carries no code
pub const ROUTE_NAME: &str = "shopee-tracker-optimized";
pub const EXAMPLE_PATH: &str = "/api/shopee-tracker-optimized/BR257514355146J";

// Scraped data
/// Spacing between the synthetic timestamps of consecutive events
pub const EVENT_TIMESTAMP_STEP_MS: i64 = 60_000;
pub const STATUS_PLACEHOLDER: &str = "Status não disponível";

// Client-facing messages
pub const MISSING_CODE_MESSAGE: &str = "Código de rastreamento é obrigatório";
pub const TRACKING_FAILED_MESSAGE: &str = "Falha ao rastrear encomenda";

// CORS header values (sent on every response)
pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_METHODS: &str = "GET, OPTIONS";
pub const CORS_ALLOW_HEADERS: &str = "Content-Type";

// Server defaults
pub const DEFAULT_BIND: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
