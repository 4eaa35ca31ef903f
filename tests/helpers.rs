// Shared test helpers for running the tracking server against mock providers.
//
// The server is bound to an ephemeral port on 127.0.0.1 and pointed at wiremock
// servers standing in for the tracking page and the fallback API.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use spx_tracker::{serve_with_shutdown, Config, LogFormat, LogLevel, TrackingCache, Tracker};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use wiremock::MockServer;

pub const CODE: &str = "BR257514355146J";

/// A running tracking server and the handles needed to stop it.
#[allow(dead_code)] // Shutdown handles are only used by some test files
pub struct TestServer {
    pub addr: SocketAddr,
    pub cache: Arc<TrackingCache>,
    pub shutdown: CancellationToken,
    pub handle: JoinHandle<anyhow::Result<()>>,
}

impl TestServer {
    /// URL of the tracking route for `code`.
    pub fn track_url(&self, code: &str) -> String {
        format!("http://{}/api/shopee-tracker-optimized/{}", self.addr, code)
    }

    /// URL of an arbitrary path on the server.
    #[allow(dead_code)] // Used by other test files
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Config pointing both providers at mock servers.
pub fn mock_config(primary: &MockServer, fallback: &MockServer) -> Config {
    Config {
        log_level: LogLevel::Error,
        log_format: LogFormat::Plain,
        primary_url: format!("{}/track/", primary.uri()),
        fallback_url: format!("{}/api/shopee-tracker/", fallback.uri()),
        ..Default::default()
    }
}

/// Starts a server with the given cache TTL and short outbound timeouts.
pub async fn spawn_server(
    primary: &MockServer,
    fallback: &MockServer,
    ttl: Duration,
) -> TestServer {
    spawn_server_with_timeouts(
        primary,
        fallback,
        ttl,
        Duration::from_secs(2),
        Duration::from_secs(2),
    )
    .await
}

pub async fn spawn_server_with_timeouts(
    primary: &MockServer,
    fallback: &MockServer,
    ttl: Duration,
    primary_timeout: Duration,
    fallback_timeout: Duration,
) -> TestServer {
    let config = mock_config(primary, fallback);
    let cache = Arc::new(TrackingCache::with_ttl(ttl));
    let tracker = Arc::new(
        Tracker::with_timeouts(&config, Arc::clone(&cache), primary_timeout, fallback_timeout)
            .expect("Failed to build tracker"),
    );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    let shutdown = CancellationToken::new();
    let handle = tokio::spawn(serve_with_shutdown(listener, tracker, shutdown.clone()));

    TestServer {
        addr,
        cache,
        shutdown,
        handle,
    }
}

/// A tracking page with the given status and one item per `(day, time, message)`.
pub fn tracking_page(status: Option<&str>, items: &[(&str, &str, &str)]) -> String {
    let status_html = status
        .map(|s| format!(r#"<div class="order-status">{s}</div>"#))
        .unwrap_or_default();
    let items_html: String = items
        .iter()
        .map(|(day, time, message)| {
            format!(
                r#"<div class="nss-comp-tracking-item">
                     <div class="time"><span class="day">{day}</span><span class="second">{time}</span></div>
                     <div class="message">{message}</div>
                   </div>"#
            )
        })
        .collect();
    format!("<html><body>{status_html}{items_html}</body></html>")
}
