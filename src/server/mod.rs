//! HTTP server for the tracking endpoint.
//!
//! Every path is routed to the tracking handler, which reads only the last
//! path segment, e.g. `/api/shopee-tracker-optimized/BR257514355146J`.
//! All responses carry permissive CORS headers.

mod handlers;

use std::sync::Arc;

use anyhow::Context;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::HeaderValue;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::cache::TrackingCache;
use crate::config::{Config, CORS_ALLOW_HEADERS, CORS_ALLOW_METHODS, CORS_ALLOW_ORIGIN, EXAMPLE_PATH};
use crate::tracker::Tracker;

pub use handlers::track_handler;

/// Builds the router: one catch-all handler plus the CORS headers.
pub fn router(tracker: Arc<Tracker>) -> Router {
    Router::new()
        .fallback(track_handler)
        .with_state(tracker)
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(CORS_ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(CORS_ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(CORS_ALLOW_HEADERS),
        ))
}

/// Runs the server on `listener` until `shutdown` is cancelled.
///
/// The tracker's cache is cleared once the server has stopped.
pub async fn serve_with_shutdown(
    listener: TcpListener,
    tracker: Arc<Tracker>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let app = router(Arc::clone(&tracker));

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .context("Tracking server error")?;

    let dropped = tracker.cache().clear().await;
    log::info!("Server stopped, dropped {dropped} cached entries");
    Ok(())
}

/// Builds the cache and tracker from `config`, binds, and serves until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the tracker can't be initialized, the address can't be
/// bound, or the server fails.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let cache = Arc::new(TrackingCache::new());
    let tracker = Arc::new(
        Tracker::new(&config, cache).context("Failed to initialize tracker")?,
    );

    let addr = format!("{}:{}", config.bind, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind tracking server to {addr}"))?;

    log::info!("Tracking server listening on http://{addr}/");
    log::info!("  - Example: http://{addr}{EXAMPLE_PATH}");
    log::info!("  - Primary provider: {}", config.primary_url);
    log::info!("  - Fallback API: {}", config.fallback_url);

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                log::info!("Received Ctrl-C, shutting down");
                signal_token.cancel();
            }
            // Keep serving; the process can still be stopped by other signals
            Err(e) => log::warn!("Failed to listen for Ctrl-C: {e}"),
        }
    });

    serve_with_shutdown(listener, tracker, shutdown).await
}
