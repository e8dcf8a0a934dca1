//! HTTP server for the scraping endpoints
//!
//! Provides /health_check and /api/v1/scrap/ endpoints.

use crate::error::AppError;
use crate::extract::extract_opengraph;
use crate::fetch::PageFetcher;
use crate::types::ScrapResult;
use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use expiring_cache::ExpiringCache;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Shared state for the HTTP server
pub struct ServerState {
    pub cache: ExpiringCache<ScrapResult>,
    pub fetcher: PageFetcher,
    /// Static value injected into every response's `type` field
    pub page_type: String,
    pub cache_ttl: Duration,
}

impl ServerState {
    pub fn new(
        cache: ExpiringCache<ScrapResult>,
        fetcher: PageFetcher,
        page_type: String,
        cache_ttl: Duration,
    ) -> Self {
        Self {
            cache,
            fetcher,
            page_type,
            cache_ttl,
        }
    }
}

pub type SharedState = Arc<ServerState>;

/// Query parameters for the scrap endpoint
#[derive(Deserialize)]
pub struct ScrapParams {
    url: Option<String>,
}

/// Create the HTTP router
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health_check", get(health_check))
        .route("/api/v1/scrap/", get(scrap))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server, running until a shutdown signal arrives
pub async fn start_server(state: SharedState, port: u16) -> std::io::Result<()> {
    let router = create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}

/// Liveness endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Scrape Open Graph metadata for the given url, serving cached results
/// for recently-seen URLs
async fn scrap(
    State(state): State<SharedState>,
    Query(params): Query<ScrapParams>,
) -> Result<Json<ScrapResult>, AppError> {
    let raw = params
        .url
        .ok_or_else(|| AppError::Decode("missing url query parameter".to_string()))?;
    let url = urlencoding::decode(&raw)
        .map_err(|e| AppError::Decode(e.to_string()))?
        .into_owned();

    let mut result = match state.cache.get(&url).await {
        Some(cached) => cached,
        None => {
            info!(url = %url, "Not cached, fetching");
            let body = state.fetcher.fetch(&url).await?;
            let result = extract_opengraph(&body);
            state.cache.put(&url, result.clone(), state.cache_ttl).await;
            result
        }
    };

    // The type field always reflects current config, even on a cache hit.
    result.og_type = Some(state.page_type.clone());
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn create_test_state() -> SharedState {
        Arc::new(ServerState::new(
            ExpiringCache::new(),
            PageFetcher::new(),
            "article".to_string(),
            Duration::from_secs(120),
        ))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/health_check")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"OK");
    }

    #[tokio::test]
    async fn test_scrap_missing_url_param() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/scrap/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], -20000);
        assert!(json["message"].as_str().unwrap().contains("url"));
    }

    #[tokio::test]
    async fn test_scrap_fetch_failure_leaves_cache_empty() {
        let state = create_test_state();
        let router = create_router(state.clone());

        // Nothing listens on port 9, so the fetch is refused
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/scrap/?url=http%3A%2F%2F127.0.0.1%3A9%2F")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], -20000);

        // A failed fetch must not populate the cache
        assert!(state.cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_scrap_cache_hit_skips_fetch_and_overrides_type() {
        let state = create_test_state();

        // Pre-populate the cache; the fetcher would fail if consulted.
        state
            .cache
            .put(
                "http://a.test/",
                ScrapResult {
                    title: Some("Cached page".to_string()),
                    url: Some("http://a.test/".to_string()),
                    og_type: Some("stale-type".to_string()),
                    image: None,
                    description: None,
                    author: None,
                },
                Duration::from_secs(120),
            )
            .await;

        let router = create_router(state.clone());
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/scrap/?url=http%3A%2F%2Fa.test%2F")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["title"], "Cached page");
        // The cached type is never surfaced; config wins.
        assert_eq!(json["type"], "article");
        assert!(json["image"].is_null());
    }

    #[tokio::test]
    async fn test_scrap_expired_entry_is_a_miss() {
        let state = create_test_state();
        state
            .cache
            .put(
                "http://gone.test/",
                ScrapResult {
                    title: Some("Old".to_string()),
                    url: None,
                    og_type: None,
                    image: None,
                    description: None,
                    author: None,
                },
                Duration::ZERO,
            )
            .await;

        let router = create_router(state);
        // The entry is expired, so the handler falls through to a real
        // fetch of gone.test, which cannot resolve.
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/scrap/?url=http%3A%2F%2Fgone.test%2F")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
