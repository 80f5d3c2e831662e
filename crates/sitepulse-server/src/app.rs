use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use sitepulse_core::config::Config;

use crate::{auth, crawler, routes, state::AppState};

/// Construct the Axum [`Router`] with all routes and middleware attached.
///
/// Middleware is applied in outer-to-inner order (outermost runs first on
/// request, last on response):
///
/// 1. `CorsLayer` — the tracking endpoints are called cross-origin from the
///    marketing site, so browsers need CORS headers on every response,
///    including error responses produced further in.
/// 2. `TraceLayer` — structured request/response logging via `tracing`.
/// 3. AI-crawler logging — observes every route, so crawler hits on pages
///    this server does not serve still land in the crawl log via the 404.
///
/// The dashboard endpoints additionally carry the auth check as a
/// `route_layer`, which keeps `/health` and the tracking endpoints open.
pub fn build_app(state: Arc<AppState>) -> Router {
    let dashboard = Router::new()
        .route("/api/analytics", get(routes::analytics::analytics))
        .route("/api/ai-analytics", get(routes::ai_analytics::ai_analytics))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth::require_auth,
        ));

    Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/track", post(routes::track::track_page_view))
        .route("/api/track-cta", post(routes::track::track_cta_click))
        .merge(dashboard)
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            crawler::log_ai_crawlers,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&state.config))
        .with_state(state)
}

/// Permissive CORS unless `SITEPULSE_CORS_ORIGINS` names specific origins.
fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
