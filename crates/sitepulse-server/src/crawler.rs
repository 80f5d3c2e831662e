use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use sitepulse_core::crawler::{blog_slug_from_path, classify_user_agent};
use sitepulse_core::event::AiCrawl;

use crate::state::AppState;

/// Record requests made by known AI crawlers.
///
/// Applied as the outermost layer so every route is observed. The user-agent
/// is classified before the request is handled; the crawl row is written
/// after, carrying the status code the crawler actually received. The insert
/// runs on a detached task: a slow or failing store write never delays the
/// crawler's response, and a failure is logged and dropped.
pub async fn log_ai_crawlers(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    let path = request.uri().path().to_string();

    let crawler_name = match classify_user_agent(&user_agent) {
        Some(name) if !is_static_asset(&path) => name,
        _ => return next.run(request).await,
    };

    let response = next.run(request).await;
    let status = response.status().as_u16();

    let crawl = AiCrawl::new(
        crawler_name,
        &user_agent,
        blog_slug_from_path(&path),
        path,
        status,
    );
    let store = Arc::clone(&state.store);
    tokio::spawn(async move {
        if let Err(e) = store.insert_ai_crawl(&crawl).await {
            warn!(crawler = %crawl.crawler_name, path = %crawl.path, error = %e,
                "Failed to record AI crawl");
        }
    });

    response
}

/// Asset requests are noise in the crawl log; only page fetches are recorded.
fn is_static_asset(path: &str) -> bool {
    const ASSET_EXTENSIONS: [&str; 11] = [
        ".svg", ".png", ".jpg", ".jpeg", ".gif", ".webp", ".ico", ".css", ".js", ".woff",
        ".woff2",
    ];
    let lower = path.to_ascii_lowercase();
    lower == "/favicon.ico" || ASSET_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}
