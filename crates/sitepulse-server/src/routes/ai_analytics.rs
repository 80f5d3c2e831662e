use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use sitepulse_core::engine;

use crate::{error::AppError, routes::WindowQuery, state::AppState};

/// `GET /api/ai-analytics?days=N` — the AI-crawl dashboard payload.
///
/// Requires auth. Unlike the view dashboard, crawl data is site-wide: it is
/// reported even when no posts are published, since crawlers hit landing
/// pages regardless.
#[tracing::instrument(skip(state))]
pub async fn ai_analytics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WindowQuery>,
) -> Result<impl IntoResponse, AppError> {
    let window_days = query.window_days()?;
    let response = engine::ai_analytics(state.store.as_ref(), window_days, Utc::now()).await?;
    Ok(Json(response))
}
