use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use sitepulse_core::engine;

use crate::{error::AppError, routes::WindowQuery, state::AppState};

/// `GET /api/analytics?days=N` — the view/CTA dashboard payload.
///
/// Requires auth (applied as a route layer in `app.rs`). The response always
/// carries `days + 1` daily buckets, zero-filled; with zero published posts
/// every section is an empty or zeroed shell.
#[tracing::instrument(skip(state))]
pub async fn analytics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WindowQuery>,
) -> Result<impl IntoResponse, AppError> {
    let window_days = query.window_days()?;
    let response = engine::view_analytics(state.store.as_ref(), window_days, Utc::now()).await?;
    Ok(Json(response))
}
