use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use sitepulse_core::{
    event::{CtaClick, PageView, TrackCtaClick, TrackPageView},
    referrer::normalize_referrer,
};

use crate::{error::AppError, state::AppState};

/// `POST /api/track` — record one page view.
///
/// No auth: the marketing site calls this anonymously from the browser.
/// The raw referrer is normalized to a bare host before storage; the
/// published check happens at read time, so views of drafts are stored as-is.
///
/// Responds `200` with `{ "success": true }`.
#[tracing::instrument(skip(state, payload))]
pub async fn track_page_view(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TrackPageView>,
) -> Result<impl IntoResponse, AppError> {
    validate_id_and_slug(&payload.visitor_id, &payload.slug)?;

    let referrer = normalize_referrer(payload.referrer.as_deref());
    let view = PageView::new(payload.visitor_id, payload.slug, referrer);
    state.store.insert_page_view(&view).await?;

    Ok(Json(json!({ "success": true })))
}

/// `POST /api/track-cta` — record one CTA click. Same contract as `/api/track`
/// minus the referrer.
#[tracing::instrument(skip(state, payload))]
pub async fn track_cta_click(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TrackCtaClick>,
) -> Result<impl IntoResponse, AppError> {
    validate_id_and_slug(&payload.visitor_id, &payload.slug)?;

    let click = CtaClick::new(payload.visitor_id, payload.slug);
    state.store.insert_cta_click(&click).await?;

    Ok(Json(json!({ "success": true })))
}

fn validate_id_and_slug(visitor_id: &str, slug: &str) -> Result<(), AppError> {
    if visitor_id.trim().is_empty() {
        return Err(AppError::BadRequest("visitor_id is required".to_string()));
    }
    if slug.trim().is_empty() {
        return Err(AppError::BadRequest("slug is required".to_string()));
    }
    Ok(())
}
