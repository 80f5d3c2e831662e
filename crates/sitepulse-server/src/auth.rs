use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};

use sitepulse_core::config::AuthMode;

use crate::{error::AppError, state::AppState};

/// Require a `Bearer` token matching the configured admin token.
///
/// Applied as a `route_layer` on the dashboard endpoints only; the tracking
/// endpoints stay open because the marketing site calls them anonymously.
/// With `SITEPULSE_AUTH=none` every request passes through.
///
/// Rejection happens before any store access, so an unauthenticated scan of
/// the dashboard endpoints never touches DuckDB.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let expected = match &state.config.auth_mode {
        AuthMode::None => return next.run(request).await,
        AuthMode::Token(token) => token,
    };

    let bearer = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match bearer {
        Some(token) if token == expected => next.run(request).await,
        _ => AppError::Unauthorized.into_response(),
    }
}
