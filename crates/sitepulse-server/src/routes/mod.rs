pub mod ai_analytics;
pub mod analytics;
pub mod health;
pub mod track;

use serde::Deserialize;

use sitepulse_core::analytics::{DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};

use crate::error::AppError;

/// Shared query string for both aggregation endpoints.
#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    /// Kept as a raw string so a malformed value is a 400, not a silently
    /// applied default.
    pub days: Option<String>,
}

impl WindowQuery {
    /// Missing → the 28-day default. `0` is valid and yields a single
    /// (today-only) bucket. Anything past [`MAX_WINDOW_DAYS`] is a 400; the
    /// dashboard's "all time" preset sends 365, well inside the bound.
    pub fn window_days(&self) -> Result<u32, AppError> {
        let days = match self.days.as_deref() {
            None => DEFAULT_WINDOW_DAYS,
            Some(raw) => raw
                .parse()
                .map_err(|_| AppError::BadRequest(format!("invalid days parameter: {raw:?}")))?,
        };
        if days > MAX_WINDOW_DAYS {
            return Err(AppError::BadRequest(format!(
                "days must be at most {MAX_WINDOW_DAYS}"
            )));
        }
        Ok(days)
    }
}
