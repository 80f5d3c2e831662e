use anyhow::Result;
use chrono::{DateTime, Utc};

use sitepulse_core::analytics::{SourceRow, OVERVIEW_SLUG};

use crate::backend::bind_ts;
use crate::DuckDbBackend;

impl DuckDbBackend {
    /// Qualifying views grouped by normalized referrer.
    ///
    /// NULL is the direct/unknown bucket and is surfaced as `None` rather
    /// than a string label. Ties sort by referrer ascending with the direct
    /// bucket first, keeping output stable across identical runs.
    pub async fn source_counts(&self, start: DateTime<Utc>) -> Result<Vec<SourceRow>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            r#"
            SELECT v.referrer, COUNT(*) AS count
            FROM page_views v
            LEFT JOIN posts p ON p.slug = v.slug AND NOT p.draft
            WHERE v.created_at >= ?1
              AND (p.slug IS NOT NULL OR v.slug = ?2)
            GROUP BY v.referrer
            ORDER BY count DESC, COALESCE(v.referrer, '') ASC
            "#,
        )?;
        let rows = stmt.query_map(duckdb::params![bind_ts(start), OVERVIEW_SLUG], |row| {
            Ok(SourceRow {
                referrer: row.get::<_, Option<String>>(0)?,
                count: row.get(1)?,
            })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}
