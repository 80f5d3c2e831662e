//! Daily view series and scalar view summary.
//!
//! Both queries share the qualifying-event predicate: the view's slug is
//! currently published (`LEFT JOIN posts ... NOT draft` matched) or it is the
//! overview sentinel. Draft and deleted slugs fall out of the join and are
//! excluded. The join runs fresh per call so publish state is never stale.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};

use sitepulse_core::analytics::{DailyViewRow, ViewSummary, OVERVIEW_SLUG, TRACKED_AUTHORS};

use crate::backend::bind_ts;
use crate::DuckDbBackend;

impl DuckDbBackend {
    /// One grouped row per UTC calendar day that saw qualifying views.
    ///
    /// The author split comes from the joined post row, so overview-page
    /// views (no post) count toward views/visitors but no author column.
    pub async fn daily_view_counts(&self, start: DateTime<Utc>) -> Result<Vec<DailyViewRow>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                CAST(CAST(v.created_at AS DATE) AS VARCHAR) AS day,
                COUNT(*) AS views,
                COUNT(DISTINCT v.visitor_id) AS visitors,
                CAST(COALESCE(SUM(CASE WHEN lower(p.author) = lower(?3) THEN 1 ELSE 0 END), 0) AS BIGINT) AS tiago,
                CAST(COALESCE(SUM(CASE WHEN lower(p.author) = lower(?4) THEN 1 ELSE 0 END), 0) AS BIGINT) AS vicente
            FROM page_views v
            LEFT JOIN posts p ON p.slug = v.slug AND NOT p.draft
            WHERE v.created_at >= ?1
              AND (p.slug IS NOT NULL OR v.slug = ?2)
            GROUP BY day
            ORDER BY day
            "#,
        )?;
        let rows = stmt.query_map(
            duckdb::params![
                bind_ts(start),
                OVERVIEW_SLUG,
                TRACKED_AUTHORS[0],
                TRACKED_AUTHORS[1],
            ],
            |row| {
                let day: String = row.get(0)?;
                Ok((
                    day,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, i64>(3)?,
                    row.get::<_, i64>(4)?,
                ))
            },
        )?;

        let mut out = Vec::new();
        for row in rows {
            let (day, views, visitors, tiago, vicente) = row?;
            out.push(DailyViewRow {
                date: NaiveDate::parse_from_str(&day, "%Y-%m-%d")?,
                views,
                visitors,
                tiago,
                vicente,
            });
        }
        Ok(out)
    }

    /// Scalar totals: qualifying views, distinct visitors across them,
    /// overview-page views, and CTA clicks on published slugs.
    pub async fn view_summary(&self, start: DateTime<Utc>) -> Result<ViewSummary> {
        let conn = self.conn.lock().await;
        let start_str = bind_ts(start);

        let mut stmt = conn.prepare(
            r#"
            SELECT
                COUNT(*) AS total_views,
                COUNT(DISTINCT v.visitor_id) AS unique_visitors,
                CAST(COALESCE(SUM(CASE WHEN v.slug = ?3 THEN 1 ELSE 0 END), 0) AS BIGINT) AS overview_views
            FROM page_views v
            LEFT JOIN posts p ON p.slug = v.slug AND NOT p.draft
            WHERE v.created_at >= ?1
              AND (p.slug IS NOT NULL OR v.slug = ?2)
            "#,
        )?;
        let (total_views, unique_visitors, blog_overview_views) = stmt.query_row(
            duckdb::params![start_str, OVERVIEW_SLUG, OVERVIEW_SLUG],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            },
        )?;

        let mut stmt = conn.prepare(
            r#"
            SELECT COUNT(*)
            FROM cta_clicks c
            JOIN posts p ON p.slug = c.slug AND NOT p.draft
            WHERE c.created_at >= ?1
            "#,
        )?;
        let cta_clicks: i64 = stmt.query_row(duckdb::params![start_str], |row| row.get(0))?;

        Ok(ViewSummary {
            total_views,
            unique_visitors,
            blog_overview_views,
            cta_clicks,
        })
    }
}
