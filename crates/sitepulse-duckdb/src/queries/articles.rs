use anyhow::Result;
use chrono::{DateTime, Utc};

use sitepulse_core::analytics::ArticleRow;

use crate::backend::bind_ts;
use crate::DuckDbBackend;

impl DuckDbBackend {
    /// Per-article view and CTA-click counts over the window.
    ///
    /// Starts from the published catalog, not the event stream: a published
    /// post with zero views in the window still gets a row. The overview
    /// sentinel is not a post, so it never appears here.
    pub async fn article_stats(&self, start: DateTime<Utc>) -> Result<Vec<ArticleRow>> {
        let conn = self.conn.lock().await;
        let start_str = bind_ts(start);
        let mut stmt = conn.prepare(
            r#"
            SELECT
                p.slug,
                p.title,
                p.author,
                COALESCE(vc.views, 0) AS views,
                COALESCE(cc.clicks, 0) AS clicks
            FROM posts p
            LEFT JOIN (
                SELECT slug, COUNT(*) AS views
                FROM page_views
                WHERE created_at >= ?1
                GROUP BY slug
            ) vc ON vc.slug = p.slug
            LEFT JOIN (
                SELECT slug, COUNT(*) AS clicks
                FROM cta_clicks
                WHERE created_at >= ?2
                GROUP BY slug
            ) cc ON cc.slug = p.slug
            WHERE NOT p.draft
            ORDER BY views DESC, p.slug ASC
            "#,
        )?;
        let rows = stmt.query_map(duckdb::params![start_str, start_str], |row| {
            Ok(ArticleRow {
                slug: row.get(0)?,
                title: row.get(1)?,
                author: row.get(2)?,
                views: row.get(3)?,
                clicks: row.get(4)?,
            })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}
