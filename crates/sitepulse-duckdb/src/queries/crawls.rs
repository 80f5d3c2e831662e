//! AI-crawl aggregates: daily series, crawler leaderboard, per-article
//! crawls, top non-content paths, and scalar totals.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};

use sitepulse_core::analytics::{CrawlSummary, CrawledArticleRow, CrawlerRow, DailyCrawlRow, PathRow};

use crate::backend::bind_ts;
use crate::DuckDbBackend;

impl DuckDbBackend {
    /// Crawl counts per UTC calendar day, split by the named crawler trio
    /// with everything else folded into `other`.
    pub async fn daily_crawl_counts(&self, start: DateTime<Utc>) -> Result<Vec<DailyCrawlRow>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                CAST(CAST(created_at AS DATE) AS VARCHAR) AS day,
                COUNT(*) AS crawls,
                CAST(COALESCE(SUM(CASE WHEN lower(crawler_name) = 'gptbot' THEN 1 ELSE 0 END), 0) AS BIGINT) AS gptbot,
                CAST(COALESCE(SUM(CASE WHEN lower(crawler_name) = 'claudebot' THEN 1 ELSE 0 END), 0) AS BIGINT) AS claudebot,
                CAST(COALESCE(SUM(CASE WHEN lower(crawler_name) = 'perplexitybot' THEN 1 ELSE 0 END), 0) AS BIGINT) AS perplexitybot,
                CAST(COALESCE(SUM(CASE WHEN lower(crawler_name) NOT IN ('gptbot', 'claudebot', 'perplexitybot') THEN 1 ELSE 0 END), 0) AS BIGINT) AS other
            FROM ai_crawls
            WHERE created_at >= ?1
            GROUP BY day
            ORDER BY day
            "#,
        )?;
        let rows = stmt.query_map(duckdb::params![bind_ts(start)], |row| {
            let day: String = row.get(0)?;
            Ok((
                day,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, i64>(3)?,
                row.get::<_, i64>(4)?,
                row.get::<_, i64>(5)?,
            ))
        })?;

        let mut out = Vec::new();
        for row in rows {
            let (day, crawls, gptbot, claudebot, perplexitybot, other) = row?;
            out.push(DailyCrawlRow {
                date: NaiveDate::parse_from_str(&day, "%Y-%m-%d")?,
                crawls,
                gptbot,
                claudebot,
                perplexitybot,
                other,
            });
        }
        Ok(out)
    }

    /// Crawler leaderboard: count descending, name ascending on ties.
    pub async fn crawler_counts(&self, start: DateTime<Utc>) -> Result<Vec<CrawlerRow>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            r#"
            SELECT crawler_name, COUNT(*) AS count
            FROM ai_crawls
            WHERE created_at >= ?1
            GROUP BY crawler_name
            ORDER BY count DESC, crawler_name ASC
            "#,
        )?;
        let rows = stmt.query_map(duckdb::params![bind_ts(start)], |row| {
            Ok(CrawlerRow {
                name: row.get(0)?,
                count: row.get(1)?,
            })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Crawl counts per published post, zero rows included. The read-side
    /// engine drops the zero rows; keeping the catalog join here mirrors the
    /// article-stats query and keeps the published filter in one place.
    pub async fn crawled_article_counts(
        &self,
        start: DateTime<Utc>,
    ) -> Result<Vec<CrawledArticleRow>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            r#"
            SELECT
                p.slug,
                p.title,
                COALESCE(ac.crawls, 0) AS crawls
            FROM posts p
            LEFT JOIN (
                SELECT slug, COUNT(*) AS crawls
                FROM ai_crawls
                WHERE created_at >= ?1 AND slug IS NOT NULL
                GROUP BY slug
            ) ac ON ac.slug = p.slug
            WHERE NOT p.draft
            ORDER BY crawls DESC, p.slug ASC
            "#,
        )?;
        let rows = stmt.query_map(duckdb::params![bind_ts(start)], |row| {
            Ok(CrawledArticleRow {
                slug: row.get(0)?,
                title: row.get(1)?,
                crawls: row.get(2)?,
            })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Most-crawled non-content paths (events recorded without a slug).
    pub async fn crawl_path_counts(
        &self,
        start: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<PathRow>> {
        let conn = self.conn.lock().await;
        // limit is a trusted integer constant, not user input.
        let sql = format!(
            r#"
            SELECT path, COUNT(*) AS count
            FROM ai_crawls
            WHERE created_at >= ?1 AND slug IS NULL
            GROUP BY path
            ORDER BY count DESC, path ASC
            LIMIT {limit}
            "#
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(duckdb::params![bind_ts(start)], |row| {
            Ok(PathRow {
                path: row.get(0)?,
                count: row.get(1)?,
            })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }

    /// Scalar crawl totals. A crawl is "successful" when the served status
    /// was 2xx/3xx; `blog_crawls` counts crawls of currently published posts.
    pub async fn crawl_summary(&self, start: DateTime<Utc>) -> Result<CrawlSummary> {
        let conn = self.conn.lock().await;
        let start_str = bind_ts(start);

        let mut stmt = conn.prepare(
            r#"
            SELECT
                COUNT(*) AS total_crawls,
                COUNT(DISTINCT crawler_name) AS unique_crawlers,
                CAST(COALESCE(SUM(CASE WHEN status_code BETWEEN 200 AND 399 THEN 1 ELSE 0 END), 0) AS BIGINT) AS successful
            FROM ai_crawls
            WHERE created_at >= ?1
            "#,
        )?;
        let (total_crawls, unique_crawlers, successful_crawls) =
            stmt.query_row(duckdb::params![start_str], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            })?;

        let mut stmt = conn.prepare(
            r#"
            SELECT COUNT(*)
            FROM ai_crawls a
            JOIN posts p ON p.slug = a.slug AND NOT p.draft
            WHERE a.created_at >= ?1
            "#,
        )?;
        let blog_crawls: i64 = stmt.query_row(duckdb::params![start_str], |row| row.get(0))?;

        Ok(CrawlSummary {
            total_crawls,
            unique_crawlers,
            blog_crawls,
            successful_crawls,
        })
    }
}
