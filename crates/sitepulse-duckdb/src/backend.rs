use std::sync::Arc;

use anyhow::Result;
use duckdb::Connection;
use tokio::sync::Mutex;
use tracing::info;

use sitepulse_core::event::{AiCrawl, CtaClick, PageView, Post};

use crate::schema::init_sql;

/// A DuckDB-backed Event Store.
///
/// DuckDB is single-writer: concurrent reads are fine, but concurrent writes
/// cause contention. We wrap the connection in `Arc<Mutex<_>>` so the async
/// runtime serialises access while the struct stays cheap to clone and share
/// across Axum handlers. Write volume here is one row per tracked request,
/// so there is no batching layer in front of it.
pub struct DuckDbBackend {
    pub(crate) conn: Arc<Mutex<Connection>>,
}

impl DuckDbBackend {
    /// Open (or create) a DuckDB database file at `path`.
    ///
    /// `memory_limit` is a DuckDB size string such as `"1GB"` or `"512MB"`.
    /// Runs the schema init SQL so all tables and indexes exist.
    pub fn open(path: &str, memory_limit: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(&init_sql(memory_limit))?;
        info!(
            "DuckDB opened at {} with memory_limit={}, threads=2",
            path, memory_limit
        );
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an **in-memory** DuckDB database.
    ///
    /// Intended for tests only — data is discarded when the struct is dropped.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(&init_sql("1GB"))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub async fn insert_page_view(&self, view: &PageView) -> Result<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            r#"INSERT INTO page_views (id, visitor_id, slug, referrer, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5)"#,
            duckdb::params![
                view.id,
                view.visitor_id,
                view.slug,
                view.referrer,
                view.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub async fn insert_cta_click(&self, click: &CtaClick) -> Result<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            r#"INSERT INTO cta_clicks (id, visitor_id, slug, created_at)
               VALUES (?1, ?2, ?3, ?4)"#,
            duckdb::params![
                click.id,
                click.visitor_id,
                click.slug,
                click.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub async fn insert_ai_crawl(&self, crawl: &AiCrawl) -> Result<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            r#"INSERT INTO ai_crawls (id, crawler_name, user_agent, slug, path, status_code, created_at)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"#,
            duckdb::params![
                crawl.id,
                crawl.crawler_name,
                crawl.user_agent,
                crawl.slug,
                crawl.path,
                i64::from(crawl.status_code),
                crawl.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// Current published posts, ordered by slug for deterministic output.
    pub async fn published_posts(&self) -> Result<Vec<Post>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT slug, title, author, draft FROM posts WHERE NOT draft ORDER BY slug",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(Post {
                slug: row.get(0)?,
                title: row.get(1)?,
                author: row.get(2)?,
                draft: row.get(3)?,
            })
        })?;
        let mut posts = Vec::new();
        for row in rows {
            posts.push(row?);
        }
        Ok(posts)
    }

    /// Execute `SELECT 1` as a lightweight liveness check.
    ///
    /// Called by the `/health` endpoint. Returns an error if the connection
    /// is unavailable (file locked, disk full, etc.).
    pub async fn ping(&self) -> Result<()> {
        let conn = self.conn.lock().await;
        conn.execute_batch("SELECT 1")?;
        Ok(())
    }

    /// Acquire the DuckDB connection lock for direct queries.
    ///
    /// Intended for integration tests that need to verify stored data.
    /// Production code should use the typed methods above.
    pub async fn conn_for_test(&self) -> tokio::sync::MutexGuard<'_, Connection> {
        self.conn.lock().await
    }

    /// Insert or update a post row.
    ///
    /// The CMS owns `posts` in production; this exists for test fixtures and
    /// local bootstrap. Safe to call repeatedly with the same slug.
    pub async fn seed_post(&self, slug: &str, title: &str, author: &str, draft: bool) -> Result<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            r#"INSERT INTO posts (slug, title, author, draft)
               VALUES (?1, ?2, ?3, ?4)
               ON CONFLICT (slug) DO UPDATE SET
                   title = EXCLUDED.title,
                   author = EXCLUDED.author,
                   draft = EXCLUDED.draft"#,
            duckdb::params![slug, title, author, draft],
        )?;
        Ok(())
    }
}

/// Format a window start for binding against a `TIMESTAMP` column.
pub(crate) fn bind_ts(ts: chrono::DateTime<chrono::Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}
