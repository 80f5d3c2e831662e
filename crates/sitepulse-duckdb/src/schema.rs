/// DuckDB initialization SQL.
///
/// Executed once at database open time via `Connection::execute_batch`.
/// All statements use `IF NOT EXISTS` so they are safe to re-run on every
/// startup (idempotent).
///
/// `memory_limit` is passed at runtime from `Config.duckdb_memory_limit`
/// (env `SITEPULSE_DUCKDB_MEMORY`, default `"1GB"`). Always set an explicit
/// limit — the DuckDB default of 80% of system RAM is not acceptable for a
/// server process. `SET threads = 2` bounds the background pool for
/// single-writer embedded use.
///
/// The three event tables are append-only: rows are inserted by the tracking
/// endpoints and the crawler middleware, and only ever read back through
/// grouped aggregates. `posts` is reference data owned by the CMS; the
/// aggregation queries treat `draft = FALSE` as the published predicate.
pub fn init_sql(memory_limit: &str) -> String {
    format!(
        r#"SET memory_limit = '{memory_limit}';
SET threads = 2;

-- ===========================================
-- POSTS (CMS reference data)
-- ===========================================
CREATE TABLE IF NOT EXISTS posts (
    slug            VARCHAR PRIMARY KEY,
    title           VARCHAR NOT NULL,
    author          VARCHAR NOT NULL,
    draft           BOOLEAN NOT NULL DEFAULT TRUE,
    created_at      TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);

-- ===========================================
-- PAGE VIEWS
-- ===========================================
-- referrer is stored already normalized (hostname without leading www.);
-- NULL means direct/unknown traffic.
CREATE TABLE IF NOT EXISTS page_views (
    id              VARCHAR NOT NULL,
    visitor_id      VARCHAR NOT NULL,
    slug            VARCHAR NOT NULL,
    referrer        VARCHAR,
    created_at      TIMESTAMP NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_page_views_created ON page_views(created_at);
CREATE INDEX IF NOT EXISTS idx_page_views_slug    ON page_views(slug);

-- ===========================================
-- CTA CLICKS
-- ===========================================
CREATE TABLE IF NOT EXISTS cta_clicks (
    id              VARCHAR NOT NULL,
    visitor_id      VARCHAR NOT NULL,
    slug            VARCHAR NOT NULL,
    created_at      TIMESTAMP NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_cta_clicks_created ON cta_clicks(created_at);
CREATE INDEX IF NOT EXISTS idx_cta_clicks_slug    ON cta_clicks(slug);

-- ===========================================
-- AI CRAWLS
-- ===========================================
-- slug is populated only when the crawled path maps to a blog post.
CREATE TABLE IF NOT EXISTS ai_crawls (
    id              VARCHAR NOT NULL,
    crawler_name    VARCHAR NOT NULL,
    user_agent      VARCHAR NOT NULL,
    slug            VARCHAR,
    path            VARCHAR NOT NULL,
    status_code     INTEGER NOT NULL,
    created_at      TIMESTAMP NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_ai_crawls_created ON ai_crawls(created_at);
CREATE INDEX IF NOT EXISTS idx_ai_crawls_slug    ON ai_crawls(slug);
"#
    )
}
