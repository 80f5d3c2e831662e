//! Aggregation result types and the Event Store abstraction.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::event::{AiCrawl, CtaClick, PageView, Post};

/// Slug of the blog listing page. Views of it are tracked separately from
/// individual posts: excluded from article rankings and the author split,
/// counted as the `blogOverviewViews` scalar.
pub const OVERVIEW_SLUG: &str = "blog";

/// Authors whose views get their own column in the daily series. Posts by
/// anyone else still count toward the totals, just without a split column.
pub const TRACKED_AUTHORS: [&str; 2] = ["Tiago", "Vicente"];

/// Window applied when the `days` query parameter is omitted.
pub const DEFAULT_WINDOW_DAYS: u32 = 28;

/// "All time" on the dashboard is this fixed window, substituted by the
/// caller — there is no separate unbounded code path on the server.
pub const ALL_TIME_WINDOW_DAYS: u32 = 365;

/// Largest accepted window. Ten times the all-time preset leaves headroom
/// for ad-hoc queries while keeping the bucket vector small and the window
/// start far inside chrono's representable range.
pub const MAX_WINDOW_DAYS: u32 = 3650;

/// Cap on the top crawled-paths leaderboard.
pub const TOP_PATHS_LIMIT: usize = 10;

// ---------------------------------------------------------------------------
// View/CTA analytics (GET /api/analytics)
// ---------------------------------------------------------------------------

/// One day of the view series, zero-filled for days without events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyViews {
    pub date: String,
    pub views: i64,
    pub visitors: i64,
    pub tiago: i64,
    pub vicente: i64,
}

impl DailyViews {
    pub fn zero(date: NaiveDate) -> Self {
        Self {
            date: date.to_string(),
            views: 0,
            visitors: 0,
            tiago: 0,
            vicente: 0,
        }
    }
}

/// A grouped daily row as returned by the store, keyed by calendar day.
#[derive(Debug, Clone)]
pub struct DailyViewRow {
    pub date: NaiveDate,
    pub views: i64,
    pub visitors: i64,
    pub tiago: i64,
    pub vicente: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRow {
    /// `None` is the direct/unknown bucket, serialized as JSON `null`.
    pub referrer: Option<String>,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleRow {
    pub slug: String,
    pub title: String,
    pub author: String,
    pub views: i64,
    pub clicks: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSummary {
    pub total_views: i64,
    pub unique_visitors: i64,
    pub blog_overview_views: i64,
    pub cta_clicks: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsResponse {
    pub daily_data: Vec<DailyViews>,
    pub sources: Vec<SourceRow>,
    pub top_articles: Vec<ArticleRow>,
    pub summary: ViewSummary,
}

// ---------------------------------------------------------------------------
// AI-crawl analytics (GET /api/ai-analytics)
// ---------------------------------------------------------------------------

/// One day of the crawl series, split by the crawlers in
/// [`crate::crawler::SPLIT_CRAWLERS`] with a catch-all `other` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCrawls {
    pub date: String,
    pub crawls: i64,
    pub gptbot: i64,
    pub claudebot: i64,
    pub perplexitybot: i64,
    pub other: i64,
}

impl DailyCrawls {
    pub fn zero(date: NaiveDate) -> Self {
        Self {
            date: date.to_string(),
            crawls: 0,
            gptbot: 0,
            claudebot: 0,
            perplexitybot: 0,
            other: 0,
        }
    }
}

/// A grouped daily crawl row as returned by the store.
#[derive(Debug, Clone)]
pub struct DailyCrawlRow {
    pub date: NaiveDate,
    pub crawls: i64,
    pub gptbot: i64,
    pub claudebot: i64,
    pub perplexitybot: i64,
    pub other: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlerRow {
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawledArticleRow {
    pub slug: String,
    pub title: String,
    pub crawls: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathRow {
    pub path: String,
    pub count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlSummary {
    pub total_crawls: i64,
    pub unique_crawlers: i64,
    pub blog_crawls: i64,
    pub successful_crawls: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalyticsResponse {
    pub daily_data: Vec<DailyCrawls>,
    pub crawlers: Vec<CrawlerRow>,
    pub top_articles: Vec<CrawledArticleRow>,
    pub top_paths: Vec<PathRow>,
    pub summary: CrawlSummary,
}

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

/// The opaque relational Event Store.
///
/// Writes are single-row appends. Reads are grouped aggregates: each method
/// issues one `GROUP BY` + count query server-side rather than dumping rows
/// for in-process tallying, so results stay correct past row-fetch ceilings.
///
/// Every view/CTA read is scoped to *qualifying* events — events whose slug
/// is currently published, plus events on [`OVERVIEW_SLUG`]. The published
/// set is evaluated fresh inside each query (no caching), so a publish or
/// unpublish is reflected immediately. The engines additionally skip all
/// aggregate reads when zero posts are published.
#[async_trait::async_trait]
pub trait AnalyticsStore: Send + Sync + 'static {
    async fn insert_page_view(&self, view: &PageView) -> anyhow::Result<()>;

    async fn insert_cta_click(&self, click: &CtaClick) -> anyhow::Result<()>;

    async fn insert_ai_crawl(&self, crawl: &AiCrawl) -> anyhow::Result<()>;

    /// Current published posts (`draft = false`), fetched fresh per call.
    async fn published_posts(&self) -> anyhow::Result<Vec<Post>>;

    /// Qualifying views grouped by UTC calendar day, with per-author splits.
    /// Days without events are absent; the engine zero-fills them.
    async fn daily_view_counts(&self, start: DateTime<Utc>) -> anyhow::Result<Vec<DailyViewRow>>;

    /// Qualifying views grouped by normalized referrer, count descending
    /// (ties broken by referrer ascending, direct first).
    async fn source_counts(&self, start: DateTime<Utc>) -> anyhow::Result<Vec<SourceRow>>;

    /// One row per published post — zero-view posts included — with view and
    /// CTA-click counts, ordered by views descending then slug ascending.
    async fn article_stats(&self, start: DateTime<Utc>) -> anyhow::Result<Vec<ArticleRow>>;

    /// Scalar totals over qualifying views and published-slug CTA clicks.
    async fn view_summary(&self, start: DateTime<Utc>) -> anyhow::Result<ViewSummary>;

    /// All crawl events grouped by UTC calendar day, split per crawler.
    async fn daily_crawl_counts(&self, start: DateTime<Utc>)
        -> anyhow::Result<Vec<DailyCrawlRow>>;

    /// Crawl events grouped by crawler name, count descending then name.
    async fn crawler_counts(&self, start: DateTime<Utc>) -> anyhow::Result<Vec<CrawlerRow>>;

    /// One row per published post with its crawl count (zero included);
    /// the engine drops zero-crawl rows from the final leaderboard.
    async fn crawled_article_counts(
        &self,
        start: DateTime<Utc>,
    ) -> anyhow::Result<Vec<CrawledArticleRow>>;

    /// Crawled non-content paths (`slug IS NULL`), count descending, capped.
    async fn crawl_path_counts(
        &self,
        start: DateTime<Utc>,
        limit: usize,
    ) -> anyhow::Result<Vec<PathRow>>;

    /// Scalar crawl totals.
    async fn crawl_summary(&self, start: DateTime<Utc>) -> anyhow::Result<CrawlSummary>;

    /// Lightweight liveness check for the health endpoint.
    async fn ping(&self) -> anyhow::Result<()>;
}
