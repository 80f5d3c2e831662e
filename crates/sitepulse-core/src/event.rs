use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/track`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackPageView {
    pub visitor_id: String,
    pub slug: String,
    /// Raw referrer as reported by the client; normalized server-side before storage.
    #[serde(default)]
    pub referrer: Option<String>,
}

/// Body of `POST /api/track-cta`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackCtaClick {
    pub visitor_id: String,
    pub slug: String,
}

/// A stored page-view row — mirrors the `page_views` table columns exactly.
///
/// Append-only: rows are never updated or deleted by this system. Draft and
/// since-deleted slugs are stored as-is; the published filter is applied at
/// read time by the aggregation queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageView {
    pub id: String,
    pub visitor_id: String,
    pub slug: String,
    /// Normalized source label. `None` means direct/unknown traffic.
    pub referrer: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PageView {
    pub fn new(visitor_id: String, slug: String, referrer: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            visitor_id,
            slug,
            referrer,
            created_at: Utc::now(),
        }
    }
}

/// A stored CTA-click row — mirrors the `cta_clicks` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CtaClick {
    pub id: String,
    pub visitor_id: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

impl CtaClick {
    pub fn new(visitor_id: String, slug: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            visitor_id,
            slug,
            created_at: Utc::now(),
        }
    }
}

/// A stored AI-crawl row — mirrors the `ai_crawls` table.
///
/// Written by the crawler-classifier middleware for every request whose
/// user-agent matches a known signature, regardless of response outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiCrawl {
    pub id: String,
    pub crawler_name: String,
    pub user_agent: String,
    /// Populated only when the request path maps to a blog post.
    pub slug: Option<String>,
    pub path: String,
    pub status_code: u16,
    pub created_at: DateTime<Utc>,
}

impl AiCrawl {
    pub fn new(
        crawler_name: &str,
        user_agent: &str,
        slug: Option<String>,
        path: String,
        status_code: u16,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            crawler_name: crawler_name.to_string(),
            user_agent: user_agent.to_string(),
            slug,
            path,
            status_code,
            created_at: Utc::now(),
        }
    }
}

/// A CMS post as the aggregator sees it. Reference data owned by the CMS;
/// this system only reads it (`draft = false` is the published predicate).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub author: String,
    pub draft: bool,
}
