//! The two read-side aggregation engines.
//!
//! Both resolve an inclusive `now - days` window, pre-seed one zero bucket
//! per calendar day (so days without events render as zero instead of being
//! absent), then merge in grouped counts fetched from the store. Any store
//! failure after the bucket shell is built aborts the whole call — no
//! partial payload is ever synthesized from a subset of the grouped queries.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::analytics::{
    AiAnalyticsResponse, AnalyticsResponse, AnalyticsStore, DailyCrawls, DailyViews,
    MAX_WINDOW_DAYS, TOP_PATHS_LIMIT,
};

/// Every calendar day from `start` to `end` inclusive.
pub fn day_buckets(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut day = start;
    while day <= end {
        days.push(day);
        day += Duration::days(1);
    }
    days
}

/// Resolve the inclusive window start, rejecting windows past
/// [`MAX_WINDOW_DAYS`]. The bound keeps the bucket vector bounded and the
/// subtraction safely inside chrono's representable range; without it a large
/// enough `window_days` would overflow `DateTime` arithmetic.
fn window_start(window_days: u32, now: DateTime<Utc>) -> anyhow::Result<DateTime<Utc>> {
    if window_days > MAX_WINDOW_DAYS {
        anyhow::bail!("window of {window_days} days exceeds the {MAX_WINDOW_DAYS}-day maximum");
    }
    Ok(now - Duration::days(i64::from(window_days)))
}

/// Build the `GET /api/analytics` payload for the trailing `window_days` window.
///
/// The published set is fetched fresh on every call; when it is empty the
/// qualifying event set is empty by definition and the zero-filled shell is
/// returned without touching the event tables — which is also what makes
/// `blogOverviewViews` report 0 while nothing is published.
pub async fn view_analytics(
    store: &dyn AnalyticsStore,
    window_days: u32,
    now: DateTime<Utc>,
) -> anyhow::Result<AnalyticsResponse> {
    let start = window_start(window_days, now)?;
    let buckets = day_buckets(start.date_naive(), now.date_naive());

    let published = store.published_posts().await?;
    if published.is_empty() {
        return Ok(AnalyticsResponse {
            daily_data: buckets.into_iter().map(DailyViews::zero).collect(),
            sources: Vec::new(),
            top_articles: Vec::new(),
            summary: Default::default(),
        });
    }

    let by_day: HashMap<NaiveDate, _> = store
        .daily_view_counts(start)
        .await?
        .into_iter()
        .map(|row| (row.date, row))
        .collect();

    let daily_data = buckets
        .into_iter()
        .map(|day| match by_day.get(&day) {
            Some(row) => DailyViews {
                date: day.to_string(),
                views: row.views,
                visitors: row.visitors,
                tiago: row.tiago,
                vicente: row.vicente,
            },
            None => DailyViews::zero(day),
        })
        .collect();

    let sources = store.source_counts(start).await?;
    let top_articles = store.article_stats(start).await?;
    let summary = store.view_summary(start).await?;

    Ok(AnalyticsResponse {
        daily_data,
        sources,
        top_articles,
        summary,
    })
}

/// Build the `GET /api/ai-analytics` payload.
///
/// Crawl traffic is site-wide, so the daily series, crawler leaderboard and
/// top paths are not scoped to the published set — only the per-article
/// leaderboard and the `blogCrawls` scalar join against it.
pub async fn ai_analytics(
    store: &dyn AnalyticsStore,
    window_days: u32,
    now: DateTime<Utc>,
) -> anyhow::Result<AiAnalyticsResponse> {
    let start = window_start(window_days, now)?;
    let buckets = day_buckets(start.date_naive(), now.date_naive());

    let by_day: HashMap<NaiveDate, _> = store
        .daily_crawl_counts(start)
        .await?
        .into_iter()
        .map(|row| (row.date, row))
        .collect();

    let daily_data = buckets
        .into_iter()
        .map(|day| match by_day.get(&day) {
            Some(row) => DailyCrawls {
                date: day.to_string(),
                crawls: row.crawls,
                gptbot: row.gptbot,
                claudebot: row.claudebot,
                perplexitybot: row.perplexitybot,
                other: row.other,
            },
            None => DailyCrawls::zero(day),
        })
        .collect();

    let crawlers = store.crawler_counts(start).await?;

    // Catalog-complete at the store, then drop zero-crawl posts here —
    // unlike top articles by views, which keeps its zero rows.
    let top_articles = store
        .crawled_article_counts(start)
        .await?
        .into_iter()
        .filter(|row| row.crawls > 0)
        .collect();

    let top_paths = store.crawl_path_counts(start, TOP_PATHS_LIMIT).await?;
    let summary = store.crawl_summary(start).await?;

    Ok(AiAnalyticsResponse {
        daily_data,
        crawlers,
        top_articles,
        top_paths,
        summary,
    })
}
