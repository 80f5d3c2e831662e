use std::sync::Arc;

use chrono::{Duration, Utc};
use sitepulse_core::analytics::AnalyticsStore;
use sitepulse_core::event::{AiCrawl, CtaClick, PageView, Post};
use sitepulse_duckdb::DuckDbBackend;

fn view(visitor: &str, slug: &str, referrer: Option<&str>) -> PageView {
    PageView::new(
        visitor.to_string(),
        slug.to_string(),
        referrer.map(str::to_string),
    )
}

fn click(visitor: &str, slug: &str) -> CtaClick {
    CtaClick::new(visitor.to_string(), slug.to_string())
}

fn crawl(name: &str, slug: Option<&str>, path: &str, status: u16) -> AiCrawl {
    AiCrawl::new(
        name,
        &format!("Mozilla/5.0 (compatible; {name}/1.0)"),
        slug.map(str::to_string),
        path.to_string(),
        status,
    )
}

async fn seeded_db() -> DuckDbBackend {
    let db = DuckDbBackend::open_in_memory().expect("db");
    db.seed_post("first-post", "First Post", "Tiago", false)
        .await
        .expect("seed");
    db.seed_post("second-post", "Second Post", "Vicente", false)
        .await
        .expect("seed");
    db.seed_post("wip-post", "Work In Progress", "Tiago", true)
        .await
        .expect("seed");
    db
}

#[tokio::test]
async fn daily_view_counts_filters_drafts_and_unknown_slugs() {
    let db = seeded_db().await;
    let start = Utc::now() - Duration::days(1);

    db.insert_page_view(&view("v1", "first-post", None))
        .await
        .expect("insert");
    db.insert_page_view(&view("v2", "first-post", None))
        .await
        .expect("insert");
    // Draft and never-published slugs must not count.
    db.insert_page_view(&view("v1", "wip-post", None))
        .await
        .expect("insert");
    db.insert_page_view(&view("v1", "deleted-post", None))
        .await
        .expect("insert");
    // The overview page qualifies without a posts row.
    db.insert_page_view(&view("v3", "blog", None))
        .await
        .expect("insert");

    let rows = db.daily_view_counts(start).await.expect("rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].views, 3);
    assert_eq!(rows[0].visitors, 3);
}

#[tokio::test]
async fn daily_view_counts_splits_by_author() {
    let db = seeded_db().await;
    let start = Utc::now() - Duration::days(1);

    db.insert_page_view(&view("v1", "first-post", None))
        .await
        .expect("insert");
    db.insert_page_view(&view("v1", "first-post", None))
        .await
        .expect("insert");
    db.insert_page_view(&view("v1", "second-post", None))
        .await
        .expect("insert");
    // Overview views count toward the total but belong to no author.
    db.insert_page_view(&view("v1", "blog", None))
        .await
        .expect("insert");

    let rows = db.daily_view_counts(start).await.expect("rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].views, 4);
    assert_eq!(rows[0].tiago, 2);
    assert_eq!(rows[0].vicente, 1);
}

#[tokio::test]
async fn source_counts_orders_and_buckets_direct() {
    let db = seeded_db().await;
    let start = Utc::now() - Duration::days(1);

    db.insert_page_view(&view("v1", "first-post", Some("google.com")))
        .await
        .expect("insert");
    db.insert_page_view(&view("v2", "first-post", Some("google.com")))
        .await
        .expect("insert");
    db.insert_page_view(&view("v3", "first-post", None))
        .await
        .expect("insert");
    db.insert_page_view(&view("v4", "blog", Some("news.ycombinator.com")))
        .await
        .expect("insert");
    // Referrer on a draft slug must not surface.
    db.insert_page_view(&view("v5", "wip-post", Some("bing.com")))
        .await
        .expect("insert");

    let rows = db.source_counts(start).await.expect("rows");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].referrer.as_deref(), Some("google.com"));
    assert_eq!(rows[0].count, 2);
    // Single-count tie: direct (NULL) sorts before any named referrer.
    assert_eq!(rows[1].referrer, None);
    assert_eq!(rows[2].referrer.as_deref(), Some("news.ycombinator.com"));
}

#[tokio::test]
async fn article_stats_includes_zero_view_posts() {
    let db = seeded_db().await;
    let start = Utc::now() - Duration::days(1);

    db.insert_page_view(&view("v1", "first-post", None))
        .await
        .expect("insert");
    db.insert_cta_click(&click("v1", "first-post"))
        .await
        .expect("insert");
    db.insert_cta_click(&click("v2", "first-post"))
        .await
        .expect("insert");

    let rows = db.article_stats(start).await.expect("rows");
    assert_eq!(rows.len(), 2, "drafts excluded, zero-view published kept");
    assert_eq!(rows[0].slug, "first-post");
    assert_eq!(rows[0].author, "Tiago");
    assert_eq!(rows[0].views, 1);
    assert_eq!(rows[0].clicks, 2);
    assert_eq!(rows[1].slug, "second-post");
    assert_eq!(rows[1].views, 0);
    assert_eq!(rows[1].clicks, 0);
}

#[tokio::test]
async fn view_summary_counts_qualifying_events_only() {
    let db = seeded_db().await;
    let start = Utc::now() - Duration::days(1);

    db.insert_page_view(&view("v1", "first-post", None))
        .await
        .expect("insert");
    db.insert_page_view(&view("v1", "blog", None))
        .await
        .expect("insert");
    db.insert_page_view(&view("v2", "blog", None))
        .await
        .expect("insert");
    db.insert_page_view(&view("v3", "deleted-post", None))
        .await
        .expect("insert");
    db.insert_cta_click(&click("v1", "first-post"))
        .await
        .expect("insert");
    db.insert_cta_click(&click("v1", "wip-post"))
        .await
        .expect("insert");

    let summary = db.view_summary(start).await.expect("summary");
    assert_eq!(summary.total_views, 3);
    assert_eq!(summary.unique_visitors, 2);
    assert_eq!(summary.blog_overview_views, 2);
    assert_eq!(summary.cta_clicks, 1, "clicks on drafts excluded");
}

#[tokio::test]
async fn window_start_excludes_older_events() {
    let db = seeded_db().await;

    let mut old = view("v1", "first-post", None);
    old.created_at = Utc::now() - Duration::days(40);
    db.insert_page_view(&old).await.expect("insert");
    db.insert_page_view(&view("v2", "first-post", None))
        .await
        .expect("insert");

    let start = Utc::now() - Duration::days(28);
    let summary = db.view_summary(start).await.expect("summary");
    assert_eq!(summary.total_views, 1);
    assert_eq!(summary.unique_visitors, 1);
}

#[tokio::test]
async fn daily_crawl_counts_split_known_crawlers() {
    let db = seeded_db().await;
    let start = Utc::now() - Duration::days(1);

    db.insert_ai_crawl(&crawl("GPTBot", Some("first-post"), "/blog/first-post", 200))
        .await
        .expect("insert");
    db.insert_ai_crawl(&crawl("GPTBot", None, "/about", 200))
        .await
        .expect("insert");
    db.insert_ai_crawl(&crawl("ClaudeBot", None, "/", 200))
        .await
        .expect("insert");
    db.insert_ai_crawl(&crawl("Bytespider", None, "/", 403))
        .await
        .expect("insert");

    let rows = db.daily_crawl_counts(start).await.expect("rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].crawls, 4);
    assert_eq!(rows[0].gptbot, 2);
    assert_eq!(rows[0].claudebot, 1);
    assert_eq!(rows[0].perplexitybot, 0);
    assert_eq!(rows[0].other, 1);
}

#[tokio::test]
async fn crawler_counts_break_ties_by_name() {
    let db = seeded_db().await;
    let start = Utc::now() - Duration::days(1);

    db.insert_ai_crawl(&crawl("PerplexityBot", None, "/", 200))
        .await
        .expect("insert");
    db.insert_ai_crawl(&crawl("ClaudeBot", None, "/", 200))
        .await
        .expect("insert");
    db.insert_ai_crawl(&crawl("GPTBot", None, "/", 200))
        .await
        .expect("insert");
    db.insert_ai_crawl(&crawl("GPTBot", None, "/about", 200))
        .await
        .expect("insert");

    let rows = db.crawler_counts(start).await.expect("rows");
    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["GPTBot", "ClaudeBot", "PerplexityBot"]);
    assert_eq!(rows[0].count, 2);
}

#[tokio::test]
async fn crawled_article_counts_cover_published_posts() {
    let db = seeded_db().await;
    let start = Utc::now() - Duration::days(1);

    db.insert_ai_crawl(&crawl(
        "ClaudeBot",
        Some("second-post"),
        "/blog/second-post",
        200,
    ))
    .await
    .expect("insert");
    db.insert_ai_crawl(&crawl("GPTBot", Some("wip-post"), "/blog/wip-post", 200))
        .await
        .expect("insert");

    let rows = db.crawled_article_counts(start).await.expect("rows");
    assert_eq!(rows.len(), 2, "one row per published post");
    assert_eq!(rows[0].slug, "second-post");
    assert_eq!(rows[0].crawls, 1);
    assert_eq!(rows[1].slug, "first-post");
    assert_eq!(rows[1].crawls, 0);
}

#[tokio::test]
async fn crawl_path_counts_cover_non_content_paths_with_limit() {
    let db = seeded_db().await;
    let start = Utc::now() - Duration::days(1);

    for _ in 0..3 {
        db.insert_ai_crawl(&crawl("GPTBot", None, "/about", 200))
            .await
            .expect("insert");
    }
    db.insert_ai_crawl(&crawl("ClaudeBot", None, "/", 200))
        .await
        .expect("insert");
    db.insert_ai_crawl(&crawl("ClaudeBot", None, "/contact", 200))
        .await
        .expect("insert");
    // Post crawls have a slug and belong to the article leaderboard instead.
    db.insert_ai_crawl(&crawl("GPTBot", Some("first-post"), "/blog/first-post", 200))
        .await
        .expect("insert");

    let rows = db.crawl_path_counts(start, 2).await.expect("rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].path, "/about");
    assert_eq!(rows[0].count, 3);
    assert_eq!(rows[1].path, "/", "tie broken by path ascending");
}

#[tokio::test]
async fn crawl_summary_totals() {
    let db = seeded_db().await;
    let start = Utc::now() - Duration::days(1);

    db.insert_ai_crawl(&crawl("GPTBot", Some("first-post"), "/blog/first-post", 200))
        .await
        .expect("insert");
    db.insert_ai_crawl(&crawl("GPTBot", Some("wip-post"), "/blog/wip-post", 200))
        .await
        .expect("insert");
    db.insert_ai_crawl(&crawl("ClaudeBot", None, "/", 301))
        .await
        .expect("insert");
    db.insert_ai_crawl(&crawl("Bytespider", None, "/admin", 404))
        .await
        .expect("insert");

    let summary = db.crawl_summary(start).await.expect("summary");
    assert_eq!(summary.total_crawls, 4);
    assert_eq!(summary.unique_crawlers, 3);
    assert_eq!(summary.blog_crawls, 1, "draft crawl excluded");
    assert_eq!(summary.successful_crawls, 3, "2xx and 3xx count");
}

#[tokio::test]
async fn backend_works_through_trait_object() {
    let db = Arc::new(seeded_db().await);
    let store: Arc<dyn AnalyticsStore> = db.clone();

    store
        .insert_page_view(&view("v1", "first-post", None))
        .await
        .expect("insert");
    store.ping().await.expect("ping");

    let posts: Vec<Post> = store.published_posts().await.expect("posts");
    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|p| !p.draft));

    let summary = store
        .view_summary(Utc::now() - Duration::days(1))
        .await
        .expect("summary");
    assert_eq!(summary.total_views, 1);
}
