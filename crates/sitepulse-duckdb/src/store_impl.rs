use async_trait::async_trait;
use chrono::{DateTime, Utc};

use sitepulse_core::analytics::{
    AnalyticsStore, ArticleRow, CrawlSummary, CrawledArticleRow, CrawlerRow, DailyCrawlRow,
    DailyViewRow, PathRow, SourceRow, ViewSummary,
};
use sitepulse_core::event::{AiCrawl, CtaClick, PageView, Post};

use crate::DuckDbBackend;

#[async_trait]
impl AnalyticsStore for DuckDbBackend {
    async fn insert_page_view(&self, view: &PageView) -> anyhow::Result<()> {
        DuckDbBackend::insert_page_view(self, view).await
    }

    async fn insert_cta_click(&self, click: &CtaClick) -> anyhow::Result<()> {
        DuckDbBackend::insert_cta_click(self, click).await
    }

    async fn insert_ai_crawl(&self, crawl: &AiCrawl) -> anyhow::Result<()> {
        DuckDbBackend::insert_ai_crawl(self, crawl).await
    }

    async fn published_posts(&self) -> anyhow::Result<Vec<Post>> {
        DuckDbBackend::published_posts(self).await
    }

    async fn daily_view_counts(&self, start: DateTime<Utc>) -> anyhow::Result<Vec<DailyViewRow>> {
        DuckDbBackend::daily_view_counts(self, start).await
    }

    async fn source_counts(&self, start: DateTime<Utc>) -> anyhow::Result<Vec<SourceRow>> {
        DuckDbBackend::source_counts(self, start).await
    }

    async fn article_stats(&self, start: DateTime<Utc>) -> anyhow::Result<Vec<ArticleRow>> {
        DuckDbBackend::article_stats(self, start).await
    }

    async fn view_summary(&self, start: DateTime<Utc>) -> anyhow::Result<ViewSummary> {
        DuckDbBackend::view_summary(self, start).await
    }

    async fn daily_crawl_counts(
        &self,
        start: DateTime<Utc>,
    ) -> anyhow::Result<Vec<DailyCrawlRow>> {
        DuckDbBackend::daily_crawl_counts(self, start).await
    }

    async fn crawler_counts(&self, start: DateTime<Utc>) -> anyhow::Result<Vec<CrawlerRow>> {
        DuckDbBackend::crawler_counts(self, start).await
    }

    async fn crawled_article_counts(
        &self,
        start: DateTime<Utc>,
    ) -> anyhow::Result<Vec<CrawledArticleRow>> {
        DuckDbBackend::crawled_article_counts(self, start).await
    }

    async fn crawl_path_counts(
        &self,
        start: DateTime<Utc>,
        limit: usize,
    ) -> anyhow::Result<Vec<PathRow>> {
        DuckDbBackend::crawl_path_counts(self, start, limit).await
    }

    async fn crawl_summary(&self, start: DateTime<Utc>) -> anyhow::Result<CrawlSummary> {
        DuckDbBackend::crawl_summary(self, start).await
    }

    async fn ping(&self) -> anyhow::Result<()> {
        DuckDbBackend::ping(self).await
    }
}
