use async_trait::async_trait;
use crate::types::{ArticleDetail, ArticleSummary};
use crate::Result;

#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// List an author's published articles, newest first
    async fn list_articles(&self, username: &str) -> Result<Vec<ArticleSummary>>;

    /// Fetch the full article for one slug
    async fn fetch_article(&self, username: &str, slug: &str) -> Result<ArticleDetail>;
}
