use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dt_core::{ArticleDetail, ArticleSource, ArticleSummary, Error, Result};

pub(crate) fn sample_detail(slug: &str) -> ArticleDetail {
    ArticleDetail {
        slug: slug.to_string(),
        title: slug.to_uppercase(),
        description: format!("About {}", slug),
        created_at: "2023-05-06T07:08:09Z".to_string(),
        readable_publish_date: "May 6".to_string(),
        reading_time_minutes: 3,
        public_reactions_count: 10,
        comments_count: 2,
        url: format!("https://dev.to/someone/{}", slug),
        body_markdown: format!("# {}\n\nBody of {}.\n", slug, slug),
    }
}

pub(crate) fn summary(slug: &str) -> ArticleSummary {
    ArticleSummary {
        slug: slug.to_string(),
        title: slug.to_uppercase(),
    }
}

/// In-memory source that can fail the listing or individual slugs and
/// records the highest number of concurrent detail requests.
#[derive(Default)]
pub(crate) struct MockSource {
    pub summaries: Vec<ArticleSummary>,
    pub failing: HashSet<String>,
    pub fail_listing: bool,
    pub delay: Duration,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
    pub detail_calls: AtomicUsize,
}

impl MockSource {
    pub fn new(slugs: &[&str]) -> Self {
        Self {
            summaries: slugs.iter().map(|s| summary(s)).collect(),
            ..Default::default()
        }
    }

    pub fn failing(mut self, slug: &str) -> Self {
        self.failing.insert(slug.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_failed_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }
}

#[async_trait]
impl ArticleSource for MockSource {
    async fn list_articles(&self, _username: &str) -> Result<Vec<ArticleSummary>> {
        if self.fail_listing {
            return Err(Error::Api {
                status: 503,
                url: "mock://articles/latest".to_string(),
            });
        }
        Ok(self.summaries.clone())
    }

    async fn fetch_article(&self, username: &str, slug: &str) -> Result<ArticleDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(slug) {
            return Err(Error::Api {
                status: 500,
                url: format!("mock://articles/{}/{}", username, slug),
            });
        }
        Ok(sample_detail(slug))
    }
}
