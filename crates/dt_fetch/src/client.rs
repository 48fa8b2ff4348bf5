use std::time::Duration;

use async_trait::async_trait;
use dt_core::{ArticleDetail, ArticleSource, ArticleSummary, Error, Result};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("devto-sync/", env!("CARGO_PKG_VERSION"));

/// Unauthenticated client for the dev.to articles API.
#[derive(Debug, Clone)]
pub struct DevToClient {
    http: reqwest::Client,
    api_base: Url,
}

impl DevToClient {
    pub fn new(api_base: &str, timeout: Option<Duration>) -> Result<Self> {
        let api_base = Url::parse(api_base)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", api_base, e)))?;
        if api_base.cannot_be_a_base() {
            return Err(Error::InvalidUrl(api_base.to_string()));
        }

        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            api_base,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(self.api_base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("GET {}", url);
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl ArticleSource for DevToClient {
    async fn list_articles(&self, username: &str) -> Result<Vec<ArticleSummary>> {
        let mut url = self.endpoint(&["articles", "latest"])?;
        url.query_pairs_mut().append_pair("username", username);
        self.get_json(url).await
    }

    async fn fetch_article(&self, username: &str, slug: &str) -> Result<ArticleDetail> {
        let url = self.endpoint(&["articles", username, slug])?;
        self.get_json(url).await
    }
}
