use std::collections::HashSet;
use std::path::PathBuf;

use dt_core::{ArticleSource, ArticleSummary, Error, Result, SyncConfig};
use tracing::info;

use crate::client::DevToClient;
use crate::fetch::fetch_details;
use crate::logging::Logger;
use crate::materialize::Materializer;

/// Outcome of one sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub listed: usize,
    pub written: Vec<PathBuf>,
    /// Slugs that were listed but not written
    pub failed: Vec<String>,
    pub pruned: Vec<PathBuf>,
}

/// List, fetch, and materialize one author's articles.
pub struct Pipeline<S> {
    source: S,
    config: SyncConfig,
    materializer: Materializer,
}

impl Pipeline<DevToClient> {
    pub fn from_config(config: SyncConfig) -> Result<Self> {
        config.validate()?;
        let client = DevToClient::new(&config.api_base, config.timeout)?;
        Ok(Self::new(client, config))
    }
}

impl<S: ArticleSource> Pipeline<S> {
    pub fn new(source: S, config: SyncConfig) -> Self {
        let materializer = Materializer::from_config(&config);
        Self {
            source,
            config,
            materializer,
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// The single hard-fail point: a failed listing aborts the run.
    pub async fn list(&self) -> Result<Vec<ArticleSummary>> {
        let username = &self.config.username;
        self.source.list_articles(username).await.map_err(|e| {
            Error::Listing(format!("failed to list articles for {}: {}", username, e))
        })
    }

    pub async fn run(&self) -> Result<SyncReport> {
        let logger = Logger::new().with_prefix(format!("[{}]", self.config.username));

        self.materializer.ensure_output_dir().await?;

        let summaries = self.list().await?;
        logger.info(&format!("📰 found {} published articles", summaries.len()));

        let details = fetch_details(
            &self.source,
            &self.config.username,
            &summaries,
            self.config.concurrency,
        )
        .await;

        let mut report = SyncReport {
            listed: summaries.len(),
            ..Default::default()
        };

        for (summary, detail) in summaries.iter().zip(details) {
            let Some(detail) = detail else {
                report.failed.push(summary.slug.clone());
                continue;
            };
            match self.materializer.write(&detail).await {
                Ok(path) => report.written.push(path),
                Err(Error::InvalidSlug(slug)) => {
                    logger.warn(&format!("⚠️ refusing to write article with slug {:?}", slug));
                    report.failed.push(summary.slug.clone());
                }
                Err(e) => return Err(e),
            }
        }

        if self.config.prune_stale {
            let listed: HashSet<String> = summaries.iter().map(|s| s.slug.clone()).collect();
            report.pruned = self.materializer.prune(&listed).await?;
        }

        info!(
            "✨ wrote {} of {} articles to {} ({} failed, {} pruned)",
            report.written.len(),
            report.listed,
            self.materializer.output_dir().display(),
            report.failed.len(),
            report.pruned.len()
        );

        Ok(report)
    }
}
