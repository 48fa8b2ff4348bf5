use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::{Error, Result};

pub const DEFAULT_API_BASE: &str = "https://dev.to/api";
pub const DEFAULT_OUTPUT_DIR: &str = "src/pages/posts";
pub const DEFAULT_ROUTE_PREFIX: &str = "/blog";
pub const DEFAULT_FILE_PREFIX: &str = "dev-to-";
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Everything one sync run needs. Nothing is read from the environment.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub username: String,
    pub api_base: String,
    pub output_dir: PathBuf,
    /// Prepended to the article slug in the `slug` front-matter key
    pub route_prefix: String,
    pub file_prefix: String,
    pub concurrency: usize,
    pub timeout: Option<Duration>,
    pub prune_stale: bool,
}

impl SyncConfig {
    pub fn new(username: impl Into<String>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            username: username.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            output_dir: output_dir.into(),
            route_prefix: DEFAULT_ROUTE_PREFIX.to_string(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            timeout: None,
            prune_stale: false,
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn with_route_prefix(mut self, route_prefix: impl Into<String>) -> Self {
        self.route_prefix = route_prefix.into();
        self
    }

    pub fn with_file_prefix(mut self, file_prefix: impl Into<String>) -> Self {
        self.file_prefix = file_prefix.into();
        self
    }

    /// Zero is raised to one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_prune_stale(mut self, prune_stale: bool) -> Self {
        self.prune_stale = prune_stale;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(Error::Config("username must not be empty".to_string()));
        }
        let base = Url::parse(&self.api_base)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", self.api_base, e)))?;
        if base.cannot_be_a_base() {
            return Err(Error::InvalidUrl(self.api_base.clone()));
        }
        if self.file_prefix.contains(&['/', '\\'][..]) {
            return Err(Error::Config(format!(
                "file prefix {:?} must not contain a path separator",
                self.file_prefix
            )));
        }
        Ok(())
    }
}
