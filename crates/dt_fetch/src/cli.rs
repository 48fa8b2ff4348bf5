use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Subcommand};
use dt_core::config::{
    DEFAULT_CONCURRENCY, DEFAULT_FILE_PREFIX, DEFAULT_OUTPUT_DIR, DEFAULT_ROUTE_PREFIX,
};
use dt_core::{ArticleSource, Result, SyncConfig};

use crate::pipeline::Pipeline;

#[derive(Subcommand, Debug, Clone)]
pub enum SyncCommands {
    /// Fetch every published article and write it as a markdown file
    Sync(SyncOptions),
    /// Print the author's published articles without writing anything
    List,
}

impl Default for SyncCommands {
    fn default() -> Self {
        Self::Sync(SyncOptions::default())
    }
}

#[derive(Args, Debug, Clone)]
pub struct SyncOptions {
    /// Existing directory the markdown files are written into
    #[arg(long, short, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,
    /// Route prefix for the `slug` front-matter key
    #[arg(long, default_value = DEFAULT_ROUTE_PREFIX)]
    pub route_prefix: String,
    /// File name prefix for emitted files
    #[arg(long, default_value = DEFAULT_FILE_PREFIX)]
    pub file_prefix: String,
    /// Maximum number of article requests in flight
    #[arg(long, short, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,
    /// Delete previously emitted files for articles no longer listed
    #[arg(long)]
    pub prune_stale: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            route_prefix: DEFAULT_ROUTE_PREFIX.to_string(),
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            concurrency: DEFAULT_CONCURRENCY,
            prune_stale: false,
        }
    }
}

impl SyncOptions {
    pub fn apply(self, config: SyncConfig) -> SyncConfig {
        config
            .with_output_dir(self.output_dir)
            .with_route_prefix(self.route_prefix)
            .with_file_prefix(self.file_prefix)
            .with_concurrency(self.concurrency)
            .with_prune_stale(self.prune_stale)
    }
}

impl SyncCommands {
    /// Folds the subcommand's own options into the global config.
    pub fn apply(&self, config: SyncConfig) -> SyncConfig {
        match self {
            Self::Sync(options) => options.clone().apply(config),
            Self::List => config,
        }
    }
}

pub async fn handle_command(command: SyncCommands, config: SyncConfig) -> Result<()> {
    let pipeline = Pipeline::from_config(command.apply(config))?;
    let mut stdout = std::io::stdout();
    run_command(&command, &pipeline, &mut stdout).await
}

pub async fn run_command<S, W>(
    command: &SyncCommands,
    pipeline: &Pipeline<S>,
    out: &mut W,
) -> Result<()>
where
    S: ArticleSource,
    W: Write,
{
    match command {
        SyncCommands::Sync(_) => {
            pipeline.run().await?;
        }
        SyncCommands::List => {
            for summary in pipeline.list().await? {
                writeln!(out, "{}\t{}", summary.slug, summary.title)?;
            }
        }
    }
    Ok(())
}
