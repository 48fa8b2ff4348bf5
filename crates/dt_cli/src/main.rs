use clap::Parser;
use dt_core::config::{DEFAULT_API_BASE, DEFAULT_OUTPUT_DIR};
use dt_core::{Result, SyncConfig};
use dt_fetch::cli::{handle_command, SyncCommands};
use dt_fetch::logging::{init_logging, level_for};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// A duration like `30s`, `1m30s` or `750ms`. A bare number is seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total = Duration::ZERO;
        let mut chars = s.trim().chars().peekable();
        let mut parsed_any = false;

        while chars.peek().is_some() {
            let mut number = String::new();
            while let Some(c) = chars.peek().filter(|c| c.is_ascii_digit()) {
                number.push(*c);
                chars.next();
            }
            let mut unit = String::new();
            while let Some(c) = chars.peek().filter(|c| c.is_ascii_alphabetic()) {
                unit.push(*c);
                chars.next();
            }
            if number.is_empty() {
                return Err(format!("Invalid duration: {}", s));
            }

            let value = number
                .parse::<u64>()
                .map_err(|_| format!("Invalid number in duration: {}", number))?;
            let step = match unit.as_str() {
                "ms" => Some(Duration::from_millis(value)),
                "" | "s" => Some(Duration::from_secs(value)),
                "m" => value.checked_mul(60).map(Duration::from_secs),
                "h" => value.checked_mul(3600).map(Duration::from_secs),
                _ => return Err(format!("Invalid duration unit: {}", unit)),
            };
            total = step
                .and_then(|step| total.checked_add(step))
                .ok_or_else(|| "duration too large".to_string())?;
            parsed_any = true;
        }

        if !parsed_any {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(total))
    }
}

/// Fetch a dev.to author's articles into front-matter markdown files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// dev.to username whose published articles are fetched
    #[arg(long, short)]
    username: String,
    #[arg(long, default_value = DEFAULT_API_BASE)]
    api_base: String,
    /// Per-request timeout (e.g. 30s, 1m). Unset means no timeout.
    #[arg(long)]
    timeout: Option<HumanDuration>,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    #[arg(short, long)]
    quiet: bool,
    #[command(subcommand)]
    command: Option<SyncCommands>,
}

impl Cli {
    fn sync_config(&self) -> SyncConfig {
        let config =
            SyncConfig::new(self.username.clone(), DEFAULT_OUTPUT_DIR).with_api_base(&self.api_base);
        match &self.timeout {
            Some(timeout) => config.with_timeout(timeout.0),
            None => config,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(level_for(cli.verbose, cli.quiet));

    let config = cli.sync_config();
    debug!("🦗 using {} for {}", config.api_base, config.username);

    handle_command(cli.command.unwrap_or_default(), config).await
}
