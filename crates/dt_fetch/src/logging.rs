use std::collections::VecDeque;
use std::sync::Once;
use tracing::Level;

static INIT: Once = Once::new();

/// Tags every message with a chain of prefixes, e.g. `[username] [slug]`.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    prefixes: VecDeque<String>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            prefixes: VecDeque::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: String) -> Self {
        self.prefixes.push_back(prefix);
        self
    }

    fn format(&self, message: &str) -> String {
        let prefix = self
            .prefixes
            .iter()
            .map(|p| format!("{} ", p))
            .collect::<String>();
        format!("{}{}", prefix, message)
    }

    pub fn info(&self, message: &str) {
        tracing::info!("{}", self.format(message));
    }

    pub fn error(&self, message: &str) {
        tracing::error!("{}", self.format(message));
    }

    pub fn warn(&self, message: &str) {
        tracing::warn!("{}", self.format(message));
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!("{}", self.format(message));
    }
}

/// `-q` wins over `-v`; each `-v` lowers the threshold one step.
pub fn level_for(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::WARN;
    }
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Installs the fmt subscriber on stderr, so stdout stays free for
/// command output. Later calls are no-ops.
pub fn init_logging(level: Level) -> Logger {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    });
    Logger::new()
}
