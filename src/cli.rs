use std::time::Duration;

use clap::Parser;

use crate::services::config::{normalize_base_url, AppConfig};

#[derive(Debug, Parser)]
#[command(name = "json-prompt")]
#[command(about = "Turn plain text into structured JSON prompts", long_about = None)]
pub struct Cli {
    /// Base URL of the conversion service (overrides JSON_PROMPT_API_URL)
    #[arg(long)]
    pub base_url: Option<String>,
    /// Number of conversions kept in history (overrides JSON_PROMPT_HISTORY_CAPACITY)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=100))]
    pub capacity: Option<u16>,
    /// Transport timeout in milliseconds, 0 disables (overrides JSON_PROMPT_HTTP_TIMEOUT_MS)
    #[arg(long)]
    pub timeout_ms: Option<u64>,
    /// Convert a single text, print the JSON and exit
    #[arg(long, value_name = "TEXT")]
    pub once: Option<String>,
}

impl Cli {
    pub fn apply_overrides(&self, mut config: AppConfig) -> AppConfig {
        if let Some(base_url) = self.base_url.as_deref() {
            let base_url = normalize_base_url(base_url);
            if !base_url.is_empty() {
                config.base_url = base_url;
            }
        }
        if let Some(capacity) = self.capacity {
            config.history_capacity = usize::from(capacity);
        }
        if let Some(ms) = self.timeout_ms {
            config.request_timeout = (ms > 0).then(|| Duration::from_millis(ms));
        }
        config
    }
}
