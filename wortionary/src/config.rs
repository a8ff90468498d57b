use std::env;
use std::time::Duration;

use clap::Parser;

use crate::storage::DEFAULT_DB_URL;

const DEFAULT_DICTIONARY_URL: &str = "https://api.dictionaryapi.dev/api/v2";

/// Look up English words from the terminal.
#[derive(Debug, Default, Parser)]
#[command(name = "wortionary", version, about)]
pub struct Args {
    /// Word to look up; starts the interactive prompt when omitted
    pub word: Vec<String>,

    /// Base URL of the definitions API
    #[arg(long)]
    pub dictionary_url: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// SQLite database holding the session, history and saved words
    #[arg(long)]
    pub database_url: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub dictionary_base_url: String,
    pub request_timeout: Duration,
    pub database_url: String,
    /// Artificial delay on every mock auth call
    pub auth_latency: Duration,
    pub suggestion_limit: usize,
    pub log_json: bool,
}

impl Config {
    pub fn new() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let dictionary_base_url =
            var("DICTIONARY_BASE_URL").unwrap_or_else(|| DEFAULT_DICTIONARY_URL.to_string());

        let request_timeout_ms = var("REQUEST_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(10_000); // 10 seconds default

        let database_url = var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DB_URL.to_string());

        let auth_latency_ms = var("AUTH_LATENCY_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        let suggestion_limit = var("SUGGESTION_LIMIT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(dictionary::catalog::DEFAULT_SUGGESTION_LIMIT);

        Config {
            dictionary_base_url,
            request_timeout: Duration::from_millis(request_timeout_ms),
            database_url,
            auth_latency: Duration::from_millis(auth_latency_ms),
            suggestion_limit,
            log_json: false,
        }
    }

    /// Command-line flags win over the environment.
    pub fn with_args(mut self, args: &Args) -> Self {
        if let Some(url) = &args.dictionary_url {
            self.dictionary_base_url = url.clone();
        }
        if let Some(timeout_ms) = args.timeout_ms {
            self.request_timeout = Duration::from_millis(timeout_ms);
        }
        if let Some(url) = &args.database_url {
            self.database_url = url.clone();
        }
        self.log_json |= args.log_json;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_vars(|_| None)
    }
}
