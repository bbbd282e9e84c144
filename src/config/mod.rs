use std::time::Duration;

use crate::domain::ApiVersion;
use crate::errors::{DiscussItError, DiscussItResult};
use crate::services::filter::SignalThreshold;
use crate::sources::{hacker_news, reddit, slashdot, HttpSettings};

const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(12 * 60 * 60);

#[derive(Debug, Clone)]
pub struct Config {
    pub http: HttpSettings,
    pub cache_ttl: Duration,
    pub api_version: ApiVersion,
    pub strip_query: bool,
    pub threshold: SignalThreshold,
    pub reddit_url: String,
    pub hn_url: String,
    pub slashdot_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpSettings::default(),
            cache_ttl: DEFAULT_CACHE_TTL,
            api_version: ApiVersion::LATEST,
            strip_query: true,
            threshold: SignalThreshold::default(),
            reddit_url: reddit::DEFAULT_BASE_URL.to_string(),
            hn_url: hacker_news::DEFAULT_BASE_URL.to_string(),
            slashdot_url: slashdot::DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> DiscussItResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Unset keys keep their defaults.
    pub fn from_vars<F>(lookup: F) -> DiscussItResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(secs) = parse_var::<u64>(&lookup, "DISCUSSIT_TIMEOUT_SECS")? {
            if secs == 0 {
                return Err(DiscussItError::Config(
                    "DISCUSSIT_TIMEOUT_SECS must be greater than zero".to_string(),
                ));
            }
            config.http.timeout = Duration::from_secs(secs);
        }

        if let Some(secs) = parse_var::<u64>(&lookup, "DISCUSSIT_CACHE_TTL_SECS")? {
            config.cache_ttl = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup("DISCUSSIT_API_VERSION") {
            config.api_version = raw
                .parse()
                .map_err(|e| DiscussItError::Config(format!("DISCUSSIT_API_VERSION: {}", e)))?;
        }

        if let Some(raw) = lookup("DISCUSSIT_STRIP_QUERY") {
            config.strip_query = parse_bool("DISCUSSIT_STRIP_QUERY", &raw)?;
        }

        if let Some(min) = parse_var::<u64>(&lookup, "DISCUSSIT_MIN_COMMENTS")? {
            config.threshold.min_comments = min;
        }

        if let Some(min) = parse_var::<i64>(&lookup, "DISCUSSIT_MIN_RANK")? {
            config.threshold.min_rank = min;
        }

        if let Some(agent) = lookup("DISCUSSIT_USER_AGENT") {
            config.http.user_agent = agent;
        }

        if let Some(url) = lookup("DISCUSSIT_REDDIT_URL") {
            config.reddit_url = url;
        }

        if let Some(url) = lookup("DISCUSSIT_HN_URL") {
            config.hn_url = url;
        }

        if let Some(url) = lookup("DISCUSSIT_SLASHDOT_URL") {
            config.slashdot_url = url;
        }

        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> DiscussItResult<Option<T>> {
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| DiscussItError::Config(format!("{} has invalid value '{}'", key, raw))),
        None => Ok(None),
    }
}

fn parse_bool(key: &str, raw: &str) -> DiscussItResult<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(DiscussItError::Config(format!(
            "{} has invalid value '{}'",
            key, raw
        ))),
    }
}
