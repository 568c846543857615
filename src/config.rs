use crate::error::{Error, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub api_url: String,
    pub per_page: u32,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            api_url: DEFAULT_API_URL.to_string(),
            per_page: 30,
            timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let github_token = lookup("GITHUB_TOKEN").filter(|t| !t.trim().is_empty());

        let api_url = lookup("GITHUB_API_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);

        let per_page = match lookup("GITHUB_PER_PAGE") {
            Some(v) => v
                .parse::<u32>()
                .map_err(|_| Error::Config(format!("GITHUB_PER_PAGE must be a number, got {:?}", v)))?
                .clamp(1, 100),
            None => defaults.per_page,
        };

        let timeout = match lookup("HTTP_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(v.parse::<u64>().map_err(|_| {
                Error::Config(format!("HTTP_TIMEOUT_SECS must be a number, got {:?}", v))
            })?),
            None => defaults.timeout,
        };

        Ok(Self {
            github_token,
            api_url,
            per_page,
            timeout,
        })
    }
}
