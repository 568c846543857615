use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::github::source::EventSource;
use crate::models::{Event, GitHubUser, Repository};

pub struct GitHubClient {
    client: Client,
    base_url: String,
    per_page: u32,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = config.github_token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        } else {
            tracing::warn!("GITHUB_TOKEN not set, using unauthenticated requests");
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("devpulse/0.1"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
            per_page: config.per_page,
        })
    }

    pub async fn get_user(&self, username: &str) -> Result<GitHubUser> {
        validate_login(username)?;
        let url = format!("{}/users/{}", self.base_url, username);
        tracing::info!("Fetching user: {}", username);
        self.get_json(&url, username).await
    }

    /// First page of the public events feed; no pagination.
    pub async fn get_user_events(&self, username: &str) -> Result<Vec<Event>> {
        validate_login(username)?;
        let url = format!(
            "{}/users/{}/events?per_page={}",
            self.base_url, username, self.per_page
        );
        tracing::info!("Fetching events for: {}", username);
        self.get_json(&url, username).await
    }

    pub async fn get_user_repos(&self, username: &str) -> Result<Vec<Repository>> {
        validate_login(username)?;
        let url = format!(
            "{}/users/{}/repos?per_page={}",
            self.base_url, username, self.per_page
        );
        tracing::info!("Fetching repositories for: {}", username);
        self.get_json(&url, username).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, username: &str) -> Result<T> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let response = check_status(response, username).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl EventSource for GitHubClient {
    async fn user_events(&self, username: &str) -> Result<Vec<Event>> {
        self.get_user_events(username).await
    }

    async fn user_repositories(&self, username: &str) -> Result<Vec<Repository>> {
        self.get_user_repos(username).await
    }

    fn name(&self) -> &str {
        "github"
    }
}

/// Logins are ASCII letters, digits and hyphens, so they go into the path as-is.
fn validate_login(username: &str) -> Result<()> {
    let valid = !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidUsername(username.to_string()))
    }
}

async fn check_status(response: Response, username: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        return Err(Error::UserNotFound(username.to_string()));
    }

    if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
        if let Some(wait) = rate_limit_wait(response.headers(), chrono::Utc::now().timestamp()) {
            return Err(Error::RateLimited(wait));
        }
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::GitHubApi(format!(
        "Request for {} failed: {} - {}",
        username, status, body
    )))
}

/// Seconds until the quota resets, if the response says it is exhausted.
fn rate_limit_wait(headers: &header::HeaderMap, now_epoch: i64) -> Option<u64> {
    let header_num = |name: &str| -> Option<i64> {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
    };

    if header_num("x-ratelimit-remaining")? != 0 {
        return None;
    }

    let reset = header_num("x-ratelimit-reset").unwrap_or(now_epoch);
    Some((reset - now_epoch).max(0) as u64)
}
