use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public profile fields kept from `GET /users/{username}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GitHubUser {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub public_repos: u32,
    #[serde(default)]
    pub followers: u32,
    pub created_at: DateTime<Utc>,
}

impl GitHubUser {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.login)
    }
}
