use serde::{Deserialize, Serialize};

/// Only the fields needed for counting are modelled; GitHub sends many more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub fork: bool,
}
