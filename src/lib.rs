pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod analysis;

pub use config::Config;
pub use error::{Error, Result};
pub use github::{EventSource, GitHubClient};
pub use analysis::{analyze, summarize, AnalysisPipeline};
