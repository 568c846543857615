use async_trait::async_trait;
use crate::error::Result;
use crate::models::{Event, Repository};

/// Anything that can supply a user's recent activity.
///
/// Implementations translate transport and auth failures into `Error`
/// before analysis runs; the analysis core only ever sees a complete list.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn user_events(&self, username: &str) -> Result<Vec<Event>>;
    async fn user_repositories(&self, username: &str) -> Result<Vec<Repository>>;
    fn name(&self) -> &str;
}
