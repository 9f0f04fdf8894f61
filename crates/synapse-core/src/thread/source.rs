use async_trait::async_trait;

use super::model::Thread;
use crate::error::Result;
use crate::project::Project;

/// Materializes the historical threads of a project.
///
/// How thread records are produced (session files on disk, a remote index,
/// a fixture in tests) is an adapter concern; the application layer only
/// consumes the resulting records when the project selection changes.
#[async_trait]
pub trait ThreadSource: Send + Sync {
    /// Returns the historical threads recorded for `project`.
    async fn threads_for_project(&self, project: &Project) -> Result<Vec<Thread>>;
}
