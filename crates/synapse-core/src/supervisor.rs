//! Process supervisor boundary.
//!
//! The supervisor is the external component that actually spawns and kills
//! agent processes. The core consumes it through this request/response
//! trait and receives its push-side facts as [`SupervisorEvent`]s over a
//! channel; it never manages processes itself.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::project::Project;
use crate::session::{OutputLine, SessionState};

/// Summary of one live session as reported by the supervisor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveSessionSummary {
    pub id: String,
    pub project_id: String,
    pub state: SessionState,
    pub created_at: String,
    pub output_count: usize,
}

/// Request/response surface of the external process supervisor.
///
/// Lifecycle facts (creation, termination, state changes, output) arrive
/// separately as pushed [`SupervisorEvent`]s with at-least-once,
/// possibly-reordered delivery.
///
/// [`SupervisorEvent`]: crate::session::SupervisorEvent
#[async_trait]
pub trait ProcessSupervisor: Send + Sync {
    /// Discovers the projects currently present on disk.
    async fn scan_projects(&self) -> Result<Vec<Project>>;

    /// Lists the recorded session ids of a project.
    async fn list_sessions(&self, project_id: &str) -> Result<Vec<String>>;

    /// Renames a project directory. The new id doubles as the new
    /// directory name; callers apply the local registry rename only after
    /// this call succeeds.
    async fn rename_project(&self, old_id: &str, new_id: &str) -> Result<()>;

    /// Spawns a new agent session for a project and returns its id.
    async fn spawn_session(&self, project_id: &str) -> Result<String>;

    /// Terminates a running session.
    async fn terminate_session(&self, session_id: &str) -> Result<()>;

    /// Sends a line of user input to a running session.
    async fn send_input(&self, session_id: &str, text: &str) -> Result<()>;

    /// Lists all sessions the supervisor currently considers live.
    async fn list_active_sessions(&self) -> Result<Vec<LiveSessionSummary>>;

    /// Returns the accumulated output of a running session.
    async fn get_session_output(&self, session_id: &str) -> Result<Vec<OutputLine>>;
}
