//! Shared application context.
//!
//! All four collections live in one explicitly constructed context object
//! whose lifetime is owned by the embedding process; nothing here is
//! ambient global state. The event router and the command use case are the
//! only two writers, and the per-collection write locks serialize them so
//! every mutation is applied atomically with respect to readers.

use tokio::sync::RwLock;

use synapse_core::notification::{Notification, NotificationKind, NotificationQueue};
use synapse_core::project::{Project, ProjectRegistry};
use synapse_core::session::{LiveSession, LiveSessionTable};
use synapse_core::thread::{Thread, ThreadArchive};

/// The in-memory model shared between the event router, the command use
/// case and the presentation layer's snapshot queries.
#[derive(Debug, Default)]
pub struct AppContext {
    pub projects: RwLock<ProjectRegistry>,
    pub threads: RwLock<ThreadArchive>,
    pub sessions: RwLock<LiveSessionTable>,
    pub notifications: RwLock<NotificationQueue>,
}

impl AppContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises a user-visible notification.
    pub async fn notify(
        &self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Notification {
        self.notifications.write().await.add(kind, title, message)
    }

    // ============================================================================
    // Snapshot queries (the sole read path for presentation)
    // ============================================================================

    /// Owned snapshot of all known projects, in registration order.
    pub async fn project_snapshot(&self) -> Vec<Project> {
        self.projects.read().await.snapshot()
    }

    /// Owned snapshot of the selected project's historical threads.
    pub async fn thread_snapshot(&self) -> Vec<Thread> {
        self.threads.read().await.snapshot()
    }

    /// Owned snapshot of live sessions, optionally filtered by project.
    pub async fn session_snapshot(&self, project_id: Option<&str>) -> Vec<LiveSession> {
        self.sessions.read().await.snapshot(project_id)
    }

    /// Owned snapshot of live sessions for the currently selected project,
    /// or all sessions when no project is selected.
    pub async fn selected_session_snapshot(&self) -> Vec<LiveSession> {
        let selected = self.projects.read().await.selected_id().map(String::from);
        self.sessions.read().await.snapshot(selected.as_deref())
    }

    /// Owned snapshot of notifications, most-recent-first.
    pub async fn notification_snapshot(&self) -> Vec<Notification> {
        self.notifications.read().await.snapshot()
    }

    pub async fn selected_project_id(&self) -> Option<String> {
        self.projects.read().await.selected_id().map(String::from)
    }

    pub async fn selected_session_id(&self) -> Option<String> {
        self.sessions.read().await.selected_id().map(String::from)
    }

    pub async fn selected_thread_id(&self) -> Option<String> {
        self.threads.read().await.selected_id().map(String::from)
    }
}
