//! In-process supervisor implementation.
//!
//! An in-memory, event-emitting [`ProcessSupervisor`] for development,
//! headless runs and integration tests. It keeps managed sessions in a
//! map, answers the full query surface, and pushes lifecycle/output facts
//! over the supervisor event channel the way the real process supervisor
//! would. No actual agent processes are spawned.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use synapse_core::error::{Result, SynapseError};
use synapse_core::project::Project;
use synapse_core::session::{
    OutputLine, OutputStream, SessionCreatedPayload, SessionOutputPayload,
    SessionStateChangedPayload, SessionState, SessionTerminatedPayload, SupervisorEvent,
};
use synapse_core::supervisor::{LiveSessionSummary, ProcessSupervisor};

use crate::session_index;

/// One managed session.
#[derive(Debug)]
struct ManagedSession {
    id: String,
    project_id: String,
    state: SessionState,
    created_at: String,
    output: Vec<OutputLine>,
    /// Input lines the UI sent to the session, in arrival order.
    input: Vec<String>,
}

/// In-memory, event-emitting process supervisor.
pub struct InProcessSupervisor {
    /// Directory whose immediate subdirectories are the known projects
    projects_root: PathBuf,
    sessions: Mutex<HashMap<String, ManagedSession>>,
    events: UnboundedSender<SupervisorEvent>,
}

impl InProcessSupervisor {
    /// Creates a supervisor over a projects root, emitting events into the
    /// given channel.
    pub fn new(projects_root: PathBuf, events: UnboundedSender<SupervisorEvent>) -> Self {
        Self {
            projects_root,
            sessions: Mutex::new(HashMap::new()),
            events,
        }
    }

    fn emit(&self, event: SupervisorEvent) {
        if self.events.send(event).is_err() {
            tracing::debug!("supervisor event channel closed, dropping event");
        }
    }

    fn project_dir(&self, project_id: &str) -> PathBuf {
        self.projects_root.join(project_id)
    }

    /// Reports a state change for a managed session and emits the matching
    /// `session-state-changed` event. Used by drivers simulating agent
    /// activity.
    pub async fn set_session_state(&self, session_id: &str, state: SessionState) -> Result<()> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SynapseError::not_found("session", session_id))?;
        session.state = state;
        drop(sessions);

        self.emit(SupervisorEvent::SessionStateChanged(
            SessionStateChangedPayload {
                session_id: session_id.to_string(),
                state,
            },
        ));
        Ok(())
    }

    /// Records an output line for a managed session and emits the matching
    /// `session-output` event.
    pub async fn push_output(
        &self,
        session_id: &str,
        text: impl Into<String>,
        stream: OutputStream,
    ) -> Result<()> {
        let line = OutputLine {
            timestamp: chrono::Utc::now().to_rfc3339(),
            text: text.into(),
            stream,
        };

        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SynapseError::not_found("session", session_id))?;
        session.output.push(line.clone());
        drop(sessions);

        self.emit(SupervisorEvent::SessionOutput(SessionOutputPayload {
            session_id: session_id.to_string(),
            line: line.text,
            timestamp: line.timestamp,
            stream: line.stream,
        }));
        Ok(())
    }

    /// Returns the input lines sent to a session so far.
    pub async fn session_input(&self, session_id: &str) -> Result<Vec<String>> {
        let sessions = self.sessions.lock().await;
        sessions
            .get(session_id)
            .map(|s| s.input.clone())
            .ok_or_else(|| SynapseError::not_found("session", session_id))
    }
}

#[async_trait]
impl ProcessSupervisor for InProcessSupervisor {
    async fn scan_projects(&self) -> Result<Vec<Project>> {
        let mut read_dir = match tokio::fs::read_dir(&self.projects_root).await {
            Ok(read_dir) => read_dir,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut projects = Vec::new();
        while let Some(entry) = read_dir.next_entry().await? {
            if entry.file_type().await?.is_dir() {
                projects.push(Project::new(entry.path()));
            }
        }
        projects.sort_by(|a, b| a.name.cmp(&b.name));
        tracing::debug!("scanned {} projects under {:?}", projects.len(), self.projects_root);
        Ok(projects)
    }

    async fn list_sessions(&self, project_id: &str) -> Result<Vec<String>> {
        let index = session_index::load(&self.project_dir(project_id)).await?;
        Ok(index.sessions.into_iter().map(|s| s.id).collect())
    }

    async fn rename_project(&self, old_id: &str, new_id: &str) -> Result<()> {
        let old_dir = self.project_dir(old_id);
        let new_dir = self.project_dir(new_id);

        if !tokio::fs::try_exists(&old_dir).await? {
            return Err(SynapseError::not_found("project", old_id));
        }
        if tokio::fs::try_exists(&new_dir).await? {
            return Err(SynapseError::supervisor(format!(
                "a project named '{}' already exists",
                new_id
            )));
        }

        tokio::fs::rename(&old_dir, &new_dir).await?;
        tracing::info!("renamed project directory {} -> {}", old_id, new_id);
        Ok(())
    }

    async fn spawn_session(&self, project_id: &str) -> Result<String> {
        if !tokio::fs::try_exists(self.project_dir(project_id)).await? {
            return Err(SynapseError::not_found("project", project_id));
        }

        let session_id = Uuid::new_v4().to_string();
        let session = ManagedSession {
            id: session_id.clone(),
            project_id: project_id.to_string(),
            state: SessionState::Idle,
            created_at: chrono::Utc::now().to_rfc3339(),
            output: Vec::new(),
            input: Vec::new(),
        };
        self.sessions.lock().await.insert(session_id.clone(), session);

        tracing::info!("spawned session {} for project {}", session_id, project_id);
        self.emit(SupervisorEvent::SessionCreated(SessionCreatedPayload {
            session_id: session_id.clone(),
            project_id: project_id.to_string(),
        }));
        Ok(session_id)
    }

    async fn terminate_session(&self, session_id: &str) -> Result<()> {
        if self.sessions.lock().await.remove(session_id).is_none() {
            return Err(SynapseError::not_found("session", session_id));
        }

        tracing::info!("terminated session {}", session_id);
        self.emit(SupervisorEvent::SessionTerminated(SessionTerminatedPayload {
            session_id: session_id.to_string(),
        }));
        Ok(())
    }

    async fn send_input(&self, session_id: &str, text: &str) -> Result<()> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SynapseError::not_found("session", session_id))?;
        session.input.push(text.to_string());
        Ok(())
    }

    async fn list_active_sessions(&self) -> Result<Vec<LiveSessionSummary>> {
        let sessions = self.sessions.lock().await;
        let mut summaries: Vec<LiveSessionSummary> = sessions
            .values()
            .map(|s| LiveSessionSummary {
                id: s.id.clone(),
                project_id: s.project_id.clone(),
                state: s.state,
                created_at: s.created_at.clone(),
                output_count: s.output.len(),
            })
            .collect();
        summaries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(summaries)
    }

    async fn get_session_output(&self, session_id: &str) -> Result<Vec<OutputLine>> {
        let sessions = self.sessions.lock().await;
        sessions
            .get(session_id)
            .map(|s| s.output.clone())
            .ok_or_else(|| SynapseError::not_found("session", session_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

    fn supervisor_in(
        dir: &std::path::Path,
    ) -> (InProcessSupervisor, UnboundedReceiver<SupervisorEvent>) {
        let (tx, rx) = unbounded_channel();
        (InProcessSupervisor::new(dir.to_path_buf(), tx), rx)
    }

    #[tokio::test]
    async fn test_scan_projects_lists_directories() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("beta")).unwrap();
        std::fs::create_dir(root.path().join("alpha")).unwrap();
        std::fs::write(root.path().join("stray-file"), "ignored").unwrap();

        let (supervisor, _rx) = supervisor_in(root.path());
        let projects = supervisor.scan_projects().await.unwrap();

        let names: Vec<_> = projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["alpha", "beta"]);
    }

    #[tokio::test]
    async fn test_scan_missing_root_is_empty() {
        let root = tempfile::tempdir().unwrap();
        let (supervisor, _rx) = supervisor_in(&root.path().join("nowhere"));
        assert!(supervisor.scan_projects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_spawn_emits_session_created() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("demo")).unwrap();

        let (supervisor, mut rx) = supervisor_in(root.path());
        let session_id = supervisor.spawn_session("demo").await.unwrap();

        match rx.try_recv().unwrap() {
            SupervisorEvent::SessionCreated(p) => {
                assert_eq!(p.session_id, session_id);
                assert_eq!(p.project_id, "demo");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_spawn_for_unknown_project_fails() {
        let root = tempfile::tempdir().unwrap();
        let (supervisor, mut rx) = supervisor_in(root.path());

        assert!(supervisor.spawn_session("ghost").await.is_err());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_state_and_output_round_trip() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("demo")).unwrap();

        let (supervisor, mut rx) = supervisor_in(root.path());
        let id = supervisor.spawn_session("demo").await.unwrap();
        rx.try_recv().unwrap(); // session-created

        supervisor
            .set_session_state(&id, SessionState::Working)
            .await
            .unwrap();
        supervisor
            .push_output(&id, "hello", OutputStream::Stdout)
            .await
            .unwrap();

        assert!(matches!(
            rx.try_recv().unwrap(),
            SupervisorEvent::SessionStateChanged(_)
        ));
        assert!(matches!(
            rx.try_recv().unwrap(),
            SupervisorEvent::SessionOutput(_)
        ));

        let output = supervisor.get_session_output(&id).await.unwrap();
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].text, "hello");

        let summaries = supervisor.list_active_sessions().await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].state, SessionState::Working);
        assert_eq!(summaries[0].output_count, 1);
    }

    #[tokio::test]
    async fn test_terminate_emits_and_forgets() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("demo")).unwrap();

        let (supervisor, mut rx) = supervisor_in(root.path());
        let id = supervisor.spawn_session("demo").await.unwrap();
        rx.try_recv().unwrap();

        supervisor.terminate_session(&id).await.unwrap();
        assert!(matches!(
            rx.try_recv().unwrap(),
            SupervisorEvent::SessionTerminated(_)
        ));
        assert!(supervisor.list_active_sessions().await.unwrap().is_empty());
        assert!(supervisor.terminate_session(&id).await.is_err());
    }

    #[tokio::test]
    async fn test_send_input_is_recorded() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("demo")).unwrap();

        let (supervisor, _rx) = supervisor_in(root.path());
        let id = supervisor.spawn_session("demo").await.unwrap();

        supervisor.send_input(&id, "run the tests").await.unwrap();
        assert_eq!(
            supervisor.session_input(&id).await.unwrap(),
            ["run the tests"]
        );
        assert!(supervisor.send_input("ghost", "x").await.is_err());
    }

    #[tokio::test]
    async fn test_rename_project_moves_directory() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("old-name")).unwrap();

        let (supervisor, _rx) = supervisor_in(root.path());
        supervisor.rename_project("old-name", "new-name").await.unwrap();

        assert!(!root.path().join("old-name").exists());
        assert!(root.path().join("new-name").exists());
    }

    #[tokio::test]
    async fn test_rename_refuses_collision_and_unknown() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir(root.path().join("a")).unwrap();
        std::fs::create_dir(root.path().join("b")).unwrap();

        let (supervisor, _rx) = supervisor_in(root.path());
        assert!(supervisor.rename_project("a", "b").await.is_err());
        assert!(supervisor.rename_project("ghost", "c").await.is_err());
        assert!(root.path().join("a").exists());
    }

    #[tokio::test]
    async fn test_list_sessions_reads_index() {
        let root = tempfile::tempdir().unwrap();
        let project = root.path().join("demo");
        std::fs::create_dir(&project).unwrap();
        std::fs::write(
            project.join("sessions-index.json"),
            r#"{ "sessions": [ { "id": "s1" }, { "id": "s2" } ] }"#,
        )
        .unwrap();

        let (supervisor, _rx) = supervisor_in(root.path());
        assert_eq!(
            supervisor.list_sessions("demo").await.unwrap(),
            ["s1", "s2"]
        );
        assert!(supervisor.list_sessions("empty").await.unwrap().is_empty());
    }
}
