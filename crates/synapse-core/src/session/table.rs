use super::model::{LiveSession, OutputLine, SessionState};

/// Maximum number of simultaneously live sessions permitted per project.
///
/// The cap is enforced at the command boundary (a launch command is
/// rejected before the supervisor is called), never by silently dropping
/// supervisor events.
pub const MAX_SESSIONS_PER_PROJECT: usize = 5;

/// Authoritative, queryable state for all sessions currently believed to be
/// running.
///
/// Sessions are kept in arrival order. Creation and removal are idempotent
/// so at-least-once event delivery is safe, and removing the selected
/// session clears the selection so readers never observe a dangling
/// pointer.
#[derive(Debug, Default)]
pub struct LiveSessionTable {
    sessions: Vec<LiveSession>,
    selected_id: Option<String>,
}

impl LiveSessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new session in the initial `Idle` state with an empty
    /// output buffer. Returns false (and changes nothing) if the id is
    /// already present.
    pub fn create(&mut self, session_id: impl Into<String>, project_id: impl Into<String>) -> bool {
        let session_id = session_id.into();
        if self.get(&session_id).is_some() {
            tracing::debug!("session {} already tracked, ignoring create", session_id);
            return false;
        }
        self.sessions.push(LiveSession::new(session_id, project_id));
        true
    }

    /// Removes a session, clearing the selection if it pointed at the
    /// removed id. Idempotent: removing an unknown id returns false.
    pub fn remove(&mut self, session_id: &str) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != session_id);
        let removed = self.sessions.len() != before;
        if removed && self.selected_id.as_deref() == Some(session_id) {
            self.selected_id = None;
        }
        removed
    }

    /// Transitions a session's lifecycle state unconditionally. Any state
    /// is reachable from any state; the external process is the source of
    /// truth. Returns false if the id is unknown.
    pub fn set_state(&mut self, session_id: &str, state: SessionState) -> bool {
        match self.sessions.iter_mut().find(|s| s.id == session_id) {
            Some(session) => {
                session.state = state;
                true
            }
            None => false,
        }
    }

    /// Appends an output line, preserving arrival order. Returns false if
    /// the id is unknown.
    pub fn append_output(&mut self, session_id: &str, line: OutputLine) -> bool {
        match self.sessions.iter_mut().find(|s| s.id == session_id) {
            Some(session) => {
                session.output.push(line);
                true
            }
            None => false,
        }
    }

    /// Truncates a session's output buffer. The lifecycle state is left
    /// untouched. Returns false if the id is unknown.
    pub fn clear_output(&mut self, session_id: &str) -> bool {
        match self.sessions.iter_mut().find(|s| s.id == session_id) {
            Some(session) => {
                session.output.clear();
                true
            }
            None => false,
        }
    }

    /// Sets the selection pointer. `None` always clears; for non-null ids
    /// the caller is responsible for only selecting existing entries
    /// (selection is driven by UI affordances bound to existing entries).
    pub fn select(&mut self, session_id: Option<String>) {
        self.selected_id = session_id;
    }

    /// Looks up a session by id.
    pub fn get(&self, session_id: &str) -> Option<&LiveSession> {
        self.sessions.iter().find(|s| s.id == session_id)
    }

    /// Number of live sessions associated with a project. Backs the
    /// capacity check at the command boundary.
    pub fn live_count(&self, project_id: &str) -> usize {
        self.sessions
            .iter()
            .filter(|s| s.project_id == project_id)
            .count()
    }

    /// Returns an owned, order-preserving snapshot of sessions, optionally
    /// filtered by project. This is the sole read path for presentation.
    pub fn snapshot(&self, project_id: Option<&str>) -> Vec<LiveSession> {
        self.sessions
            .iter()
            .filter(|s| project_id.is_none_or(|p| s.project_id == p))
            .cloned()
            .collect()
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
