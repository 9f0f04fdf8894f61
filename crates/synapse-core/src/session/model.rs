use serde::{Deserialize, Serialize};

/// Lifecycle state of a live session.
///
/// There is deliberately no enforced transition graph: the external agent
/// process is the source of truth and the model must reflect whatever it
/// reports, even after anomalies. Termination is removal from the table,
/// not a state value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Working,
    Waiting,
}

/// Which stream an output line arrived on.
///
/// Serialized as `type` on the wire for compatibility with the supervisor's
/// output payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// A single line of session output. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputLine {
    /// Timestamp the supervisor attached to the line (ISO 8601 format)
    pub timestamp: String,
    /// Line text without trailing newline
    pub text: String,
    /// Source stream
    #[serde(rename = "type")]
    pub stream: OutputStream,
}

/// A currently-running external agent process tracked by the core.
///
/// `project_id` is a non-owning back-reference used only for filtering;
/// removing a session never cascades into the project registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveSession {
    /// Unique session identifier minted by the supervisor
    pub id: String,
    /// Owning project id (back-reference, not a foreign key)
    pub project_id: String,
    /// Current lifecycle state
    pub state: SessionState,
    /// Output lines in arrival order
    pub output: Vec<OutputLine>,
    /// Timestamp when the session entered the table (ISO 8601 format)
    pub created_at: String,
}

impl LiveSession {
    /// Creates a fresh session entry in the initial `Idle` state.
    pub fn new(id: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            state: SessionState::Idle,
            output: Vec::new(),
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
