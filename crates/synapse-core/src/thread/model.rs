use serde::{Deserialize, Serialize};

/// Status of a single agent within a historical thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Idle,
    Running,
    Waiting,
}

/// An agent that participated in a thread. Sub-entity of [`Thread`] with no
/// independent lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    pub id: String,
    pub name: String,
    pub status: AgentStatus,
}

/// A historical (non-running) conversation record within a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    /// Unique thread identifier
    pub id: String,
    /// Identifier of the recorded session this thread came from
    pub session_id: String,
    /// Human-readable thread name
    pub name: String,
    /// Agents that participated, in recorded order
    pub agents: Vec<AgentState>,
    /// Number of conversation messages in the record
    pub message_count: usize,
}
