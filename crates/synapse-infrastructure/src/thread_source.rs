//! JSONL-backed thread source.
//!
//! Historical threads are materialized from the session records a project
//! keeps on disk: `sessions-index.json` names the recorded sessions and
//! each `<session_id>.jsonl` file holds one JSON entry per line. Malformed
//! or unrecognized lines are skipped; a missing record still yields a
//! (message-less) thread so the index stays the source of truth for what
//! exists.

use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use synapse_core::error::Result;
use synapse_core::project::Project;
use synapse_core::thread::{AgentState, AgentStatus, Thread, ThreadSource};

use crate::session_index::{self, SessionRef};

/// One line of a session record.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RecordEntry {
    /// A conversation message; only the count matters here.
    Message {},
    /// An agent announcing itself or updating its status.
    Agent {
        id: String,
        name: String,
        status: AgentStatus,
    },
    /// The session stopped to wait for user input.
    UserInputRequired {},
    Waiting {},
}

/// Materializes threads from per-project JSONL session records.
#[derive(Debug, Default)]
pub struct JsonlThreadSource;

impl JsonlThreadSource {
    pub fn new() -> Self {
        Self
    }

    async fn read_thread(&self, project_dir: &Path, session: &SessionRef) -> Thread {
        let record_path = project_dir.join(format!("{}.jsonl", session.id));
        let mut agents: Vec<AgentState> = Vec::new();
        let mut message_count = 0;
        let mut waiting = false;

        match tokio::fs::read_to_string(&record_path).await {
            Ok(content) => {
                for line in content.lines() {
                    if line.trim().is_empty() {
                        continue;
                    }
                    // Skip malformed lines and entry types we don't know.
                    let Ok(entry) = serde_json::from_str::<RecordEntry>(line) else {
                        continue;
                    };
                    match entry {
                        RecordEntry::Message {} => message_count += 1,
                        RecordEntry::Agent { id, name, status } => {
                            match agents.iter_mut().find(|a| a.id == id) {
                                Some(agent) => {
                                    agent.name = name;
                                    agent.status = status;
                                }
                                None => agents.push(AgentState { id, name, status }),
                            }
                        }
                        RecordEntry::UserInputRequired {} | RecordEntry::Waiting {} => {
                            waiting = true;
                        }
                    }
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no record file for session {}", session.id);
            }
            Err(err) => {
                tracing::warn!("could not read record for session {}: {}", session.id, err);
            }
        }

        if waiting {
            for agent in &mut agents {
                agent.status = AgentStatus::Waiting;
            }
        }

        Thread {
            id: session.id.clone(),
            session_id: session.id.clone(),
            name: session.name.clone().unwrap_or_else(|| session.id.clone()),
            agents,
            message_count,
        }
    }
}

#[async_trait]
impl ThreadSource for JsonlThreadSource {
    async fn threads_for_project(&self, project: &Project) -> Result<Vec<Thread>> {
        let index = session_index::load(&project.path).await?;

        let mut threads = Vec::with_capacity(index.sessions.len());
        for session in &index.sessions {
            threads.push(self.read_thread(&project.path, session).await);
        }
        tracing::debug!("loaded {} threads for project {}", threads.len(), project.id);
        Ok(threads)
    }
}
