//! Event ingestion router.
//!
//! Single entry point for all externally-sourced facts about session
//! lifecycle and output. The supervisor guarantees at-least-once delivery
//! with no ordering token, so the router leans on the table's idempotent
//! operations: duplicate creations and unknown terminations are silent
//! no-ops, while state changes and output for sessions the model has never
//! seen are dropped and counted as anomalies (the transport may reorder an
//! output line ahead of its `session-created`).

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc::UnboundedReceiver;

use synapse_core::session::SupervisorEvent;

use crate::context::AppContext;

/// Routes supervisor events into the live session table.
pub struct EventRouter {
    context: Arc<AppContext>,
    /// Events that referenced unknown sessions or failed to decode.
    anomalies: AtomicU64,
}

impl EventRouter {
    pub fn new(context: Arc<AppContext>) -> Self {
        Self {
            context,
            anomalies: AtomicU64::new(0),
        }
    }

    /// Applies one typed event to the model.
    ///
    /// By the time this returns the model reflects the event or has
    /// rejected it; the table is mutated under a single write-lock
    /// acquisition so readers never observe partial state.
    pub async fn handle(&self, event: SupervisorEvent) {
        match event {
            SupervisorEvent::SessionCreated(payload) => {
                let mut sessions = self.context.sessions.write().await;
                if sessions.create(payload.session_id.as_str(), payload.project_id.as_str()) {
                    tracing::info!(
                        "session {} created for project {}",
                        payload.session_id,
                        payload.project_id
                    );
                }
                // duplicate delivery of a creation is not an error
            }
            SupervisorEvent::SessionTerminated(payload) => {
                let mut sessions = self.context.sessions.write().await;
                if sessions.remove(&payload.session_id) {
                    tracing::info!("session {} terminated", payload.session_id);
                }
                // termination of an unknown id is a no-op
            }
            SupervisorEvent::SessionStateChanged(payload) => {
                let mut sessions = self.context.sessions.write().await;
                if !sessions.set_state(&payload.session_id, payload.state) {
                    drop(sessions);
                    self.count_anomaly("state change for unknown session", &payload.session_id);
                }
            }
            SupervisorEvent::SessionOutput(payload) => {
                let session_id = payload.session_id.clone();
                let mut sessions = self.context.sessions.write().await;
                if !sessions.append_output(&session_id, payload.into_line()) {
                    drop(sessions);
                    self.count_anomaly("output for unknown session", &session_id);
                }
            }
        }
    }

    /// Decodes a raw `(event name, payload)` pair and applies it.
    ///
    /// Unknown event names and undecodable payloads are dropped and
    /// counted; nothing at this boundary can corrupt the model.
    pub async fn handle_raw(&self, name: &str, payload: serde_json::Value) {
        match SupervisorEvent::decode(name, payload) {
            Ok(Some(event)) => self.handle(event).await,
            Ok(None) => {
                self.anomalies.fetch_add(1, Ordering::Relaxed);
                tracing::warn!("dropping unknown event '{}'", name);
            }
            Err(err) => {
                self.anomalies.fetch_add(1, Ordering::Relaxed);
                tracing::warn!("dropping undecodable '{}' event: {}", name, err);
            }
        }
    }

    /// Drains a supervisor event channel until it closes.
    ///
    /// Events are applied strictly in the order the channel delivers them,
    /// which is what preserves per-session output order.
    pub async fn run(&self, mut receiver: UnboundedReceiver<SupervisorEvent>) {
        while let Some(event) = receiver.recv().await {
            self.handle(event).await;
        }
        tracing::debug!("supervisor event channel closed");
    }

    /// Number of dropped events since construction.
    pub fn anomaly_count(&self) -> u64 {
        self.anomalies.load(Ordering::Relaxed)
    }

    fn count_anomaly(&self, reason: &str, session_id: &str) {
        self.anomalies.fetch_add(1, Ordering::Relaxed);
        tracing::warn!("dropping event ({}): {}", reason, session_id);
    }
}
