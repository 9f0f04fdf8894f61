use serde::{Deserialize, Serialize};

use super::model::{OutputLine, OutputStream, SessionState};
use crate::error::Result;

/// Event name for session creation.
pub const SESSION_CREATED: &str = "session-created";
/// Event name for session termination.
pub const SESSION_TERMINATED: &str = "session-terminated";
/// Event name for lifecycle state changes.
pub const SESSION_STATE_CHANGED: &str = "session-state-changed";
/// Event name for output lines.
pub const SESSION_OUTPUT: &str = "session-output";

/// Payload of a `session-created` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreatedPayload {
    pub session_id: String,
    pub project_id: String,
}

/// Payload of a `session-terminated` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTerminatedPayload {
    pub session_id: String,
}

/// Payload of a `session-state-changed` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStateChangedPayload {
    pub session_id: String,
    pub state: SessionState,
}

/// Payload of a `session-output` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionOutputPayload {
    pub session_id: String,
    pub line: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub stream: OutputStream,
}

impl SessionOutputPayload {
    /// Converts the payload into the output line it carries.
    pub fn into_line(self) -> OutputLine {
        OutputLine {
            timestamp: self.timestamp,
            text: self.line,
            stream: self.stream,
        }
    }
}

/// A typed lifecycle/output event pushed by the process supervisor.
///
/// Delivery is at-least-once and possibly reordered; handlers must stay
/// idempotent for duplicates and defensive for events that reference
/// sessions the model has not (yet) seen.
#[derive(Debug, Clone)]
pub enum SupervisorEvent {
    SessionCreated(SessionCreatedPayload),
    SessionTerminated(SessionTerminatedPayload),
    SessionStateChanged(SessionStateChangedPayload),
    SessionOutput(SessionOutputPayload),
}

impl SupervisorEvent {
    /// Decodes a raw `(event name, payload)` pair into a typed event.
    ///
    /// Returns `Ok(None)` for event names the core does not know; decoding
    /// failures of known events surface as serialization errors.
    pub fn decode(name: &str, payload: serde_json::Value) -> Result<Option<Self>> {
        let event = match name {
            SESSION_CREATED => Some(Self::SessionCreated(serde_json::from_value(payload)?)),
            SESSION_TERMINATED => Some(Self::SessionTerminated(serde_json::from_value(payload)?)),
            SESSION_STATE_CHANGED => {
                Some(Self::SessionStateChanged(serde_json::from_value(payload)?))
            }
            SESSION_OUTPUT => Some(Self::SessionOutput(serde_json::from_value(payload)?)),
            _ => None,
        };
        Ok(event)
    }

    /// Returns the wire name of this event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SessionCreated(_) => SESSION_CREATED,
            Self::SessionTerminated(_) => SESSION_TERMINATED,
            Self::SessionStateChanged(_) => SESSION_STATE_CHANGED,
            Self::SessionOutput(_) => SESSION_OUTPUT,
        }
    }

    /// Returns the session id the event refers to.
    pub fn session_id(&self) -> &str {
        match self {
            Self::SessionCreated(p) => &p.session_id,
            Self::SessionTerminated(p) => &p.session_id,
            Self::SessionStateChanged(p) => &p.session_id,
            Self::SessionOutput(p) => &p.session_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_session_created() {
        let payload = json!({ "session_id": "s1", "project_id": "p1" });
        let event = SupervisorEvent::decode(SESSION_CREATED, payload)
            .unwrap()
            .unwrap();
        match event {
            SupervisorEvent::SessionCreated(p) => {
                assert_eq!(p.session_id, "s1");
                assert_eq!(p.project_id, "p1");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_decode_output_uses_type_field_for_stream() {
        let payload = json!({
            "session_id": "s1",
            "line": "compiling...",
            "timestamp": "2026-01-01T00:00:00Z",
            "type": "stdout"
        });
        let event = SupervisorEvent::decode(SESSION_OUTPUT, payload)
            .unwrap()
            .unwrap();
        match event {
            SupervisorEvent::SessionOutput(p) => {
                assert_eq!(p.stream, OutputStream::Stdout);
                assert_eq!(p.into_line().text, "compiling...");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_decode_unknown_event_name_is_none() {
        let result = SupervisorEvent::decode("session-exploded", serde_json::json!({}));
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn test_decode_malformed_payload_is_error() {
        let result = SupervisorEvent::decode(SESSION_CREATED, serde_json::json!({ "nope": 1 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_decode_state_change_state_values() {
        for (wire, expected) in [
            ("idle", SessionState::Idle),
            ("working", SessionState::Working),
            ("waiting", SessionState::Waiting),
        ] {
            let payload = json!({ "session_id": "s1", "state": wire });
            let event = SupervisorEvent::decode(SESSION_STATE_CHANGED, payload)
                .unwrap()
                .unwrap();
            match event {
                SupervisorEvent::SessionStateChanged(p) => assert_eq!(p.state, expected),
                other => panic!("unexpected event: {:?}", other),
            }
        }
    }
}
