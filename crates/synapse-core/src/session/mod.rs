//! Live session domain module.
//!
//! This module contains the event-sourced model of currently-running agent
//! sessions: the session entity and its output lines, the typed supervisor
//! event model, and the [`LiveSessionTable`] that keeps them consistent
//! under out-of-order, at-least-once event delivery.

mod event;
mod model;
mod table;

#[cfg(test)]
mod table_test;

pub use event::{
    SESSION_CREATED, SESSION_OUTPUT, SESSION_STATE_CHANGED, SESSION_TERMINATED,
    SessionCreatedPayload, SessionOutputPayload, SessionStateChangedPayload,
    SessionTerminatedPayload, SupervisorEvent,
};
pub use model::{LiveSession, OutputLine, OutputStream, SessionState};
pub use table::{LiveSessionTable, MAX_SESSIONS_PER_PROJECT};
