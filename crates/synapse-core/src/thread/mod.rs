//! Thread domain models, archive and materialization trait.
//!
//! Threads are historical (non-running) conversation records belonging to
//! the currently selected project. They are passive records: renames are
//! local-only and archiving is a soft delete from the active set.

mod archive;
mod model;
mod source;

pub use archive::ThreadArchive;
pub use model::{AgentState, AgentStatus, Thread};
pub use source::ThreadSource;
