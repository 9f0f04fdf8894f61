//! Infrastructure adapters for Synapse.
//!
//! Concrete implementations of the domain crate's boundary traits: an
//! in-process event-emitting supervisor, a JSONL-backed thread source and
//! TOML-file preference persistence, plus unified path management.

pub mod paths;
pub mod preferences_repository;
pub mod session_index;
pub mod supervisor;
pub mod thread_source;

pub use paths::SynapsePaths;
pub use preferences_repository::TomlPreferencesRepository;
pub use supervisor::InProcessSupervisor;
pub use thread_source::JsonlThreadSource;
