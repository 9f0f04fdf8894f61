//! Session index file parsing.
//!
//! Each project directory may contain a `sessions-index.json` listing the
//! sessions recorded for it. A missing index simply means the project has
//! no recorded sessions yet.

use std::path::Path;

use serde::{Deserialize, Serialize};

use synapse_core::error::Result;

/// File name of the per-project session index.
pub const SESSIONS_INDEX_FILE: &str = "sessions-index.json";

/// One recorded session reference in the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRef {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
}

/// The parsed `sessions-index.json` structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionIndex {
    #[serde(default)]
    pub sessions: Vec<SessionRef>,
}

/// Loads the session index of a project directory.
///
/// Returns an empty index if the file does not exist.
pub async fn load(project_dir: &Path) -> Result<SessionIndex> {
    let index_path = project_dir.join(SESSIONS_INDEX_FILE);
    match tokio::fs::read_to_string(&index_path).await {
        Ok(content) => Ok(serde_json::from_str(&content)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(SessionIndex::default()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_missing_index_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let index = load(dir.path()).await.unwrap();
        assert!(index.sessions.is_empty());
    }

    #[tokio::test]
    async fn test_load_parses_session_refs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(SESSIONS_INDEX_FILE),
            r#"{ "sessions": [ { "id": "s1", "name": "First run" }, { "id": "s2" } ] }"#,
        )
        .unwrap();

        let index = load(dir.path()).await.unwrap();
        assert_eq!(index.sessions.len(), 2);
        assert_eq!(index.sessions[0].id, "s1");
        assert_eq!(index.sessions[0].name.as_deref(), Some("First run"));
        assert!(index.sessions[1].name.is_none());
    }

    #[tokio::test]
    async fn test_load_malformed_index_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SESSIONS_INDEX_FILE), "not json").unwrap();
        assert!(load(dir.path()).await.is_err());
    }
}
