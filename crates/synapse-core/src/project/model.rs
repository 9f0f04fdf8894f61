use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Derives the stable project identifier from its directory path.
///
/// The identifier is the final path component, so renaming a project's
/// directory moves it to a new identity rather than relabeling the old one.
pub fn project_id_for_path(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Represents a discovered workspace directory associated with
/// coding-agent sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier, derived from the directory path
    pub id: String,
    /// Display name (the directory name)
    pub name: String,
    /// Root directory path of the project
    pub path: PathBuf,
    /// Whether the user marked this project as a favorite
    pub favorite: bool,
    /// Timestamp when the project was first seen (ISO 8601 format)
    pub created_at: String,
}

impl Project {
    /// Creates a new project record for a directory path.
    ///
    /// The id and name are both derived from the final path component.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let id = project_id_for_path(&path);
        Self {
            name: id.clone(),
            id,
            path,
            favorite: false,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_is_final_path_component() {
        assert_eq!(project_id_for_path(Path::new("/home/u/projects/demo")), "demo");
    }

    #[test]
    fn test_new_derives_id_and_name() {
        let project = Project::new("/home/u/projects/demo");
        assert_eq!(project.id, "demo");
        assert_eq!(project.name, "demo");
        assert!(!project.favorite);
        assert!(!project.created_at.is_empty());
    }
}
