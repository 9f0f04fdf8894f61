//! Unified path management for Synapse files.
//!
//! All Synapse configuration lives under the platform config directory and
//! discovered projects live under a single projects root. Keeping the
//! resolution in one place ensures consistency across platforms
//! (Linux, macOS, Windows).

use std::path::PathBuf;

use synapse_core::error::SynapseError;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for SynapseError {
    fn from(err: PathError) -> Self {
        SynapseError::config(err.to_string())
    }
}

/// Unified path management for Synapse.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/synapse/           # Config directory
/// └── preferences.toml         # UI preferences (favorites, panel sizes)
///
/// ~/.synapse/projects/         # Default projects root
/// └── <project>/               # One directory per discovered project
///     ├── sessions-index.json  # Recorded session index
///     └── <session>.jsonl      # One line-delimited record per session
/// ```
pub struct SynapsePaths;

impl SynapsePaths {
    /// Returns the Synapse configuration directory
    /// (e.g. `~/.config/synapse/` on Linux).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("synapse"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path of the preferences file.
    pub fn preferences_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("preferences.toml"))
    }

    /// Returns the default projects root (`~/.synapse/projects`).
    pub fn default_projects_root() -> Result<PathBuf, PathError> {
        dirs::home_dir()
            .map(|dir| dir.join(".synapse").join("projects"))
            .ok_or(PathError::HomeDirNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferences_file_lives_under_config_dir() {
        let config = SynapsePaths::config_dir().unwrap();
        let file = SynapsePaths::preferences_file().unwrap();
        assert!(file.starts_with(config));
        assert_eq!(file.file_name().unwrap(), "preferences.toml");
    }
}
