//! TOML-file preferences persistence.
//!
//! UI preferences (favorite projects, panel sizes, last selection) are
//! stored as a single TOML file under the platform config directory. A
//! missing file loads as defaults; directories are created on first save.

use std::path::PathBuf;

use async_trait::async_trait;

use synapse_core::error::{Result, SynapseError};
use synapse_core::preferences::{PreferencesRepository, UiPreferences};

use crate::paths::SynapsePaths;

/// Preferences repository backed by a TOML file.
pub struct TomlPreferencesRepository {
    path: PathBuf,
}

impl TomlPreferencesRepository {
    /// Creates a repository over an explicit file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Creates a repository over the default platform path
    /// (e.g. `~/.config/synapse/preferences.toml` on Linux).
    pub fn with_default_path() -> Result<Self> {
        Ok(Self::new(SynapsePaths::preferences_file()?))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl PreferencesRepository for TomlPreferencesRepository {
    async fn load(&self) -> Result<UiPreferences> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Ok(UiPreferences::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, preferences: &UiPreferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = toml::to_string_pretty(preferences)?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|err| SynapseError::io(format!("writing {:?}: {}", self.path, err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let repo = TomlPreferencesRepository::new(dir.path().join("preferences.toml"));
        assert_eq!(repo.load().await.unwrap(), UiPreferences::default());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let repo = TomlPreferencesRepository::new(dir.path().join("nested/preferences.toml"));

        let mut prefs = UiPreferences::new();
        prefs.set_favorite("alpha", true);
        prefs.panel_sizes.insert("left".to_string(), 0.25);
        prefs.last_selected_project = Some("alpha".to_string());

        repo.save(&prefs).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), prefs);
    }

    #[tokio::test]
    async fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preferences.toml");
        std::fs::write(&path, "favorite_projects = 42").unwrap();

        let repo = TomlPreferencesRepository::new(path);
        assert!(repo.load().await.is_err());
    }
}
