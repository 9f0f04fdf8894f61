//! User interface preferences and their persistence trait.
//!
//! Preferences are plain key/value state (favorite projects, panel sizes,
//! last selection) persisted across restarts. They carry no correctness
//! invariants; a missing or unreadable file degrades to defaults.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::Result;

/// UI preferences that persist across restarts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Ids of projects the user marked as favorites.
    #[serde(default)]
    pub favorite_projects: Vec<String>,

    /// Panel sizes keyed by panel name (fractions of the window).
    #[serde(default)]
    pub panel_sizes: BTreeMap<String, f64>,

    /// Id of the last selected project, restored on startup.
    pub last_selected_project: Option<String>,
}

impl UiPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether a project id is in the favorite set.
    pub fn is_favorite(&self, project_id: &str) -> bool {
        self.favorite_projects.iter().any(|id| id == project_id)
    }

    /// Adds or removes a project id from the favorite set.
    pub fn set_favorite(&mut self, project_id: &str, favorite: bool) {
        if favorite {
            if !self.is_favorite(project_id) {
                self.favorite_projects.push(project_id.to_string());
            }
        } else {
            self.favorite_projects.retain(|id| id != project_id);
        }
    }

    /// Moves a favorite entry from one project id to another, e.g. after a
    /// project rename.
    pub fn rename_favorite(&mut self, old_id: &str, new_id: &str) {
        if self.is_favorite(old_id) {
            self.set_favorite(old_id, false);
            self.set_favorite(new_id, true);
        }
    }
}

/// Repository for persisting UI preferences.
#[async_trait]
pub trait PreferencesRepository: Send + Sync {
    /// Loads the persisted preferences, or defaults if none exist yet.
    async fn load(&self) -> Result<UiPreferences>;

    /// Persists the preferences.
    async fn save(&self, preferences: &UiPreferences) -> Result<()>;
}
