use super::model::Project;
use std::path::PathBuf;

/// Authoritative list of known projects plus the selection pointer.
///
/// The selection pointer is either `None` or the id of a project currently
/// present in the registry; every mutating operation preserves that
/// invariant internally, so readers never observe a dangling selection.
#[derive(Debug, Default)]
pub struct ProjectRegistry {
    projects: Vec<Project>,
    selected_id: Option<String>,
}

impl ProjectRegistry {
    /// Creates an empty registry with no selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the full project list, e.g. after a rescan.
    ///
    /// The current selection is kept if the selected id still exists in the
    /// new list, otherwise it is cleared.
    pub fn set_all(&mut self, projects: Vec<Project>) {
        self.projects = projects;
        if let Some(selected) = &self.selected_id
            && !self.projects.iter().any(|p| &p.id == selected)
        {
            tracing::debug!("selected project {} vanished on rescan, clearing selection", selected);
            self.selected_id = None;
        }
    }

    /// Adds a single project. A project with the same id is already
    /// authoritative, so re-adding it is a no-op.
    pub fn add(&mut self, project: Project) {
        if self.projects.iter().any(|p| p.id == project.id) {
            tracing::debug!("project {} already registered, ignoring", project.id);
            return;
        }
        self.projects.push(project);
    }

    /// Sets the selection pointer.
    ///
    /// Selecting an id not present in the registry is ignored, so the
    /// selection can never dangle.
    pub fn select(&mut self, project_id: Option<String>) {
        match project_id {
            None => self.selected_id = None,
            Some(id) => {
                if self.projects.iter().any(|p| p.id == id) {
                    self.selected_id = Some(id);
                } else {
                    tracing::warn!("ignoring selection of unknown project {}", id);
                }
            }
        }
    }

    /// Toggles the favorite flag. Returns the new flag value, or `None` if
    /// the project is unknown.
    pub fn toggle_favorite(&mut self, project_id: &str) -> Option<bool> {
        let project = self.projects.iter_mut().find(|p| p.id == project_id)?;
        project.favorite = !project.favorite;
        Some(project.favorite)
    }

    /// Re-applies a persisted favorite set after a rescan.
    pub fn apply_favorites(&mut self, favorite_ids: &[String]) {
        for project in &mut self.projects {
            project.favorite = favorite_ids.contains(&project.id);
        }
    }

    /// Applies the local half of a confirmed rename.
    ///
    /// A rename is a move: id, name and path change together and no entry
    /// remains under the old id. The selection pointer follows the moved
    /// project. Must only be called after the external rename succeeded.
    pub fn apply_rename(
        &mut self,
        old_id: &str,
        new_id: String,
        new_name: String,
        new_path: PathBuf,
    ) -> Option<Project> {
        let project = self.projects.iter_mut().find(|p| p.id == old_id)?;
        project.id = new_id.clone();
        project.name = new_name;
        project.path = new_path;
        let renamed = project.clone();
        if self.selected_id.as_deref() == Some(old_id) {
            self.selected_id = Some(new_id);
        }
        Some(renamed)
    }

    /// Looks up a project by id.
    pub fn get(&self, project_id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == project_id)
    }

    /// Returns the currently selected project id, if any.
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// Returns all projects in registration order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Returns an owned snapshot of all projects.
    pub fn snapshot(&self) -> Vec<Project> {
        self.projects.clone()
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str) -> Project {
        Project::new(format!("/projects/{}", id))
    }

    #[test]
    fn test_set_all_keeps_selection_when_id_survives() {
        let mut registry = ProjectRegistry::new();
        registry.set_all(vec![project("alpha"), project("beta")]);
        registry.select(Some("beta".to_string()));

        registry.set_all(vec![project("beta"), project("gamma")]);
        assert_eq!(registry.selected_id(), Some("beta"));
    }

    #[test]
    fn test_set_all_clears_selection_when_id_vanishes() {
        let mut registry = ProjectRegistry::new();
        registry.set_all(vec![project("alpha")]);
        registry.select(Some("alpha".to_string()));

        registry.set_all(vec![project("beta")]);
        assert_eq!(registry.selected_id(), None);
    }

    #[test]
    fn test_select_unknown_id_is_ignored() {
        let mut registry = ProjectRegistry::new();
        registry.set_all(vec![project("alpha")]);
        registry.select(Some("ghost".to_string()));
        assert_eq!(registry.selected_id(), None);
    }

    #[test]
    fn test_add_is_idempotent_per_id() {
        let mut registry = ProjectRegistry::new();
        registry.add(project("alpha"));
        registry.add(project("alpha"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_toggle_favorite() {
        let mut registry = ProjectRegistry::new();
        registry.add(project("alpha"));

        assert_eq!(registry.toggle_favorite("alpha"), Some(true));
        assert_eq!(registry.toggle_favorite("alpha"), Some(false));
        assert_eq!(registry.toggle_favorite("ghost"), None);
    }

    #[test]
    fn test_apply_rename_moves_identity_and_selection() {
        let mut registry = ProjectRegistry::new();
        registry.set_all(vec![project("alpha"), project("beta")]);
        registry.select(Some("alpha".to_string()));

        let renamed = registry
            .apply_rename(
                "alpha",
                "omega".to_string(),
                "omega".to_string(),
                "/projects/omega".into(),
            )
            .unwrap();

        assert_eq!(renamed.id, "omega");
        assert_eq!(renamed.name, "omega");
        assert!(registry.get("alpha").is_none());
        assert!(registry.get("omega").is_some());
        assert_eq!(registry.selected_id(), Some("omega"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_apply_favorites_overrides_flags() {
        let mut registry = ProjectRegistry::new();
        registry.set_all(vec![project("alpha"), project("beta")]);
        registry.apply_favorites(&["beta".to_string()]);

        assert!(!registry.get("alpha").unwrap().favorite);
        assert!(registry.get("beta").unwrap().favorite);
    }
}
