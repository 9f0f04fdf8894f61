//! Control use case implementation.
//!
//! This module provides the `ControlUseCase`, the command surface the
//! presentation layer drives. Commands that involve the external process
//! supervisor follow one rule everywhere: the local model is only mutated
//! after the external call resolves, so a failed call leaves nothing to
//! roll back. Failures surface as user-visible notifications; unknown ids
//! in commands degrade to no-ops.

use std::sync::Arc;

use synapse_core::error::{Result, SynapseError};
use synapse_core::notification::NotificationKind;
use synapse_core::preferences::{PreferencesRepository, UiPreferences};
use synapse_core::project::{Project, project_id_for_path};
use synapse_core::session::{LiveSession, MAX_SESSIONS_PER_PROJECT};
use synapse_core::supervisor::ProcessSupervisor;
use synapse_core::thread::ThreadSource;

use crate::context::AppContext;

/// Use case coordinating user commands across the registries, the process
/// supervisor and the preference store.
pub struct ControlUseCase {
    /// Shared in-memory model
    context: Arc<AppContext>,
    /// External process supervisor (request/response side)
    supervisor: Arc<dyn ProcessSupervisor>,
    /// Source of historical threads for the selected project
    thread_source: Arc<dyn ThreadSource>,
    /// Persistence for favorites, panel sizes and the last selection
    preferences: Arc<dyn PreferencesRepository>,
}

impl ControlUseCase {
    pub fn new(
        context: Arc<AppContext>,
        supervisor: Arc<dyn ProcessSupervisor>,
        thread_source: Arc<dyn ThreadSource>,
        preferences: Arc<dyn PreferencesRepository>,
    ) -> Self {
        Self {
            context,
            supervisor,
            thread_source,
            preferences,
        }
    }

    /// Returns the shared context for snapshot queries.
    pub fn context(&self) -> &Arc<AppContext> {
        &self.context
    }

    // ============================================================================
    // Projects
    // ============================================================================

    /// Rescans projects through the supervisor and replaces the registry
    /// content, re-applying persisted favorite flags. The current selection
    /// survives if its id still exists.
    pub async fn scan_projects(&self) -> Result<Vec<Project>> {
        let mut projects = match self.supervisor.scan_projects().await {
            Ok(projects) => projects,
            Err(err) => {
                self.context
                    .notify(
                        NotificationKind::Error,
                        "Project scan failed",
                        err.to_string(),
                    )
                    .await;
                return Err(err);
            }
        };

        let preferences = self.load_preferences().await;
        for project in &mut projects {
            project.favorite = preferences.is_favorite(&project.id);
        }

        let mut registry = self.context.projects.write().await;
        registry.set_all(projects);
        tracing::info!("registry now holds {} projects", registry.len());
        Ok(registry.snapshot())
    }

    /// Changes the project selection and replaces the thread archive with
    /// the selected project's historical threads.
    pub async fn select_project(&self, project_id: Option<String>) -> Result<()> {
        let selected = {
            let mut registry = self.context.projects.write().await;
            registry.select(project_id);
            registry.selected_id().map(String::from)
        };

        let threads = match &selected {
            Some(id) => {
                let project = self.context.projects.read().await.get(id).cloned();
                match project {
                    Some(project) => match self.thread_source.threads_for_project(&project).await {
                        Ok(threads) => threads,
                        Err(err) => {
                            self.context
                                .notify(
                                    NotificationKind::Error,
                                    "Failed to load threads",
                                    err.to_string(),
                                )
                                .await;
                            Vec::new()
                        }
                    },
                    None => Vec::new(),
                }
            }
            None => Vec::new(),
        };
        self.context.threads.write().await.set_all(threads);

        self.update_preferences(|prefs| prefs.last_selected_project = selected.clone())
            .await;
        Ok(())
    }

    /// Toggles a project's favorite flag and persists the favorite set.
    /// Returns the new flag value.
    pub async fn toggle_favorite(&self, project_id: &str) -> Result<bool> {
        let favorite = self
            .context
            .projects
            .write()
            .await
            .toggle_favorite(project_id)
            .ok_or_else(|| SynapseError::not_found("project", project_id))?;

        self.update_preferences(|prefs| prefs.set_favorite(project_id, favorite))
            .await;
        Ok(favorite)
    }

    /// Renames a project. Two-phase: the supervisor performs the directory
    /// rename first, and the registry is updated only after that call
    /// succeeds, so the displayed name can never diverge from disk.
    pub async fn rename_project(&self, old_id: &str, new_name: &str) -> Result<Project> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(SynapseError::config("project name cannot be empty"));
        }

        let project = self
            .context
            .projects
            .read()
            .await
            .get(old_id)
            .cloned()
            .ok_or_else(|| SynapseError::not_found("project", old_id))?;

        let new_path = project.path.with_file_name(new_name);
        let new_id = project_id_for_path(&new_path);
        if new_id == project.id {
            return Ok(project);
        }

        if let Err(err) = self.supervisor.rename_project(old_id, &new_id).await {
            self.context
                .notify(
                    NotificationKind::Error,
                    "Project rename failed",
                    err.to_string(),
                )
                .await;
            return Err(err);
        }

        let renamed = self
            .context
            .projects
            .write()
            .await
            .apply_rename(old_id, new_id.clone(), new_name.to_string(), new_path)
            .ok_or_else(|| SynapseError::not_found("project", old_id))?;

        self.update_preferences(|prefs| {
            prefs.rename_favorite(old_id, &new_id);
            if prefs.last_selected_project.as_deref() == Some(old_id) {
                prefs.last_selected_project = Some(new_id.clone());
            }
        })
        .await;

        tracing::info!("project {} renamed to {}", old_id, renamed.id);
        Ok(renamed)
    }

    // ============================================================================
    // Live sessions
    // ============================================================================

    /// Launches a new agent session for a project.
    ///
    /// The concurrency cap is checked before the supervisor is called; a
    /// project at capacity is rejected with a warning notification and no
    /// model change. On success the returned id is NOT inserted into the
    /// table: the table entry is created when the `session-created` event
    /// arrives, keeping event ingestion the single source of creations.
    pub async fn launch_session(&self, project_id: &str) -> Result<String> {
        if self.context.projects.read().await.get(project_id).is_none() {
            tracing::debug!("launch for unknown project {}, dropping", project_id);
            return Err(SynapseError::not_found("project", project_id));
        }

        let live = self.context.sessions.read().await.live_count(project_id);
        if live >= MAX_SESSIONS_PER_PROJECT {
            self.context
                .notify(
                    NotificationKind::Warning,
                    "Session limit reached",
                    format!(
                        "Project '{}' already has {} live sessions",
                        project_id, MAX_SESSIONS_PER_PROJECT
                    ),
                )
                .await;
            return Err(SynapseError::capacity(project_id, MAX_SESSIONS_PER_PROJECT));
        }

        match self.supervisor.spawn_session(project_id).await {
            Ok(session_id) => {
                tracing::info!("launched session {} for project {}", session_id, project_id);
                Ok(session_id)
            }
            Err(err) => {
                self.context
                    .notify(NotificationKind::Error, "Launch failed", err.to_string())
                    .await;
                Err(err)
            }
        }
    }

    /// Terminates a live session. Unknown ids are dropped without calling
    /// the supervisor; on success the session is removed locally (the
    /// matching `session-terminated` event becomes an idempotent no-op).
    pub async fn terminate_session(&self, session_id: &str) -> Result<()> {
        if self.context.sessions.read().await.get(session_id).is_none() {
            tracing::debug!("terminate for unknown session {}, dropping", session_id);
            return Ok(());
        }

        if let Err(err) = self.supervisor.terminate_session(session_id).await {
            self.context
                .notify(
                    NotificationKind::Error,
                    "Termination failed",
                    err.to_string(),
                )
                .await;
            return Err(err);
        }

        self.context.sessions.write().await.remove(session_id);
        Ok(())
    }

    /// Sends user input to a live session. No local mutation; the session's
    /// reaction arrives as ordinary output/state events.
    pub async fn send_input(&self, session_id: &str, text: &str) -> Result<()> {
        if let Err(err) = self.supervisor.send_input(session_id, text).await {
            self.context
                .notify(
                    NotificationKind::Error,
                    "Sending input failed",
                    err.to_string(),
                )
                .await;
            return Err(err);
        }
        Ok(())
    }

    /// Reconciles the table against the supervisor's list of live sessions,
    /// e.g. on startup: sessions the supervisor reports but the table lacks
    /// are inserted (with their output backfilled), and table entries the
    /// supervisor no longer reports are removed.
    pub async fn refresh_sessions(&self) -> Result<Vec<LiveSession>> {
        let summaries = match self.supervisor.list_active_sessions().await {
            Ok(summaries) => summaries,
            Err(err) => {
                self.context
                    .notify(
                        NotificationKind::Error,
                        "Session refresh failed",
                        err.to_string(),
                    )
                    .await;
                return Err(err);
            }
        };

        let known: Vec<String> = {
            let table = self.context.sessions.read().await;
            summaries
                .iter()
                .map(|s| s.id.clone())
                .filter(|id| table.get(id).is_some())
                .collect()
        };

        // Backfill output for sessions we are about to insert, before
        // taking the write lock.
        let mut backfills = Vec::new();
        for summary in &summaries {
            if !known.contains(&summary.id) {
                let output = match self.supervisor.get_session_output(&summary.id).await {
                    Ok(output) => output,
                    Err(err) => {
                        tracing::warn!("no output backfill for {}: {}", summary.id, err);
                        Vec::new()
                    }
                };
                backfills.push((summary.clone(), output));
            }
        }

        let mut table = self.context.sessions.write().await;
        for (summary, output) in backfills {
            if table.create(summary.id.as_str(), summary.project_id.as_str()) {
                table.set_state(&summary.id, summary.state);
                for line in output {
                    table.append_output(&summary.id, line);
                }
            }
        }
        let reported: Vec<&str> = summaries.iter().map(|s| s.id.as_str()).collect();
        for stale in table
            .snapshot(None)
            .into_iter()
            .filter(|s| !reported.contains(&s.id.as_str()))
        {
            table.remove(&stale.id);
        }
        Ok(table.snapshot(None))
    }

    /// Sets the session selection pointer.
    pub async fn select_session(&self, session_id: Option<String>) {
        self.context.sessions.write().await.select(session_id);
    }

    /// Truncates a session's output buffer.
    pub async fn clear_session_output(&self, session_id: &str) -> bool {
        self.context.sessions.write().await.clear_output(session_id)
    }

    // ============================================================================
    // Threads
    // ============================================================================

    pub async fn select_thread(&self, thread_id: Option<String>) {
        self.context.threads.write().await.select(thread_id);
    }

    /// Renames a thread. Local-only; threads are passive records.
    pub async fn rename_thread(&self, thread_id: &str, name: &str) -> bool {
        self.context.threads.write().await.rename(thread_id, name)
    }

    /// Archives a thread (soft delete from the active set).
    pub async fn archive_thread(&self, thread_id: &str) -> bool {
        self.context.threads.write().await.archive(thread_id)
    }

    // ============================================================================
    // Notifications
    // ============================================================================

    pub async fn mark_notification_read(&self, notification_id: &str) -> bool {
        self.context
            .notifications
            .write()
            .await
            .mark_read(notification_id)
    }

    pub async fn dismiss_notification(&self, notification_id: &str) -> bool {
        self.context.notifications.write().await.remove(notification_id)
    }

    pub async fn clear_notifications(&self) {
        self.context.notifications.write().await.clear_all();
    }

    /// Persists a panel size. Pure preference state; nothing in the model
    /// depends on it.
    pub async fn set_panel_size(&self, panel: &str, fraction: f64) {
        self.update_preferences(|prefs| {
            prefs.panel_sizes.insert(panel.to_string(), fraction);
        })
        .await;
    }

    // ============================================================================
    // Preferences plumbing
    // ============================================================================

    /// Loads preferences, degrading to defaults on failure. Preference
    /// problems are never fatal to a command.
    async fn load_preferences(&self) -> UiPreferences {
        match self.preferences.load().await {
            Ok(preferences) => preferences,
            Err(err) => {
                tracing::warn!("failed to load preferences, using defaults: {}", err);
                UiPreferences::default()
            }
        }
    }

    /// Applies a mutation to the persisted preferences, best-effort.
    async fn update_preferences(&self, mutate: impl FnOnce(&mut UiPreferences)) {
        let mut preferences = self.load_preferences().await;
        mutate(&mut preferences);
        if let Err(err) = self.preferences.save(&preferences).await {
            tracing::warn!("failed to persist preferences: {}", err);
        }
    }
}
