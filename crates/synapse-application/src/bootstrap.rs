//! Application wiring.
//!
//! The embedding process (desktop shell, headless runner, test harness)
//! constructs one [`AppBootstrap`] per running application and owns its
//! lifetime. Bootstrap performs the initial scan, restores the persisted
//! project selection and reconciles live sessions with the supervisor;
//! the caller is responsible for pumping the supervisor's event channel
//! into [`EventRouter::run`].

use std::sync::Arc;

use anyhow::Result;

use synapse_core::preferences::PreferencesRepository;
use synapse_core::supervisor::ProcessSupervisor;
use synapse_core::thread::ThreadSource;

use crate::context::AppContext;
use crate::router::EventRouter;
use crate::usecase::ControlUseCase;

/// Fully wired application core.
pub struct AppBootstrap {
    pub context: Arc<AppContext>,
    pub usecase: Arc<ControlUseCase>,
    pub router: Arc<EventRouter>,
}

impl AppBootstrap {
    /// Wires the context, use case and router, then brings the model up to
    /// date: scans projects, restores the last selected project and
    /// reconciles live sessions against the supervisor.
    pub async fn initialize(
        supervisor: Arc<dyn ProcessSupervisor>,
        thread_source: Arc<dyn ThreadSource>,
        preferences: Arc<dyn PreferencesRepository>,
    ) -> Result<Self> {
        let context = Arc::new(AppContext::new());
        let usecase = Arc::new(ControlUseCase::new(
            context.clone(),
            supervisor,
            thread_source,
            preferences.clone(),
        ));
        let router = Arc::new(EventRouter::new(context.clone()));

        let projects = usecase.scan_projects().await?;
        tracing::info!("[Bootstrap] discovered {} projects", projects.len());

        match preferences.load().await {
            Ok(prefs) => {
                if let Some(project_id) = prefs.last_selected_project {
                    tracing::info!("[Bootstrap] restoring selected project {}", project_id);
                    usecase.select_project(Some(project_id)).await?;
                }
            }
            Err(err) => {
                tracing::warn!("[Bootstrap] could not load preferences: {}", err);
            }
        }

        let sessions = usecase.refresh_sessions().await?;
        tracing::info!("[Bootstrap] tracking {} live sessions", sessions.len());

        Ok(Self {
            context,
            usecase,
            router,
        })
    }
}
