// AppContext: Dependency Injection Container
// Wires the navigation shell, the upload orchestrator and the views together

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::info;

use crate::config::AppConfig;
use crate::error::UploadError;
use crate::navigation::{NavigationShell, NavigationState, Navigator, Route};
use crate::upload::{HttpTransport, MetricsTransport, RecordingFile, UploadOrchestrator};
use crate::views::{landing, Screen, UploadView, VisualizationView};

/// AppContext: single owner of the session state
///
/// - NavigationShell (current location and history)
/// - UploadOrchestrator (selected file, in-flight submission)
/// - UploadView status line
/// - VisualizationView render state
pub struct AppContext {
    config: AppConfig,
    shell: Arc<NavigationShell>,
    orchestrator: UploadOrchestrator,
    upload_view: Mutex<UploadView>,
    visualization_view: Mutex<VisualizationView>,
}

impl AppContext {
    /// Create a context submitting over HTTP to `config.upload.endpoint`
    ///
    /// # Errors
    /// `UploadError::TransportFailure` when the HTTP client cannot be built
    pub fn new(config: AppConfig) -> Result<Self, UploadError> {
        let transport = Arc::new(HttpTransport::new(&config.upload)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Create a context with a caller-supplied transport
    pub fn with_transport(config: AppConfig, transport: Arc<dyn MetricsTransport>) -> Self {
        let shell = Arc::new(NavigationShell::new());
        let navigator: Arc<dyn Navigator> = shell.clone();
        let orchestrator = UploadOrchestrator::new(config.upload.clone(), transport, navigator);
        let visualization_view = VisualizationView::new(config.render.grid_columns);

        Self {
            config,
            shell,
            orchestrator,
            upload_view: Mutex::new(UploadView::new()),
            visualization_view: Mutex::new(visualization_view),
        }
    }

    // ========================================================================
    // LOCK HELPER METHODS
    // ========================================================================

    fn lock_upload_view(&self) -> MutexGuard<'_, UploadView> {
        self.upload_view.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_visualization_view(&self) -> MutexGuard<'_, VisualizationView> {
        self.visualization_view
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    // ========================================================================
    // NAVIGATION
    // ========================================================================

    /// Follow a navigation link
    ///
    /// Leaving the upload route cancels a pending submission; entering it
    /// from elsewhere starts with a clean status line.
    pub fn open(&self, route: Route) {
        let current = self.shell.current_route();
        if current == Route::Upload && route != Route::Upload && self.orchestrator.cancel() {
            info!("[Context] Left {} with a pending upload", current);
        }
        if route == Route::Upload && current != Route::Upload {
            self.lock_upload_view().clear_status();
        }
        self.shell.open(route);
    }

    /// Follow a link by path
    ///
    /// Returns the route opened, or `None` (and no transition) for an
    /// unknown path.
    pub fn open_path(&self, path: &str) -> Option<Route> {
        let route = Route::from_path(path)?;
        self.open(route);
        Some(route)
    }

    // ========================================================================
    // UPLOAD
    // ========================================================================

    pub fn select_file(&self, file: RecordingFile) {
        self.orchestrator.select_file(file);
    }

    /// Submit the selected file; the outcome is also recorded on the upload view
    pub async fn submit(&self) -> Result<NavigationState, UploadError> {
        let result = self.orchestrator.submit().await;
        self.lock_upload_view().record_result(&result);
        result
    }

    pub fn cancel_upload(&self) -> bool {
        self.orchestrator.cancel()
    }

    pub fn orchestrator(&self) -> &UploadOrchestrator {
        &self.orchestrator
    }

    // ========================================================================
    // RENDERING
    // ========================================================================

    /// Screen for the current location
    pub fn screen(&self) -> Screen {
        let location = self.shell.location();
        match location.route {
            Route::Landing => landing::render(),
            Route::Upload => self.lock_upload_view().render(
                &self.config.upload.accept_extension,
                self.orchestrator.selected_file().as_ref(),
                self.orchestrator.phase(),
            ),
            Route::Visualize => {
                let mut view = self.lock_visualization_view();
                view.observe(location.state.as_ref());
                view.render()
            }
        }
    }

    pub fn shell(&self) -> &NavigationShell {
        &self.shell
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
