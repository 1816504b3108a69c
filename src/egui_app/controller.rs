//! Owns the UI state and runs the classify and train flows.

mod background_jobs;
mod jobs;
mod training;
mod upload;


use crate::backend::ClassifierBackend;
use crate::config::AppSettings;
use crate::egui_app::state::{StatusTone, UiState};
use crate::training::TrainingForm;
use jobs::ControllerJobs;
use std::sync::Arc;

/// Maintains app state and bridges core logic to the egui UI.
pub struct EguiController {
    pub ui: UiState,
    settings: AppSettings,
    jobs: ControllerJobs,
    persist_settings: bool,
}

impl EguiController {
    /// Build a controller around an injected backend.
    ///
    /// Settings are not written back until [`Self::enable_settings_persistence`] is called.
    pub fn new(settings: AppSettings, backend: Arc<dyn ClassifierBackend>) -> Self {
        let mut ui = UiState::default();
        ui.server_label = settings.server.base_url.clone();
        ui.training.form = TrainingForm::with_defaults(
            settings.training.dataset_path.clone(),
            settings.training.epochs,
            settings.training.batch_size,
        );
        Self {
            ui,
            settings,
            jobs: ControllerJobs::new(backend),
            persist_settings: false,
        }
    }

    /// Save the training form to the config file whenever a run starts.
    pub fn enable_settings_persistence(&mut self) {
        self.persist_settings = true;
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// True while a request or the progress timer is still running.
    pub fn has_active_jobs(&self) -> bool {
        self.jobs.has_active_jobs()
    }

    pub(crate) fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.set(text, tone);
    }
}
