use super::jobs::{ProgressTickMessage, TrainingJobResult};
use super::*;
use crate::config;
use crate::egui_app::view_model::{self, TRAINING_FALLBACK_ERROR, TrainingResultView};
use crate::training::TrainingRequest;

impl EguiController {
    /// Validate the form, then start the request and the simulated progress.
    pub fn start_training(&mut self) {
        if self.ui.training.busy || self.jobs.training_in_progress() {
            tracing::warn!("Ignoring training submit while a request is in flight");
            return;
        }
        let request = match self.ui.training.form.to_request() {
            Ok(request) => request,
            Err(err) => {
                self.ui.training.error = Some(err.to_string());
                self.set_status(err.to_string(), StatusTone::Warning);
                return;
            }
        };
        self.remember_training_form(&request);
        let Some(run_id) = self
            .jobs
            .begin_training(request, self.settings.training.progress_tick())
        else {
            return;
        };
        tracing::info!(run_id, "Training run started");
        self.ui.training.begin_run();
        self.set_status("Training request sent", StatusTone::Busy);
    }

    pub(super) fn handle_training_finished(&mut self, message: TrainingJobResult) {
        if !self.jobs.finish_training(message.run_id) {
            tracing::warn!(run_id = message.run_id, "Discarding stale training response");
            return;
        }
        self.ui.training.busy = false;
        match message.result {
            Ok(body) if body.success => {
                self.ui.training.error = None;
                self.ui.training.result = Some(TrainingResultView::from_result(&body));
                self.set_status("Training request accepted", StatusTone::Info);
            }
            Ok(body) => {
                let text = view_model::failure_text(body.error.as_deref(), TRAINING_FALLBACK_ERROR);
                self.show_training_failure(text);
            }
            Err(err) => self.show_training_failure(err.to_string()),
        }
    }

    pub(super) fn handle_progress_tick(&mut self, message: ProgressTickMessage) {
        if !self
            .jobs
            .accept_progress_tick(message.run_id, message.tick.finished)
        {
            tracing::debug!(run_id = message.run_id, "Discarding tick from an earlier run");
            return;
        }
        tracing::debug!(
            run_id = message.run_id,
            percent = message.tick.percent,
            "Simulated training progress"
        );
        self.ui.training.apply_tick(message.tick);
    }

    fn show_training_failure(&mut self, text: String) {
        tracing::warn!("Training failed: {text}");
        self.set_status("Training failed", StatusTone::Error);
        self.ui.training.error = Some(text);
    }

    /// Keep the submitted values as next launch's defaults.
    fn remember_training_form(&mut self, request: &TrainingRequest) {
        let training = &mut self.settings.training;
        training.dataset_path = request.dataset_path.clone();
        if let Some(epochs) = request.epochs.and_then(|value| u32::try_from(value).ok()) {
            training.epochs = epochs;
        }
        if let Some(batch_size) = request
            .batch_size
            .and_then(|value| u32::try_from(value).ok())
        {
            training.batch_size = batch_size;
        }
        if !self.persist_settings {
            return;
        }
        if let Err(err) = config::save(&self.settings) {
            tracing::warn!("Failed to save training defaults: {err}");
        }
    }
}
