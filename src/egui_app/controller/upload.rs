use super::jobs::ClassificationJobResult;
use super::*;
use crate::egui_app::view_model::{self, CLASSIFICATION_FALLBACK_ERROR, ClassificationView};
use crate::errors::ValidationError;
use crate::upload::{self, MediaType};
use rfd::FileDialog;
use std::path::{Path, PathBuf};

impl EguiController {
    /// Validate a file and make it the current selection.
    ///
    /// A rejected file clears the selection and shows the reason.
    pub fn select_file(&mut self, path: &Path) {
        match upload::select_file(path) {
            Ok(file) => {
                self.ui.upload.error = None;
                self.set_status(
                    format!(
                        "Selected {} ({})",
                        file.file_name,
                        view_model::format_file_size(file.size)
                    ),
                    StatusTone::Info,
                );
                self.ui.upload.selected = Some(file);
            }
            Err(err) => {
                tracing::info!(path = %path.display(), "Rejected file selection: {err}");
                self.ui.upload.selected = None;
                self.ui.upload.show_error(err.to_string());
                self.set_status(err.to_string(), StatusTone::Warning);
            }
        }
    }

    /// Open a native picker filtered to the supported image types.
    pub fn select_file_via_dialog(&mut self) {
        let Some(path) = FileDialog::new()
            .add_filter("Images", &MediaType::EXTENSIONS)
            .pick_file()
        else {
            return;
        };
        self.select_file(&path);
    }

    /// Use the first dropped file that has a path on disk.
    pub fn handle_dropped_files(&mut self, paths: Vec<PathBuf>) {
        if let Some(path) = paths.into_iter().next() {
            self.select_file(&path);
        }
    }

    /// Send the selected file for classification.
    pub fn submit_upload(&mut self) {
        if self.ui.upload.loading || self.jobs.classification_in_progress() {
            tracing::warn!("Ignoring classification submit while a request is in flight");
            return;
        }
        let Some(file) = self.ui.upload.selected.clone() else {
            let err = ValidationError::NoFileSelected;
            self.ui.upload.show_error(err.to_string());
            self.set_status(err.to_string(), StatusTone::Warning);
            return;
        };
        let file_name = file.file_name.clone();
        if self.jobs.begin_classification(file).is_none() {
            return;
        }
        self.ui.upload.loading = true;
        self.ui.upload.hide_results();
        self.ui.upload.error = None;
        self.set_status(format!("Classifying {file_name}..."), StatusTone::Busy);
    }

    /// Clear the selection and hide results, errors, and the loading state.
    ///
    /// An upload still in flight is forgotten and its answer discarded.
    pub fn reset_upload_form(&mut self) {
        self.jobs.abandon_classification();
        self.ui.upload.selected = None;
        self.ui.upload.loading = false;
        self.ui.upload.error = None;
        self.ui.upload.hide_results();
        self.ui.status = crate::egui_app::state::StatusBarState::idle();
    }

    pub(super) fn handle_classification_finished(&mut self, message: ClassificationJobResult) {
        if !self.jobs.finish_classification(message.request_id) {
            tracing::warn!(
                request_id = message.request_id,
                "Discarding classification response for an abandoned request"
            );
            return;
        }
        self.ui.upload.loading = false;
        match message.result {
            Ok(body) if body.success => {
                let view = ClassificationView::from_result(&body);
                self.set_status(
                    format!("Classified as {} ({})", view.label, view.confidence_text),
                    StatusTone::Info,
                );
                self.ui.upload.show_results(view, message.preview);
            }
            Ok(body) => {
                let text =
                    view_model::failure_text(body.error.as_deref(), CLASSIFICATION_FALLBACK_ERROR);
                self.show_upload_failure(text);
            }
            Err(err) => self.show_upload_failure(err.to_string()),
        }
    }

    fn show_upload_failure(&mut self, text: String) {
        tracing::warn!("Classification failed: {text}");
        self.set_status("Classification failed", StatusTone::Error);
        self.ui.upload.show_error(text);
    }
}
