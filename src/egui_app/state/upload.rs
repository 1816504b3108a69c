use crate::egui_app::view_model::ClassificationView;
use crate::preview::DecodedImage;
use crate::upload::SelectedFile;

/// Classify page: selected file, request flag, and the last answer.
///
/// Showing results clears the error. A selection error leaves earlier results in place.
#[derive(Clone, Debug, Default)]
pub struct UploadPanelState {
    pub selected: Option<SelectedFile>,
    /// A classification request is outstanding.
    pub loading: bool,
    pub results: Option<ClassificationView>,
    pub preview: Option<DecodedImage>,
    /// Bumped each time new results are shown so the renderer can refresh its texture.
    pub results_revision: u64,
    pub error: Option<String>,
}

impl UploadPanelState {
    pub fn submit_label(&self) -> &'static str {
        if self.loading {
            "Processing..."
        } else {
            "Classify Image"
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.loading
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn show_results(&mut self, view: ClassificationView, preview: Option<DecodedImage>) {
        self.error = None;
        self.results = Some(view);
        self.preview = preview;
        self.results_revision = self.results_revision.wrapping_add(1);
    }

    pub fn hide_results(&mut self) {
        self.results = None;
        self.preview = None;
    }
}
