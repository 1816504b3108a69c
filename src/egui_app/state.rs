//! Shared state types for the egui UI.

mod status;
mod training;
mod upload;

pub use status::{StatusBarState, StatusTone};
pub use training::{SimulatedProgressState, TrainingPanelState};
pub use upload::UploadPanelState;

/// Which page of the window is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AppTab {
    #[default]
    Classify,
    Train,
}

impl AppTab {
    pub fn label(self) -> &'static str {
        match self {
            AppTab::Classify => "Classify",
            AppTab::Train => "Train",
        }
    }
}

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub status: StatusBarState,
    pub tab: AppTab,
    pub upload: UploadPanelState,
    pub training: TrainingPanelState,
    /// Base URL shown in the header.
    pub server_label: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            tab: AppTab::default(),
            upload: UploadPanelState::default(),
            training: TrainingPanelState::default(),
            server_label: String::new(),
        }
    }
}
