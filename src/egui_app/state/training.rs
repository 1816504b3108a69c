use crate::egui_app::view_model::TrainingResultView;
use crate::training::{LogEntry, ProgressTick, TrainingForm};

/// Train page: form fields, request flag, simulated progress, and outcome.
#[derive(Clone, Debug, Default)]
pub struct TrainingPanelState {
    pub form: TrainingForm,
    /// A training request is outstanding.
    pub busy: bool,
    /// `None` until the first run starts; stays visible afterwards.
    pub progress: Option<SimulatedProgressState>,
    pub log: Vec<LogEntry>,
    pub result: Option<TrainingResultView>,
    pub error: Option<String>,
}

impl TrainingPanelState {
    pub fn submit_label(&self) -> &'static str {
        if self.busy {
            "Training..."
        } else {
            "Start Training"
        }
    }

    /// Reset the outcome panels and progress for a new run.
    pub fn begin_run(&mut self) {
        self.busy = true;
        self.error = None;
        self.result = None;
        self.log.clear();
        self.progress = Some(SimulatedProgressState::default());
    }

    /// Fold a timer tick into the visible progress and log.
    pub fn apply_tick(&mut self, tick: ProgressTick) {
        let progress = self.progress.get_or_insert_with(SimulatedProgressState::default);
        progress.percent = tick.percent;
        progress.label = tick.rounded();
        progress.finished = tick.finished;
        self.log.extend(tick.log);
    }
}

/// Cosmetic progress shown while the service trains.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimulatedProgressState {
    pub percent: f64,
    /// Rounded percentage shown on the bar.
    pub label: u8,
    pub finished: bool,
}

impl SimulatedProgressState {
    pub fn fraction(&self) -> f32 {
        (self.percent / 100.0).clamp(0.0, 1.0) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::LogKind;

    #[test]
    fn begin_run_clears_previous_outcome() {
        let mut state = TrainingPanelState {
            error: Some("old".into()),
            log: vec![LogEntry::now(LogKind::Info, "old line")],
            ..TrainingPanelState::default()
        };
        state.begin_run();
        assert!(state.busy);
        assert!(state.error.is_none());
        assert!(state.log.is_empty());
        assert_eq!(state.progress, Some(SimulatedProgressState::default()));
        assert_eq!(state.submit_label(), "Training...");
    }

    #[test]
    fn ticks_update_bar_and_append_log() {
        let mut state = TrainingPanelState::default();
        state.begin_run();
        state.apply_tick(ProgressTick {
            percent: 42.6,
            log: vec![LogEntry::now(LogKind::Info, "Epoch 5: Training accuracy improving...")],
            finished: false,
        });
        let progress = state.progress.clone().unwrap();
        assert_eq!(progress.label, 43);
        assert!((progress.fraction() - 0.426).abs() < 1e-6);
        assert_eq!(state.log.len(), 1);
    }
}
