use super::jobs::JobMessage;
use super::*;

impl EguiController {
    /// Apply every message the worker threads have sent since the last frame.
    pub fn poll_background_jobs(&mut self) {
        loop {
            let message = match self.jobs.try_recv_message() {
                Ok(message) => message,
                Err(
                    std::sync::mpsc::TryRecvError::Empty
                    | std::sync::mpsc::TryRecvError::Disconnected,
                ) => {
                    break;
                }
            };

            match message {
                JobMessage::ClassificationFinished(message) => {
                    self.handle_classification_finished(message)
                }
                JobMessage::TrainingFinished(message) => self.handle_training_finished(message),
                JobMessage::TrainingProgress(message) => self.handle_progress_tick(message),
            }
        }
    }
}
