use crate::backend::{ClassificationResult, ClassifierBackend, TrainingResult};
use crate::errors::RequestError;
use crate::preview::{self, DecodedImage};
use crate::training::{ProgressSimulator, ProgressTick, TrainingRequest};
use crate::upload::{SelectedFile, UploadRequest};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{Receiver, Sender},
    },
    thread,
    time::Duration,
};

type TryRecvError = std::sync::mpsc::TryRecvError;

pub(crate) enum JobMessage {
    ClassificationFinished(ClassificationJobResult),
    TrainingFinished(TrainingJobResult),
    TrainingProgress(ProgressTickMessage),
}

#[derive(Debug)]
pub(crate) struct ClassificationJobResult {
    pub(crate) request_id: u64,
    pub(crate) result: Result<ClassificationResult, RequestError>,
    pub(crate) preview: Option<DecodedImage>,
}

#[derive(Debug)]
pub(crate) struct TrainingJobResult {
    pub(crate) run_id: u64,
    pub(crate) result: Result<TrainingResult, RequestError>,
}

#[derive(Debug)]
pub(crate) struct ProgressTickMessage {
    pub(crate) run_id: u64,
    pub(crate) tick: ProgressTick,
}

/// Worker threads and the bookkeeping that decides which of their answers still count.
pub(crate) struct ControllerJobs {
    backend: Arc<dyn ClassifierBackend>,
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    next_id: u64,
    pub(super) classification_request: Option<u64>,
    pub(super) training_run: Option<u64>,
    /// Run whose ticks are applied; outlives the training request.
    pub(super) progress_run: Option<u64>,
    pub(super) progress_running: bool,
    progress_cancel: Option<Arc<AtomicBool>>,
}

impl ControllerJobs {
    pub(super) fn new(backend: Arc<dyn ClassifierBackend>) -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            backend,
            message_tx,
            message_rx,
            next_id: 1,
            classification_request: None,
            training_run: None,
            progress_run: None,
            progress_running: false,
            progress_cancel: None,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    #[cfg(test)]
    pub(super) fn message_sender(&self) -> Sender<JobMessage> {
        self.message_tx.clone()
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    pub(super) fn classification_in_progress(&self) -> bool {
        self.classification_request.is_some()
    }

    /// Spawn the upload worker. Returns `None` while another upload is outstanding.
    pub(super) fn begin_classification(&mut self, file: SelectedFile) -> Option<u64> {
        if self.classification_in_progress() {
            return None;
        }
        let request_id = self.next_id();
        self.classification_request = Some(request_id);
        let backend = Arc::clone(&self.backend);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = UploadRequest::read(&file).and_then(|upload| backend.classify(&upload));
            let preview = result
                .as_ref()
                .ok()
                .filter(|body| body.success)
                .and_then(|body| body.image.as_deref())
                .and_then(|uri| match preview::decode_data_uri(uri) {
                    Ok(image) => Some(image),
                    Err(err) => {
                        tracing::warn!("Skipping preview image: {err}");
                        None
                    }
                });
            let _ = tx.send(JobMessage::ClassificationFinished(ClassificationJobResult {
                request_id,
                result,
                preview,
            }));
        });
        Some(request_id)
    }

    /// Returns true when `request_id` is the outstanding upload, clearing it.
    pub(super) fn finish_classification(&mut self, request_id: u64) -> bool {
        if self.classification_request != Some(request_id) {
            return false;
        }
        self.classification_request = None;
        true
    }

    /// Forget the outstanding upload; its answer will be discarded.
    pub(super) fn abandon_classification(&mut self) {
        self.classification_request = None;
    }

    pub(super) fn training_in_progress(&self) -> bool {
        self.training_run.is_some()
    }

    /// Spawn the training request and a fresh progress timer under a new run id.
    pub(super) fn begin_training(
        &mut self,
        request: TrainingRequest,
        tick_period: Duration,
    ) -> Option<u64> {
        if self.training_in_progress() {
            return None;
        }
        let run_id = self.next_id();
        self.training_run = Some(run_id);
        self.start_progress_timer(run_id, tick_period);

        let backend = Arc::clone(&self.backend);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = backend.train(&request);
            let _ = tx.send(JobMessage::TrainingFinished(TrainingJobResult { run_id, result }));
        });
        Some(run_id)
    }

    pub(super) fn finish_training(&mut self, run_id: u64) -> bool {
        if self.training_run != Some(run_id) {
            return false;
        }
        self.training_run = None;
        true
    }

    fn start_progress_timer(&mut self, run_id: u64, period: Duration) {
        if let Some(previous) = self.progress_cancel.take() {
            previous.store(true, Ordering::Relaxed);
        }
        let cancel = Arc::new(AtomicBool::new(false));
        self.progress_cancel = Some(Arc::clone(&cancel));
        self.progress_run = Some(run_id);
        self.progress_running = true;
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let mut rng = rand::rng();
            let mut simulator = ProgressSimulator::new();
            loop {
                thread::sleep(period);
                if cancel.load(Ordering::Relaxed) {
                    break;
                }
                let Some(tick) = simulator.tick(&mut rng) else {
                    break;
                };
                let finished = tick.finished;
                if tx
                    .send(JobMessage::TrainingProgress(ProgressTickMessage { run_id, tick }))
                    .is_err()
                    || finished
                {
                    break;
                }
            }
        });
    }

    /// Returns true when the tick belongs to the current run.
    pub(super) fn accept_progress_tick(&mut self, run_id: u64, finished: bool) -> bool {
        if self.progress_run != Some(run_id) {
            return false;
        }
        if finished {
            self.progress_running = false;
            self.progress_cancel = None;
        }
        true
    }

    pub(super) fn has_active_jobs(&self) -> bool {
        self.classification_in_progress() || self.training_in_progress() || self.progress_running
    }
}
