//! Training form handling, log lines, and the simulated progress timer.

mod form;
mod log;
pub mod progress;

pub use form::{TrainingForm, TrainingRequest, parse_int_prefix};
pub use log::{LogEntry, LogKind};
pub use progress::{ProgressSimulator, ProgressTick};
