//! Helpers to convert service responses into render-friendly views.

use crate::backend::{ClassificationResult, TrainingResult};
use crate::training::progress::COMPLETION_MESSAGE;

/// Shown when the service rejects an image without saying why.
pub const CLASSIFICATION_FALLBACK_ERROR: &str = "An error occurred during classification";
/// Shown when the service rejects a training request without saying why.
pub const TRAINING_FALLBACK_ERROR: &str = "Training failed";

/// Text for a `success: false` body: the service's own error, else the fallback.
pub fn failure_text(error: Option<&str>, fallback: &str) -> String {
    match error {
        Some(error) if !error.is_empty() => error.to_string(),
        _ => fallback.to_string(),
    }
}

/// Display-ready classification outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassificationView {
    /// Prediction with underscores turned into spaces and words capitalised.
    pub label: String,
    pub confidence_text: String,
    /// Width of the confidence bar, in percent.
    pub confidence_percent: f64,
    pub severity: String,
    /// Lowercased severity, used to pick the badge color.
    pub severity_class: String,
    pub priority: String,
    pub priority_class: String,
}

impl ClassificationView {
    pub fn from_result(result: &ClassificationResult) -> Self {
        let severity = result.severity.clone().unwrap_or_default();
        let priority = result.priority.clone().unwrap_or_default();
        let confidence_percent = result.confidence_percent.unwrap_or(0.0);
        Self {
            label: format_class_name(result.prediction.as_deref().unwrap_or_default()),
            confidence_text: format!("{confidence_percent}%"),
            confidence_percent,
            severity_class: severity.to_lowercase(),
            severity,
            priority_class: priority.to_lowercase(),
            priority,
        }
    }

    /// Fill fraction for the confidence bar.
    pub fn bar_fraction(&self) -> f32 {
        (self.confidence_percent / 100.0).clamp(0.0, 1.0) as f32
    }
}

/// Display-ready training acknowledgement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrainingResultView {
    pub headline: &'static str,
    pub message: String,
    pub note: String,
}

impl TrainingResultView {
    pub fn from_result(result: &TrainingResult) -> Self {
        Self {
            headline: COMPLETION_MESSAGE,
            message: result.message.clone().unwrap_or_default(),
            note: result.note.clone().unwrap_or_default(),
        }
    }

    pub fn message_line(&self) -> String {
        format!("Message: {}", self.message)
    }

    pub fn note_line(&self) -> String {
        format!("Note: {}", self.note)
    }
}

/// Human-readable size for the selected-file line.
pub fn format_file_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;
    let value = bytes as f64;
    if value >= MIB {
        format!("{:.1} MB", value / MIB)
    } else if value >= KIB {
        format!("{:.1} KB", value / KIB)
    } else {
        format!("{bytes} B")
    }
}

/// Replace underscores with spaces and uppercase the first character of each word.
///
/// Word characters are ASCII letters and digits; everything else starts a new word.
pub fn format_class_name(name: &str) -> String {
    let mut formatted = String::with_capacity(name.len());
    let mut in_word = false;
    for ch in name.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        let is_word = ch.is_ascii_alphanumeric();
        if is_word && !in_word {
            formatted.push(ch.to_ascii_uppercase());
        } else {
            formatted.push(ch);
        }
        in_word = is_word;
    }
    formatted
}
