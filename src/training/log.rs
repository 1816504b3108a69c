use time::{OffsetDateTime, format_description::FormatItem, macros::format_description};

const TIME_FORMAT: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second]");

/// Visual category of a training log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogKind {
    Info,
    Success,
}

/// One line in the training log panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    /// Local wall-clock time, `HH:MM:SS`.
    pub timestamp: String,
    pub message: String,
    pub kind: LogKind,
}

impl LogEntry {
    /// Stamp a message with the current local time.
    pub fn now(kind: LogKind, message: impl Into<String>) -> Self {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        Self::at(now, kind, message)
    }

    pub fn at(when: OffsetDateTime, kind: LogKind, message: impl Into<String>) -> Self {
        Self {
            timestamp: when.format(TIME_FORMAT).unwrap_or_default(),
            message: message.into(),
            kind,
        }
    }

    /// Text as displayed in the log panel.
    pub fn display_line(&self) -> String {
        format!("[{}] {}", self.timestamp, self.message)
    }
}
