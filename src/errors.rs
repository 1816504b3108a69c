//! Error kinds surfaced to the user by the upload and training flows.
//!
//! Both kinds end the current operation and are rendered as inline panel
//! text. Validation errors are detected before any request is sent; request
//! errors happen after a request was attempted.

use std::path::PathBuf;

use thiserror::Error;

/// Client-side rejection detected before a request is issued.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The selected file exceeds the upload limit.
    #[error("File size must be less than 16MB")]
    FileTooLarge {
        /// Size of the rejected file in bytes.
        size: u64,
    },
    /// The selected file does not declare a supported image type.
    #[error("Please select a valid image file (PNG, JPG, JPEG, GIF, BMP)")]
    UnsupportedMediaType,
    /// Submit was pressed without a selected file.
    #[error("Please select a file to upload")]
    NoFileSelected,
    /// File metadata could not be read.
    #[error("Unable to read {path}: {source}")]
    Unreadable {
        /// Path of the selected file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Training was requested without a dataset path.
    #[error("Please provide a dataset path")]
    MissingDatasetPath,
}

/// Failure after a request was attempted.
///
/// Transport failures and undecodable bodies share the same user-facing
/// prefix so the panel reads the same regardless of where the exchange broke.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Connection, TLS, or IO failure while talking to the service.
    #[error("Network error: {0}")]
    Transport(String),
    /// The response body was not valid JSON for the expected shape.
    #[error("Network error: {0}")]
    Decode(String),
    /// The file to upload could not be read from disk.
    #[error("Failed to read {path}: {source}")]
    ReadFile {
        /// Path of the file being uploaded.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
}
