//! Access to the external classification service.
//!
//! The controller only sees the [`ClassifierBackend`] trait so flows can be
//! exercised without a server; [`HttpBackend`] is the real implementation.

pub mod api;
mod multipart;
mod types;

use thiserror::Error;

use crate::errors::RequestError;
use crate::training::TrainingRequest;
use crate::upload::UploadRequest;

pub use api::HttpBackend;
pub use types::{ClassificationResult, TrainingResult};

/// The two calls the client makes against the service.
///
/// Implementations block; callers run them on worker threads.
pub trait ClassifierBackend: Send + Sync {
    /// POST one image to the classification endpoint.
    fn classify(&self, upload: &UploadRequest) -> Result<ClassificationResult, RequestError>;
    /// POST training parameters to the training endpoint.
    fn train(&self, request: &TrainingRequest) -> Result<TrainingResult, RequestError>;
}

/// Errors raised while building a backend from settings.
#[derive(Debug, Error)]
pub enum BackendSetupError {
    /// The base URL could not be parsed or joined.
    #[error("Invalid server URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    /// The base URL is not an http(s) location.
    #[error("Server URL must start with http:// or https://: {url}")]
    UnsupportedBaseUrl { url: String },
}
