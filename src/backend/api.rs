//! HTTP client for the classification and training endpoints.

use std::time::Instant;

use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ServerSettings;
use crate::errors::RequestError;
use crate::http_client;
use crate::training::TrainingRequest;
use crate::upload::UploadRequest;

use super::multipart::MultipartForm;
use super::types::{ClassificationResult, TrainingResult};
use super::{BackendSetupError, ClassifierBackend};

/// Path of the classification endpoint, relative to the base URL.
pub const UPLOAD_PATH: &str = "upload";
/// Path of the training endpoint, relative to the base URL.
pub const TRAIN_PATH: &str = "api/train";
/// Multipart field that carries the image.
pub const UPLOAD_FIELD: &str = "file";

/// Responses embed the preview image as base64, so allow generous bodies.
const MAX_RESPONSE_BYTES: usize = 32 * 1024 * 1024;

/// Talks to the service over HTTP with a shared agent.
#[derive(Clone)]
pub struct HttpBackend {
    agent: ureq::Agent,
    upload_url: Url,
    train_url: Url,
}

impl HttpBackend {
    /// Resolve both endpoints against the configured base URL.
    pub fn new(settings: &ServerSettings) -> Result<Self, BackendSetupError> {
        let base = parse_base_url(&settings.base_url)?;
        let upload_url = join_endpoint(&base, UPLOAD_PATH)?;
        let train_url = join_endpoint(&base, TRAIN_PATH)?;
        Ok(Self {
            agent: http_client::build_agent(settings.timeouts()),
            upload_url,
            train_url,
        })
    }

    pub fn upload_url(&self) -> &Url {
        &self.upload_url
    }

    pub fn train_url(&self) -> &Url {
        &self.train_url
    }
}

impl ClassifierBackend for HttpBackend {
    fn classify(&self, upload: &UploadRequest) -> Result<ClassificationResult, RequestError> {
        let mut form = MultipartForm::new();
        form.add_file(
            UPLOAD_FIELD,
            &upload.file_name,
            upload.media_type.mime(),
            &upload.bytes,
        );
        let content_type = form.content_type();
        let started = Instant::now();
        tracing::info!(
            url = %self.upload_url,
            file = %upload.file_name,
            bytes = upload.bytes.len(),
            "Uploading image for classification"
        );
        let response = self
            .agent
            .post(self.upload_url.as_str())
            .set("Accept", "application/json")
            .set("Content-Type", &content_type)
            .send_bytes(&form.finish());
        let result = decode_json(response);
        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "Classification request finished"
        );
        result
    }

    fn train(&self, request: &TrainingRequest) -> Result<TrainingResult, RequestError> {
        let started = Instant::now();
        tracing::info!(
            url = %self.train_url,
            dataset_path = %request.dataset_path,
            epochs = ?request.epochs,
            batch_size = ?request.batch_size,
            "Requesting training run"
        );
        let response = self
            .agent
            .post(self.train_url.as_str())
            .set("Accept", "application/json")
            .send_json(request);
        let result = decode_json(response);
        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "Training request finished"
        );
        result
    }
}

/// Decode a JSON body regardless of the HTTP status.
///
/// The service reports failures as JSON with 4xx/5xx codes; those bodies are
/// still the answer. Only transport failures and non-JSON bodies are errors.
fn decode_json<T: DeserializeOwned>(
    response: Result<ureq::Response, ureq::Error>,
) -> Result<T, RequestError> {
    let response = match response {
        Ok(response) => response,
        Err(ureq::Error::Status(code, response)) => {
            tracing::warn!(code, url = response.get_url(), "Service returned an error status");
            response
        }
        Err(ureq::Error::Transport(err)) => {
            tracing::warn!("Request failed: {err}");
            return Err(RequestError::Transport(err.to_string()));
        }
    };
    let bytes = http_client::read_response_bytes(response, MAX_RESPONSE_BYTES)
        .map_err(|err| RequestError::Transport(err.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|err| {
        tracing::warn!("Response body is not valid JSON: {err}");
        RequestError::Decode(err.to_string())
    })
}

fn parse_base_url(raw: &str) -> Result<Url, BackendSetupError> {
    let url = Url::parse(raw.trim()).map_err(|source| BackendSetupError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })?;
    if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
        return Err(BackendSetupError::UnsupportedBaseUrl {
            url: raw.to_string(),
        });
    }
    Ok(url)
}

/// Join relative to the base path so a prefix like `/civic/` is kept.
fn join_endpoint(base: &Url, path: &str) -> Result<Url, BackendSetupError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    base.join(path)
        .map_err(|source| BackendSetupError::InvalidBaseUrl {
            url: base.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(base_url: &str) -> ServerSettings {
        ServerSettings {
            base_url: base_url.to_string(),
            ..ServerSettings::default()
        }
    }

    #[test]
    fn resolves_endpoints_against_root() {
        let backend = HttpBackend::new(&settings("http://localhost:5000")).unwrap();
        assert_eq!(backend.upload_url().as_str(), "http://localhost:5000/upload");
        assert_eq!(backend.train_url().as_str(), "http://localhost:5000/api/train");
    }

    #[test]
    fn keeps_path_prefix_of_base_url() {
        let backend = HttpBackend::new(&settings("https://example.org/civic")).unwrap();
        assert_eq!(backend.upload_url().as_str(), "https://example.org/civic/upload");
        let backend = HttpBackend::new(&settings("https://example.org/civic/")).unwrap();
        assert_eq!(
            backend.train_url().as_str(),
            "https://example.org/civic/api/train"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(
            HttpBackend::new(&settings("not a url")),
            Err(BackendSetupError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            HttpBackend::new(&settings("ftp://example.org")),
            Err(BackendSetupError::UnsupportedBaseUrl { .. })
        ));
    }
}
