//! File selection, client-side validation, and upload packaging.

mod media_type;
mod validate;

use crate::errors::RequestError;

pub use media_type::MediaType;
pub use validate::{FileCandidate, MAX_UPLOAD_BYTES, SelectedFile, select_file, validate_selection};

/// One file packaged for the classification endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadRequest {
    pub file_name: String,
    pub media_type: MediaType,
    pub bytes: Vec<u8>,
}

impl UploadRequest {
    /// Read the selected file from disk.
    pub fn read(selected: &SelectedFile) -> Result<Self, RequestError> {
        let bytes = std::fs::read(&selected.path).map_err(|source| RequestError::ReadFile {
            path: selected.path.clone(),
            source,
        })?;
        Ok(Self {
            file_name: selected.file_name.clone(),
            media_type: selected.media_type,
            bytes,
        })
    }
}
