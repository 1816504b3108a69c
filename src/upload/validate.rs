use std::path::{Path, PathBuf};

use crate::errors::ValidationError;

use super::media_type::MediaType;

/// Largest file the service accepts, in bytes.
pub const MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// A file the user picked, before validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileCandidate {
    pub path: PathBuf,
    pub size: u64,
    /// Type declared by the file extension, if recognized.
    pub media_type: Option<MediaType>,
}

impl FileCandidate {
    /// Read size and declared type for a path on disk.
    pub fn inspect(path: &Path) -> Result<Self, ValidationError> {
        let metadata = std::fs::metadata(path).map_err(|source| ValidationError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            size: metadata.len(),
            media_type: MediaType::from_path(path),
        })
    }
}

/// A file that passed client-side validation and can be uploaded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
    pub media_type: MediaType,
}

/// Check the size limit first, then the declared type.
pub fn validate_selection(candidate: FileCandidate) -> Result<SelectedFile, ValidationError> {
    if candidate.size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::FileTooLarge {
            size: candidate.size,
        });
    }
    let media_type = candidate
        .media_type
        .ok_or(ValidationError::UnsupportedMediaType)?;
    let file_name = candidate
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(SelectedFile {
        path: candidate.path,
        file_name,
        size: candidate.size,
        media_type,
    })
}

/// Inspect a path on disk and validate it in one step.
pub fn select_file(path: &Path) -> Result<SelectedFile, ValidationError> {
    validate_selection(FileCandidate::inspect(path)?)
}
