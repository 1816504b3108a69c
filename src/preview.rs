//! Decoding of the `data:` URI preview image returned with a classification.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// RGBA pixels ready to upload as a texture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    pub fn size(&self) -> [usize; 2] {
        [self.width as usize, self.height as usize]
    }
}

/// Reasons a preview image could not be shown.
#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Preview is not a data URI")]
    NotDataUri,
    #[error("Preview data URI is not base64 encoded")]
    NotBase64,
    #[error("Preview base64 is invalid: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Preview image could not be decoded: {0}")]
    Image(#[from] image::ImageError),
}

/// Decode `data:<mime>;base64,<payload>` into RGBA pixels.
pub fn decode_data_uri(uri: &str) -> Result<DecodedImage, PreviewError> {
    let rest = uri.trim().strip_prefix("data:").ok_or(PreviewError::NotDataUri)?;
    let (header, payload) = rest.split_once(',').ok_or(PreviewError::NotDataUri)?;
    if !header.ends_with(";base64") {
        return Err(PreviewError::NotBase64);
    }
    let bytes = STANDARD.decode(payload.trim())?;
    let image = image::load_from_memory(&bytes)?.to_rgba8();
    let (width, height) = image.dimensions();
    Ok(DecodedImage {
        width,
        height,
        rgba: image.into_raw(),
    })
}
