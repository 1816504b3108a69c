//! Minimal `multipart/form-data` encoder for file uploads.

use uuid::Uuid;

/// Builder for a multipart body with a random boundary.
#[derive(Debug)]
pub struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::with_boundary(format!("----civic-classifier-{}", Uuid::new_v4().simple()))
    }

    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            body: Vec::new(),
        }
    }

    /// Append a file part.
    pub fn add_file(&mut self, field: &str, file_name: &str, content_type: &str, bytes: &[u8]) {
        self.open_part();
        self.body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                escape_quoted(field),
                escape_quoted(file_name)
            )
            .as_bytes(),
        );
        self.body
            .extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
    }

    /// Value for the request `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Close the body and return its bytes.
    pub fn finish(mut self) -> Vec<u8> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        self.body
    }

    fn open_part(&mut self) {
        self.body
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
    }
}

/// Percent-encode the characters that would break a quoted header parameter.
fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_single_file_part() {
        let mut form = MultipartForm::with_boundary("XYZ");
        form.add_file("file", "pothole.png", "image/png", b"\x89PNG");
        assert_eq!(form.content_type(), "multipart/form-data; boundary=XYZ");
        let body = form.finish();
        let expected = b"--XYZ\r\nContent-Disposition: form-data; name=\"file\"; filename=\"pothole.png\"\r\nContent-Type: image/png\r\n\r\n\x89PNG\r\n--XYZ--\r\n";
        assert_eq!(body, expected.to_vec());
    }

    #[test]
    fn escapes_quotes_and_newlines_in_file_names() {
        let mut form = MultipartForm::with_boundary("B");
        form.add_file("file", "a\"b\r\n.png", "image/png", b"");
        let body = String::from_utf8(form.finish()).unwrap();
        assert!(body.contains("filename=\"a%22b%0D%0A.png\""));
    }

    #[test]
    fn random_boundaries_differ() {
        assert_ne!(
            MultipartForm::new().content_type(),
            MultipartForm::new().content_type()
        );
    }
}
