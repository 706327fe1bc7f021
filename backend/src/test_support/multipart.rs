//! Hand-built `multipart/form-data` bodies for HTTP tests.

const BOUNDARY: &str = "gamics-test-boundary";

/// Builder for a multipart request body.
///
/// # Examples
///
/// ```rust
/// use gamics::test_support::MultipartBody;
///
/// let body = MultipartBody::new()
///     .text("title", "Cyberpunk 2077")
///     .file("image", "cover.png", "image/png", b"png");
/// assert!(body.content_type().starts_with("multipart/form-data; boundary="));
/// assert!(!body.finish().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MultipartBody {
    bytes: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Body holding every required game text field.
    pub fn game(title: &str) -> Self {
        Self::new()
            .text("title", title)
            .text("genre", "Action / Adventure")
            .text("description", "Free download for the latest DLC.")
            .text("category", "Featured")
            .text("cta_text", "DOWNLOAD")
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.push_header(&format!("Content-Disposition: form-data; name=\"{name}\""));
        self.bytes.extend_from_slice(b"\r\n");
        self.bytes.extend_from_slice(value.as_bytes());
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.push_header(&format!(
            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\""
        ));
        self.bytes
            .extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        self.bytes.extend_from_slice(data);
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    /// Value for the request's `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={BOUNDARY}")
    }

    pub fn finish(mut self) -> Vec<u8> {
        self.bytes
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        self.bytes
    }

    fn push_header(&mut self, disposition: &str) {
        self.bytes
            .extend_from_slice(format!("--{BOUNDARY}\r\n{disposition}\r\n").as_bytes());
    }
}
