use crate::error::UploadError;
use std::path::Path;

pub const PDF_MIME: &str = "application/pdf";

/// A local file selected for upload, with the content type it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl PdfFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime_type = declared_type(&name);
        Self {
            name,
            mime_type,
            bytes,
        }
    }

    pub async fn load(path: &Path) -> Result<Self, UploadError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| UploadError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        log::debug!("Loaded {} ({} bytes)", name, bytes.len());
        Ok(Self::new(name, bytes))
    }

    pub fn is_pdf(&self) -> bool {
        self.mime_type == PDF_MIME
    }
}

/// Checks the declared type of a path without reading it.
pub fn declares_pdf(path: &Path) -> bool {
    declared_type(&path.to_string_lossy()) == PDF_MIME
}

/// Content type guessed from the file name, octet-stream when unknown.
fn declared_type(name: &str) -> String {
    mime_guess::from_path(name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
