//! Transport-neutral multipart form used for image and document uploads.

use std::path::Path;

use crate::error::{ApiError, CredentialError};

/// A file to upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// In-memory file with an explicit MIME type.
    #[must_use]
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Credentials`] wrapping the I/O error if the file
    /// cannot be read.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::Credentials(CredentialError::Io(e)))?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
        let mime_type = guess_mime(&file_name).to_string();
        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }
}

/// Best-effort MIME type for the upload kinds the backend accepts.
fn guess_mime(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Value of one form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    Text(String),
    File(FileUpload),
}

/// One named form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartPart {
    pub name: String,
    pub value: PartValue,
}

/// Ordered list of form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<MultipartPart>,
}

impl MultipartForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(MultipartPart {
            name: name.into(),
            value: PartValue::Text(value.into()),
        });
        self
    }

    /// Append a file field.
    #[must_use]
    pub fn file(mut self, name: impl Into<String>, file: FileUpload) -> Self {
        self.parts.push(MultipartPart {
            name: name.into(),
            value: PartValue::File(file),
        });
        self
    }

    /// Append every top-level field of a JSON object as text.
    ///
    /// Strings are sent verbatim, `null`s are skipped and anything else
    /// (numbers, arrays, nested objects) is sent as its JSON text, which is
    /// how the backend expects structured fields inside a form upload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `fields` does not serialize to a JSON
    /// object.
    pub fn json_fields<T: serde::Serialize + ?Sized>(
        mut self,
        fields: &T,
    ) -> Result<Self, ApiError> {
        let value = serde_json::to_value(fields).map_err(|e| ApiError::Encode(e.to_string()))?;
        let serde_json::Value::Object(map) = value else {
            return Err(ApiError::Encode(
                "form fields must serialize to a JSON object".to_string(),
            ));
        };
        for (name, value) in map {
            match value {
                serde_json::Value::Null => {}
                serde_json::Value::String(s) => self = self.text(name, s),
                other => self = self.text(name, other.to_string()),
            }
        }
        Ok(self)
    }

    /// Fields in insertion order.
    #[must_use]
    pub fn parts(&self) -> &[MultipartPart] {
        &self.parts
    }

    /// First text value for `name`.
    #[must_use]
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match &part.value {
            PartValue::Text(text) if part.name == name => Some(text.as_str()),
            _ => None,
        })
    }

    /// First file for `name`.
    #[must_use]
    pub fn file_value(&self, name: &str) -> Option<&FileUpload> {
        self.parts.iter().find_map(|part| match &part.value {
            PartValue::File(file) if part.name == name => Some(file),
            _ => None,
        })
    }
}
