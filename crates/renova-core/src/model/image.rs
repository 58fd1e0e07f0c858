use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle returned by an image upload
///
/// Remote tokens are public URLs; local tokens are `<folder>/<id>_<name>`
/// keys into the image table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageToken(String);

impl ImageToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// Already displayable as-is (hosted URL or inline data URL)
    pub fn is_external(&self) -> bool {
        self.0.starts_with("http://")
            || self.0.starts_with("https://")
            || self.0.starts_with("data:")
    }
}

impl fmt::Display for ImageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ImageToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Image held by the local store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredImage {
    pub token: ImageToken,
    pub name: String,
    pub folder: String,
    /// `data:<mime>;base64,<payload>`
    pub data: String,
    pub uploaded_at: DateTime<Utc>,
    pub size: u64,
    pub content_type: String,
}

/// Guess a MIME type from a file name extension
pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

/// File extension used when naming an upload, `bin` when absent
pub fn extension_of(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
        .unwrap_or_else(|| "bin".to_string())
}
