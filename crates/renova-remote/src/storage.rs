//! Storage-bucket uploads
//!
//! Uploaded objects are addressed by their public URL, which doubles as the
//! image token.

use async_trait::async_trait;
use chrono::Utc;
use renova_core::model::image::{content_type_for, extension_of};
use renova_core::model::ImageToken;
use renova_core::ops::ImageStore;
use reqwest::Method;
use uuid::Uuid;

use crate::client::RemoteClient;
use crate::errors::Result;

const UPLOAD_PREFIX: &str = "uploads";

#[derive(Clone)]
pub struct RemoteImageStore {
    client: RemoteClient,
    bucket: String,
}

/// `uploads/<millis>-<random>.<ext>`
pub fn object_path(file_name: &str) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!(
        "{}/{}-{}.{}",
        UPLOAD_PREFIX,
        Utc::now().timestamp_millis(),
        &random[..10],
        extension_of(file_name)
    )
}

impl RemoteImageStore {
    pub(crate) fn new(client: RemoteClient, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

#[async_trait]
impl ImageStore for RemoteImageStore {
    async fn upload(&self, bytes: Vec<u8>, file_name: &str) -> Result<ImageToken> {
        let path = object_path(file_name);
        let request = self
            .client
            .request(Method::POST, &self.client.storage_url(&self.bucket, &path))
            .header(reqwest::header::CONTENT_TYPE, content_type_for(file_name))
            .body(bytes);
        self.client.send("upload_image", "storage", request).await?;

        let url = self.client.public_url(&self.bucket, &path);
        tracing::debug!(bucket = %self.bucket, path = %path, "uploaded image");
        Ok(ImageToken::new(url))
    }

    /// Absolute URLs pass through; bare object paths become public URLs
    async fn resolve(&self, token: &ImageToken) -> Result<String> {
        if token.is_external() {
            return Ok(token.as_str().to_string());
        }
        Ok(self
            .client
            .public_url(&self.bucket, token.as_str().trim_start_matches('/')))
    }
}
