//! Connection settings for the hosted backend

use renova_core_types::Sensitive;
use serde::Deserialize;

pub const DEFAULT_BUCKET: &str = "uploads";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

fn default_bucket() -> String {
    DEFAULT_BUCKET.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Project URL, public API key, storage bucket and request timeout
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteConfig {
    pub url: String,
    pub anon_key: Sensitive<String>,
    #[serde(default = "default_bucket")]
    pub bucket: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl RemoteConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: Sensitive::new(anon_key.into()),
            bucket: default_bucket(),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Project URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }
}
