//! Correlation ids for request tracking
//!
//! A `RequestId` is minted per backend call. The remote client sends it as
//! the `x-request-id` header and both backends attach it to errors, so a
//! failed call can be matched against server-side logs.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single backend request
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new RequestId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap an id received from elsewhere (e.g. echoed back by a server)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
