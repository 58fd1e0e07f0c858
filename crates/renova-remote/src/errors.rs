//! HTTP failure mapping onto the canonical error facility
//!
//! Transport failures and server-side errors become `BackendUnavailable`
//! so callers can apply their fallback policy; client errors keep their
//! meaning.

use renova_core::errors::{ExError, ExErrorKind, RenovaError};
use reqwest::StatusCode;

use crate::BACKEND;

pub type Result<T> = std::result::Result<T, ExError>;

const PREVIEW_CHAR_LIMIT: usize = 160;

/// Connection refused, DNS failure, timeout and the like
pub fn map_transport_error(err: reqwest::Error) -> ExError {
    let message = if err.is_timeout() {
        format!("request timed out: {}", err)
    } else {
        err.to_string()
    };
    RenovaError::BackendUnavailable {
        backend: BACKEND.to_string(),
        message,
    }
    .into()
}

/// Non-success HTTP status
pub fn map_status_error(status: StatusCode, body: &[u8]) -> ExError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), preview)
    };

    let kind = match status {
        StatusCode::TOO_MANY_REQUESTS
        | StatusCode::REQUEST_TIMEOUT
        | StatusCode::GATEWAY_TIMEOUT => ExErrorKind::BackendUnavailable,
        StatusCode::UNAUTHORIZED => ExErrorKind::Unauthorised,
        StatusCode::FORBIDDEN => ExErrorKind::Forbidden,
        StatusCode::NOT_FOUND => ExErrorKind::NotFound,
        StatusCode::CONFLICT => ExErrorKind::AlreadyExists,
        _ if status.is_client_error() => ExErrorKind::InvalidInput,
        _ => ExErrorKind::BackendUnavailable,
    };

    ExError::new(kind).with_message(message)
}

/// Response body that does not match the expected shape
pub fn decode_error(err: serde_json::Error, body: &[u8]) -> ExError {
    ExError::new(ExErrorKind::Serialization).with_message(format!(
        "unexpected response ({}): {}",
        err,
        body_preview(body)
    ))
}

/// Whitespace-compacted, truncated rendering of a response body
pub fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
