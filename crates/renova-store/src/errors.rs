//! Error helpers for renova-store
//!
//! Wraps renova-core ExError with store-specific constructors

use renova_core::errors::{ExError, ExErrorKind, RenovaError};
use rusqlite::ErrorCode;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: expected {}, got {}",
            migration_id, expected, actual
        ))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

/// Map a write failure, turning unique-constraint violations into
/// `AlreadyExists`
pub fn from_rusqlite_write(collection: &str, key: Option<&str>, err: rusqlite::Error) -> ExError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            RenovaError::AlreadyExists {
                collection: collection.to_string(),
                key: key.unwrap_or("record").to_string(),
            }
            .into()
        }
        _ => from_rusqlite(err),
    }
}

pub fn not_found(collection: &str, id: &str, op: &str) -> ExError {
    ExError::from(RenovaError::NotFound {
        collection: collection.to_string(),
        id: id.to_string(),
    })
    .with_op(op)
}

/// Stored JSON body that no longer deserializes into its entity
pub fn corrupt_row(collection: &str, id: &str, err: serde_json::Error) -> ExError {
    ExError::new(ExErrorKind::Serialization)
        .with_op("decode_row")
        .with_collection(collection)
        .with_entity_id(id)
        .with_message(err.to_string())
}
