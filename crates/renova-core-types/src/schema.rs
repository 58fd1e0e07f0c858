//! Canonical schema constants for structured logging and events
//!
//! These constants keep log field names identical across the local shim,
//! the remote client and the engine.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_REQUEST_ID: &str = "request_id";

// Persistence context
pub const FIELD_BACKEND: &str = "backend";
pub const FIELD_COLLECTION: &str = "collection";
pub const FIELD_ENTITY_ID: &str = "entity_id";
pub const FIELD_ROW_COUNT: &str = "row_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_FALLBACK: &str = "fallback";
