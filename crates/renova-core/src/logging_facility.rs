//! Structured logging facility
//!
//! Single initialization point plus the canonical operation macros used by
//! both persistence backends and the engine:
//!
//! - `init(profile)` installs the tracing subscriber once
//! - `log_op_start!`, `log_op_end!`, `log_op_error!` emit the canonical
//!   `component`/`op`/`event` fields
//! - test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use renova_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
