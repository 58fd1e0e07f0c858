//! Renova Engine - configuration and session orchestration
//!
//! Provides:
//! - Layered settings (defaults, `renova.toml`, `RENOVA_*` environment)
//! - Backend selection at startup behind one handle of contract objects
//! - The `Showroom` service: public catalog and lead capture, admin CRUD,
//!   and the fallback policy for an unreachable backend

pub mod backend;
pub mod settings;
pub mod showroom;

pub use backend::Backend;
pub use settings::{BackendKind, Settings};
pub use showroom::Showroom;
