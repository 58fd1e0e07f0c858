//! Renova Store - local persistence shim over SQLite
//!
//! Provides:
//! - SQLite schema with an embedded migrations framework
//! - One repository per collection implementing the persistence contract
//! - Auto-seeding of the default showroom dataset
//! - Inline image storage as data URLs
//! - A persisted development session standing in for an identity provider
//! - Export, import, clear and reset utilities

pub mod db;
pub mod errors;
pub mod images;
pub mod migrations;
pub mod repo;
pub mod seed;
pub mod session;
pub mod store;

// Re-export key types
pub use errors::Result;
pub use images::LocalImageStore;
pub use repo::{LocalAbout, LocalCollection};
pub use seed::LocalSnapshot;
pub use session::LocalIdentity;
pub use store::LocalStore;

/// Backend name used in log fields
pub const BACKEND: &str = "local";
