//! Renova Remote - client for the hosted backend
//!
//! Provides:
//! - A PostgREST table client implementing the persistence contract
//! - About-page singleton access
//! - Storage-bucket uploads returning public URLs
//! - A GoTrue identity provider keeping the access token in memory

pub mod about;
pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod storage;
pub mod store;
pub mod table;

pub use about::RemoteAbout;
pub use auth::RemoteIdentity;
pub use client::RemoteClient;
pub use config::RemoteConfig;
pub use storage::RemoteImageStore;
pub use store::RemoteStore;
pub use table::RemoteTable;

/// Backend name used in log fields
pub const BACKEND: &str = "remote";
