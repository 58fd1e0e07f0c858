//! Renova Core - domain model and persistence contract of the showroom
//!
//! This crate provides:
//! - Entity models (cars, news, testimonials, inbox, users, about page)
//!   with their create drafts and partial-update patches
//! - The persistence contract implemented by the local and remote backends
//! - Account mapping and admin gating over a delegated identity provider
//! - Validation rules for caller-side input checks
//! - Stateless catalog filtering, formatting and dashboard statistics
//! - The default showroom dataset
//! - The canonical error and logging facilities

pub mod catalog;
pub mod defaults;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod rules;

pub use renova_core_types as core_types;

// Re-export commonly used types
pub use errors::{ExError, ExErrorKind, RenovaError, Result};
pub use model::{
    AboutData, Car, CarDraft, CarPatch, Collection, Entity, ImageToken, InboxMessage,
    NewsPost, Principal, Testimonial, User, UserRole,
};
pub use ops::{
    require_admin, AboutRepository, AccountService, IdentityProvider, ImageStore,
    MemoryRepository, Repository, UserDirectory,
};
pub use rules::Validate;
