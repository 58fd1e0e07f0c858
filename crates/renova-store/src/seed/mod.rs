//! Default dataset seeding and whole-store backup utilities

pub mod autoseed;
pub mod backup;

pub use autoseed::{ensure_about_seeded, ensure_seeded, seeded_collections};
pub use backup::LocalSnapshot;
