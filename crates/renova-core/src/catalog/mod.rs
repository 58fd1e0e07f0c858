//! Stateless catalog filtering, formatting and dashboard statistics
//!
//! Every function here is pure over slices of already-loaded records and
//! never reorders its input unless it says so.

pub mod dashboard;
pub mod filter;
pub mod format;

pub use dashboard::{BrandCount, DashboardStats};
pub use filter::{
    available_brands, featured, filter_catalog, filter_inbox, latest_testimonials,
    search_inventory, visible_testimonials, BrandFilter, InboxFilter,
};
pub use format::{format_mileage, format_rupiah, group_thousands, parse_rupiah};
