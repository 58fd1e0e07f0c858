pub mod account_ops;
pub mod inbox_ops;
pub mod memory;
pub mod news_ops;
pub mod repository;
pub mod testimonial_ops;

pub use account_ops::{require_admin, AccountService};
pub use memory::{MemoryAbout, MemoryRepository};
pub use repository::{AboutRepository, IdentityProvider, ImageStore, Repository, UserDirectory};
