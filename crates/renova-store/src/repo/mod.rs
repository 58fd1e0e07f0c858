//! Repository layer: one handle per collection over the shared connection

mod about;
mod collection;
pub(crate) mod rows;

pub use about::LocalAbout;
pub use collection::LocalCollection;
