//! Local store facade
//!
//! Owns the shared connection and hands out typed handles for every part of
//! the persistence contract.

#![allow(clippy::result_large_err)]

use std::path::Path;

use renova_core::model::{Car, Entity, InboxMessage, NewsPost, Testimonial, User};

use crate::db::{self, SharedConnection};
use crate::errors::Result;
use crate::images::LocalImageStore;
use crate::migrations::apply_migrations;
use crate::repo::{LocalAbout, LocalCollection};
use crate::seed::backup::{self, LocalSnapshot, RestoreReport};
use crate::session::LocalIdentity;

#[derive(Clone, Debug)]
pub struct LocalStore {
    conn: SharedConnection,
}

impl LocalStore {
    /// Open (creating if needed) and migrate a database file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut conn = db::open(path.as_ref())?;
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        tracing::debug!(path = %path.as_ref().display(), "opened local store");
        Ok(Self {
            conn: SharedConnection::new(conn),
        })
    }

    /// Fresh migrated in-memory store
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = db::open_in_memory()?;
        db::configure(&conn)?;
        apply_migrations(&mut conn)?;
        Ok(Self {
            conn: SharedConnection::new(conn),
        })
    }

    pub fn collection<E: Entity>(&self) -> LocalCollection<E> {
        LocalCollection::new(self.conn.clone())
    }

    pub fn cars(&self) -> LocalCollection<Car> {
        self.collection()
    }

    pub fn news(&self) -> LocalCollection<NewsPost> {
        self.collection()
    }

    pub fn testimonials(&self) -> LocalCollection<Testimonial> {
        self.collection()
    }

    pub fn inbox(&self) -> LocalCollection<InboxMessage> {
        self.collection()
    }

    pub fn users(&self) -> LocalCollection<User> {
        self.collection()
    }

    pub fn about(&self) -> LocalAbout {
        LocalAbout::new(self.conn.clone())
    }

    pub fn images(&self) -> LocalImageStore {
        LocalImageStore::new(self.conn.clone())
    }

    pub fn identity(&self) -> LocalIdentity {
        LocalIdentity::new(self.conn.clone(), self.users())
    }

    pub fn export_data(&self) -> Result<LocalSnapshot> {
        self.conn
            .logged("export_data", "all", |conn| backup::export(conn))
    }

    pub fn import_data(&self, snapshot: &LocalSnapshot) -> Result<RestoreReport> {
        self.conn
            .logged("import_data", "all", |conn| backup::import(conn, snapshot))
    }

    pub fn clear_all_data(&self) -> Result<()> {
        self.conn.logged("clear_all_data", "all", backup::clear)
    }

    /// Replace all data with the default dataset
    pub fn force_initialize_defaults(&self) -> Result<RestoreReport> {
        self.conn.logged("reset", "all", backup::reset)
    }

    /// Collections that already received their one-time seed
    pub fn seeded_collections(&self) -> Result<Vec<String>> {
        self.conn
            .with(|conn| crate::seed::seeded_collections(conn))
    }
}
