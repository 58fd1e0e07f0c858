use async_trait::async_trait;
use chrono::Utc;
use renova_core::model::{Entity, User};
use renova_core::ops::{Repository, UserDirectory};
use std::marker::PhantomData;
use uuid::Uuid;

use super::rows;
use crate::db::SharedConnection;
use crate::errors::{from_rusqlite, not_found, Result};
use crate::seed::autoseed::ensure_seeded;

/// Local repository for one collection
///
/// Every operation first makes sure the collection received its one-time
/// default seed, then touches exactly the rows it needs.
pub struct LocalCollection<E> {
    conn: SharedConnection,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for LocalCollection<E> {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> LocalCollection<E> {
    pub(crate) fn new(conn: SharedConnection) -> Self {
        Self {
            conn,
            _entity: PhantomData,
        }
    }

    fn table(&self) -> &'static str {
        E::COLLECTION.table()
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for LocalCollection<E> {
    async fn list(&self) -> Result<Vec<E>> {
        self.conn.logged("list", self.table(), |conn| {
            ensure_seeded::<E>(conn)?;
            let records = rows::read_all::<E>(conn)?;
            tracing::debug!(
                collection = E::COLLECTION.table(),
                row_count = records.len(),
                "listed"
            );
            Ok(records)
        })
    }

    async fn get(&self, id: &str) -> Result<Option<E>> {
        self.conn.logged("get", self.table(), |conn| {
            ensure_seeded::<E>(conn)?;
            rows::read_one::<E>(conn, id)
        })
    }

    async fn create(&self, draft: E::Draft) -> Result<E> {
        self.conn.logged("create", self.table(), move |conn| {
            ensure_seeded::<E>(conn)?;
            let record = E::from_draft(Uuid::now_v7().to_string(), Utc::now(), draft);
            rows::insert_new(conn, &record).map_err(|e| e.with_op("create"))?;
            Ok(record)
        })
    }

    async fn update(&self, id: &str, patch: E::Patch) -> Result<E> {
        let table = self.table();
        self.conn.logged("update", table, move |conn| {
            ensure_seeded::<E>(conn)?;
            let tx = conn.transaction().map_err(from_rusqlite)?;

            let mut record = rows::read_one::<E>(&tx, id)?
                .ok_or_else(|| not_found(table, id, "update"))?;
            record.apply_patch(patch);
            rows::rewrite_record(&tx, &record).map_err(|e| e.with_op("update"))?;

            tx.commit().map_err(from_rusqlite)?;
            Ok(record)
        })
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let table = self.table();
        self.conn.logged("delete", table, |conn| {
            ensure_seeded::<E>(conn)?;
            let removed = rows::delete_record(conn, table, id)?;
            if removed == 0 {
                tracing::debug!(collection = table, entity_id = id, "delete of absent id ignored");
            }
            Ok(())
        })
    }
}

#[async_trait]
impl UserDirectory for LocalCollection<User> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let key = email.trim().to_lowercase();
        self.conn.logged("find_by_email", self.table(), |conn| {
            ensure_seeded::<User>(conn)?;
            rows::read_by_unique_key::<User>(conn, &key)
        })
    }
}
