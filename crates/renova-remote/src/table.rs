//! PostgREST table access implementing the persistence contract

use std::marker::PhantomData;

use async_trait::async_trait;
use renova_core::errors::{ExError, ExErrorKind, RenovaError};
use renova_core::model::{Entity, SortOrder, User};
use renova_core::ops::{Repository, UserDirectory};
use reqwest::Method;

use crate::client::RemoteClient;
use crate::errors::Result;

const RETURN_REPRESENTATION: &str = "return=representation";

/// One hosted table, typed by its entity
pub struct RemoteTable<E> {
    client: RemoteClient,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for RemoteTable<E> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _entity: PhantomData,
        }
    }
}

/// `order` query value for a sort order; insertion order follows the
/// serial primary key
pub fn order_param(sort: SortOrder) -> String {
    match sort {
        SortOrder::Descending(column) => format!("{}.desc", column),
        SortOrder::Insertion => "id.asc".to_string(),
    }
}

pub fn eq_filter(value: &str) -> String {
    format!("eq.{}", value)
}

impl<E: Entity> RemoteTable<E> {
    pub(crate) fn new(client: RemoteClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    fn table(&self) -> &'static str {
        E::COLLECTION.table()
    }

    fn url(&self) -> String {
        self.client.rest_url(self.table())
    }

    fn first_row(&self, op: &str, rows: Vec<E>) -> Result<E> {
        rows.into_iter().next().ok_or_else(|| {
            ExError::new(ExErrorKind::Serialization)
                .with_op(op)
                .with_collection(self.table())
                .with_message("response contained no representation")
        })
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for RemoteTable<E> {
    async fn list(&self) -> Result<Vec<E>> {
        let request = self
            .client
            .request(Method::GET, &self.url())
            .query(&[("select", "*".to_string()), ("order", order_param(E::SORT))]);
        self.client.send_json("list", self.table(), request).await
    }

    async fn get(&self, id: &str) -> Result<Option<E>> {
        let request = self
            .client
            .request(Method::GET, &self.url())
            .query(&[("select", "*".to_string()), ("id", eq_filter(id))]);
        let rows: Vec<E> = self.client.send_json("get", self.table(), request).await?;
        Ok(rows.into_iter().next())
    }

    async fn create(&self, draft: E::Draft) -> Result<E> {
        let request = self
            .client
            .request(Method::POST, &self.url())
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&draft);
        let rows: Vec<E> = self.client.send_json("create", self.table(), request).await?;
        self.first_row("create", rows)
    }

    async fn update(&self, id: &str, patch: E::Patch) -> Result<E> {
        let request = self
            .client
            .request(Method::PATCH, &self.url())
            .query(&[("id", eq_filter(id))])
            .header("Prefer", RETURN_REPRESENTATION)
            .json(&patch);
        let rows: Vec<E> = self.client.send_json("update", self.table(), request).await?;
        rows.into_iter().next().ok_or_else(|| {
            ExError::from(RenovaError::NotFound {
                collection: self.table().to_string(),
                id: id.to_string(),
            })
            .with_op("update")
        })
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let request = self
            .client
            .request(Method::DELETE, &self.url())
            .query(&[("id", eq_filter(id))]);
        self.client.send("delete", self.table(), request).await?;
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for RemoteTable<User> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let wanted = email.trim().to_lowercase();
        let request = self
            .client
            .request(Method::GET, &self.url())
            .query(&[
                ("select", "*".to_string()),
                ("email", format!("ilike.{}", wanted)),
            ]);
        let rows: Vec<User> = self
            .client
            .send_json("find_by_email", self.table(), request)
            .await?;
        // ilike treats `_` and `%` as wildcards
        Ok(rows
            .into_iter()
            .find(|user| user.email.trim().to_lowercase() == wanted))
    }
}
