//! Remote store facade

use renova_core::model::{Car, Entity, InboxMessage, NewsPost, Testimonial, User};

use crate::about::RemoteAbout;
use crate::auth::RemoteIdentity;
use crate::client::RemoteClient;
use crate::config::RemoteConfig;
use crate::errors::Result;
use crate::storage::RemoteImageStore;
use crate::table::RemoteTable;

/// Typed handles over one hosted project
///
/// All handles share the client, so a sign-in through [`identity`] applies
/// to every subsequent table request.
///
/// [`identity`]: RemoteStore::identity
#[derive(Clone)]
pub struct RemoteStore {
    client: RemoteClient,
    bucket: String,
}

impl RemoteStore {
    pub fn connect(config: &RemoteConfig) -> Result<Self> {
        let client = RemoteClient::new(config)?;
        tracing::debug!(url = client.base_url(), bucket = %config.bucket, "remote store ready");
        Ok(Self {
            client,
            bucket: config.bucket.clone(),
        })
    }

    pub fn client(&self) -> &RemoteClient {
        &self.client
    }

    pub fn collection<E: Entity>(&self) -> RemoteTable<E> {
        RemoteTable::new(self.client.clone())
    }

    pub fn cars(&self) -> RemoteTable<Car> {
        self.collection()
    }

    pub fn news(&self) -> RemoteTable<NewsPost> {
        self.collection()
    }

    pub fn testimonials(&self) -> RemoteTable<Testimonial> {
        self.collection()
    }

    pub fn inbox(&self) -> RemoteTable<InboxMessage> {
        self.collection()
    }

    pub fn users(&self) -> RemoteTable<User> {
        self.collection()
    }

    pub fn about(&self) -> RemoteAbout {
        RemoteAbout::new(self.client.clone())
    }

    pub fn images(&self) -> RemoteImageStore {
        RemoteImageStore::new(self.client.clone(), self.bucket.clone())
    }

    pub fn identity(&self) -> RemoteIdentity {
        RemoteIdentity::new(self.client.clone())
    }
}
