//! Backend selection
//!
//! One backend is chosen at startup and exposed as a bundle of contract
//! objects; the two implementations are never mixed within a session.

use std::sync::Arc;

use renova_core::errors::{RenovaError, Result};
use renova_core::model::{Car, InboxMessage, NewsPost, Testimonial};
use renova_core::ops::{AboutRepository, IdentityProvider, ImageStore, Repository, UserDirectory};
use renova_remote::RemoteStore;
use renova_store::LocalStore;

use crate::settings::{BackendKind, Settings};

/// Contract objects of the selected backend
#[derive(Clone)]
pub struct Backend {
    pub kind: BackendKind,
    pub cars: Arc<dyn Repository<Car>>,
    pub news: Arc<dyn Repository<NewsPost>>,
    pub testimonials: Arc<dyn Repository<Testimonial>>,
    pub inbox: Arc<dyn Repository<InboxMessage>>,
    pub users: Arc<dyn UserDirectory>,
    pub about: Arc<dyn AboutRepository>,
    pub images: Arc<dyn ImageStore>,
    pub identity: Arc<dyn IdentityProvider>,
    /// Present for the local backend; exposes export/import/reset
    pub local: Option<LocalStore>,
}

impl Backend {
    /// Open the backend named by `settings`
    pub fn open(settings: &Settings) -> Result<Self> {
        let backend = match settings.backend {
            BackendKind::Local => Self::local(LocalStore::open(&settings.local.database_path)?),
            BackendKind::Remote => Self::remote(RemoteStore::connect(&settings.remote_config()?)?),
        };
        tracing::info!(backend = %backend.kind, "backend selected");
        Ok(backend)
    }

    pub fn local(store: LocalStore) -> Self {
        Self {
            kind: BackendKind::Local,
            cars: Arc::new(store.cars()),
            news: Arc::new(store.news()),
            testimonials: Arc::new(store.testimonials()),
            inbox: Arc::new(store.inbox()),
            users: Arc::new(store.users()),
            about: Arc::new(store.about()),
            images: Arc::new(store.images()),
            identity: Arc::new(store.identity()),
            local: Some(store),
        }
    }

    pub fn remote(store: RemoteStore) -> Self {
        Self {
            kind: BackendKind::Remote,
            cars: Arc::new(store.cars()),
            news: Arc::new(store.news()),
            testimonials: Arc::new(store.testimonials()),
            inbox: Arc::new(store.inbox()),
            users: Arc::new(store.users()),
            about: Arc::new(store.about()),
            images: Arc::new(store.images()),
            identity: Arc::new(store.identity()),
            local: None,
        }
    }

    /// Fresh in-memory local backend
    pub fn in_memory() -> Result<Self> {
        Ok(Self::local(LocalStore::open_in_memory()?))
    }

    /// The local store, for the data utilities
    ///
    /// # Errors
    ///
    /// `InvalidInput` on the remote backend.
    pub fn local_store(&self) -> Result<&LocalStore> {
        self.local.as_ref().ok_or_else(|| {
            RenovaError::invalid("backend", "data utilities need the local backend").into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use renova_core::errors::ExErrorKind;

    #[test]
    fn test_in_memory_is_local() {
        let backend = Backend::in_memory().unwrap();
        assert_eq!(backend.kind, BackendKind::Local);
        assert!(backend.local_store().is_ok());
    }

    #[test]
    fn test_remote_has_no_local_utilities() {
        let config = renova_remote::RemoteConfig::new("http://127.0.0.1:9", "k");
        let backend = Backend::remote(RemoteStore::connect(&config).unwrap());
        assert_eq!(
            backend.local_store().unwrap_err().kind(),
            ExErrorKind::InvalidInput
        );
    }
}
