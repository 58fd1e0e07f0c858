//! Persistence contract shared by the local shim and the remote client
//!
//! Both backends implement these traits with identical observable
//! behaviour; callers pick one backend at startup and never mix them.

use async_trait::async_trait;
use renova_core_types::Sensitive;

use crate::errors::Result;
use crate::model::{AboutData, Entity, ImageToken, Principal, User};

/// CRUD over one entity collection
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// All records, newest first by the entity's recency field
    /// (insertion order for users)
    async fn list(&self) -> Result<Vec<E>>;

    async fn get(&self, id: &str) -> Result<Option<E>>;

    /// Assign an id and store-computed defaults, then persist
    async fn create(&self, draft: E::Draft) -> Result<E>;

    /// Shallow-merge `patch` over the stored record
    ///
    /// # Errors
    ///
    /// `NotFound` when no record has this id.
    async fn update(&self, id: &str, patch: E::Patch) -> Result<E>;

    /// Remove a record; deleting an absent id succeeds
    async fn delete(&self, id: &str) -> Result<()>;
}

/// User collection with lookup by (case-insensitive) email
#[async_trait]
pub trait UserDirectory: Repository<User> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}

/// Singleton about-page record
#[async_trait]
pub trait AboutRepository: Send + Sync {
    /// Current record; an empty record when none was ever stored
    async fn get(&self) -> Result<AboutData>;

    async fn upsert(&self, about: AboutData) -> Result<AboutData>;
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn upload(&self, bytes: Vec<u8>, file_name: &str) -> Result<ImageToken>;

    /// Displayable URL (or inline data URL) for a token
    async fn resolve(&self, token: &ImageToken) -> Result<String>;
}

/// Delegated authentication
///
/// Passwords only travel inside [`Sensitive`] and are handed straight to the
/// provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_up(
        &self,
        email: &str,
        password: &Sensitive<String>,
        name: &str,
    ) -> Result<Principal>;

    async fn sign_in(&self, email: &str, password: &Sensitive<String>) -> Result<Principal>;

    async fn sign_out(&self) -> Result<()>;

    async fn current_principal(&self) -> Result<Option<Principal>>;
}
