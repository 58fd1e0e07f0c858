//! Development identity shim
//!
//! Stands in for the hosted identity provider when running against the
//! local store. Passwords are accepted without verification; the signed-in
//! principal is persisted in the `session` table.

#![allow(clippy::result_large_err)]

use async_trait::async_trait;
use chrono::Utc;
use renova_core::errors::{ExError, RenovaError};
use renova_core::model::{Principal, User, UserDraft, UserRole};
use renova_core::ops::{IdentityProvider, Repository, UserDirectory};
use renova_core_types::Sensitive;
use rusqlite::OptionalExtension;

use crate::db::SharedConnection;
use crate::errors::{from_rusqlite, Result};
use crate::repo::LocalCollection;

const COLLECTION: &str = "session";

#[derive(Clone)]
pub struct LocalIdentity {
    conn: SharedConnection,
    users: LocalCollection<User>,
}

impl LocalIdentity {
    pub(crate) fn new(conn: SharedConnection, users: LocalCollection<User>) -> Self {
        Self { conn, users }
    }

    fn store_session(&self, principal: &Principal) -> Result<()> {
        self.conn.logged("store_session", COLLECTION, |conn| {
            conn.execute(
                "INSERT INTO session (id, email, display_name, signed_in_at) VALUES (1, ?1, ?2, ?3)
                 ON CONFLICT(id) DO UPDATE SET
                    email = excluded.email,
                    display_name = excluded.display_name,
                    signed_in_at = excluded.signed_in_at",
                rusqlite::params![
                    principal.email,
                    principal.display_name,
                    Utc::now().to_rfc3339()
                ],
            )
            .map_err(from_rusqlite)?;
            Ok(())
        })
    }
}

fn principal_for(user: &User) -> Principal {
    Principal::new(user.email.clone()).with_display_name(user.name.clone())
}

#[async_trait]
impl IdentityProvider for LocalIdentity {
    async fn sign_up(
        &self,
        email: &str,
        _password: &Sensitive<String>,
        name: &str,
    ) -> Result<Principal> {
        if self.users.find_by_email(email).await?.is_some() {
            return Err(ExError::from(RenovaError::AlreadyExists {
                collection: "users".to_string(),
                key: email.trim().to_lowercase(),
            })
            .with_op("sign_up"));
        }

        let user = self
            .users
            .create(UserDraft {
                name: name.trim().to_string(),
                email: email.trim().to_string(),
                role: UserRole::User,
            })
            .await?;

        let principal = principal_for(&user);
        self.store_session(&principal)?;
        Ok(principal)
    }

    async fn sign_in(&self, email: &str, _password: &Sensitive<String>) -> Result<Principal> {
        let user = self.users.find_by_email(email).await?.ok_or_else(|| {
            ExError::from(RenovaError::NotFound {
                collection: "users".to_string(),
                id: email.trim().to_lowercase(),
            })
            .with_op("sign_in")
        })?;

        let principal = principal_for(&user);
        self.store_session(&principal)?;
        tracing::info!(op = "sign_in", backend = crate::BACKEND, "local session started");
        Ok(principal)
    }

    async fn sign_out(&self) -> Result<()> {
        self.conn.logged("sign_out", COLLECTION, |conn| {
            conn.execute("DELETE FROM session", [])
                .map_err(from_rusqlite)?;
            Ok(())
        })
    }

    async fn current_principal(&self) -> Result<Option<Principal>> {
        self.conn.logged("current_principal", COLLECTION, |conn| {
            conn.query_row(
                "SELECT email, display_name FROM session WHERE id = 1",
                [],
                |row| {
                    Ok(Principal {
                        email: row.get(0)?,
                        display_name: row.get(1)?,
                    })
                },
            )
            .optional()
            .map_err(from_rusqlite)
        })
    }
}
