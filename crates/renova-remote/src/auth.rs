//! GoTrue identity provider
//!
//! The access token lives only in memory, wrapped in `Sensitive`; it is
//! shared with the table client so row-level policies see the signed-in
//! user.

use async_trait::async_trait;
use renova_core::errors::{ExError, ExErrorKind};
use renova_core::model::Principal;
use renova_core::ops::IdentityProvider;
use renova_core_types::Sensitive;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::RemoteClient;
use crate::errors::Result;

const COLLECTION: &str = "auth";

#[derive(Clone)]
pub struct RemoteIdentity {
    client: RemoteClient,
}

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignUpMetadata<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct SignUpRequest<'a> {
    email: &'a str,
    password: &'a str,
    data: SignUpMetadata<'a>,
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    email: String,
    #[serde(default)]
    user_metadata: UserMetadata,
}

impl AuthUser {
    fn into_principal(self) -> Principal {
        let principal = Principal::new(self.email);
        match self.user_metadata.name {
            Some(name) if !name.trim().is_empty() => principal.with_display_name(name),
            _ => principal,
        }
    }
}

/// Session response; sign-up without auto-confirm returns the bare user
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AuthResponse {
    Session {
        access_token: String,
        user: AuthUser,
    },
    User(AuthUser),
}

impl RemoteIdentity {
    pub(crate) fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    fn start_session(&self, response: AuthResponse) -> Principal {
        match response {
            AuthResponse::Session { access_token, user } => {
                self.client.set_access_token(Some(Sensitive::new(access_token)));
                user.into_principal()
            }
            AuthResponse::User(user) => user.into_principal(),
        }
    }
}

#[async_trait]
impl IdentityProvider for RemoteIdentity {
    async fn sign_up(
        &self,
        email: &str,
        password: &Sensitive<String>,
        name: &str,
    ) -> Result<Principal> {
        let request = self
            .client
            .request(Method::POST, &self.client.auth_url("signup"))
            .json(&SignUpRequest {
                email: email.trim(),
                password: password.expose(),
                data: SignUpMetadata { name: name.trim() },
            });

        let response: AuthResponse = self
            .client
            .send_json("sign_up", COLLECTION, request)
            .await
            .map_err(|err| {
                if err.message().contains("already registered") {
                    ExError::new(ExErrorKind::AlreadyExists)
                        .with_op("sign_up")
                        .with_collection("users")
                        .with_message(format!("{} already registered", email.trim()))
                } else {
                    err
                }
            })?;
        Ok(self.start_session(response))
    }

    async fn sign_in(&self, email: &str, password: &Sensitive<String>) -> Result<Principal> {
        let request = self
            .client
            .request(Method::POST, &self.client.auth_url("token"))
            .query(&[("grant_type", "password")])
            .json(&Credentials {
                email: email.trim(),
                password: password.expose(),
            });

        let response: AuthResponse = self
            .client
            .send_json("sign_in", COLLECTION, request)
            .await
            .map_err(|err| match err.kind() {
                ExErrorKind::InvalidInput => ExError::new(ExErrorKind::Unauthorised)
                    .with_op("sign_in")
                    .with_message("invalid login credentials"),
                _ => err,
            })?;
        Ok(self.start_session(response))
    }

    async fn sign_out(&self) -> Result<()> {
        if self.client.access_token().is_none() {
            return Ok(());
        }
        let request = self
            .client
            .request(Method::POST, &self.client.auth_url("logout"));
        let outcome = self.client.send("sign_out", COLLECTION, request).await;
        self.client.set_access_token(None);
        outcome.map(|_| ())
    }

    async fn current_principal(&self) -> Result<Option<Principal>> {
        if self.client.access_token().is_none() {
            return Ok(None);
        }
        let request = self.client.request(Method::GET, &self.client.auth_url("user"));
        match self
            .client
            .send_json::<AuthUser>("current_principal", COLLECTION, request)
            .await
        {
            Ok(user) => Ok(Some(user.into_principal())),
            Err(err) if err.kind() == ExErrorKind::Unauthorised => {
                self.client.set_access_token(None);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}
