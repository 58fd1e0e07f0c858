use std::sync::Arc;

use renova_core_types::Sensitive;

use super::repository::{IdentityProvider, Repository, UserDirectory};
use crate::errors::{ExError, RenovaError, Result};
use crate::model::{Principal, User, UserDraft, UserPatch, UserRole};

/// Maps authenticated principals to application users
///
/// A principal seen for the first time gets a `USER` record, or `ADMIN` when
/// its email is the configured admin email. An existing record for the admin
/// email is promoted if its role differs.
pub struct AccountService {
    users: Arc<dyn UserDirectory>,
    identity: Arc<dyn IdentityProvider>,
    admin_email: String,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserDirectory>,
        identity: Arc<dyn IdentityProvider>,
        admin_email: impl Into<String>,
    ) -> Self {
        Self {
            users,
            identity,
            admin_email: admin_email.into(),
        }
    }

    pub fn admin_email(&self) -> &str {
        &self.admin_email
    }

    /// Register with the identity provider and create the matching user
    pub async fn sign_up(
        &self,
        email: &str,
        password: &Sensitive<String>,
        name: &str,
    ) -> Result<User> {
        let principal = self.identity.sign_up(email, password, name).await?;
        self.resolve_user(&principal).await
    }

    pub async fn sign_in(&self, email: &str, password: &Sensitive<String>) -> Result<User> {
        let principal = self.identity.sign_in(email, password).await?;
        self.resolve_user(&principal).await
    }

    pub async fn sign_out(&self) -> Result<()> {
        self.identity.sign_out().await
    }

    /// User behind the active session, if any
    pub async fn current_user(&self) -> Result<Option<User>> {
        match self.identity.current_principal().await? {
            Some(principal) => self.resolve_user(&principal).await.map(Some),
            None => Ok(None),
        }
    }

    /// Find or create the user for a principal, applying admin promotion
    pub async fn resolve_user(&self, principal: &Principal) -> Result<User> {
        let email = principal.email.trim();
        if email.is_empty() {
            return Err(RenovaError::invalid("email", "principal has no email").into());
        }
        let is_admin_email = email.eq_ignore_ascii_case(self.admin_email.trim());

        match self.users.find_by_email(email).await? {
            Some(user) if is_admin_email && !user.is_admin() => {
                tracing::info!(op = "resolve_user", entity_id = %user.id, "promoting admin email");
                self.users
                    .update(
                        &user.id,
                        UserPatch {
                            role: Some(UserRole::Admin),
                            ..Default::default()
                        },
                    )
                    .await
            }
            Some(user) => Ok(user),
            None => {
                let draft = UserDraft {
                    name: display_name_for(principal),
                    email: email.to_string(),
                    role: if is_admin_email {
                        UserRole::Admin
                    } else {
                        UserRole::User
                    },
                };
                self.users.create(draft).await
            }
        }
    }
}

/// Display name, falling back to the local part of the email
pub fn display_name_for(principal: &Principal) -> String {
    principal
        .display_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            principal
                .email
                .split('@')
                .next()
                .unwrap_or_default()
                .to_string()
        })
}

/// Gate admin-only operations
///
/// # Errors
///
/// `Unauthorised` when nobody is signed in, `Forbidden` for non-admins.
pub fn require_admin(user: Option<&User>) -> Result<&User> {
    match user {
        None => Err(ExError::from(RenovaError::NotSignedIn).with_op("require_admin")),
        Some(user) if user.is_admin() => Ok(user),
        Some(user) => Err(ExError::from(RenovaError::AdminRequired {
            email: user.email.clone(),
        })
        .with_op("require_admin")),
    }
}
