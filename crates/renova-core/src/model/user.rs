use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::{id_from_string_or_number, Collection, Entity, SortOrder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::User => f.write_str("USER"),
            UserRole::Admin => f.write_str("ADMIN"),
        }
    }
}

/// Application-level account; the role gates admin operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

impl Entity for User {
    type Draft = UserDraft;
    type Patch = UserPatch;

    const COLLECTION: Collection = Collection::Users;
    const SORT: SortOrder = SortOrder::Insertion;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, _created_at: DateTime<Utc>, draft: UserDraft) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
            role: draft.role,
        }
    }

    fn apply_patch(&mut self, patch: UserPatch) {
        merge_fields!(self, patch, [name, email, role]);
    }

    fn sort_key(&self) -> String {
        String::new()
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.email.trim().to_lowercase())
    }

    fn seed_data() -> Vec<Self> {
        crate::defaults::users()
    }
}

/// Identity returned by an identity provider
///
/// Carries no role; roles live on [`User`] and are resolved by
/// `ops::account_ops::AccountService`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Principal {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}
