use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::{id_from_string_or_number, Collection, Entity, SortOrder};

/// Lead type of an inbox message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageKind {
    General,
    TestDrive,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::General => f.write_str("general"),
            MessageKind::TestDrive => f.write_str("test-drive"),
        }
    }
}

/// A contact or test-drive lead
///
/// `phone`, `car_name` and `booking_date` are only filled for test drives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxMessage {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_date: Option<NaiveDate>,
    pub subject: String,
    pub message: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_read: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxMessageDraft {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_date: Option<NaiveDate>,
    pub subject: String,
    pub message: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub is_read: bool,
}

/// Partial update of a message
///
/// An absent field means unchanged, so a patch can set `phone`, `carName`
/// and `bookingDate` but never clear them back to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboxMessagePatch {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<MessageKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_read: Option<bool>,
}

impl Entity for InboxMessage {
    type Draft = InboxMessageDraft;
    type Patch = InboxMessagePatch;

    const COLLECTION: Collection = Collection::Inbox;
    const SORT: SortOrder = SortOrder::Descending("date");

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, _created_at: DateTime<Utc>, draft: InboxMessageDraft) -> Self {
        Self {
            id,
            kind: draft.kind,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            car_name: draft.car_name,
            booking_date: draft.booking_date,
            subject: draft.subject,
            message: draft.message,
            date: draft.date,
            is_read: draft.is_read,
        }
    }

    fn apply_patch(&mut self, patch: InboxMessagePatch) {
        merge_fields!(self, patch, [kind, name, email, subject, message, date, is_read]);
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        if let Some(car_name) = patch.car_name {
            self.car_name = Some(car_name);
        }
        if let Some(booking_date) = patch.booking_date {
            self.booking_date = Some(booking_date);
        }
    }

    fn sort_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    fn seed_data() -> Vec<Self> {
        crate::defaults::inbox()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_field_uses_kebab_case() {
        let messages = crate::defaults::inbox();
        let value = serde_json::to_value(&messages[1]).unwrap();
        assert_eq!(value["type"], serde_json::json!("test-drive"));
        assert_eq!(value["carName"], serde_json::json!("HR-V SE CVT"));
        assert_eq!(value["bookingDate"], serde_json::json!("2024-05-20"));

        let general = serde_json::to_value(&messages[0]).unwrap();
        assert!(general.get("phone").is_none());
    }

    #[test]
    fn test_mark_read_patch_keeps_optional_fields() {
        let mut message = crate::defaults::inbox().remove(1);
        message.apply_patch(InboxMessagePatch {
            is_read: Some(true),
            ..Default::default()
        });
        assert!(message.is_read);
        assert_eq!(message.phone.as_deref(), Some("081234567890"));
    }

    #[test]
    fn test_patch_sets_but_cannot_clear_optional_fields() {
        let mut message = crate::defaults::inbox().remove(1);
        let patch: InboxMessagePatch =
            serde_json::from_str(r#"{"phone":null,"carName":"Civic RS"}"#).unwrap();
        message.apply_patch(patch);

        assert_eq!(message.phone.as_deref(), Some("081234567890"));
        assert_eq!(message.car_name.as_deref(), Some("Civic RS"));
        assert!(message.booking_date.is_some());
    }

    #[test]
    fn test_is_read_defaults_false() {
        let json = r#"{"id":"9","type":"general","name":"A","email":"a@b.c",
            "subject":"s","message":"m","date":"2024-06-01"}"#;
        let message: InboxMessage = serde_json::from_str(json).unwrap();
        assert!(!message.is_read);
        assert_eq!(message.kind, MessageKind::General);
    }
}
