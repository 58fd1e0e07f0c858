//! Lead capture: building inbox messages from the contact forms

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{InboxMessageDraft, InboxMessagePatch, MessageKind};

/// Message used when a test-drive request leaves the message blank
pub const DEFAULT_TEST_DRIVE_MESSAGE: &str = "Saya ingin menjadwalkan test drive untuk mobil ini.";

/// Contact form submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralInquiry {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Test-drive booking form submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestDriveRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub car_name: String,
    pub booking_date: NaiveDate,
    #[serde(default)]
    pub message: Option<String>,
}

pub fn test_drive_subject(car_name: &str) -> String {
    format!("Booking Test Drive: {}", car_name)
}

/// Unread general message dated `today`
pub fn general_inquiry(inquiry: GeneralInquiry, today: NaiveDate) -> InboxMessageDraft {
    InboxMessageDraft {
        kind: MessageKind::General,
        name: inquiry.name,
        email: inquiry.email,
        phone: None,
        car_name: None,
        booking_date: None,
        subject: inquiry.subject,
        message: inquiry.message,
        date: today,
        is_read: false,
    }
}

/// Unread test-drive message with a generated subject
pub fn test_drive_booking(request: TestDriveRequest, today: NaiveDate) -> InboxMessageDraft {
    let message = request
        .message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TEST_DRIVE_MESSAGE.to_string());

    InboxMessageDraft {
        kind: MessageKind::TestDrive,
        subject: test_drive_subject(&request.car_name),
        name: request.name,
        email: request.email,
        phone: Some(request.phone),
        car_name: Some(request.car_name),
        booking_date: Some(request.booking_date),
        message,
        date: today,
        is_read: false,
    }
}

pub fn mark_read() -> InboxMessagePatch {
    InboxMessagePatch {
        is_read: Some(true),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_test_drive_defaults() {
        let draft = test_drive_booking(
            TestDriveRequest {
                name: "Diana".into(),
                email: "diana@example.com".into(),
                phone: "0812".into(),
                car_name: "HR-V SE CVT".into(),
                booking_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
                message: Some("   ".into()),
            },
            today(),
        );

        assert_eq!(draft.kind, MessageKind::TestDrive);
        assert_eq!(draft.subject, "Booking Test Drive: HR-V SE CVT");
        assert_eq!(draft.message, DEFAULT_TEST_DRIVE_MESSAGE);
        assert_eq!(draft.date, today());
        assert!(!draft.is_read);
    }

    #[test]
    fn test_general_inquiry_keeps_subject() {
        let draft = general_inquiry(
            GeneralInquiry {
                name: "Budi".into(),
                email: "budi@example.com".into(),
                subject: "Simulasi Kredit".into(),
                message: "Halo".into(),
            },
            today(),
        );
        assert_eq!(draft.kind, MessageKind::General);
        assert_eq!(draft.subject, "Simulasi Kredit");
        assert!(draft.phone.is_none());
    }
}
