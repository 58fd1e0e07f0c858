use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{TestimonialDraft, TestimonialPatch};

/// Public review submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestimonialSubmission {
    pub name: String,
    pub role: String,
    pub rating: u8,
    pub comment: String,
}

/// Submitted testimonials are visible immediately
pub fn submit(submission: TestimonialSubmission, today: NaiveDate) -> TestimonialDraft {
    TestimonialDraft {
        name: submission.name,
        role: submission.role,
        rating: submission.rating,
        comment: submission.comment,
        date: today,
        is_visible: true,
    }
}

pub fn set_visibility(visible: bool) -> TestimonialPatch {
    TestimonialPatch {
        is_visible: Some(visible),
        ..Default::default()
    }
}
