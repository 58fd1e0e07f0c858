use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{
    date_from_iso_or_long_form, id_from_string_or_number, Collection, Entity, SortOrder,
};

/// Customer review; hidden by the admin rather than deleted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub name: String,
    /// e.g. "Pembeli HR-V SE"
    pub role: String,
    /// 1 to 5
    pub rating: u8,
    pub comment: String,
    /// Read as ISO or `12 Juni 2024`, written as ISO
    #[serde(deserialize_with = "date_from_iso_or_long_form")]
    pub date: NaiveDate,
    pub is_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialDraft {
    pub name: String,
    pub role: String,
    pub rating: u8,
    pub comment: String,
    pub date: NaiveDate,
    pub is_visible: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
}

impl Entity for Testimonial {
    type Draft = TestimonialDraft;
    type Patch = TestimonialPatch;

    const COLLECTION: Collection = Collection::Testimonials;
    const SORT: SortOrder = SortOrder::Descending("date");

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, _created_at: DateTime<Utc>, draft: TestimonialDraft) -> Self {
        Self {
            id,
            name: draft.name,
            role: draft.role,
            rating: draft.rating,
            comment: draft.comment,
            date: draft.date,
            is_visible: draft.is_visible,
        }
    }

    fn apply_patch(&mut self, patch: TestimonialPatch) {
        merge_fields!(self, patch, [name, role, rating, comment, date, is_visible]);
    }

    fn sort_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    fn seed_data() -> Vec<Self> {
        crate::defaults::testimonials()
    }
}
