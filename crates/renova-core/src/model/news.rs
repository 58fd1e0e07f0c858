use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{id_from_string_or_number, Collection, Entity, SortOrder};

/// A news article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsPost {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub date: NaiveDate,
    pub author: String,
    pub image: String,
}

/// Create input for [`NewsPost`]
///
/// An absent excerpt is derived from the content by `ops::news_ops`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsPostDraft {
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    pub content: String,
    pub date: NaiveDate,
    pub author: String,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsPostPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Entity for NewsPost {
    type Draft = NewsPostDraft;
    type Patch = NewsPostPatch;

    const COLLECTION: Collection = Collection::News;
    const SORT: SortOrder = SortOrder::Descending("date");

    fn id(&self) -> &str {
        &self.id
    }

    fn from_draft(id: String, _created_at: DateTime<Utc>, draft: NewsPostDraft) -> Self {
        Self {
            id,
            title: draft.title,
            excerpt: draft.excerpt,
            content: draft.content,
            date: draft.date,
            author: draft.author,
            image: draft.image,
        }
    }

    fn apply_patch(&mut self, patch: NewsPostPatch) {
        merge_fields!(self, patch, [title, excerpt, content, date, author, image]);
    }

    fn sort_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    fn seed_data() -> Vec<Self> {
        crate::defaults::news()
    }
}
