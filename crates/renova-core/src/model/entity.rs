use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{self, Debug};

/// Persisted collections shared by both backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Cars,
    News,
    Testimonials,
    Inbox,
    Users,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Cars,
        Collection::News,
        Collection::Testimonials,
        Collection::Inbox,
        Collection::Users,
    ];

    /// Table name on both the remote API and the local database
    pub fn table(&self) -> &'static str {
        match self {
            Collection::Cars => "cars",
            Collection::News => "news",
            Collection::Testimonials => "testimonials",
            Collection::Inbox => "inbox",
            Collection::Users => "users",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table())
    }
}

/// How `list()` orders a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Newest first by the named recency column
    Descending(&'static str),
    /// Oldest first, in the order records were created
    Insertion,
}

/// A record stored in one of the CRUD collections
///
/// `Draft` is the create input (no id, no store-assigned fields) and `Patch`
/// is the partial update input where every field is optional.
pub trait Entity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Draft: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static;
    type Patch: Clone + Debug + Default + Serialize + DeserializeOwned + Send + Sync + 'static;

    const COLLECTION: Collection;
    const SORT: SortOrder;

    fn id(&self) -> &str;

    /// Build the stored record from a draft; `created_at` is ignored by
    /// entities without a store-assigned timestamp
    fn from_draft(id: String, created_at: DateTime<Utc>, draft: Self::Draft) -> Self;

    /// Shallow-merge a patch; array fields are replaced wholesale
    fn apply_patch(&mut self, patch: Self::Patch);

    /// Lexicographically sortable rendering of the recency field
    fn sort_key(&self) -> String;

    /// Normalised value of the collection's unique attribute, if any
    fn unique_key(&self) -> Option<String> {
        None
    }

    /// Records a fresh local store starts with
    fn seed_data() -> Vec<Self>;
}

/// Accept ids as JSON strings or integers
///
/// Hosted tables commonly use serial primary keys; the contract exposes ids
/// as opaque strings.
pub fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

const MONTHS_ID: [&str; 12] = [
    "januari",
    "februari",
    "maret",
    "april",
    "mei",
    "juni",
    "juli",
    "agustus",
    "september",
    "oktober",
    "november",
    "desember",
];

/// Parse `YYYY-MM-DD` (optionally the date part of a timestamp) or the
/// Indonesian long form such as `12 Juni 2024`
pub fn parse_display_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Some(iso) = raw.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
            return Some(date);
        }
    }

    let mut parts = raw.split_whitespace();
    let day = parts.next()?.parse::<u32>().ok()?;
    let month_name = parts.next()?.to_lowercase();
    let month = MONTHS_ID.iter().position(|m| *m == month_name)? as u32 + 1;
    let year = parts.next()?.parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Accept dates as ISO strings or the Indonesian long form
///
/// Rows written by older clients carry the display string; records are
/// always serialised back as `YYYY-MM-DD`.
pub fn date_from_iso_or_long_form<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_display_date(&raw).ok_or_else(|| D::Error::custom(format!("unrecognised date `{}`", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "id_from_string_or_number")]
        id: String,
    }

    #[test]
    fn test_id_accepts_string_and_number() {
        let text: Row = serde_json::from_str(r#"{"id":"abc"}"#).unwrap();
        let number: Row = serde_json::from_str(r#"{"id":42}"#).unwrap();
        assert_eq!(text.id, "abc");
        assert_eq!(number.id, "42");
    }

    #[test]
    fn test_display_date_forms() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 12);
        assert_eq!(parse_display_date("2024-06-12"), expected);
        assert_eq!(parse_display_date("2024-06-12T08:30:00+07:00"), expected);
        assert_eq!(parse_display_date("12 Juni 2024"), expected);
        assert_eq!(parse_display_date(" 12 juni 2024 "), expected);
        assert_eq!(
            parse_display_date("1 Desember 2023"),
            NaiveDate::from_ymd_opt(2023, 12, 1)
        );
    }

    #[test]
    fn test_display_date_rejects_unknown_forms() {
        assert_eq!(parse_display_date("12 June 2024"), None);
        assert_eq!(parse_display_date("31 Februari 2024"), None);
        assert_eq!(parse_display_date("12 Juni 2024 lalu"), None);
        assert_eq!(parse_display_date("kemarin"), None);
    }

    #[test]
    fn test_collection_tables() {
        let tables: Vec<&str> = Collection::ALL.iter().map(Collection::table).collect();
        assert_eq!(tables, vec!["cars", "news", "testimonials", "inbox", "users"]);
        assert_eq!(Collection::Inbox.to_string(), "inbox");
    }
}
