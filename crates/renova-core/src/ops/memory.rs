use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

use super::repository::{AboutRepository, Repository, UserDirectory};
use crate::errors::{ExError, ExErrorKind, RenovaError, Result};
use crate::model::{AboutData, Entity, SortOrder, User};

/// Order records for `list()`
///
/// `records` must be in insertion order. Descending collections break ties
/// newest-insert first, matching the local database ordering.
pub fn order_for_listing<E: Entity>(mut records: Vec<E>) -> Vec<E> {
    if let SortOrder::Descending(_) = E::SORT {
        records.reverse();
        records.sort_by_key(|record| std::cmp::Reverse(record.sort_key()));
    }
    records
}

fn poisoned(op: &str) -> ExError {
    ExError::new(ExErrorKind::Internal)
        .with_op(op)
        .with_message("in-memory store lock poisoned")
}

/// In-memory repository for a single collection
///
/// Records are kept in insertion order. Used for in-session state and as a
/// test double behind the contract traits.
#[derive(Debug)]
pub struct MemoryRepository<E> {
    records: Mutex<Vec<E>>,
}

impl<E> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing records (insertion order)
    pub fn with_records(records: Vec<E>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    pub fn seeded() -> Self {
        Self::with_records(E::seed_data())
    }

    fn lock(&self, op: &str) -> Result<MutexGuard<'_, Vec<E>>> {
        self.records.lock().map_err(|_| poisoned(op))
    }

    /// Insert a fully formed record, replacing any record with the same id
    pub fn put(&self, record: E) -> Result<()> {
        let mut records = self.lock("put")?;
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn list(&self) -> Result<Vec<E>> {
        let records = self.lock("list")?.clone();
        Ok(order_for_listing(records))
    }

    async fn get(&self, id: &str) -> Result<Option<E>> {
        Ok(self.lock("get")?.iter().find(|r| r.id() == id).cloned())
    }

    async fn create(&self, draft: E::Draft) -> Result<E> {
        let record = E::from_draft(Uuid::now_v7().to_string(), Utc::now(), draft);
        let mut records = self.lock("create")?;

        if let Some(key) = record.unique_key() {
            if records.iter().any(|r| r.unique_key().as_deref() == Some(key.as_str())) {
                return Err(ExError::from(RenovaError::AlreadyExists {
                    collection: E::COLLECTION.to_string(),
                    key,
                })
                .with_op("create"));
            }
        }

        records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, patch: E::Patch) -> Result<E> {
        let mut records = self.lock("update")?;
        let record = records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| {
                ExError::from(RenovaError::NotFound {
                    collection: E::COLLECTION.to_string(),
                    id: id.to_string(),
                })
                .with_op("update")
            })?;
        record.apply_patch(patch);
        Ok(record.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.lock("delete")?.retain(|r| r.id() != id);
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for MemoryRepository<User> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let wanted = email.trim().to_lowercase();
        Ok(self
            .lock("find_by_email")?
            .iter()
            .find(|u| u.unique_key().as_deref() == Some(wanted.as_str()))
            .cloned())
    }
}

/// In-memory about-page singleton
#[derive(Debug, Default)]
pub struct MemoryAbout {
    about: Mutex<Option<AboutData>>,
}

impl MemoryAbout {
    pub fn new(about: Option<AboutData>) -> Self {
        Self {
            about: Mutex::new(about),
        }
    }
}

#[async_trait]
impl AboutRepository for MemoryAbout {
    async fn get(&self) -> Result<AboutData> {
        let about = self.about.lock().map_err(|_| poisoned("about.get"))?;
        Ok(about.clone().unwrap_or_default())
    }

    async fn upsert(&self, about: AboutData) -> Result<AboutData> {
        *self.about.lock().map_err(|_| poisoned("about.upsert"))? = Some(about.clone());
        Ok(about)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewsPost, NewsPostDraft, NewsPostPatch, UserDraft, UserRole};
    use chrono::NaiveDate;

    fn draft(title: &str, day: u32) -> NewsPostDraft {
        NewsPostDraft {
            title: title.to_string(),
            excerpt: String::new(),
            content: "Isi berita".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, day).unwrap(),
            author: "Renova".to_string(),
            image: String::new(),
        }
    }

    #[tokio::test]
    async fn test_list_orders_by_date_descending() {
        let repo = MemoryRepository::<NewsPost>::new();
        repo.create(draft("old", 1)).await.unwrap();
        repo.create(draft("new", 9)).await.unwrap();
        repo.create(draft("mid", 5)).await.unwrap();

        let titles: Vec<String> = repo.list().await.unwrap().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn test_ties_list_latest_insert_first() {
        let repo = MemoryRepository::<NewsPost>::new();
        repo.create(draft("first", 3)).await.unwrap();
        repo.create(draft("second", 3)).await.unwrap();

        let titles: Vec<String> = repo.list().await.unwrap().into_iter().map(|n| n.title).collect();
        assert_eq!(titles, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn test_update_absent_is_not_found_and_delete_absent_is_ok() {
        let repo = MemoryRepository::<NewsPost>::new();
        let err = repo
            .update("missing", NewsPostPatch::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::NotFound);
        assert!(repo.delete("missing").await.is_ok());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = MemoryRepository::<User>::new();
        let user = UserDraft {
            name: "A".into(),
            email: "a@renova.com".into(),
            role: UserRole::User,
        };
        repo.create(user.clone()).await.unwrap();
        let mut shouting = user;
        shouting.email = "A@RENOVA.COM".into();
        let err = repo.create(shouting).await.unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::AlreadyExists);
        assert!(repo.find_by_email("A@renova.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_about_defaults_to_empty() {
        let about = MemoryAbout::default();
        assert!(about.get().await.unwrap().is_empty());
        let stored = about.upsert(crate::defaults::about()).await.unwrap();
        assert_eq!(about.get().await.unwrap(), stored);
    }
}
