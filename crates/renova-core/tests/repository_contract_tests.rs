#![allow(clippy::unwrap_used, clippy::expect_used)]

use renova_core::catalog::format_rupiah;
use renova_core::defaults;
use renova_core::errors::ExErrorKind;
use renova_core::model::{Car, CarDraft, CarPatch};
use renova_core::ops::{MemoryRepository, Repository};

fn avanza_draft() -> CarDraft {
    let mut draft = CarDraft::from(defaults::cars().remove(0));
    draft.price = 275_000_000;
    draft
}

#[tokio::test]
async fn test_create_then_list_contains_new_record() {
    let repo = MemoryRepository::<Car>::seeded();
    let before = repo.list().await.unwrap().len();

    let created = repo.create(avanza_draft()).await.unwrap();

    let listed = repo.list().await.unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(listed.len(), before + 1);
    assert_eq!(listed.iter().filter(|c| c.id == created.id).count(), 1);
    assert_eq!(listed[0].id, created.id, "newest car lists first");
}

#[tokio::test]
async fn test_avanza_price_update_scenario() {
    let repo = MemoryRepository::<Car>::new();
    let created = repo.create(avanza_draft()).await.unwrap();

    let updated = repo
        .update(
            &created.id,
            CarPatch {
                price: Some(260_000_000),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.price, 260_000_000);
    assert_eq!(updated.name, created.name);
    assert_eq!(format_rupiah(updated.price), "Rp 260.000.000");

    let fetched = repo.get(&created.id).await.unwrap().unwrap();
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn test_delete_twice_is_silent() {
    let repo = MemoryRepository::<Car>::seeded();
    repo.delete("1").await.unwrap();
    repo.delete("1").await.unwrap();
    assert!(repo.get("1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_missing_reports_not_found_with_context() {
    let repo = MemoryRepository::<Car>::new();
    let err = repo.update("ghost", CarPatch::default()).await.unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.collection(), Some("cars"));
    assert_eq!(err.entity_id(), Some("ghost"));
}
