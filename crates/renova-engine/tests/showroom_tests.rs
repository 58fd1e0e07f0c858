#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use renova_core::catalog::{BrandFilter, InboxFilter};
use renova_core::core_types::schema::EVENT_FALLBACK;
use renova_core::defaults;
use renova_core::errors::{ExError, ExErrorKind, RenovaError, Result};
use renova_core::logging_facility::test_capture::init_test_capture;
use renova_core::model::{
    AboutData, CarDraft, CarPatch, Entity, ImageToken, MessageKind, NewsPostDraft,
};
use renova_core::ops::inbox_ops::{GeneralInquiry, TestDriveRequest};
use renova_core::ops::testimonial_ops::TestimonialSubmission;
use renova_core::ops::{AboutRepository, ImageStore, Repository};
use renova_core_types::Sensitive;
use renova_engine::{Backend, Showroom};

/// Backend piece that always reports an outage
struct Unreachable;

fn outage() -> ExError {
    RenovaError::BackendUnavailable {
        backend: "remote".to_string(),
        message: "connection refused".to_string(),
    }
    .into()
}

#[async_trait]
impl<E: Entity> Repository<E> for Unreachable {
    async fn list(&self) -> Result<Vec<E>> {
        Err(outage())
    }
    async fn get(&self, _id: &str) -> Result<Option<E>> {
        Err(outage())
    }
    async fn create(&self, _draft: E::Draft) -> Result<E> {
        Err(outage())
    }
    async fn update(&self, _id: &str, _patch: E::Patch) -> Result<E> {
        Err(outage())
    }
    async fn delete(&self, _id: &str) -> Result<()> {
        Err(outage())
    }
}

#[async_trait]
impl AboutRepository for Unreachable {
    async fn get(&self) -> Result<AboutData> {
        Err(outage())
    }
    async fn upsert(&self, _about: AboutData) -> Result<AboutData> {
        Err(outage())
    }
}

#[async_trait]
impl ImageStore for Unreachable {
    async fn upload(&self, _bytes: Vec<u8>, _file_name: &str) -> Result<ImageToken> {
        Err(outage())
    }
    async fn resolve(&self, _token: &ImageToken) -> Result<String> {
        Err(outage())
    }
}

fn local_showroom() -> Showroom {
    Showroom::new(Backend::in_memory().unwrap(), defaults::DEFAULT_ADMIN_EMAIL)
}

/// Content collections down, accounts still reachable
fn degraded_showroom() -> Showroom {
    let mut backend = Backend::in_memory().unwrap();
    backend.cars = Arc::new(Unreachable);
    backend.news = Arc::new(Unreachable);
    backend.testimonials = Arc::new(Unreachable);
    backend.inbox = Arc::new(Unreachable);
    backend.about = Arc::new(Unreachable);
    backend.images = Arc::new(Unreachable);
    Showroom::new(backend, defaults::DEFAULT_ADMIN_EMAIL)
}

fn password() -> Sensitive<String> {
    Sensitive::new("admin123".to_string())
}

async fn signed_in_admin() -> Showroom {
    let showroom = local_showroom();
    showroom.sign_in("admin@renova.com", &password()).await.unwrap();
    showroom
}

fn inquiry() -> GeneralInquiry {
    GeneralInquiry {
        name: "Budi".to_string(),
        email: "budi@gmail.com".to_string(),
        subject: "Kredit".to_string(),
        message: "Minta simulasi kredit".to_string(),
    }
}

#[tokio::test]
async fn test_catalog_brand_filter_keeps_order() {
    let showroom = local_showroom();

    let all = showroom.cars().await.unwrap();
    let toyota = showroom
        .catalog(&BrandFilter::parse("Toyota"), "")
        .await
        .unwrap();

    let expected: Vec<_> = all.iter().filter(|c| c.brand == "Toyota").cloned().collect();
    assert!(!toyota.is_empty());
    assert_eq!(toyota, expected);
}

#[tokio::test]
async fn test_reads_fall_back_to_defaults() {
    let capture = init_test_capture();
    let showroom = degraded_showroom();

    let cars = showroom.cars().await.unwrap();
    let about = showroom.about().await.unwrap();
    let car = showroom.car("2").await.unwrap();

    assert_eq!(cars.len(), defaults::cars().len());
    assert_eq!(cars[0].id, "1");
    assert_eq!(about, defaults::about());
    assert_eq!(car.map(|c| c.id), Some("2".to_string()));
    assert!(
        capture.count_events(|e| e.event.as_deref() == Some(EVENT_FALLBACK)
            && e.collection.as_deref() == Some("cars"))
            >= 1
    );
}

#[tokio::test]
async fn test_inquiry_kept_in_session_during_outage() {
    let showroom = degraded_showroom();

    showroom.sign_in("admin@renova.com", &password()).await.unwrap();

    let message = showroom.send_inquiry(inquiry()).await.unwrap();

    assert!(message.id.starts_with("local-"));
    assert_eq!(message.kind, MessageKind::General);
    assert!(!message.is_read);

    let inbox = showroom.inbox(InboxFilter::All).await.unwrap();
    assert_eq!(inbox.len(), defaults::inbox().len() + 1);
    assert_eq!(inbox[0], message, "today's inquiry is newest");

    let general = showroom.inbox(InboxFilter::General).await.unwrap();
    assert!(general.iter().any(|m| m.id == message.id));

    let stats = showroom.dashboard().await.unwrap();
    assert_eq!(stats.total_cars, defaults::cars().len());
    assert_eq!(stats.total_news, defaults::news().len());
    let unread = defaults::inbox().iter().filter(|m| !m.is_read).count();
    assert_eq!(stats.unread_messages, unread + 1);
    assert_eq!(stats.recent_messages[0].id, message.id);
}

#[tokio::test]
async fn test_testimonial_submitted_during_outage_is_listed() {
    let showroom = degraded_showroom();

    let submitted = showroom
        .submit_testimonial(TestimonialSubmission {
            name: "Rina".to_string(),
            role: "Pembeli Brio".to_string(),
            rating: 5,
            comment: "Mantap".to_string(),
        })
        .await
        .unwrap();

    let visible = showroom.testimonials().await.unwrap();
    assert_eq!(visible.len(), defaults::testimonials().len() + 1);
    assert_eq!(visible[0].id, submitted.id, "today's submission is newest");

    showroom.sign_in("admin@renova.com", &password()).await.unwrap();
    let managed = showroom.manage_testimonials().await.unwrap();
    assert_eq!(managed.len(), defaults::testimonials().len() + 1);
    assert_eq!(managed[0], submitted);
}

#[tokio::test]
async fn test_test_drive_requires_phone() {
    let showroom = local_showroom();
    let err = showroom
        .book_test_drive(TestDriveRequest {
            name: "Diana".to_string(),
            email: "diana@gmail.com".to_string(),
            phone: "  ".to_string(),
            car_name: "HR-V SE CVT".to_string(),
            booking_date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            message: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    assert!(err.message().starts_with("phone"));
}

#[tokio::test]
async fn test_test_drive_booking_subject() {
    let showroom = local_showroom();
    let message = showroom
        .book_test_drive(TestDriveRequest {
            name: "Diana".to_string(),
            email: "diana@gmail.com".to_string(),
            phone: "081234567890".to_string(),
            car_name: "HR-V SE CVT".to_string(),
            booking_date: NaiveDate::from_ymd_opt(2024, 5, 20).unwrap(),
            message: None,
        })
        .await
        .unwrap();

    assert_eq!(message.subject, "Booking Test Drive: HR-V SE CVT");
    assert_eq!(message.kind, MessageKind::TestDrive);
}

#[tokio::test]
async fn test_admin_operations_require_sign_in() {
    let showroom = local_showroom();
    let draft = CarDraft::from(defaults::cars().remove(0));

    let err = showroom.create_car(draft).await.unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Unauthorised);
}

#[tokio::test]
async fn test_regular_user_is_forbidden() {
    let showroom = local_showroom();
    showroom.sign_in("user@renova.com", &password()).await.unwrap();

    let err = showroom.delete_car("1").await.unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Forbidden);
    assert!(showroom.car("1").await.unwrap().is_some());
}

#[tokio::test]
async fn test_admin_avanza_scenario() {
    let showroom = signed_in_admin().await;
    let created = showroom
        .create_car(CarDraft::from(defaults::cars().remove(0)))
        .await
        .unwrap();

    let updated = showroom
        .update_car(
            &created.id,
            CarPatch {
                price: Some(260_000_000),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.price, 260_000_000);
    assert_eq!(updated.name, "Avanza 1.5 G CVT");
}

#[tokio::test]
async fn test_admin_validation_and_not_found_surface() {
    let showroom = signed_in_admin().await;
    let mut draft = CarDraft::from(defaults::cars().remove(0));
    draft.price = 0;

    let invalid = showroom.create_car(draft).await.unwrap_err();
    let missing = showroom
        .update_car("ghost", CarPatch::default())
        .await
        .unwrap_err();

    assert_eq!(invalid.kind(), ExErrorKind::InvalidInput);
    assert_eq!(missing.kind(), ExErrorKind::NotFound);
}

#[tokio::test]
async fn test_admin_writes_do_not_fall_back() {
    let showroom = degraded_showroom();
    showroom.sign_in("admin@renova.com", &password()).await.unwrap();

    let err = showroom.delete_news("1").await.unwrap_err();

    assert!(err.is_backend_unavailable());
}

#[tokio::test]
async fn test_news_excerpt_derived_from_content() {
    let showroom = signed_in_admin().await;
    let content = "a".repeat(150);

    let post = showroom
        .create_news(NewsPostDraft {
            title: "Promo Lebaran".to_string(),
            excerpt: String::new(),
            content: content.clone(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            author: "Renova".to_string(),
            image: "https://images.unsplash.com/photo-1.jpg".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(post.excerpt, format!("{}...", &content[..100]));
}

#[tokio::test]
async fn test_inbox_filter_and_mark_read() {
    let showroom = signed_in_admin().await;

    let test_drives = showroom.inbox(InboxFilter::TestDrive).await.unwrap();
    assert_eq!(test_drives.len(), 1);

    let read = showroom.mark_message_read(&test_drives[0].id).await.unwrap();
    assert!(read.is_read);

    let stats = showroom.dashboard().await.unwrap();
    assert_eq!(stats.unread_messages, 1);
    assert_eq!(stats.total_cars, 8);
}

#[tokio::test]
async fn test_hidden_testimonial_leaves_public_list() {
    let showroom = signed_in_admin().await;

    showroom.set_testimonial_visibility("3", false).await.unwrap();

    let public = showroom.testimonials().await.unwrap();
    let managed = showroom.manage_testimonials().await.unwrap();
    assert_eq!(public.len(), 2);
    assert_eq!(managed.len(), 3);
}

#[tokio::test]
async fn test_sign_up_then_restore_session() {
    let showroom = local_showroom();
    let user = showroom
        .sign_up("rina@renova.com", &password(), "Rina")
        .await
        .unwrap();
    assert!(!user.is_admin());

    let restored = Showroom::new(showroom.backend().clone(), defaults::DEFAULT_ADMIN_EMAIL);
    let again = restored.restore_session().await.unwrap().unwrap();
    assert_eq!(again.email, "rina@renova.com");
}
