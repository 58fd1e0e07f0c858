#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use renova_core::errors::ExErrorKind;
use renova_core::model::ImageToken;
use renova_core::ops::{IdentityProvider, ImageStore};
use renova_core_types::Sensitive;

fn password() -> Sensitive<String> {
    Sensitive::new("rahasia123".to_string())
}

#[tokio::test]
async fn test_upload_returns_public_url_serving_bytes() {
    let server = common::spawn().await;
    let images = server.store().images();

    let token = images.upload(b"fake-jpeg".to_vec(), "depan.jpg").await.unwrap();

    let prefix = format!("{}/storage/v1/object/public/uploads/uploads/", server.url());
    assert!(token.as_str().starts_with(&prefix));
    assert!(token.as_str().ends_with(".jpg"));
    assert_eq!(images.resolve(&token).await.unwrap(), token.as_str());

    let fetched = reqwest::get(token.as_str()).await.unwrap();
    assert_eq!(fetched.bytes().await.unwrap().as_ref(), b"fake-jpeg");
}

#[tokio::test]
async fn test_resolve_bare_path_to_public_url() {
    let server = common::spawn().await;
    let url = server
        .store()
        .images()
        .resolve(&ImageToken::new("uploads/1-a.png"))
        .await
        .unwrap();

    assert_eq!(
        url,
        format!("{}/storage/v1/object/public/uploads/uploads/1-a.png", server.url())
    );
}

#[tokio::test]
async fn test_sign_up_sign_in_and_out() {
    let server = common::spawn().await;
    let store = server.store();
    let identity = store.identity();
    assert!(identity.current_principal().await.unwrap().is_none());

    let principal = identity
        .sign_up("rina@renova.com", &password(), "Rina")
        .await
        .unwrap();
    assert_eq!(principal.display_name.as_deref(), Some("Rina"));
    assert_eq!(
        identity.current_principal().await.unwrap().map(|p| p.email),
        Some("rina@renova.com".to_string())
    );

    identity.sign_out().await.unwrap();
    assert!(identity.current_principal().await.unwrap().is_none());

    let again = identity.sign_in("rina@renova.com", &password()).await.unwrap();
    assert_eq!(again.email, "rina@renova.com");
}

#[tokio::test]
async fn test_duplicate_sign_up_is_already_exists() {
    let server = common::spawn().await;
    let identity = server.store().identity();
    identity.sign_up("a@renova.com", &password(), "A").await.unwrap();

    let err = identity.sign_up("a@renova.com", &password(), "A").await.unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::AlreadyExists);
}

#[tokio::test]
async fn test_wrong_password_is_unauthorised() {
    let server = common::spawn().await;
    let identity = server.store().identity();
    identity.sign_up("b@renova.com", &password(), "B").await.unwrap();
    identity.sign_out().await.unwrap();

    let err = identity
        .sign_in("b@renova.com", &Sensitive::new("wrong".to_string()))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Unauthorised);
    assert!(!err.to_string().contains("wrong"));
}
