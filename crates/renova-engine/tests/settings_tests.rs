#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;

use renova_core::errors::ExErrorKind;
use renova_core::ops::Repository;
use renova_engine::{Backend, BackendKind, Settings};

#[test]
fn test_file_then_environment_precedence() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("renova.toml");
    std::fs::write(
        &file,
        r#"
backend = "local"
admin_email = "owner@renova.com"

[local]
database_path = "showroom.db"

[remote]
url = "https://demo.example.co"
anon_key = "from-file"
"#,
    )
    .unwrap();

    let env: HashMap<String, String> =
        [("RENOVA_REMOTE__ANON_KEY".to_string(), "from-env".to_string())].into();
    let settings = Settings::load_from(Some(file.as_path()), Some(env)).unwrap();

    assert_eq!(settings.backend, BackendKind::Local);
    assert_eq!(settings.admin_email, "owner@renova.com");
    assert_eq!(settings.local.database_path.to_str(), Some("showroom.db"));
    assert_eq!(settings.remote_config().unwrap().anon_key.expose(), "from-env");
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = Settings::load_from(Some(dir.path().join("absent.toml").as_path()), Some(HashMap::new()))
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidInput);
}

#[tokio::test]
async fn test_open_local_backend_from_settings() {
    let dir = tempfile::TempDir::new().unwrap();
    let settings = Settings::load_from(None, Some(HashMap::new()))
        .unwrap()
        .with_database_path(dir.path().join("renova.db"));

    let backend = Backend::open(&settings).unwrap();

    assert_eq!(backend.kind, BackendKind::Local);
    assert_eq!(backend.cars.list().await.unwrap().len(), 8);
}
