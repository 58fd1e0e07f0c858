//! Inline image storage
//!
//! Uploaded bytes are kept as `data:` URLs keyed by `<folder>/<id>_<name>`.

#![allow(clippy::result_large_err)]

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use renova_core::errors::{ExError, ExErrorKind};
use renova_core::model::image::content_type_for;
use renova_core::model::{ImageToken, StoredImage};
use renova_core::ops::ImageStore;
use rusqlite::{Connection, OptionalExtension, Row};
use uuid::Uuid;

use crate::db::SharedConnection;
use crate::errors::{from_rusqlite, Result};

/// Folder used by `ImageStore::upload`
pub const UPLOAD_FOLDER: &str = "uploads";

const COLLECTION: &str = "images";

fn image_not_found(token: &str) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op("resolve_image")
        .with_collection(COLLECTION)
        .with_entity_id(token)
        .with_message("image token not found")
}

/// Replace path separators and whitespace so the name fits in a token
fn sanitize_name(file_name: &str) -> String {
    let cleaned: String = file_name
        .trim()
        .chars()
        .map(|c| if c == '/' || c == '\\' || c.is_whitespace() { '_' } else { c })
        .collect();
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned
    }
}

pub fn encode_data_url(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(bytes))
}

/// Split a base64 data URL into its MIME type and decoded bytes
pub fn decode_data_url(url: &str) -> Result<(String, Vec<u8>)> {
    let invalid = |reason: &str| {
        ExError::new(ExErrorKind::InvalidInput)
            .with_op("decode_data_url")
            .with_message(reason.to_string())
    };
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| invalid("not a data URL"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| invalid("data URL has no payload"))?;
    let content_type = meta
        .strip_suffix(";base64")
        .ok_or_else(|| invalid("data URL is not base64 encoded"))?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| invalid(&e.to_string()))?;
    Ok((content_type.to_string(), bytes))
}

struct ImageRow {
    token: String,
    name: String,
    folder: String,
    content_type: String,
    size: i64,
    data: String,
    uploaded_at: String,
}

impl ImageRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            token: row.get(0)?,
            name: row.get(1)?,
            folder: row.get(2)?,
            content_type: row.get(3)?,
            size: row.get(4)?,
            data: row.get(5)?,
            uploaded_at: row.get(6)?,
        })
    }

    fn into_image(self) -> Result<StoredImage> {
        let uploaded_at = DateTime::parse_from_rfc3339(&self.uploaded_at)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| {
                ExError::new(ExErrorKind::Serialization)
                    .with_op("decode_image")
                    .with_entity_id(self.token.as_str())
                    .with_message(e.to_string())
            })?;
        Ok(StoredImage {
            token: ImageToken::new(self.token),
            name: self.name,
            folder: self.folder,
            data: self.data,
            uploaded_at,
            size: self.size.max(0) as u64,
            content_type: self.content_type,
        })
    }
}

const IMAGE_COLUMNS: &str = "token, name, folder, content_type, size, data, uploaded_at";

pub(crate) fn insert_image(conn: &Connection, image: &StoredImage) -> Result<()> {
    conn.execute(
        "INSERT INTO images (token, name, folder, content_type, size, data, uploaded_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
         ON CONFLICT(token) DO UPDATE SET
            name = excluded.name,
            folder = excluded.folder,
            content_type = excluded.content_type,
            size = excluded.size,
            data = excluded.data,
            uploaded_at = excluded.uploaded_at",
        rusqlite::params![
            image.token.as_str(),
            image.name,
            image.folder,
            image.content_type,
            image.size as i64,
            image.data,
            image.uploaded_at.to_rfc3339(),
        ],
    )
    .map_err(from_rusqlite)?;
    Ok(())
}

pub(crate) fn read_image(conn: &Connection, token: &str) -> Result<Option<StoredImage>> {
    let sql = format!("SELECT {} FROM images WHERE token = ?1", IMAGE_COLUMNS);
    conn.query_row(&sql, [token], ImageRow::from_row)
        .optional()
        .map_err(from_rusqlite)?
        .map(ImageRow::into_image)
        .transpose()
}

pub(crate) fn read_all_images(conn: &Connection) -> Result<Vec<StoredImage>> {
    let sql = format!("SELECT {} FROM images ORDER BY uploaded_at, token", IMAGE_COLUMNS);
    let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
    let rows = stmt
        .query_map([], ImageRow::from_row)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    rows.into_iter().map(ImageRow::into_image).collect()
}

/// Local image store over the `images` table
#[derive(Clone)]
pub struct LocalImageStore {
    conn: SharedConnection,
}

impl LocalImageStore {
    pub(crate) fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Store bytes under an explicit folder
    pub fn store(&self, folder: &str, bytes: &[u8], file_name: &str) -> Result<StoredImage> {
        let name = sanitize_name(file_name);
        let image = StoredImage {
            token: ImageToken::new(format!("{}/{}_{}", folder, Uuid::now_v7().simple(), name)),
            content_type: content_type_for(&name).to_string(),
            data: encode_data_url(content_type_for(&name), bytes),
            size: bytes.len() as u64,
            uploaded_at: Utc::now(),
            folder: folder.to_string(),
            name,
        };
        self.conn.logged("upload_image", COLLECTION, |conn| {
            insert_image(conn, &image)?;
            Ok(())
        })?;
        Ok(image)
    }

    pub fn get_image(&self, token: &ImageToken) -> Result<Option<StoredImage>> {
        self.conn
            .logged("get_image", COLLECTION, |conn| read_image(conn, token.as_str()))
    }

    /// Remove an image; an unknown token is ignored
    pub fn delete_image(&self, token: &ImageToken) -> Result<()> {
        self.conn.logged("delete_image", COLLECTION, |conn| {
            conn.execute("DELETE FROM images WHERE token = ?1", [token.as_str()])
                .map_err(from_rusqlite)?;
            Ok(())
        })
    }

    pub fn list_images(&self) -> Result<Vec<StoredImage>> {
        self.conn.logged("list_images", COLLECTION, |conn| read_all_images(conn))
    }

    /// Original bytes behind a local token
    pub fn read_bytes(&self, token: &ImageToken) -> Result<Vec<u8>> {
        let image = self
            .get_image(token)?
            .ok_or_else(|| image_not_found(token.as_str()))?;
        decode_data_url(&image.data).map(|(_, bytes)| bytes)
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn upload(&self, bytes: Vec<u8>, file_name: &str) -> Result<ImageToken> {
        self.store(UPLOAD_FOLDER, &bytes, file_name)
            .map(|image| image.token)
    }

    async fn resolve(&self, token: &ImageToken) -> Result<String> {
        if token.is_external() {
            return Ok(token.as_str().to_string());
        }
        self.get_image(token)?
            .map(|image| image.data)
            .ok_or_else(|| image_not_found(token.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_round_trip() {
        let url = encode_data_url("image/png", &[0x89, b'P', b'N', b'G']);
        assert!(url.starts_with("data:image/png;base64,"));
        let (mime, bytes) = decode_data_url(&url).unwrap();
        assert_eq!(mime, "image/png");
        assert_eq!(bytes, vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn test_decode_rejects_plain_urls() {
        let err = decode_data_url("https://example.com/a.png").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
    }

    #[test]
    fn test_sanitize_name() {
        assert_eq!(sanitize_name("my car/front view.jpg"), "my_car_front_view.jpg");
        assert_eq!(sanitize_name("   "), "image");
    }
}
