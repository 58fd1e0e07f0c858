use async_trait::async_trait;
use renova_core::model::AboutData;
use renova_core::ops::AboutRepository;

use super::rows;
use crate::db::SharedConnection;
use crate::errors::Result;
use crate::seed::autoseed::ensure_about_seeded;

/// Local about-page singleton (row id 1)
#[derive(Clone)]
pub struct LocalAbout {
    conn: SharedConnection,
}

impl LocalAbout {
    pub(crate) fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl AboutRepository for LocalAbout {
    async fn get(&self) -> Result<AboutData> {
        self.conn.logged("get", "about", |conn| {
            ensure_about_seeded(conn)?;
            Ok(rows::read_about(conn)?.unwrap_or_default())
        })
    }

    async fn upsert(&self, about: AboutData) -> Result<AboutData> {
        self.conn.logged("upsert", "about", move |conn| {
            ensure_about_seeded(conn)?;
            rows::write_about(conn, &about)?;
            Ok(about)
        })
    }
}
