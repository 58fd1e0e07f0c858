use async_trait::async_trait;
use renova_core::model::AboutData;
use renova_core::ops::AboutRepository;
use reqwest::Method;
use serde::Serialize;

use crate::client::RemoteClient;
use crate::errors::Result;

const TABLE: &str = "about";
const SINGLETON_ID: i64 = 1;

/// About-page singleton stored as row 1 of the `about` table
#[derive(Clone)]
pub struct RemoteAbout {
    client: RemoteClient,
}

#[derive(Serialize)]
struct AboutRow<'a> {
    id: i64,
    #[serde(flatten)]
    about: &'a AboutData,
}

impl RemoteAbout {
    pub(crate) fn new(client: RemoteClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AboutRepository for RemoteAbout {
    /// Empty record when the table has no row yet
    async fn get(&self) -> Result<AboutData> {
        let request = self
            .client
            .request(Method::GET, &self.client.rest_url(TABLE))
            .query(&[("select", "description,mission,gallery"), ("limit", "1")]);
        let rows: Vec<AboutData> = self.client.send_json("get", TABLE, request).await?;
        Ok(rows.into_iter().next().unwrap_or_default())
    }

    async fn upsert(&self, about: AboutData) -> Result<AboutData> {
        let request = self
            .client
            .request(Method::POST, &self.client.rest_url(TABLE))
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&AboutRow {
                id: SINGLETON_ID,
                about: &about,
            });
        let rows: Vec<AboutData> = self.client.send_json("upsert", TABLE, request).await?;
        Ok(rows.into_iter().next().unwrap_or(about))
    }
}
