//! Shared HTTP client for the hosted backend
//!
//! Every request carries the project API key, a bearer token (the signed-in
//! user's access token when present, the API key otherwise) and a fresh
//! `x-request-id`.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use renova_core::{log_op_end, log_op_error, log_op_start};
use renova_core_types::{RequestId, Sensitive};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::RemoteConfig;
use crate::errors::{decode_error, map_status_error, map_transport_error, Result};
use crate::BACKEND;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct RemoteClient {
    http: Client,
    base_url: String,
    anon_key: Sensitive<String>,
    access_token: Arc<RwLock<Option<Sensitive<String>>>>,
}

impl RemoteClient {
    /// Build a client with the configured request timeout
    pub fn new(config: &RemoteConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(map_transport_error)?;
        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            anon_key: config.anon_key.clone(),
            access_token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    pub fn storage_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path)
    }

    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.base_url, bucket, path)
    }

    pub(crate) fn set_access_token(&self, token: Option<Sensitive<String>>) {
        if let Ok(mut slot) = self.access_token.write() {
            *slot = token;
        }
    }

    pub(crate) fn access_token(&self) -> Option<Sensitive<String>> {
        self.access_token.read().ok().and_then(|slot| slot.clone())
    }

    /// Request with the authentication headers applied
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let bearer = self
            .access_token()
            .unwrap_or_else(|| self.anon_key.clone());
        self.http
            .request(method, url)
            .header("apikey", self.anon_key.expose().as_str())
            .bearer_auth(bearer.expose())
    }

    /// Send a request and return the raw body of a successful response
    ///
    /// Failures carry `op`, `collection` and the request id.
    pub async fn send(
        &self,
        op: &'static str,
        collection: &str,
        builder: RequestBuilder,
    ) -> Result<Vec<u8>> {
        let request_id = RequestId::new();
        log_op_start!(
            op,
            backend = BACKEND,
            collection = collection,
            request_id = request_id.as_str()
        );
        let start = Instant::now();

        let result = self.dispatch(builder, &request_id).await.map_err(|err| {
            err.with_op(op)
                .with_collection(collection)
                .with_request_id(request_id.clone())
        });

        let duration_ms = start.elapsed().as_millis() as u64;
        match &result {
            Ok(body) => {
                log_op_end!(
                    op,
                    duration_ms = duration_ms,
                    backend = BACKEND,
                    collection = collection,
                    request_id = request_id.as_str(),
                    bytes = body.len()
                );
            }
            Err(err) => {
                log_op_error!(
                    op,
                    err.clone(),
                    duration_ms = duration_ms,
                    backend = BACKEND,
                    collection = collection,
                    request_id = request_id.as_str()
                );
            }
        }
        result
    }

    async fn dispatch(&self, builder: RequestBuilder, request_id: &RequestId) -> Result<Vec<u8>> {
        let response = builder
            .header(REQUEST_ID_HEADER, request_id.as_str())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }

    /// [`send`](Self::send) then decode the body as JSON
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        op: &'static str,
        collection: &str,
        builder: RequestBuilder,
    ) -> Result<T> {
        let body = self.send(op, collection, builder).await?;
        serde_json::from_slice(&body).map_err(|err| {
            decode_error(err, &body)
                .with_op(op)
                .with_collection(collection)
        })
    }
}
