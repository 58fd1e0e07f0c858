//! In-process stand-in for the hosted backend
//!
//! Serves the subset of the PostgREST, storage and GoTrue APIs the client
//! uses, keeping every table in memory.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::cmp::Ordering;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicI64};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use renova_remote::{RemoteConfig, RemoteStore};
use serde_json::{json, Map, Value};

pub const ANON_KEY: &str = "test-anon-key";

#[derive(Default)]
pub struct FakeBackend {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    objects: Mutex<HashMap<String, (String, Vec<u8>)>>,
    accounts: Mutex<HashMap<String, (String, String)>>,
    request_ids: Mutex<Vec<String>>,
    next_id: AtomicI64,
    outage: AtomicBool,
}

impl FakeBackend {
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    pub fn seed_rows(&self, table: &str, rows: Vec<Value>) {
        let mut tables = self.tables.lock().unwrap();
        let entry = tables.entry(table.to_string()).or_default();
        for mut row in rows {
            assign_defaults(&mut row, &self.next_id);
            entry.push(row);
        }
    }

    pub fn set_outage(&self, down: bool) {
        self.outage.store(down, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn request_ids(&self) -> Vec<String> {
        self.request_ids.lock().unwrap().clone()
    }

    fn is_down(&self) -> bool {
        self.outage.load(std::sync::atomic::Ordering::SeqCst)
    }

    fn record(&self, headers: &HeaderMap) {
        if let Some(id) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
            self.request_ids.lock().unwrap().push(id.to_string());
        }
    }
}

pub struct FakeServer {
    pub addr: SocketAddr,
    pub backend: Arc<FakeBackend>,
}

impl FakeServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn config(&self) -> RemoteConfig {
        RemoteConfig::new(self.url(), ANON_KEY).with_timeout_secs(5)
    }

    pub fn store(&self) -> RemoteStore {
        RemoteStore::connect(&self.config()).unwrap()
    }
}

pub async fn spawn() -> FakeServer {
    let backend = Arc::new(FakeBackend::default());
    let app = Router::new()
        .route(
            "/rest/v1/:table",
            get(list_rows)
                .post(insert_rows)
                .patch(update_rows)
                .delete(delete_rows),
        )
        .route(
            "/storage/v1/object/:bucket/*path",
            get(read_object).post(write_object),
        )
        .route("/auth/v1/signup", post(sign_up))
        .route("/auth/v1/token", post(token))
        .route("/auth/v1/user", get(current_user))
        .route("/auth/v1/logout", post(logout))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeServer { addr, backend }
}

/// Address nothing listens on
pub async fn closed_address() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn compare(a: &Value, b: &Value) -> Ordering {
    match (a.as_i64(), b.as_i64()) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => text(a).cmp(&text(b)),
    }
}

fn matches_filters(row: &Value, params: &HashMap<String, String>) -> bool {
    params.iter().all(|(key, filter)| {
        if matches!(key.as_str(), "select" | "order" | "limit") {
            return true;
        }
        let actual = row.get(key).map(text).unwrap_or_default();
        if let Some(expected) = filter.strip_prefix("eq.") {
            actual == expected
        } else if let Some(expected) = filter.strip_prefix("ilike.") {
            actual.to_lowercase() == expected.to_lowercase()
        } else {
            false
        }
    })
}

fn assign_defaults(row: &mut Value, next_id: &AtomicI64) {
    if let Some(obj) = row.as_object_mut() {
        if !obj.contains_key("id") {
            let id = next_id.fetch_add(1, std::sync::atomic::Ordering::SeqCst) + 1;
            obj.insert("id".to_string(), json!(id));
        }
        obj.entry("created_at")
            .or_insert_with(|| json!(chrono::Utc::now().to_rfc3339()));
    }
}

fn authorised(headers: &HeaderMap) -> bool {
    headers.get("apikey").and_then(|v| v.to_str().ok()) == Some(ANON_KEY)
        && headers.contains_key(header::AUTHORIZATION)
}

fn unauthorised() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"message": "Invalid API key"})),
    )
        .into_response()
}

fn unavailable() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({"message": "upstream connect error"})),
    )
        .into_response()
}

async fn list_rows(
    State(state): State<Arc<FakeBackend>>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    state.record(&headers);
    if !authorised(&headers) {
        return unauthorised();
    }
    if state.is_down() {
        return unavailable();
    }

    let mut rows: Vec<Value> = state
        .rows(&table)
        .into_iter()
        .filter(|row| matches_filters(row, &params))
        .collect();

    if let Some(order) = params.get("order") {
        let (column, direction) = order.split_once('.').unwrap_or((order.as_str(), "asc"));
        rows.sort_by(|a, b| {
            let ord = compare(&a[column], &b[column]);
            if direction == "desc" {
                ord.reverse()
            } else {
                ord
            }
        });
    }
    if let Some(limit) = params.get("limit").and_then(|l| l.parse::<usize>().ok()) {
        rows.truncate(limit);
    }

    Json(Value::Array(rows)).into_response()
}

async fn insert_rows(
    State(state): State<Arc<FakeBackend>>,
    Path(table): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    state.record(&headers);
    if !authorised(&headers) {
        return unauthorised();
    }
    if state.is_down() {
        return unavailable();
    }

    let merge = headers
        .get("prefer")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("resolution=merge-duplicates"))
        .unwrap_or(false);
    let incoming = match body {
        Value::Array(rows) => rows,
        row => vec![row],
    };

    let mut tables = state.tables.lock().unwrap();
    let stored = tables.entry(table.clone()).or_default();
    let mut written = Vec::new();

    for mut row in incoming {
        if table == "users" {
            let email = row.get("email").map(text).unwrap_or_default().to_lowercase();
            if stored
                .iter()
                .any(|existing| existing.get("email").map(text).unwrap_or_default().to_lowercase() == email)
            {
                return (
                    StatusCode::CONFLICT,
                    Json(json!({"code": "23505", "message": "duplicate key value violates unique constraint"})),
                )
                    .into_response();
            }
        }

        let existing = row
            .get("id")
            .map(text)
            .and_then(|id| stored.iter().position(|r| r.get("id").map(text) == Some(id.clone())));
        match existing {
            Some(index) if merge => {
                stored[index] = row.clone();
                written.push(row);
            }
            _ => {
                assign_defaults(&mut row, &state.next_id);
                stored.push(row.clone());
                written.push(row);
            }
        }
    }

    (StatusCode::CREATED, Json(Value::Array(written))).into_response()
}

async fn update_rows(
    State(state): State<Arc<FakeBackend>>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(patch): Json<Map<String, Value>>,
) -> Response {
    state.record(&headers);
    if !authorised(&headers) {
        return unauthorised();
    }

    let mut tables = state.tables.lock().unwrap();
    let stored = tables.entry(table).or_default();
    let mut updated = Vec::new();
    for row in stored.iter_mut().filter(|row| matches_filters(row, &params)) {
        if let Some(obj) = row.as_object_mut() {
            for (key, value) in &patch {
                obj.insert(key.clone(), value.clone());
            }
        }
        updated.push(row.clone());
    }

    Json(Value::Array(updated)).into_response()
}

async fn delete_rows(
    State(state): State<Arc<FakeBackend>>,
    Path(table): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    state.record(&headers);
    if !authorised(&headers) {
        return unauthorised();
    }

    let mut tables = state.tables.lock().unwrap();
    if let Some(stored) = tables.get_mut(&table) {
        stored.retain(|row| !matches_filters(row, &params));
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn write_object(
    State(state): State<Arc<FakeBackend>>,
    Path((bucket, path)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !authorised(&headers) {
        return unauthorised();
    }
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();
    let key = format!("{}/{}", bucket, path);
    state
        .objects
        .lock()
        .unwrap()
        .insert(key.clone(), (content_type, body.to_vec()));
    Json(json!({"Key": key})).into_response()
}

/// Only the `public/<bucket>/<path>` form is served
async fn read_object(
    State(state): State<Arc<FakeBackend>>,
    Path((prefix, path)): Path<(String, String)>,
) -> Response {
    if prefix != "public" {
        return StatusCode::NOT_FOUND.into_response();
    }
    match state.objects.lock().unwrap().get(&path) {
        Some((content_type, bytes)) => (
            [(header::CONTENT_TYPE, content_type.clone())],
            bytes.clone(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn session_for(email: &str, name: &str) -> Value {
    json!({
        "access_token": format!("token-{}", email),
        "token_type": "bearer",
        "expires_in": 3600,
        "user": {"id": email, "email": email, "user_metadata": {"name": name}},
    })
}

async fn sign_up(State(state): State<Arc<FakeBackend>>, Json(body): Json<Value>) -> Response {
    let email = text(&body["email"]);
    let password = text(&body["password"]);
    let name = text(&body["data"]["name"]);
    let mut accounts = state.accounts.lock().unwrap();
    if accounts.contains_key(&email) {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"code": 422, "msg": "User already registered"})),
        )
            .into_response();
    }
    accounts.insert(email.clone(), (password, name.clone()));
    Json(session_for(&email, &name)).into_response()
}

async fn token(State(state): State<Arc<FakeBackend>>, Json(body): Json<Value>) -> Response {
    let email = text(&body["email"]);
    let password = text(&body["password"]);
    match state.accounts.lock().unwrap().get(&email) {
        Some((stored, name)) if *stored == password => Json(session_for(&email, name)).into_response(),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid_grant", "error_description": "Invalid login credentials"})),
        )
            .into_response(),
    }
}

async fn current_user(State(state): State<Arc<FakeBackend>>, headers: HeaderMap) -> Response {
    let email = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer token-"))
        .map(str::to_string);
    let accounts = state.accounts.lock().unwrap();
    match email.and_then(|email| accounts.get(&email).map(|(_, name)| (email.clone(), name.clone()))) {
        Some((email, name)) => {
            Json(json!({"id": email, "email": email, "user_metadata": {"name": name}})).into_response()
        }
        None => unauthorised(),
    }
}

async fn logout() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
