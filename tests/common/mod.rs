// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fake upstream (OAuth + Browse search) served on an ephemeral port.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use listing_tracker::config::Config;
use listing_tracker::ListingPoller;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const TOKEN_PATH: &str = "/identity/v1/oauth2/token";
pub const SEARCH_PATH: &str = "/buy/browse/v1/item_summary/search";
pub const ACCESS_TOKEN: &str = "test-access-token";

#[derive(Default)]
struct Inner {
    token_status: Option<u16>,
    search_status: Option<u16>,
    token_delay: Duration,
    search_delay: Duration,
    reject_searches: usize,
    items: Vec<Value>,
    token_requests: usize,
    search_requests: usize,
    last_authorization: Option<String>,
    last_form: Option<String>,
    last_query: HashMap<String, String>,
    last_marketplace: Option<String>,
}

/// Handle to a running fake upstream.
#[derive(Clone)]
pub struct FakeUpstream {
    pub base_url: String,
    inner: Arc<Mutex<Inner>>,
}

#[allow(dead_code)]
impl FakeUpstream {
    pub async fn start() -> Self {
        let inner = Arc::new(Mutex::new(Inner::default()));

        let app = Router::new()
            .route(TOKEN_PATH, post(token_handler))
            .route(SEARCH_PATH, get(search_handler))
            .with_state(inner.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind fake upstream");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake upstream");
        });

        Self {
            base_url: format!("http://{}", addr),
            inner,
        }
    }

    pub fn token_url(&self) -> String {
        format!("{}{}", self.base_url, TOKEN_PATH)
    }

    pub fn search_url(&self) -> String {
        format!("{}{}", self.base_url, SEARCH_PATH)
    }

    pub fn config(&self, cursor_dir: &Path) -> Config {
        let mut config = Config::test_default();
        config.oauth_url = self.token_url();
        config.browse_api_url = self.search_url();
        config.cursor_dir = cursor_dir.to_path_buf();
        config
    }

    pub fn poller(&self, cursor_dir: &Path) -> ListingPoller {
        ListingPoller::from_config(&self.config(cursor_dir)).expect("poller")
    }

    pub fn set_items(&self, items: Vec<Value>) {
        self.inner.lock().unwrap().items = items;
    }

    pub fn set_token_status(&self, status: u16) {
        self.inner.lock().unwrap().token_status = Some(status);
    }

    pub fn set_search_status(&self, status: u16) {
        self.inner.lock().unwrap().search_status = Some(status);
    }

    pub fn set_token_delay(&self, delay: Duration) {
        self.inner.lock().unwrap().token_delay = delay;
    }

    pub fn set_search_delay(&self, delay: Duration) {
        self.inner.lock().unwrap().search_delay = delay;
    }

    /// Answer the next `count` searches with 401.
    pub fn reject_searches(&self, count: usize) {
        self.inner.lock().unwrap().reject_searches = count;
    }

    pub fn token_requests(&self) -> usize {
        self.inner.lock().unwrap().token_requests
    }

    pub fn search_requests(&self) -> usize {
        self.inner.lock().unwrap().search_requests
    }

    pub fn last_authorization(&self) -> Option<String> {
        self.inner.lock().unwrap().last_authorization.clone()
    }

    pub fn last_form(&self) -> Option<String> {
        self.inner.lock().unwrap().last_form.clone()
    }

    pub fn last_query(&self) -> HashMap<String, String> {
        self.inner.lock().unwrap().last_query.clone()
    }

    pub fn last_marketplace(&self) -> Option<String> {
        self.inner.lock().unwrap().last_marketplace.clone()
    }
}

async fn token_handler(
    State(inner): State<Arc<Mutex<Inner>>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let (status, delay) = {
        let mut inner = inner.lock().unwrap();
        inner.token_requests += 1;
        inner.last_authorization = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        inner.last_form = Some(body);
        (inner.token_status.unwrap_or(200), inner.token_delay)
    };

    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    if status != 200 {
        let code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (code, Json(json!({ "error": "invalid_client" }))).into_response();
    }

    Json(json!({
        "access_token": ACCESS_TOKEN,
        "expires_in": 7200,
        "token_type": "Application Access Token"
    }))
    .into_response()
}

async fn search_handler(
    State(inner): State<Arc<Mutex<Inner>>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let (status, delay, items) = {
        let mut inner = inner.lock().unwrap();
        inner.search_requests += 1;
        inner.last_query = query;
        inner.last_marketplace = headers
            .get("x-ebay-c-marketplace-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bearer_ok = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            == Some(format!("Bearer {}", ACCESS_TOKEN).as_str());

        let status = if !bearer_ok {
            401
        } else if inner.reject_searches > 0 {
            inner.reject_searches -= 1;
            401
        } else {
            inner.search_status.unwrap_or(200)
        };
        (status, inner.search_delay, inner.items.clone())
    };

    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    if status != 200 {
        let code = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (code, Json(json!({ "errors": [] }))).into_response();
    }

    Json(json!({
        "total": items.len(),
        "itemSummaries": items
    }))
    .into_response()
}

/// Minimal upstream item summary.
#[allow(dead_code)]
pub fn item(id: &str, created: &str) -> Value {
    json!({
        "itemId": id,
        "title": format!("Listing {}", id),
        "itemCreationDate": created,
        "price": { "value": "10.00", "currency": "GBP" },
        "itemWebUrl": format!("https://www.ebay.co.uk/itm/{}", id)
    })
}
