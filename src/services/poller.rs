// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Poll orchestration: authenticate, search, diff, persist, normalize.

use crate::config::Config;
use crate::error::TrackerError;
use crate::models::NormalizedListing;
use crate::services::auth::{Authenticator, Credentials};
use crate::services::cursor_store::CursorStore;
use crate::services::diff::diff;
use crate::services::normalize::normalize;
use crate::services::search::{SearchClient, SearchFilter};
use dashmap::DashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Per-marketplace poll locks.
pub type PollLocks = Arc<DashMap<String, Arc<Mutex<()>>>>;

/// Public entry point of the change-detection engine.
///
/// Each call to [`ListingPoller::poll`] performs one token exchange and one
/// search, in sequence. Polls for the same marketplace are serialised inside
/// this process so cursor load/save cannot interleave.
#[derive(Clone)]
pub struct ListingPoller {
    credentials: Credentials,
    authenticator: Authenticator,
    search: SearchClient,
    cursor_dir: PathBuf,
    limit: u32,
    poll_locks: PollLocks,
}

impl ListingPoller {
    pub fn new(
        credentials: Credentials,
        authenticator: Authenticator,
        search: SearchClient,
        cursor_dir: impl Into<PathBuf>,
        limit: u32,
    ) -> Self {
        Self {
            credentials,
            authenticator,
            search,
            cursor_dir: cursor_dir.into(),
            limit,
            poll_locks: Arc::new(DashMap::new()),
        }
    }

    /// Wire every component from configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let authenticator = Authenticator::new(config.oauth_url.clone(), config.auth_timeout)?;
        let search = SearchClient::new(
            config.browse_api_url.clone(),
            SearchFilter {
                category_id: config.category_id.clone(),
                condition_id: config.condition_id.clone(),
            },
            config.search_timeout,
        )?;

        Ok(Self::new(
            Credentials::new(config.client_id.clone(), config.client_secret.clone()),
            authenticator,
            search,
            config.cursor_dir.clone(),
            config.search_limit,
        ))
    }

    /// Cursor store for one marketplace scope.
    pub fn cursor_store(&self, marketplace: &str) -> CursorStore {
        CursorStore::for_marketplace(&self.cursor_dir, marketplace)
    }

    /// Run one poll and return listings not reported before, newest first.
    ///
    /// Errors from authentication and search are returned unchanged. Cursor
    /// persistence failures are logged and do not fail the poll.
    pub async fn poll(&self, marketplace: &str) -> Result<Vec<NormalizedListing>, TrackerError> {
        let lock = self
            .poll_locks
            .entry(marketplace.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        tracing::info!(marketplace, "Starting poll");

        let token = self.authenticator.obtain_token(&self.credentials).await?;
        let page = self.search.search(&token, marketplace, self.limit).await?;

        let Some(newest) = page.first() else {
            tracing::info!(marketplace, "Search returned no items");
            return Ok(Vec::new());
        };

        let store = self.cursor_store(marketplace);
        let cursor = store.load();
        let new_items = diff(&page, cursor.as_ref());

        if let Err(e) = store.save(newest) {
            tracing::error!(
                marketplace,
                path = %store.path().display(),
                error = %e,
                "Failed to save cursor, next poll may re-report items"
            );
        }

        let listings: Vec<NormalizedListing> = new_items.iter().map(normalize).collect();
        tracing::info!(marketplace, count = listings.len(), "Poll complete");
        Ok(listings)
    }
}
