// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Browse API item search, newest listings first.

use crate::error::TrackerError;
use crate::models::RawListing;
use crate::services::auth::AccessToken;
use anyhow::Context;
use serde::Deserialize;
use std::time::Duration;

/// Header carrying the marketplace scope.
pub const MARKETPLACE_HEADER: &str = "X-EBAY-C-MARKETPLACE-ID";

/// Sort order the diff engine depends on.
pub const SORT_NEWLY_LISTED: &str = "newlyListed";

pub const DEFAULT_CATEGORY_ID: &str = "179";
/// Used-condition id.
pub const DEFAULT_CONDITION_ID: &str = "7000";

/// Fixed category/condition filter applied to every search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub category_id: String,
    pub condition_id: String,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            category_id: DEFAULT_CATEGORY_ID.to_string(),
            condition_id: DEFAULT_CONDITION_ID.to_string(),
        }
    }
}

impl SearchFilter {
    fn condition_filter(&self) -> String {
        format!("conditionIds:{{{}}}", self.condition_id)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    item_summaries: Option<Vec<serde_json::Value>>,
}

impl SearchResponse {
    /// Convert each summary on its own so one bad record cannot sink the page.
    /// Entries that cannot be read at all, such as bare numbers, are dropped.
    fn into_listings(self) -> Vec<RawListing> {
        self.item_summaries
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value(value) {
                Ok(listing) => Some(listing),
                Err(e) => {
                    tracing::warn!(index, error = %e, "Dropping unreadable item summary");
                    None
                }
            })
            .collect()
    }
}

/// Browse API search client.
#[derive(Clone)]
pub struct SearchClient {
    http: reqwest::Client,
    search_url: String,
    filter: SearchFilter,
}

impl SearchClient {
    pub fn new(
        search_url: impl Into<String>,
        filter: SearchFilter,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed building search HTTP client")?;

        Ok(Self {
            http,
            search_url: search_url.into(),
            filter,
        })
    }

    /// Fetch page 1 of the newest listings. Upstream order is preserved.
    pub async fn search(
        &self,
        token: &AccessToken,
        marketplace: &str,
        limit: u32,
    ) -> Result<Vec<RawListing>, TrackerError> {
        tracing::info!(marketplace, limit, "Searching listings");

        let response = self
            .http
            .get(&self.search_url)
            .bearer_auth(token.as_str())
            .header(MARKETPLACE_HEADER, marketplace)
            .query(&[
                ("category_ids", self.filter.category_id.clone()),
                ("filter", self.filter.condition_filter()),
                ("sort", SORT_NEWLY_LISTED.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::error!("Search request timed out");
                    TrackerError::Api("search timed out".to_string())
                } else {
                    tracing::error!(error = %e, "Search request failed");
                    TrackerError::Api(e.to_string())
                }
            })?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Search response received");

        if status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::error!("Search rejected bearer token");
            return Err(TrackerError::Auth(TrackerError::TOKEN_REJECTED.to_string()));
        }
        if status != reqwest::StatusCode::OK {
            tracing::error!(status = status.as_u16(), "Search failed");
            return Err(TrackerError::Api(format!(
                "search failed, status={}",
                status.as_u16()
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| TrackerError::Api(format!("malformed search response: {}", e)))?;

        let items = body.into_listings();
        tracing::info!(count = items.len(), "Search returned items");
        Ok(items)
    }
}
