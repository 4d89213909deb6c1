// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth client-credentials exchange for application tokens.

use crate::error::TrackerError;
use anyhow::Context;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

/// Scope requested for application (non-user) tokens.
pub const OAUTH_SCOPE: &str = "https://api.ebay.com/oauth/api_scope";

/// Client id/secret pair. Immutable for the lifetime of the process.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// `Authorization` header value for HTTP Basic auth.
    pub fn basic_auth_header(&self) -> String {
        let raw = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", BASE64.encode(raw))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Short-lived bearer token. Never logged, never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchanges client credentials for an application access token.
#[derive(Clone)]
pub struct Authenticator {
    http: reqwest::Client,
    token_url: String,
}

impl Authenticator {
    /// Create an authenticator whose requests give up after `timeout`.
    pub fn new(token_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed building OAuth HTTP client")?;

        Ok(Self {
            http,
            token_url: token_url.into(),
        })
    }

    /// Request a fresh token. No caching and no retries.
    pub async fn obtain_token(&self, credentials: &Credentials) -> Result<AccessToken, TrackerError> {
        tracing::debug!(url = %self.token_url, "Requesting OAuth token");

        let response = self
            .http
            .post(&self.token_url)
            .header(reqwest::header::AUTHORIZATION, credentials.basic_auth_header())
            .form(&[
                ("grant_type", "client_credentials"),
                ("scope", OAUTH_SCOPE),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    tracing::error!("OAuth request timed out");
                    TrackerError::Auth("timed out".to_string())
                } else {
                    tracing::error!(error = %e, "OAuth request failed");
                    TrackerError::Auth(e.to_string())
                }
            })?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "OAuth response received");

        if status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::error!("OAuth rejected client credentials");
            return Err(TrackerError::Auth("invalid credentials".to_string()));
        }
        if status != reqwest::StatusCode::OK {
            tracing::error!(status = status.as_u16(), "OAuth token request failed");
            return Err(TrackerError::Auth(format!(
                "auth failed, status={}",
                status.as_u16()
            )));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| TrackerError::Auth(format!("malformed token response: {}", e)))?;

        tracing::info!("OAuth token acquired");
        Ok(AccessToken(body.access_token))
    }
}
