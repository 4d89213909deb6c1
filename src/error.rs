// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types surfaced by a poll.
//!
//! Only two kinds escape the engine. Local cursor problems are logged and
//! degrade to "no cursor" instead of failing the poll.

/// Errors returned from the authenticate/search stages of a poll.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    /// Credential or token problem: initial OAuth exchange failed, or the
    /// search endpoint rejected the bearer token.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Transport failure or non-auth HTTP failure on the search call.
    #[error("API error: {0}")]
    Api(String),
}

impl TrackerError {
    /// Message used when the search endpoint rejects the bearer token.
    pub const TOKEN_REJECTED: &'static str = "token expired or invalid";

    /// True for credential/token failures.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, TrackerError::Auth(_))
    }

    /// True when the search endpoint rejected an otherwise freshly issued
    /// token. Callers may re-authenticate and retry exactly once.
    pub fn is_token_rejected(&self) -> bool {
        matches!(self, TrackerError::Auth(msg) if msg == Self::TOKEN_REJECTED)
    }
}

/// Result type alias for poll stages.
pub type Result<T> = std::result::Result<T, TrackerError>;
