// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - the change-detection engine.

pub mod auth;
pub mod cursor_store;
pub mod diff;
pub mod normalize;
pub mod poller;
pub mod search;

pub use auth::{AccessToken, Authenticator, Credentials};
pub use cursor_store::{CursorStore, CursorStoreError};
pub use diff::diff;
pub use normalize::normalize;
pub use poller::ListingPoller;
pub use search::{SearchClient, SearchFilter};
