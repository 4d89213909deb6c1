// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Listing-Tracker: report newly created marketplace listings
//!
//! This crate polls the newest-first eBay Browse search feed and returns
//! only the listings created since the previous poll, tracked by a small
//! per-marketplace cursor file.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;

pub use error::TrackerError;
pub use models::NormalizedListing;
pub use services::ListingPoller;
