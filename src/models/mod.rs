// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the tracker.

pub mod cursor;
pub mod listing;

pub use cursor::Cursor;
pub use listing::{Amount, Delivery, Image, NormalizedListing, RawListing, ShippingOption};
