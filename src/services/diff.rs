// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! New-item detection against the stored cursor.
//!
//! The page must be sorted newest-first. The scan keeps the prefix of items
//! strictly newer than the cursor and stops at the cursor item itself or at
//! the first item that is not newer.

use crate::models::{Cursor, RawListing};
use crate::time_utils::parse_upstream_timestamp;

/// Return the items on `page` not yet reported, in page order.
pub fn diff(page: &[RawListing], cursor: Option<&Cursor>) -> Vec<RawListing> {
    let Some(cursor) = cursor else {
        tracing::info!(count = page.len(), "No cursor, treating whole page as new");
        return page.to_vec();
    };

    let (last_id, last_date) = match (
        cursor.item_id.as_deref(),
        cursor
            .item_creation_date
            .as_deref()
            .and_then(parse_upstream_timestamp),
    ) {
        (Some(id), Some(date)) => (id, date),
        _ => {
            tracing::warn!(
                item_id = ?cursor.item_id,
                item_creation_date = ?cursor.item_creation_date,
                "Cursor missing id or valid creation date, treating whole page as new"
            );
            return page.to_vec();
        }
    };

    let mut new_items = Vec::new();
    for item in page {
        let item_id = item.item_id.as_deref();
        // Identity before date, so the cursor item ends the scan even if its date is unreadable.
        if item_id == Some(last_id) {
            tracing::debug!(item_id = last_id, "Reached cursor item");
            break;
        }

        let Some(created) = item
            .item_creation_date
            .as_deref()
            .and_then(parse_upstream_timestamp)
        else {
            tracing::warn!(item_id = ?item_id, "Skipping item with invalid creation date");
            continue;
        };

        if created > last_date {
            tracing::debug!(item_id = ?item_id, "New item");
            new_items.push(item.clone());
        } else {
            tracing::debug!(item_id = ?item_id, "Item not newer than cursor, stopping");
            break;
        }
    }

    tracing::info!(count = new_items.len(), "Detected new listings");
    new_items
}
