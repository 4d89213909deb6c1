// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time parsing and formatting.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse an upstream ISO-8601 timestamp such as `2025-03-01T10:15:00.000Z`.
pub fn parse_upstream_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value.trim()).ok()
}

/// Calendar-date portion of an upstream date-time, or `None` if empty.
pub fn date_portion(value: &str) -> Option<String> {
    let date = value.split('T').next().unwrap_or_default().trim();
    if date.is_empty() {
        None
    } else {
        Some(date.to_string())
    }
}
