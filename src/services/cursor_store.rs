// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-backed cursor for one marketplace scope.
//!
//! Layout: `{dir}/{marketplace}_last_seen.json`, written via a `.tmp`
//! sibling and rename so a crash leaves either the old or the new record.

use crate::models::{Cursor, RawListing};
use crate::time_utils::format_utc_rfc3339;
use chrono::Utc;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Cursor write failures. Reported by the poller, never fatal.
#[derive(Debug, thiserror::Error)]
pub enum CursorStoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Single-slot cursor store. Not locked; callers serialise access.
#[derive(Debug, Clone)]
pub struct CursorStore {
    path: PathBuf,
}

impl CursorStore {
    /// Store backed by an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store for `marketplace` under `dir`.
    pub fn for_marketplace(dir: impl AsRef<Path>, marketplace: &str) -> Self {
        let file = format!("{}_last_seen.json", marketplace.to_lowercase());
        Self::new(dir.as_ref().join(file))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cursor. Missing, unreadable or invalid content yields `None`.
    pub fn load(&self) -> Option<Cursor> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "No cursor file, starting fresh");
                return None;
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read cursor file");
                return None;
            }
        };

        match serde_json::from_slice::<Cursor>(&bytes) {
            Ok(cursor) => {
                tracing::info!(
                    item_id = cursor.item_id.as_deref().unwrap_or("Unknown"),
                    "Loaded cursor"
                );
                Some(cursor)
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Invalid cursor file, ignoring");
                None
            }
        }
    }

    /// Overwrite the cursor with `item`, stamping `saved_at` with now.
    pub fn save(&self, item: &RawListing) -> Result<Cursor, CursorStoreError> {
        let cursor = Cursor {
            item_id: item.item_id.clone(),
            item_creation_date: item.item_creation_date.clone(),
            title: item.title.clone(),
            saved_at: Some(format_utc_rfc3339(Utc::now())),
        };

        let bytes = serde_json::to_vec_pretty(&cursor)?;
        self.write_atomic(&bytes)?;

        tracing::info!(
            item_id = cursor.item_id.as_deref().unwrap_or("Unknown"),
            "Saved cursor"
        );
        Ok(cursor)
    }

    fn write_atomic(&self, bytes: &[u8]) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp, &self.path)
    }
}
