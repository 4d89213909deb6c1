//! Persisted "last seen" marker.

use serde::{Deserialize, Serialize};

/// Newest item already reported for one marketplace scope.
///
/// Fields are optional on load; the diff engine treats a cursor without a
/// usable id or creation date as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    #[serde(default)]
    pub item_id: Option<String>,
    /// Upstream creation date of the item (ISO 8601)
    #[serde(default)]
    pub item_creation_date: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    /// When the cursor was written (RFC 3339, UTC)
    #[serde(default)]
    pub saved_at: Option<String>,
}
