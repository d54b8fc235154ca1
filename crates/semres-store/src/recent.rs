//! Bounded, most-recent-first list of past lookups.
//!
//! The list is read from storage once when the cache is loaded and written
//! back in full after every mutation. Unreadable or malformed stored data is
//! logged and replaced by an empty list; it never reaches the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::storage::SearchStorage;

/// Storage key the recent-search list is persisted under.
pub const RECENT_SEARCHES_KEY: &str = "recentSearches";

/// Maximum number of entries retained.
pub const MAX_RECENT_SEARCHES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentSearchEntry {
    #[serde(rename = "regdNo")]
    pub registration_number: String,
    /// Translated label, e.g. `"Semester-III"`.
    #[serde(rename = "semester")]
    pub semester_label: String,
    #[serde(rename = "searchedAt", default, skip_serializing_if = "Option::is_none")]
    pub searched_at: Option<DateTime<Utc>>,
}

impl RecentSearchEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(registration_number: impl Into<String>, semester_label: impl Into<String>) -> Self {
        Self {
            registration_number: registration_number.into(),
            semester_label: semester_label.into(),
            searched_at: Some(Utc::now()),
        }
    }

    /// Two entries describe the same lookup when registration number and
    /// semester label match. The timestamp is ignored.
    #[must_use]
    pub fn same_lookup(&self, other: &Self) -> bool {
        self.registration_number == other.registration_number
            && self.semester_label == other.semester_label
    }
}

/// Recent lookups backed by a [`SearchStorage`].
pub struct RecentSearchCache<S> {
    storage: S,
    entries: Vec<RecentSearchEntry>,
}

impl<S: SearchStorage> RecentSearchCache<S> {
    /// Loads the persisted list, falling back to an empty one.
    pub fn load(storage: S) -> Self {
        let mut entries = match read_entries(&storage) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable recent searches");
                Vec::new()
            }
        };
        entries.truncate(MAX_RECENT_SEARCHES);
        Self { storage, entries }
    }

    /// Moves `entry` to the front, dropping any earlier entry for the same
    /// lookup and anything past [`MAX_RECENT_SEARCHES`], then persists.
    pub fn record(&mut self, entry: RecentSearchEntry) {
        self.entries.retain(|existing| !existing.same_lookup(&entry));
        self.entries.insert(0, entry);
        self.entries.truncate(MAX_RECENT_SEARCHES);
        self.persist();
    }

    /// Entries, most recent first.
    #[must_use]
    pub fn all(&self) -> &[RecentSearchEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    // Write failures leave the in-memory list authoritative for this session.
    fn persist(&mut self) {
        let json = match serde_json::to_string(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize recent searches");
                return;
            }
        };
        if let Err(e) = self.storage.write(RECENT_SEARCHES_KEY, &json) {
            tracing::warn!(error = %e, "failed to persist recent searches");
        }
    }
}

fn read_entries<S: SearchStorage>(storage: &S) -> Result<Vec<RecentSearchEntry>, StoreError> {
    match storage.read(RECENT_SEARCHES_KEY)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Vec::new()),
    }
}
