//! Cached list-view state and its freshness rules.
//!
//! List views persist their accumulated pages, filters, and scroll
//! offset into a session store so a navigate-away/back cycle repaints
//! without refetching. Staleness is bounded two ways: a hard TTL on
//! the snapshot, and a background page-0 revalidation comparing total
//! count and first-row identity. The storage substrate and the async
//! restore flow live in `srdesk-client`; this module holds the data
//! model and the pure predicates.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Identified, Page, Timestamp};

/// Maximum age of a cached snapshot before it is treated as absent.
pub const LIST_STATE_TTL: Duration = Duration::from_secs(5 * 60);

/// Everything a list view needs to repaint where it left off.
///
/// `items` holds the accumulated rows of pages `0..=page` (the views
/// use infinite scroll, so pages append rather than replace).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSnapshot<T, F> {
    pub items: Vec<T>,
    /// Highest page index loaded so far.
    pub page: i64,
    pub total_elements: i64,
    pub has_more: bool,
    pub filter: F,
    /// Vertical scroll offset at capture time.
    pub scroll_y: f64,
    /// Row to scroll into view after a submit-and-return flow.
    pub selected_id: Option<DbId>,
    pub saved_at: Timestamp,
}

impl<T, F> ListSnapshot<T, F> {
    /// Whether the snapshot is older than `ttl` as of `now`.
    pub fn is_stale(&self, now: Timestamp, ttl: Duration) -> bool {
        let age = now.signed_duration_since(self.saved_at);
        age > chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX)
    }

    /// Identity of the first cached row, if any.
    pub fn first_id(&self) -> Option<DbId>
    where
        T: Identified,
    {
        self.items.first().map(Identified::id)
    }
}

/// Result of comparing a cached snapshot against a fresh page-0 fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheCheck {
    /// Counts and first-row identity match; leave the cache standing.
    Unchanged,
    /// The collection changed underneath the cache; replace and
    /// invalidate.
    Drift,
}

/// Compare cached totals/first-id against a freshly fetched page 0.
///
/// This is optimistic revalidation, not a correctness guarantee:
/// mutations deeper in the list that preserve both the count and the
/// first row go undetected until the next cycle.
pub fn check_freshness<T: Identified>(
    cached_total: i64,
    cached_first_id: Option<DbId>,
    fresh: &Page<T>,
) -> CacheCheck {
    if fresh.total_elements != cached_total {
        return CacheCheck::Drift;
    }
    if fresh.content.first().map(Identified::id) != cached_first_id {
        return CacheCheck::Drift;
    }
    CacheCheck::Unchanged
}
