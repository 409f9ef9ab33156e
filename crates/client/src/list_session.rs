//! Session-scoped list cache: save, restore, revalidate.
//!
//! A list view saves a [`ListSnapshot`] under a fixed key before
//! navigating into a detail or form view. Coming back it calls
//! [`ListSession::restore`], which picks one of three paths:
//!
//! - submit-and-return (the form flagged a successful mutation):
//!   refetch pages `0..=saved page` sequentially so the mutated row is
//!   present, then scroll to `selected_id`;
//! - plain back-navigation with a live cache: repaint from the cached
//!   rows immediately, then [`ListSession::revalidate`] in the
//!   background;
//! - no usable cache (absent, expired, or corrupt): fresh page-0 load.
//!
//! Snapshots older than [`LIST_STATE_TTL`] and entries that fail to
//! deserialize are treated as absent and removed.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use srdesk_core::list_state::{
    check_freshness, CacheCheck, ListSnapshot, LIST_STATE_TTL,
};
use srdesk_core::types::{Identified, Page};

use crate::error::ClientResult;

// ----------------------------------------------------------------------------
// Storage
// ----------------------------------------------------------------------------

/// String key-value store scoped to one user session.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn put(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

impl<S: SessionStore + ?Sized> SessionStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: String) {
        (**self).put(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// Default in-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("store lock poisoned")
            .get(key)
            .cloned()
    }

    fn put(&self, key: &str, value: String) {
        self.entries
            .lock()
            .expect("store lock poisoned")
            .insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .expect("store lock poisoned")
            .remove(key);
    }
}

// ----------------------------------------------------------------------------
// Session
// ----------------------------------------------------------------------------

/// Suffix of the key carrying the submit-and-return flag.
const SUBMITTED_SUFFIX: &str = ":submitted";

/// Cache manager for one list view, identified by its storage key.
pub struct ListSession<S: SessionStore> {
    store: S,
    key: String,
    ttl: Duration,
}

/// How a list view was restored.
#[derive(Debug)]
pub enum Restored<T, F> {
    /// Submit-and-return: pages refetched sequentially up to the saved
    /// page; scroll to `selected_id` rather than the saved offset.
    Reloaded(ListSnapshot<T, F>),
    /// Cached rows for an immediate repaint at `scroll_y`; follow up
    /// with [`ListSession::revalidate`].
    Cached(ListSnapshot<T, F>),
    /// No usable cache; fresh page-0 result.
    Fresh(ListSnapshot<T, F>),
}

/// Outcome of a background revalidation.
#[derive(Debug)]
pub enum Revalidation<T, F> {
    /// The fresh page 0 matches the cache; nothing to repaint.
    Unchanged,
    /// The collection drifted; repaint from this page-0 snapshot.
    Replaced(ListSnapshot<T, F>),
}

impl<S: SessionStore> ListSession<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            ttl: LIST_STATE_TTL,
        }
    }

    /// Override the snapshot TTL (defaults to [`LIST_STATE_TTL`]).
    pub fn with_ttl(store: S, key: impl Into<String>, ttl: Duration) -> Self {
        Self {
            store,
            key: key.into(),
            ttl,
        }
    }

    /// Persist a snapshot. Call right before navigating away.
    pub fn save<T: Serialize, F: Serialize>(&self, snapshot: &ListSnapshot<T, F>) {
        match serde_json::to_string(snapshot) {
            Ok(json) => self.store.put(&self.key, json),
            Err(e) => tracing::error!(error = %e, key = %self.key, "Failed to serialize list snapshot"),
        }
    }

    /// Load the cached snapshot if it is present, parseable, and within
    /// TTL; otherwise remove the entry and return `None`.
    pub fn load<T, F>(&self) -> Option<ListSnapshot<T, F>>
    where
        T: DeserializeOwned,
        F: DeserializeOwned,
    {
        let raw = self.store.get(&self.key)?;
        match serde_json::from_str::<ListSnapshot<T, F>>(&raw) {
            Ok(snapshot) if snapshot.is_stale(Utc::now(), self.ttl) => {
                tracing::debug!(key = %self.key, "Cached list state expired");
                self.store.remove(&self.key);
                None
            }
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!(error = %e, key = %self.key, "Corrupt list cache entry, discarding");
                self.store.remove(&self.key);
                None
            }
        }
    }

    pub fn clear(&self) {
        self.store.remove(&self.key);
    }

    /// Record that a create/edit form under this list was submitted;
    /// the next restore refetches instead of trusting the cache.
    pub fn mark_submitted(&self) {
        self.store
            .put(&format!("{}{SUBMITTED_SUFFIX}", self.key), "1".to_string());
    }

    fn take_submitted(&self) -> bool {
        let key = format!("{}{SUBMITTED_SUFFIX}", self.key);
        let flagged = self.store.get(&key).is_some();
        if flagged {
            self.store.remove(&key);
        }
        flagged
    }

    /// Restore the list view. `fetch` loads one page for a filter;
    /// `default_filter` applies when there is nothing cached.
    pub async fn restore<T, F, Fetch, Fut>(
        &self,
        default_filter: F,
        fetch: Fetch,
    ) -> ClientResult<Restored<T, F>>
    where
        T: Identified + Serialize + DeserializeOwned,
        F: Clone + Serialize + DeserializeOwned,
        Fetch: Fn(i64, F) -> Fut,
        Fut: Future<Output = ClientResult<Page<T>>>,
    {
        let submitted = self.take_submitted();
        let cached = self.load::<T, F>();

        if submitted {
            let (target_page, selected_id, filter) = match &cached {
                Some(snap) => (snap.page, snap.selected_id, snap.filter.clone()),
                None => (0, None, default_filter),
            };
            // The mutated row may sit on any loaded page, so rebuild
            // the whole accumulated window in order.
            let mut items = Vec::new();
            let mut total_elements = 0;
            let mut has_more = false;
            for page_index in 0..=target_page {
                let page = fetch(page_index, filter.clone()).await?;
                total_elements = page.total_elements;
                has_more = page.has_more();
                items.extend(page.content);
            }
            self.clear();
            tracing::debug!(
                key = %self.key,
                pages = target_page + 1,
                rows = items.len(),
                "Reloaded list after submit",
            );
            return Ok(Restored::Reloaded(ListSnapshot {
                items,
                page: target_page,
                total_elements,
                has_more,
                filter,
                scroll_y: 0.0,
                selected_id,
                saved_at: Utc::now(),
            }));
        }

        if let Some(snapshot) = cached {
            return Ok(Restored::Cached(snapshot));
        }

        let page = fetch(0, default_filter.clone()).await?;
        Ok(Restored::Fresh(snapshot_from_page(page, default_filter)))
    }

    /// Background freshness check for a cache-restored view. Compares
    /// a fresh page 0 against the cached totals; on drift the cache is
    /// dropped and a page-0 snapshot is returned for repaint.
    pub async fn revalidate<T, F, Fetch, Fut>(
        &self,
        current: &ListSnapshot<T, F>,
        fetch: Fetch,
    ) -> ClientResult<Revalidation<T, F>>
    where
        T: Identified + Serialize + DeserializeOwned,
        F: Clone + Serialize + DeserializeOwned,
        Fetch: Fn(i64, F) -> Fut,
        Fut: Future<Output = ClientResult<Page<T>>>,
    {
        let fresh = fetch(0, current.filter.clone()).await?;
        match check_freshness(current.total_elements, current.first_id(), &fresh) {
            CacheCheck::Unchanged => Ok(Revalidation::Unchanged),
            CacheCheck::Drift => {
                tracing::debug!(key = %self.key, "List drifted behind cache, replacing");
                self.clear();
                Ok(Revalidation::Replaced(snapshot_from_page(
                    fresh,
                    current.filter.clone(),
                )))
            }
        }
    }
}

fn snapshot_from_page<T, F>(page: Page<T>, filter: F) -> ListSnapshot<T, F> {
    ListSnapshot {
        page: page.number,
        total_elements: page.total_elements,
        has_more: page.has_more(),
        items: page.content,
        filter,
        scroll_y: 0.0,
        selected_id: None,
        saved_at: Utc::now(),
    }
}

// ----------------------------------------------------------------------------
// Fetch gate
// ----------------------------------------------------------------------------

/// Re-entrancy guard for infinite-scroll loads: while one fetch is in
/// flight, further scroll triggers are dropped instead of queued.
#[derive(Debug, Default)]
pub struct FetchGate {
    busy: AtomicBool,
}

impl FetchGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate. Returns `None` when a fetch is already running.
    pub fn try_acquire(&self) -> Option<FetchGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FetchGuard { gate: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Releases the gate on drop.
pub struct FetchGuard<'a> {
    gate: &'a FetchGate,
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_rejects_reentry_until_released() {
        let gate = FetchGate::new();
        let guard = gate.try_acquire().unwrap();
        assert!(gate.is_busy());
        assert!(gate.try_acquire().is_none());
        drop(guard);
        assert!(!gate.is_busy());
        assert!(gate.try_acquire().is_some());
    }

    #[test]
    fn submitted_flag_is_consumed_once() {
        let session: ListSession<MemoryStore> =
            ListSession::new(MemoryStore::default(), "sr-list");
        session.mark_submitted();
        assert!(session.take_submitted());
        assert!(!session.take_submitted());
    }

    #[test]
    fn corrupt_entry_is_removed_on_load() {
        let store = MemoryStore::default();
        store.put("sr-list", "{not json".to_string());
        let session = ListSession::new(store, "sr-list");
        let loaded: Option<ListSnapshot<serde_json::Value, ()>> = session.load();
        assert!(loaded.is_none());
        // entry gone, second load sees plain absence
        let loaded: Option<ListSnapshot<serde_json::Value, ()>> = session.load();
        assert!(loaded.is_none());
    }
}
