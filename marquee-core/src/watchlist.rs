//! The persisted "watched" list.

use std::sync::Arc;

use marquee_model::{MovieId, WatchedItem, WatchedSummary, validate_user_rating};
use tracing::{debug, warn};

use crate::error::{PersistenceError, WatchlistError};
use crate::persistence::{PersistentStore, WATCHED_KEY};

/// Ordered, duplicate-free list of watched movies mirrored to a
/// [`PersistentStore`].
///
/// The in-memory copy is authoritative. Every successful mutation is followed
/// by a wholesale rewrite of the stored blob before the method returns.
#[derive(Debug)]
pub struct WatchedCollection {
    items: Vec<WatchedItem>,
    store: Arc<dyn PersistentStore>,
    revision: u64,
}

impl WatchedCollection {
    /// Load the collection from `store`.
    ///
    /// A missing, unreadable or undecodable blob yields an empty collection.
    pub fn hydrate(store: Arc<dyn PersistentStore>) -> Self {
        let items = match load_items(store.as_ref()) {
            Ok(Some(items)) => {
                debug!("Hydrated {} watched items", items.len());
                items
            }
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!("Discarding stored watched list: {}", err);
                Vec::new()
            }
        };

        Self {
            items: dedupe(drop_invalid(items)),
            store,
            revision: 0,
        }
    }

    /// Append `item`, rejecting ids that are already present.
    pub fn add(&mut self, item: WatchedItem) -> Result<(), WatchlistError> {
        if self.contains(&item.id) {
            return Err(WatchlistError::Duplicate(item.id));
        }
        self.items.push(item);
        self.persist();
        Ok(())
    }

    /// Remove the entry for `id`. Returns `false` when nothing matched.
    pub fn remove(&mut self, id: &MovieId) -> bool {
        let Some(index) = self.items.iter().position(|item| &item.id == id)
        else {
            return false;
        };
        self.items.remove(index);
        self.persist();
        true
    }

    pub fn summary(&self) -> WatchedSummary {
        WatchedSummary::from_items(&self.items)
    }

    pub fn contains(&self, id: &MovieId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &MovieId) -> Option<&WatchedItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// The rating the user gave `id`, if it has been watched.
    pub fn user_rating(&self, id: &MovieId) -> Option<f32> {
        self.get(id).map(|item| item.user_rating)
    }

    pub fn items(&self) -> &[WatchedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of successful writes to the store since hydration.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn persist(&mut self) {
        match save_items(self.store.as_ref(), &self.items) {
            Ok(()) => {
                self.revision += 1;
                debug!(
                    revision = self.revision,
                    "Persisted {} watched items",
                    self.items.len()
                );
            }
            // In-memory state stays authoritative; the next mutation
            // rewrites the whole list.
            Err(err) => warn!("Failed to persist watched list: {}", err),
        }
    }
}

fn load_items(
    store: &dyn PersistentStore,
) -> Result<Option<Vec<WatchedItem>>, PersistenceError> {
    match store.read(WATCHED_KEY)? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

fn save_items(
    store: &dyn PersistentStore,
    items: &[WatchedItem],
) -> Result<(), PersistenceError> {
    let bytes = serde_json::to_vec(items)?;
    store.write(WATCHED_KEY, &bytes)
}

/// Discard entries whose rating falls outside the accepted range.
fn drop_invalid(items: Vec<WatchedItem>) -> Vec<WatchedItem> {
    items
        .into_iter()
        .filter(|item| match validate_user_rating(item.user_rating) {
            Ok(_) => true,
            Err(err) => {
                warn!("Dropping stored watched entry {}: {}", item.id, err);
                false
            }
        })
        .collect()
}

/// Keep the first occurrence of each id from a hand-edited or legacy blob.
fn dedupe(items: Vec<WatchedItem>) -> Vec<WatchedItem> {
    let mut seen = std::collections::HashSet::new();
    let before = items.len();
    let items: Vec<_> = items
        .into_iter()
        .filter(|item| seen.insert(item.id.clone()))
        .collect();
    if items.len() != before {
        warn!(
            "Dropped {} duplicate watched entries while hydrating",
            before - items.len()
        );
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[derive(Debug, Default)]
    struct FailingStore;

    impl PersistentStore for FailingStore {
        fn read(&self, _key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
            Err(std::io::Error::other("disk on fire").into())
        }

        fn write(&self, _key: &str, _bytes: &[u8]) -> Result<(), PersistenceError> {
            Err(std::io::Error::other("disk on fire").into())
        }
    }

    fn item(id: &str, rating: f32, runtime: u32) -> WatchedItem {
        WatchedItem {
            id: MovieId::new(id).unwrap(),
            title: format!("Title {id}"),
            year: "2001".into(),
            poster_url: Some(format!("https://img.example/{id}.jpg")),
            user_rating: rating,
            runtime_minutes: runtime,
            catalog_rating: Some(7.5),
        }
    }

    fn stored_items(store: &MemoryStore) -> Vec<WatchedItem> {
        let bytes = store.get(WATCHED_KEY).expect("blob written");
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn duplicate_add_is_rejected_and_length_grows_once() {
        let store = Arc::new(MemoryStore::new());
        let mut watched = WatchedCollection::hydrate(store.clone());

        watched.add(item("tt1", 8.0, 100)).unwrap();
        let err = watched.add(item("tt1", 3.0, 90)).unwrap_err();

        assert_eq!(err, WatchlistError::Duplicate(MovieId::new("tt1").unwrap()));
        assert_eq!(watched.len(), 1);
        assert_eq!(watched.user_rating(&MovieId::new("tt1").unwrap()), Some(8.0));
        assert_eq!(stored_items(&store).len(), 1);
        assert_eq!(watched.revision(), 1);
    }

    #[test]
    fn removing_absent_id_is_a_no_op() {
        let store = Arc::new(MemoryStore::new());
        let mut watched = WatchedCollection::hydrate(store.clone());
        watched.add(item("tt1", 8.0, 100)).unwrap();

        assert!(!watched.remove(&MovieId::new("tt404").unwrap()));
        assert_eq!(watched.len(), 1);
        assert_eq!(watched.revision(), 1);
    }

    #[test]
    fn remove_persists_the_remaining_items() {
        let store = Arc::new(MemoryStore::new());
        let mut watched = WatchedCollection::hydrate(store.clone());
        watched.add(item("tt1", 8.0, 100)).unwrap();
        watched.add(item("tt2", 6.0, 120)).unwrap();

        assert!(watched.remove(&MovieId::new("tt1").unwrap()));
        let stored = stored_items(&store);
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id.as_str(), "tt2");
    }

    #[test]
    fn hydration_round_trips_order_and_values() {
        let store = Arc::new(MemoryStore::new());
        let mut original = WatchedCollection::hydrate(store.clone());
        for (id, rating, runtime) in [("tt3", 9.0, 150), ("tt1", 7.0, 95), ("tt2", 5.5, 110)] {
            original.add(item(id, rating, runtime)).unwrap();
        }

        let rehydrated = WatchedCollection::hydrate(store);
        assert_eq!(rehydrated.items(), original.items());
    }

    #[test]
    fn corrupt_blob_hydrates_empty() {
        let store = Arc::new(MemoryStore::with_entry(WATCHED_KEY, "{not json"));
        let watched = WatchedCollection::hydrate(store);
        assert!(watched.is_empty());

        let wrong_shape = Arc::new(MemoryStore::with_entry(WATCHED_KEY, r#"{"id":"tt1"}"#));
        assert!(WatchedCollection::hydrate(wrong_shape).is_empty());
    }

    #[test]
    fn duplicate_ids_in_blob_keep_first() {
        let items = vec![item("tt1", 8.0, 100), item("tt1", 2.0, 100), item("tt2", 5.0, 80)];
        let blob = serde_json::to_vec(&items).unwrap();
        let watched = WatchedCollection::hydrate(Arc::new(MemoryStore::with_entry(WATCHED_KEY, blob)));

        assert_eq!(watched.len(), 2);
        assert_eq!(watched.user_rating(&MovieId::new("tt1").unwrap()), Some(8.0));
    }

    #[test]
    fn store_failures_are_swallowed() {
        let mut watched = WatchedCollection::hydrate(Arc::new(FailingStore));
        assert!(watched.is_empty());

        watched.add(item("tt1", 8.0, 100)).unwrap();
        assert_eq!(watched.len(), 1);
        assert_eq!(watched.revision(), 0);
    }

    #[test]
    fn summary_of_empty_collection_is_zero() {
        let watched = WatchedCollection::hydrate(Arc::new(MemoryStore::new()));
        let summary = watched.summary();
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average_user_rating, 0.0);
        assert_eq!(summary.average_runtime_minutes, 0.0);
    }

    #[test]
    fn out_of_range_ratings_are_dropped_while_hydrating() {
        let blob = serde_json::to_vec(&vec![
            item("tt1", 55.0, 100),
            item("tt2", 7.0, 120),
            item("tt3", 0.0, 90),
        ])
        .unwrap();
        let watched = WatchedCollection::hydrate(Arc::new(MemoryStore::with_entry(WATCHED_KEY, blob)));

        assert_eq!(watched.len(), 1);
        assert_eq!(watched.user_rating(&MovieId::new("tt1").unwrap()), None);
        assert_eq!(watched.summary().average_user_rating, 7.0);
        assert_eq!(watched.summary().average_runtime_minutes, 120.0);
    }
}
