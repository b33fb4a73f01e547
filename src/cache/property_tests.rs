//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache against a simple FIFO model.

use futures::executor::block_on;
use proptest::prelude::*;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use crate::cache::folder_cache::tests::{folders, FetchLog};
use crate::cache::{ElasticFolderCache, ManualClock};
use crate::config::CacheConfig;
use crate::source::FolderId;

// == Helpers ==
fn cache(max_cache_size: usize, max_age_secs: u64) -> ElasticFolderCache {
    let config = CacheConfig::new(max_cache_size, max_age_secs).unwrap();
    ElasticFolderCache::with_clock(config, Arc::new(ManualClock::new(0))).unwrap()
}

// == Strategies ==
/// Small key space so sequences revisit keys
fn key_strategy() -> impl Strategy<Value = FolderId> {
    0u64..20
}

fn descendants_strategy() -> impl Strategy<Value = Vec<FolderId>> {
    prop::collection::vec(100u64..1_000, 0..10)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Capacity: for any lookup sequence the store never holds more than
    // max_cache_size entries.
    #[test]
    fn prop_capacity_enforcement(
        max_cache_size in 1usize..8,
        keys in prop::collection::vec(key_strategy(), 1..100)
    ) {
        let cache = cache(max_cache_size, 60);
        let log = FetchLog::default();
        log.install(&cache, |_, _| folders(&[1]));

        for key in keys {
            block_on(cache.subfolders_of(key)).unwrap();
            prop_assert!(
                cache.len().unwrap() <= max_cache_size,
                "Cache size {} exceeds max {}",
                cache.len().unwrap(),
                max_cache_size
            );
        }
    }

    // FIFO model: the fetch function is called exactly when a key is absent
    // from an insertion-ordered queue of at most max_cache_size keys. Hits do
    // not reorder the queue.
    #[test]
    fn prop_fetches_match_fifo_model(
        max_cache_size in 1usize..6,
        keys in prop::collection::vec(key_strategy(), 1..100)
    ) {
        let cache = cache(max_cache_size, 60);
        let log = FetchLog::default();
        log.install(&cache, |_, _| folders(&[]));

        let mut model: VecDeque<FolderId> = VecDeque::new();
        let mut expected_fetches: Vec<FolderId> = Vec::new();

        for key in keys {
            if !model.contains(&key) {
                while model.len() >= max_cache_size {
                    model.pop_front();
                }
                model.push_back(key);
                expected_fetches.push(key);
            }
            block_on(cache.subfolders_of(key)).unwrap();
        }

        prop_assert_eq!(log.args(), expected_fetches);
        prop_assert_eq!(cache.len().unwrap(), model.len());
    }

    // Result shape: a successful lookup contains the parent id and every id
    // the fetch function reported.
    #[test]
    fn prop_result_contains_parent_and_descendants(
        parent_id in key_strategy(),
        descendants in descendants_strategy()
    ) {
        let cache = cache(30, 60);
        let log = FetchLog::default();
        let reported = descendants.clone();
        log.install(&cache, move |_, _| folders(&reported));

        let ids = block_on(cache.subfolders_of(parent_id)).unwrap();
        let ids: HashSet<FolderId> = ids.iter().copied().collect();

        prop_assert!(ids.contains(&parent_id));
        for id in descendants {
            prop_assert!(ids.contains(&id), "Missing descendant {}", id);
        }
    }

    // Hit avoids refetch: repeated lookups inside the freshness window share
    // one fetch and one value.
    #[test]
    fn prop_repeat_lookup_hits(
        parent_id in key_strategy(),
        repeats in 2usize..10
    ) {
        let cache = cache(30, 60);
        let log = FetchLog::default();
        log.install(&cache, |_, _| folders(&[1]));

        let first = block_on(cache.subfolders_of(parent_id)).unwrap();
        for _ in 1..repeats {
            let again = block_on(cache.subfolders_of(parent_id)).unwrap();
            prop_assert!(Arc::ptr_eq(&first, &again));
        }
        prop_assert_eq!(log.count(), 1);
        prop_assert_eq!(cache.stats().unwrap().hits, repeats as u64 - 1);
    }
}
