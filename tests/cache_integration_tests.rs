//! Integration tests for the public cache API
//!
//! Exercises the full `TtlCache` surface: reads, writes, batches, the size
//! bound, expiration, the background sweeper, and the close lifecycle.

use std::collections::HashMap;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use ttl_cache::{CacheConfig, TtlCache};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

fn unbounded() -> TtlCache<String, i32> {
    TtlCache::new(CacheConfig::new())
}

fn bounded(max_size: usize) -> TtlCache<String, i32> {
    TtlCache::new(CacheConfig::new().with_max_size(max_size))
}

// == Reads & Writes ==

#[tokio::test]
async fn missing_key_reads_as_absent() {
    let cache = unbounded();

    assert_eq!(cache.get(&"nope".to_string()).await, None);
    assert_eq!(cache.get_safe(&"nope".to_string()).await, None);
    assert_eq!(cache.get_value(&"nope".to_string()).await, 0);
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn set_then_get_roundtrip() {
    let cache = unbounded();

    cache.set("key1".to_string(), 1).await;
    cache.set("key2".to_string(), 2).await;
    cache.set("key3".to_string(), 3).await;

    assert_eq!(cache.len().await, 3);
    assert_eq!(cache.get(&"key1".to_string()).await, Some(1));
    assert_eq!(cache.get_safe(&"key1".to_string()).await, Some(1));
    assert_eq!(cache.get_value(&"key1".to_string()).await, 1);
}

#[tokio::test]
async fn set_all_inserts_the_whole_batch() {
    let cache = unbounded();

    cache
        .set_all(HashMap::from([
            ("k1".to_string(), 1),
            ("k2".to_string(), 2),
            ("k3".to_string(), 3),
        ]))
        .await;

    assert_eq!(cache.len().await, 3);
    assert_eq!(cache.get(&"k2".to_string()).await, Some(2));
}

#[tokio::test]
async fn remove_and_clear_are_idempotent() {
    let cache = unbounded();

    cache.set("key1".to_string(), 1).await;

    cache.remove(&"key1".to_string()).await;
    assert_eq!(cache.len().await, 0);
    cache.remove(&"key1".to_string()).await;
    assert_eq!(cache.len().await, 0);

    cache.set("key2".to_string(), 2).await;
    cache.clear().await;
    assert_eq!(cache.len().await, 0);
    cache.clear().await;
    assert_eq!(cache.len().await, 0);
}

// == Expiration ==

#[tokio::test]
async fn expiration_is_visible_to_get_safe_but_not_get() {
    let cache = unbounded();

    cache
        .set_with_ttl("key1".to_string(), 1, Some(Duration::from_millis(50)))
        .await;

    assert_eq!(cache.get(&"key1".to_string()).await, Some(1));
    assert_eq!(cache.get_safe(&"key1".to_string()).await, Some(1));

    tokio::time::sleep(Duration::from_millis(100)).await;

    // The stale entry is still stored until swept
    assert_eq!(cache.get(&"key1".to_string()).await, Some(1));
    assert_eq!(cache.get_safe(&"key1".to_string()).await, None);
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn zero_ttl_means_never_expires() {
    let cache = unbounded();

    cache
        .set_with_ttl("forever".to_string(), 1, Some(Duration::ZERO))
        .await;
    cache.set_with_ttl("also_forever".to_string(), 2, None).await;

    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(cache.get_safe(&"forever".to_string()).await, Some(1));
    assert_eq!(cache.get_safe(&"also_forever".to_string()).await, Some(2));
}

#[tokio::test]
async fn clean_expired_removes_only_stale_entries() {
    let cache = unbounded();

    cache
        .set_with_ttl("stale".to_string(), 1, Some(Duration::from_millis(100)))
        .await;
    cache.set("fresh1".to_string(), 2).await;
    cache.set("fresh2".to_string(), 3).await;

    tokio::time::sleep(Duration::from_millis(150)).await;
    cache.clean_expired().await;

    assert_eq!(cache.len().await, 2);
    assert_eq!(cache.get(&"stale".to_string()).await, None);
}

#[tokio::test]
async fn background_sweeper_evicts_expired_entries() {
    init_tracing();

    let cache: TtlCache<String, i32> = TtlCache::new(
        CacheConfig::new()
            .with_default_ttl(Duration::from_millis(30))
            .with_cleanup_interval(Duration::from_millis(40)),
    );

    cache.set("key1".to_string(), 1).await;
    cache
        .set_with_ttl("key2".to_string(), 2, Some(Duration::from_secs(60)))
        .await;

    tokio::time::sleep(Duration::from_millis(150)).await;

    // key1 was swept without any manual clean_expired call
    assert_eq!(cache.len().await, 1);
    assert_eq!(cache.get(&"key1".to_string()).await, None);
    assert_eq!(cache.get(&"key2".to_string()).await, Some(2));

    cache.close().await;
}

// == Size Bound ==

#[tokio::test]
async fn size_cap_keeps_one_of_the_written_keys() {
    let cache = bounded(1);

    cache.set("a".to_string(), 1).await;
    cache.set("b".to_string(), 2).await;
    cache.set("c".to_string(), 3).await;

    assert_eq!(cache.len().await, 1);

    // Exactly one of the written keys survives; which one is unspecified
    let mut found = 0;
    for key in ["a", "b", "c"] {
        if cache.get(&key.to_string()).await.is_some() {
            found += 1;
        }
    }
    assert_eq!(found, 1);
}

#[tokio::test]
async fn oversized_batch_replaces_the_store() {
    let cache = bounded(1);

    cache.set("a".to_string(), 1).await;
    cache
        .set_all(HashMap::from([
            ("d".to_string(), 4),
            ("e".to_string(), 5),
            ("f".to_string(), 6),
        ]))
        .await;

    // A batch larger than the cap is stored in full
    assert_eq!(cache.len().await, 3);
    for key in ["d", "e", "f"] {
        assert!(cache.get(&key.to_string()).await.is_some());
    }
}

#[tokio::test]
async fn replacing_a_key_never_evicts() {
    let cache = bounded(2);

    cache.set("a".to_string(), 1).await;
    cache.set("b".to_string(), 2).await;
    cache.set("a".to_string(), 10).await;

    assert_eq!(cache.len().await, 2);
    assert_eq!(cache.get(&"a".to_string()).await, Some(10));
    assert_eq!(cache.get(&"b".to_string()).await, Some(2));
}

// == Concurrency ==

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn batch_insert_is_atomic_for_readers() {
    let cache: TtlCache<String, i32> = TtlCache::new(CacheConfig::new());

    for i in 0..10 {
        cache.set(format!("pre{i}"), i).await;
    }

    let batch: HashMap<String, i32> = (0..100).map(|i| (format!("batch{i}"), i)).collect();

    let reader = {
        let cache = cache.clone();
        tokio::spawn(async move {
            let mut observed = Vec::with_capacity(500);
            for _ in 0..500 {
                observed.push(cache.len().await);
            }
            observed
        })
    };

    cache.set_all_with_ttl(batch, Some(Duration::from_secs(60))).await;

    for size in reader.await.unwrap() {
        assert!(
            size == 10 || size == 110,
            "reader observed a partially applied batch: {size}"
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writers_respect_the_size_cap() {
    let cache = bounded(8);

    let mut handles = Vec::new();
    for w in 0..4 {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            for i in 0..50 {
                cache.set(format!("w{w}-{i}"), i).await;
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    assert!(cache.len().await <= 8);
}

// == Lifecycle ==

#[tokio::test]
async fn close_twice_is_safe_and_empties_the_cache() {
    let cache: TtlCache<String, i32> = TtlCache::new(
        CacheConfig::new().with_cleanup_interval(Duration::from_millis(10)),
    );

    cache.set("key1".to_string(), 1).await;

    cache.close().await;
    assert_eq!(cache.len().await, 0);

    cache.close().await;
    assert_eq!(cache.len().await, 0);
}

#[tokio::test]
async fn cache_is_usable_after_close() {
    let cache = unbounded();

    cache.set("key1".to_string(), 1).await;
    cache.close().await;

    cache.set("key2".to_string(), 2).await;
    assert_eq!(cache.get(&"key2".to_string()).await, Some(2));
    assert_eq!(cache.get(&"key1".to_string()).await, None);
}

#[tokio::test]
async fn dropping_every_handle_is_allowed_with_a_running_sweeper() {
    // No close() call at all; the sweeper must not keep the cache alive or
    // panic once the handles are gone
    let cache: TtlCache<String, i32> = TtlCache::new(
        CacheConfig::new().with_cleanup_interval(Duration::from_millis(10)),
    );
    cache.set("key1".to_string(), 1).await;
    drop(cache);

    tokio::time::sleep(Duration::from_millis(50)).await;
}
