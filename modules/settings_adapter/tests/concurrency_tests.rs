//! Concurrent writers sharing one adapter
//!
//! Every write is a read-modify-write over the whole bucket. With serialized
//! writes two writers on different keys both land; without it the second
//! writer can overwrite the first one's key with a stale snapshot.

use settings_adapter::{Config, ConfigSettings, ConfigStore, Settings};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

mod common;
use common::{LockstepStore, SlowStore};

fn unserialized() -> Config {
    Config {
        serialize_writes: false,
        ..Config::default()
    }
}

#[test]
fn test_serialized_writers_keep_both_keys() {
    let store = Arc::new(SlowStore::new(Duration::from_millis(20)));
    let settings = ConfigSettings::new(store.clone());

    thread::scope(|s| {
        s.spawn(|| settings.set_string("a", "first"));
        s.spawn(|| settings.set_string("b", "second"));
    });

    let bucket = store.named().unwrap();
    assert_eq!(bucket.len(), 2);
    assert_eq!(settings.string("a").unwrap(), "first");
    assert_eq!(settings.string("b").unwrap(), "second");
}

#[test]
fn test_serialized_writers_many_keys() {
    let store = Arc::new(SlowStore::new(Duration::from_millis(1)));
    let settings = ConfigSettings::new(store);

    thread::scope(|s| {
        for worker in 0..8 {
            let settings = &settings;
            s.spawn(move || {
                for i in 0..5 {
                    settings.set_int(&format!("w{worker}.k{i}"), i);
                }
            });
        }
    });

    for worker in 0..8 {
        for i in 0..5 {
            assert_eq!(settings.int(&format!("w{worker}.k{i}")).unwrap(), i);
        }
    }
}

/// Both writers snapshot the empty bucket before either writes back, so
/// the later write drops the earlier key. This is the known lost update of
/// unsynchronized read-modify-write.
#[test]
fn test_unserialized_writers_lose_an_update() {
    let store = Arc::new(LockstepStore::new(2));
    let settings = ConfigSettings::with_config(store.clone(), &unserialized());

    thread::scope(|s| {
        s.spawn(|| settings.set_string("a", "first"));
        s.spawn(|| settings.set_string("b", "second"));
    });

    let bucket = store.named().unwrap();
    assert_eq!(bucket.len(), 1);
    assert!(bucket.contains_key("a") ^ bucket.contains_key("b"));
}

#[test]
fn test_unserialized_single_writer_is_unaffected() {
    let store = Arc::new(SlowStore::new(Duration::from_millis(1)));
    let settings = ConfigSettings::with_config(store, &unserialized());

    settings.set_string("a", "first");
    settings.set_string("b", "second");

    assert_eq!(settings.string("a").unwrap(), "first");
    assert_eq!(settings.string("b").unwrap(), "second");
}
