//! In-memory configuration store

use crate::contract::Bucket;
use crate::domain::repository::ConfigStore;
use anyhow::Result;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Configuration store held entirely in memory
///
/// Failures can be injected with [`fail_updates`](InMemoryStore::fail_updates):
/// the bucket is still replaced, only the persistence report fails.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    bucket: RwLock<Bucket>,
    fail_updates: AtomicBool,
    updates: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `bucket` as the current contents
    pub fn with_bucket(bucket: Bucket) -> Self {
        Self {
            bucket: RwLock::new(bucket),
            ..Self::default()
        }
    }

    /// Make subsequent updates report a persistence failure
    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }

    /// Number of update calls received, failed ones included
    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

impl ConfigStore for InMemoryStore {
    fn named(&self) -> Result<Bucket> {
        Ok(self.bucket.read().clone())
    }

    fn update(&self, bucket: Bucket) -> Result<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        *self.bucket.write() = bucket;

        if self.fail_updates.load(Ordering::SeqCst) {
            anyhow::bail!("in-memory store configured to fail persistence");
        }
        Ok(())
    }
}
