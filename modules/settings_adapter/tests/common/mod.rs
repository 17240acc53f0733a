//! Common test stores and helpers

#![allow(dead_code)]

use parking_lot::Mutex;
use settings_adapter::{Bucket, ConfigSettings, ConfigStore, InMemoryStore};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::time::Duration;

/// In-memory store with an adapter bound to it
pub fn memory_settings() -> (Arc<InMemoryStore>, ConfigSettings) {
    let store = Arc::new(InMemoryStore::new());
    let settings = ConfigSettings::new(store.clone());
    (store, settings)
}

/// Store whose first `writers` reads wait for each other after taking their
/// snapshot, so every writer starts from the same bucket
pub struct LockstepStore {
    inner: InMemoryStore,
    barrier: Barrier,
    remaining: AtomicUsize,
}

impl LockstepStore {
    pub fn new(writers: usize) -> Self {
        Self {
            inner: InMemoryStore::new(),
            barrier: Barrier::new(writers),
            remaining: AtomicUsize::new(writers),
        }
    }
}

impl ConfigStore for LockstepStore {
    fn named(&self) -> anyhow::Result<Bucket> {
        let snapshot = self.inner.named()?;
        let in_lockstep = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if in_lockstep {
            self.barrier.wait();
        }
        Ok(snapshot)
    }

    fn update(&self, bucket: Bucket) -> anyhow::Result<()> {
        self.inner.update(bucket)
    }
}

/// Store that sleeps between handing out a snapshot and returning
pub struct SlowStore {
    inner: InMemoryStore,
    delay: Duration,
}

impl SlowStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: InMemoryStore::new(),
            delay,
        }
    }
}

impl ConfigStore for SlowStore {
    fn named(&self) -> anyhow::Result<Bucket> {
        let snapshot = self.inner.named()?;
        std::thread::sleep(self.delay);
        Ok(snapshot)
    }

    fn update(&self, bucket: Bucket) -> anyhow::Result<()> {
        self.inner.update(bucket)
    }
}

/// Store whose reads always fail
pub struct UnreadableStore;

impl ConfigStore for UnreadableStore {
    fn named(&self) -> anyhow::Result<Bucket> {
        anyhow::bail!("config record unavailable")
    }

    fn update(&self, _bucket: Bucket) -> anyhow::Result<()> {
        anyhow::bail!("config record unavailable")
    }
}

/// Log sink collecting formatted tracing output
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with tracing output captured at debug level
pub fn with_captured_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs.contents())
}
