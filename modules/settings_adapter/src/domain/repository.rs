//! Collaborator trait for the named-configuration store
//!
//! Implementations live in infra/storage.

use crate::contract::Bucket;
use anyhow::Result;

/// Store that owns the settings bucket
///
/// The adapter performs read-modify-write cycles over the whole bucket:
/// [`named`](ConfigStore::named) returns a snapshot, the adapter changes one
/// key, [`update`](ConfigStore::update) hands the full bucket back.
pub trait ConfigStore: Send + Sync {
    /// Current contents of the bucket
    fn named(&self) -> Result<Bucket>;

    /// Replace the bucket and persist it
    ///
    /// The new contents must be visible to later [`named`](ConfigStore::named)
    /// calls even when persisting fails; the error only reports that the
    /// change did not reach durable storage.
    fn update(&self, bucket: Bucket) -> Result<()>;
}
