//! Settings Adapter
//!
//! Typed, schema-less settings on top of a named configuration store.
//! Values are written under string keys without a schema and read back
//! through typed getters that coerce whatever was stored.

// Public exports
pub mod contract;
pub use contract::{
    Bucket, ConversionError, Settings, SettingsError, SettingsExt, Value, ValueKind,
};

pub mod config;
pub use config::Config;

pub mod domain;
pub use domain::{ConfigSettings, ConfigStore, NoOpSettings, SettingsHandle};

pub mod infra;
pub use infra::storage::{InMemoryStore, StoreError, YamlFileStore};

pub mod module;
pub use module::open_settings;
