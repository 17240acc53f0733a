//! Store-backed settings adapter

use super::coercion;
use super::repository::ConfigStore;
use crate::config::Config;
use crate::contract::{Settings, SettingsError, Value};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::Span;

/// Settings adapter over a [`ConfigStore`]
///
/// Every write reads the whole bucket, replaces one key and hands the bucket
/// back to the store. Persistence failures are logged inside the adapter's
/// span and never returned; the store keeps the new value in memory. A store
/// that cannot be read makes setters drop the write (logged) and getters
/// return `SettingsError::Store`.
pub struct ConfigSettings {
    store: Arc<dyn ConfigStore>,
    span: Span,
    /// Serializes read-modify-write cycles when `Config::serialize_writes` is set
    write_lock: Option<Mutex<()>>,
}

impl ConfigSettings {
    /// Create an adapter with default configuration
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self::with_config(store, &Config::default())
    }

    pub fn with_config(store: Arc<dyn ConfigStore>, config: &Config) -> Self {
        Self {
            store,
            span: tracing::info_span!("settings"),
            write_lock: config.serialize_writes.then(|| Mutex::new(())),
        }
    }

    /// Log through `span` instead of the default `settings` span
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    fn get(&self, key: &str) -> Result<Option<Value>, SettingsError> {
        let mut bucket = self
            .store
            .named()
            .map_err(|e| SettingsError::store(key, e))?;
        Ok(bucket.remove(key))
    }

    fn set(&self, key: &str, value: Value) {
        let _guard = self.write_lock.as_ref().map(|lock| lock.lock());
        let _entered = self.span.enter();

        let mut bucket = match self.store.named() {
            Ok(bucket) => bucket,
            Err(e) => {
                tracing::error!("Failed to read settings, dropping write of '{}': {:#}", key, e);
                return;
            }
        };

        tracing::debug!(key, kind = %value.kind(), "Updating setting");
        bucket.insert(key.to_string(), value);

        if let Err(e) = self.store.update(bucket) {
            tracing::error!("Failed to persist settings after writing '{}': {:#}", key, e);
        }
    }
}

impl Settings for ConfigSettings {
    fn is_bound(&self) -> bool {
        true
    }

    fn set_string(&self, key: &str, value: &str) {
        self.set(key, Value::from(value));
    }

    fn set_int(&self, key: &str, value: i64) {
        self.set(key, Value::Int(value));
    }

    fn set_float(&self, key: &str, value: f64) {
        self.set(key, Value::Float(value));
    }

    fn set_time(&self, key: &str, value: DateTime<Utc>) {
        self.set(key, Value::Time(value));
    }

    fn set_bool(&self, key: &str, value: bool) {
        self.set(key, Value::Bool(value));
    }

    fn set_json_value(&self, key: &str, value: &serde_json::Value) {
        self.set(key, Value::String(value.to_string()));
    }

    fn string(&self, key: &str) -> Result<String, SettingsError> {
        Ok(coercion::to_string(self.get(key)?.as_ref()))
    }

    fn int(&self, key: &str) -> Result<i64, SettingsError> {
        coercion::to_int(self.get(key)?.as_ref()).map_err(|e| SettingsError::conversion(key, e))
    }

    fn float(&self, key: &str) -> Result<f64, SettingsError> {
        coercion::to_float(self.get(key)?.as_ref()).map_err(|e| SettingsError::conversion(key, e))
    }

    fn time(&self, key: &str) -> Result<DateTime<Utc>, SettingsError> {
        coercion::to_time(self.get(key)?.as_ref()).map_err(|e| SettingsError::conversion(key, e))
    }

    fn bool(&self, key: &str) -> Result<bool, SettingsError> {
        coercion::to_bool(self.get(key)?.as_ref()).map_err(|e| SettingsError::conversion(key, e))
    }
}
