//! Optional settings capability
//!
//! Callers that may run without a configuration store hold a
//! [`SettingsHandle`]. An absent handle behaves like an always-empty store:
//! writes are dropped and reads return zero values without error.

use super::service::ConfigSettings;
use crate::contract::{Settings, SettingsError};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// No-op settings for when no configuration store is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpSettings;

impl Settings for NoOpSettings {
    fn is_bound(&self) -> bool {
        false
    }

    fn set_string(&self, _key: &str, _value: &str) {}

    fn set_int(&self, _key: &str, _value: i64) {}

    fn set_float(&self, _key: &str, _value: f64) {}

    fn set_time(&self, _key: &str, _value: DateTime<Utc>) {}

    fn set_bool(&self, _key: &str, _value: bool) {}

    fn set_json_value(&self, _key: &str, _value: &serde_json::Value) {}

    fn string(&self, _key: &str) -> Result<String, SettingsError> {
        Ok(String::new())
    }

    fn int(&self, _key: &str) -> Result<i64, SettingsError> {
        Ok(0)
    }

    fn float(&self, _key: &str) -> Result<f64, SettingsError> {
        Ok(0.0)
    }

    fn time(&self, _key: &str) -> Result<DateTime<Utc>, SettingsError> {
        Ok(DateTime::<Utc>::default())
    }

    fn bool(&self, _key: &str) -> Result<bool, SettingsError> {
        Ok(false)
    }
}

/// Settings handle that is either bound to a store or absent
#[derive(Clone, Default)]
pub enum SettingsHandle {
    Bound(Arc<ConfigSettings>),
    #[default]
    Absent,
}

impl SettingsHandle {
    pub fn bound(settings: ConfigSettings) -> Self {
        Self::Bound(Arc::new(settings))
    }

    fn inner(&self) -> &dyn Settings {
        match self {
            Self::Bound(settings) => settings.as_ref(),
            Self::Absent => &NoOpSettings,
        }
    }
}

impl From<ConfigSettings> for SettingsHandle {
    fn from(settings: ConfigSettings) -> Self {
        Self::bound(settings)
    }
}

impl From<Option<Arc<ConfigSettings>>> for SettingsHandle {
    fn from(settings: Option<Arc<ConfigSettings>>) -> Self {
        settings.map_or(Self::Absent, Self::Bound)
    }
}

impl std::fmt::Debug for SettingsHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bound(_) => f.write_str("SettingsHandle::Bound"),
            Self::Absent => f.write_str("SettingsHandle::Absent"),
        }
    }
}

impl Settings for SettingsHandle {
    fn is_bound(&self) -> bool {
        self.inner().is_bound()
    }

    fn set_string(&self, key: &str, value: &str) {
        self.inner().set_string(key, value);
    }

    fn set_int(&self, key: &str, value: i64) {
        self.inner().set_int(key, value);
    }

    fn set_float(&self, key: &str, value: f64) {
        self.inner().set_float(key, value);
    }

    fn set_time(&self, key: &str, value: DateTime<Utc>) {
        self.inner().set_time(key, value);
    }

    fn set_bool(&self, key: &str, value: bool) {
        self.inner().set_bool(key, value);
    }

    fn set_json_value(&self, key: &str, value: &serde_json::Value) {
        self.inner().set_json_value(key, value);
    }

    fn string(&self, key: &str) -> Result<String, SettingsError> {
        self.inner().string(key)
    }

    fn int(&self, key: &str) -> Result<i64, SettingsError> {
        self.inner().int(key)
    }

    fn float(&self, key: &str) -> Result<f64, SettingsError> {
        self.inner().float(key)
    }

    fn time(&self, key: &str) -> Result<DateTime<Utc>, SettingsError> {
        self.inner().time(key)
    }

    fn bool(&self, key: &str) -> Result<bool, SettingsError> {
        self.inner().bool(key)
    }
}
