//! Typed settings capability
//!
//! Application code programs against [`Settings`] and never needs to know
//! whether a configuration store is bound: an absent store behaves like an
//! always-empty one.

use super::error::SettingsError;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Typed, schema-less settings accessor
///
/// Setters are fire-and-forget with respect to durability. Getters coerce
/// whatever was stored into the requested type and return the type's zero
/// value for keys that were never written.
pub trait Settings: Send + Sync {
    /// Whether writes reach a configuration store
    fn is_bound(&self) -> bool;

    /// Store a string under `key`
    fn set_string(&self, key: &str, value: &str);

    /// Store an integer under `key`
    fn set_int(&self, key: &str, value: i64);

    /// Store a float under `key`
    fn set_float(&self, key: &str, value: f64);

    /// Store a timestamp under `key`
    fn set_time(&self, key: &str, value: DateTime<Utc>);

    /// Store a boolean under `key`
    fn set_bool(&self, key: &str, value: bool);

    /// Store an already-built JSON document under `key` as its string form
    fn set_json_value(&self, key: &str, value: &serde_json::Value);

    /// Read `key` rendered as a string
    fn string(&self, key: &str) -> Result<String, SettingsError>;

    /// Read `key` coerced to an integer
    fn int(&self, key: &str) -> Result<i64, SettingsError>;

    /// Read `key` coerced to a float
    fn float(&self, key: &str) -> Result<f64, SettingsError>;

    /// Read `key` coerced to a UTC timestamp
    fn time(&self, key: &str) -> Result<DateTime<Utc>, SettingsError>;

    /// Read `key` coerced to a boolean
    fn bool(&self, key: &str) -> Result<bool, SettingsError>;
}

/// Generic JSON helpers available on every [`Settings`] implementation,
/// including `dyn Settings`
pub trait SettingsExt: Settings {
    /// Serialize `value` and store it under `key`
    ///
    /// Fails only when `value` cannot be represented as JSON (for example a
    /// map with non-string keys). Unbound handles accept anything.
    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), SettingsError> {
        if !self.is_bound() {
            return Ok(());
        }
        let json = serde_json::to_value(value).map_err(|source| SettingsError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.set_json_value(key, &json);
        Ok(())
    }

    /// Parse the string stored under `key` into `dest`
    ///
    /// An empty or absent value leaves `dest` untouched and succeeds.
    /// `dest` is only assigned after a successful parse.
    fn json<T: DeserializeOwned>(&self, key: &str, dest: &mut T) -> Result<(), SettingsError> {
        let raw = self.string(key)?;
        if raw.is_empty() {
            return Ok(());
        }
        *dest = serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
            key: key.to_string(),
            source,
        })?;
        Ok(())
    }
}

impl<S: Settings + ?Sized> SettingsExt for S {}
