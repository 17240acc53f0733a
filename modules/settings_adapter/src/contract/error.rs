//! Contract error types for the settings adapter
//!
//! Read-path failures (conversion, parse, an unreadable store) and invalid
//! JSON input reach callers. Persistence failures stay inside the adapter
//! and are logged.

use super::model::ValueKind;
use thiserror::Error;

/// A stored value could not be coerced into the requested kind
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unable to cast {value:?} of kind {from} to {to}")]
pub struct ConversionError {
    /// Rendering of the stored value
    pub value: String,
    /// Kind the value was stored as
    pub from: ValueKind,
    /// Kind the caller asked for
    pub to: ValueKind,
}

/// Errors returned by settings getters and `set_json`
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Stored value has an incompatible kind or unparsable content
    #[error("setting '{key}': {source}")]
    Conversion {
        key: String,
        #[source]
        source: ConversionError,
    },

    /// Stored string is not valid JSON for the destination
    #[error("setting '{key}' holds invalid JSON: {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configuration store could not hand out the bucket
    #[error("setting '{key}' could not be read from the store: {source}")]
    Store {
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// Value passed to `set_json` cannot be represented as JSON
    #[error("setting '{key}' cannot be serialized as JSON: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SettingsError {
    pub(crate) fn conversion(key: &str, source: ConversionError) -> Self {
        Self::Conversion {
            key: key.to_string(),
            source,
        }
    }

    pub(crate) fn store(key: &str, source: anyhow::Error) -> Self {
        Self::Store {
            key: key.to_string(),
            source: source.into(),
        }
    }

    /// Key the failing operation was called with
    pub fn key(&self) -> &str {
        match self {
            Self::Conversion { key, .. }
            | Self::Parse { key, .. }
            | Self::Store { key, .. }
            | Self::Serialize { key, .. } => key,
        }
    }
}
