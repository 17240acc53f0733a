//! Contract layer - public API for settings consumers
//!
//! This layer contains the stored value model, the typed capability trait
//! and the errors it reports.

pub mod client;
pub mod error;
pub mod model;

pub use client::{Settings, SettingsExt};
pub use error::{ConversionError, SettingsError};
pub use model::{Bucket, Value, ValueKind};
