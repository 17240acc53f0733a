//! Domain layer - coercion rules and the store-backed adapter

pub mod coercion;
pub mod handle;
pub mod repository;
pub mod service;

pub use handle::{NoOpSettings, SettingsHandle};
pub use repository::ConfigStore;
pub use service::ConfigSettings;
