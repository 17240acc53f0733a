//! Storage layer - configuration stores owning the settings bucket

pub mod memory;
pub mod yaml;

pub use memory::InMemoryStore;
pub use yaml::{StoreError, YamlFileStore};
