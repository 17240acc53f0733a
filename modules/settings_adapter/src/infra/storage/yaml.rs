//! YAML file-backed configuration store
//!
//! The file holds a configuration record of named sections. The store is
//! bound to one section, which holds the settings bucket; other sections are
//! kept as they are and written back untouched. Entries of the bound section
//! that are not scalars (nulls, lists, maps) are not settings: they are
//! hidden from the bucket and carried through every write.
//!
//! ```yaml
//! other:
//!   mode: pv
//!   limit: 16
//! site:
//!   title: Home
//!   meters: [grid, pv]
//! ```

use crate::contract::{Bucket, Value};
use crate::domain::repository::ConfigStore;
use parking_lot::RwLock;
use serde_yaml::Mapping;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

type Record = BTreeMap<String, serde_yaml::Value>;

/// Error type for file-backed store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file system I/O error occurred
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file content, or the settings section, is not valid YAML for the record
    #[error("failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The settings section exists but is not a mapping
    #[error("config section '{0}' is not a mapping")]
    InvalidSection(String),
}

/// Configuration store persisting the whole record to a YAML file
#[derive(Debug)]
pub struct YamlFileStore {
    path: PathBuf,
    section: String,
    record: RwLock<Record>,
}

impl YamlFileStore {
    /// Load the record at `path`; a missing or empty file is an empty record
    pub fn open(path: impl Into<PathBuf>, section: impl Into<String>) -> Result<Self, StoreError> {
        let path = path.into();
        let record = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => Record::new(),
            Ok(text) => serde_yaml::from_str(&text)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No config at {}, starting empty", path.display());
                Record::new()
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        Ok(Self {
            path,
            section: section.into(),
            record: RwLock::new(record),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    fn persist(&self, record: &Record) -> Result<(), StoreError> {
        let yaml = serde_yaml::to_string(record)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, yaml).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!("Wrote config to {}", self.path.display());
        Ok(())
    }

    /// Split the bound section into settings and entries that are not settings
    fn split_section(&self, record: &Record) -> Result<(Bucket, Mapping), StoreError> {
        let mut bucket = Bucket::new();
        let mut passthrough = Mapping::new();

        let entries = match record.get(&self.section) {
            None | Some(serde_yaml::Value::Null) => return Ok((bucket, passthrough)),
            Some(serde_yaml::Value::Mapping(entries)) => entries,
            Some(_) => return Err(StoreError::InvalidSection(self.section.clone())),
        };

        for (key, value) in entries {
            match (key.as_str(), serde_yaml::from_value::<Value>(value.clone())) {
                (Some(name), Ok(setting)) => {
                    bucket.insert(name.to_string(), setting);
                }
                _ => {
                    passthrough.insert(key.clone(), value.clone());
                }
            }
        }
        Ok((bucket, passthrough))
    }
}

impl ConfigStore for YamlFileStore {
    fn named(&self) -> anyhow::Result<Bucket> {
        let (bucket, _) = self.split_section(&self.record.read())?;
        Ok(bucket)
    }

    fn update(&self, bucket: Bucket) -> anyhow::Result<()> {
        let mut record = self.record.write();
        let (_, passthrough) = self.split_section(&record)?;

        // Sorted so the file diffs cleanly between writes
        let sorted: BTreeMap<&String, &Value> = bucket.iter().collect();
        let mut section = Mapping::new();
        for (key, value) in sorted {
            let value = serde_yaml::to_value(value).map_err(StoreError::from)?;
            section.insert(serde_yaml::Value::from(key.as_str()), value);
        }
        for (key, value) in passthrough {
            if !section.contains_key(&key) {
                section.insert(key, value);
            }
        }

        record.insert(self.section.clone(), serde_yaml::Value::Mapping(section));
        self.persist(&record)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = YamlFileStore::open(dir.path().join("absent.yaml"), "other").unwrap();
        assert!(store.named().unwrap().is_empty());
    }

    #[test]
    fn test_reads_existing_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "other:\n  mode: pv\n  limit: 16\n  ratio: 0.5\n  enabled: true\n").unwrap();

        let store = YamlFileStore::open(&path, "other").unwrap();
        let bucket = store.named().unwrap();
        assert_eq!(bucket.get("mode"), Some(&Value::from("pv")));
        assert_eq!(bucket.get("limit"), Some(&Value::Int(16)));
        assert_eq!(bucket.get("ratio"), Some(&Value::Float(0.5)));
        assert_eq!(bucket.get("enabled"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_non_scalar_entries_hidden_from_bucket() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "other:\n  mode: pv\n  note: ~\n  meters: [grid, pv]\n").unwrap();

        let store = YamlFileStore::open(&path, "other").unwrap();
        let bucket = store.named().unwrap();
        assert_eq!(bucket.len(), 1);
        assert_eq!(bucket.get("mode"), Some(&Value::from("pv")));
    }

    #[test]
    fn test_empty_section_is_empty_bucket() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "other:\n").unwrap();

        let store = YamlFileStore::open(&path, "other").unwrap();
        assert!(store.named().unwrap().is_empty());
    }

    #[test]
    fn test_scalar_section_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "other: 5\n").unwrap();

        let store = YamlFileStore::open(&path, "other").unwrap();
        let err = store.named().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::InvalidSection(section)) if section == "other"
        ));
    }

    #[test]
    fn test_invalid_yaml_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "other: [unclosed\n").unwrap();

        assert!(matches!(
            YamlFileStore::open(&path, "other"),
            Err(StoreError::Yaml(_))
        ));
    }
}
