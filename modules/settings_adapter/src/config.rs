//! Configuration for the settings adapter

use serde::Deserialize;
use std::path::PathBuf;

/// Settings adapter configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Serialize read-modify-write cycles on the bucket.
    /// Turning this off restores unsynchronized writes, where concurrent
    /// setters may lose updates.
    #[serde(default = "default_true")]
    pub serialize_writes: bool,

    /// Section of the configuration record holding the settings bucket
    #[serde(default = "default_section")]
    pub section: String,

    /// YAML configuration file. Settings are absent when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            serialize_writes: true,
            section: default_section(),
            path: None,
        }
    }
}

impl Config {
    /// Parse configuration from a YAML document
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}

fn default_true() -> bool {
    true
}

fn default_section() -> String {
    "other".to_string()
}
