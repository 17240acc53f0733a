//! Startup wiring from configuration to a settings handle

use crate::config::Config;
use crate::domain::{ConfigSettings, SettingsHandle};
use crate::infra::storage::YamlFileStore;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Build the process-wide settings handle
///
/// Without a configured `path` the handle is absent and every setting reads
/// as its zero value.
pub fn open_settings(config: &Config) -> Result<SettingsHandle> {
    let Some(path) = config.path.as_deref() else {
        tracing::info!("No settings store configured, settings are absent");
        return Ok(SettingsHandle::Absent);
    };

    let store = YamlFileStore::open(path, config.section.as_str())
        .with_context(|| format!("opening settings store at {}", path.display()))?;
    let settings = ConfigSettings::with_config(Arc::new(store), config);

    tracing::info!(
        "Settings initialized from {} (section '{}')",
        path.display(),
        config.section
    );
    Ok(SettingsHandle::bound(settings))
}
