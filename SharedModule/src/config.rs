//! # Plugin Configuration
//!
//! Per-instance configuration persisted by the host. Only the fields this
//! plugin reads are modelled; everything else in the host's config is ignored.

use serde::{Serialize, Deserialize};
use std::path::Path;

use crate::error::{TrainsError, TrainsResult};
use crate::zone::ZoneConfig;

/// Instance-level config fields used by the train plugin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// `instance.name`
    #[serde(rename = "instance.name", default)]
    pub instance_name: String,

    /// `clusterio_trains.zones`
    #[serde(rename = "clusterio_trains.zones", default)]
    pub zones: ZoneConfig,
}

impl PluginConfig {
    /// Parse from a JSON document
    pub fn from_json_str(data: &str) -> TrainsResult<Self> {
        let config: PluginConfig = serde_json::from_str(data)
            .map_err(|e| TrainsError::Config(format!("failed to parse plugin config: {}", e)))?;
        config.check()?;
        Ok(config)
    }

    /// Load from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> TrainsResult<Self> {
        let path = path.as_ref();
        log::debug!("Loading plugin config from {}", path.display());
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Serialize to a pretty-printed JSON document
    pub fn to_json_string(&self) -> TrainsResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|source| TrainsError::Serialize { what: "plugin config", source })
    }

    /// Every zone must be stored under its own name
    fn check(&self) -> TrainsResult<()> {
        for (key, zone) in &self.zones {
            if key != &zone.name {
                return Err(TrainsError::Config(format!(
                    "zone stored under '{}' is named '{}'",
                    key, zone.name
                )));
            }
        }
        Ok(())
    }
}
