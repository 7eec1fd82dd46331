use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;

use ovbind_core::error::{OvError, Result};
use ovbind_core::ParamValue;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    pub version: u32,

    #[serde(default)]
    pub engine: EngineSection,

    #[serde(default)]
    pub devices: Vec<DeviceConfig>,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(OvError::UnsupportedVersion);
        }
        if self.devices.is_empty() {
            return Err(OvError::InvalidConfig("devices must not be empty".into()));
        }

        self.engine.validate()?;

        let mut seen = HashSet::new();
        for d in &self.devices {
            d.validate(&self.engine)?;
            if !seen.insert(d.name.as_str()) {
                return Err(OvError::InvalidConfig(format!(
                    "duplicate device name: {}",
                    d.name
                )));
            }
        }
        Ok(())
    }

    pub fn device(&self, name: &str) -> Option<&DeviceConfig> {
        self.devices.iter().find(|d| d.name == name)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineSection {
    #[serde(default = "default_max_live_objects")]
    pub max_live_objects: usize,

    #[serde(default = "default_max_requests_per_network")]
    pub max_requests_per_network: usize,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            max_live_objects: default_max_live_objects(),
            max_requests_per_network: default_max_requests_per_network(),
        }
    }
}

impl EngineSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=1_000_000).contains(&self.max_live_objects) {
            return Err(OvError::InvalidConfig(
                "engine.max_live_objects must be between 1 and 1000000".into(),
            ));
        }
        if !(1..=4096).contains(&self.max_requests_per_network) {
            return Err(OvError::InvalidConfig(
                "engine.max_requests_per_network must be between 1 and 4096".into(),
            ));
        }
        Ok(())
    }
}

fn default_max_live_objects() -> usize {
    4096
}
fn default_max_requests_per_network() -> usize {
    64
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceConfig {
    pub name: String,

    #[serde(default = "default_optimal_infer_requests")]
    pub optimal_infer_requests: usize,

    /// Extra metrics reported by networks loaded on this device.
    #[serde(default)]
    pub metrics: BTreeMap<String, ParamValue>,
}

impl DeviceConfig {
    pub fn validate(&self, engine: &EngineSection) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(OvError::InvalidConfig("device name must not be empty".into()));
        }
        if !(1..=engine.max_requests_per_network).contains(&self.optimal_infer_requests) {
            return Err(OvError::InvalidConfig(format!(
                "devices[{}].optimal_infer_requests must be between 1 and engine.max_requests_per_network",
                self.name
            )));
        }
        if self.metrics.keys().any(|k| k.trim().is_empty()) {
            return Err(OvError::InvalidConfig(format!(
                "devices[{}].metrics has an empty name",
                self.name
            )));
        }
        Ok(())
    }
}

fn default_optimal_infer_requests() -> usize {
    1
}
