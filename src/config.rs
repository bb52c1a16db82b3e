use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants;
use crate::utils::{Clock, FixedClock, SystemClock};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagerConfig {
    /// Version of the packaged component
    pub component_version: String,
    /// Version written into `package require -exact qsys`
    pub quartus_version: String,
    /// Packaging tool version recorded in the vendor extensions
    pub xilinx_version: String,
    pub supported_families: Vec<SupportedFamily>,
    pub taxonomies: Vec<String>,
    /// Pins the revision timestamp; the wall clock is used when unset
    pub revision_time: Option<DateTime<Utc>>,
}

impl Default for PackagerConfig {
    fn default() -> Self {
        Self {
            component_version: constants::DEFAULT_COMPONENT_VERSION.to_string(),
            quartus_version: constants::DEFAULT_QUARTUS_VERSION.to_string(),
            xilinx_version: constants::DEFAULT_XILINX_VERSION.to_string(),
            supported_families: ["zynq", "artix7", "kintex7", "virtex7"]
                .iter()
                .map(|f| SupportedFamily::production(f))
                .collect(),
            taxonomies: vec!["/BaseIP".to_string()],
            revision_time: None,
        }
    }
}

impl PackagerConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {:?}", path))?;
        serde_json::from_str(&content)
            .context(format!("Failed to parse config file: {:?}", path))
    }

    pub fn with_revision_time(mut self, time: DateTime<Utc>) -> Self {
        self.revision_time = Some(time);
        self
    }

    pub fn clock(&self) -> Box<dyn Clock> {
        match self.revision_time {
            Some(t) => Box::new(FixedClock(t)),
            None => Box::new(SystemClock),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedFamily {
    pub family: String,
    pub life_cycle: String,
}

impl SupportedFamily {
    pub fn production(family: &str) -> Self {
        Self {
            family: family.to_string(),
            life_cycle: "Production".to_string(),
        }
    }
}
