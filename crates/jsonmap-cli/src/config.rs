//! Application configuration loaded from an optional JSON file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use jsonmap_gateway::GatewayConfig;
use jsonmap_map::{FanOutPolicy, MapperOptions};

/// Everything the CLI can be configured with.
///
/// Missing sections and fields fall back to their defaults, so `{}` is a
/// valid configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub mapper: MapperOptions,
    pub gateway: GatewayConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("parse config {}", path.display()))?;
        Ok(config)
    }

    /// Load `path` when given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Flags given on the command line win over file values.
    #[must_use]
    pub fn with_overrides(
        mut self,
        fan_out: Option<FanOutPolicy>,
        endpoint: Option<&str>,
        timeout_secs: Option<u64>,
    ) -> Self {
        if let Some(policy) = fan_out {
            self.mapper.fan_out = policy;
        }
        if let Some(endpoint) = endpoint {
            self.gateway.endpoint = endpoint.to_string();
        }
        if let Some(secs) = timeout_secs {
            self.gateway.timeout_secs = secs;
        }
        self
    }
}
