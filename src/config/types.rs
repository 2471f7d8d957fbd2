// Copyright 2025 The Rectifier Gateway Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Configuration types.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::ai::{ModelRouter, ModelRoutingConfig};
use crate::gateway::{
    default_mappings, DeprecationPhase, GatewayError, RouteMappingConfig, RouteMappingTable,
};

/// Log levels accepted in `logLevel`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Top-level server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub gateway: GatewaySettings,
    #[serde(default)]
    pub model_routing: ModelRoutingConfig,
}

impl Default for GatewayServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            gateway: GatewaySettings::default(),
            model_routing: ModelRoutingConfig::default(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Legacy path handling settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewaySettings {
    #[serde(default)]
    pub phase: DeprecationPhase,
    /// Evaluate the built-in mappings before `mappings`
    #[serde(default = "default_use_default_mappings")]
    pub use_default_mappings: bool,
    #[serde(default)]
    pub mappings: Vec<RouteMappingConfig>,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            phase: DeprecationPhase::default(),
            use_default_mappings: true,
            mappings: Vec::new(),
        }
    }
}

fn default_use_default_mappings() -> bool {
    true
}

impl GatewaySettings {
    /// The mappings in evaluation order.
    pub fn effective_mappings(&self) -> Vec<RouteMappingConfig> {
        let mut mappings = if self.use_default_mappings {
            default_mappings()
        } else {
            Vec::new()
        };
        mappings.extend(self.mappings.iter().cloned());
        mappings
    }

    pub fn build_table(&self) -> Result<RouteMappingTable, GatewayError> {
        RouteMappingTable::new(self.effective_mappings())
    }
}

impl GatewayServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(anyhow!("Invalid port: {} (cannot be 0)", self.port));
        }

        if self.host.trim().is_empty() {
            return Err(anyhow!("Host cannot be empty"));
        }

        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(anyhow!(
                "Invalid logLevel '{}'. Valid levels are: {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            ));
        }

        self.gateway.build_table()?;
        ModelRouter::new(self.model_routing.clone())?;
        Ok(())
    }
}
