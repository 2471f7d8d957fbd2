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

//! Configuration loading with environment variable interpolation.

use super::env_interpolation;
use super::types::GatewayServerConfig;
use super::validation;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Unified error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Environment variable interpolation failed: {0}")]
    InterpolationError(#[from] env_interpolation::InterpolationError),

    #[error("Failed to parse config file '{path}': YAML error: {yaml_err}, JSON error: {json_err}")]
    ParseError {
        path: String,
        yaml_err: String,
        json_err: String,
    },

    #[error("Invalid configuration fields: {0}")]
    FieldValidation(#[from] validation::ValidationError),

    #[error("Validation error: {0}")]
    ValidationError(#[from] anyhow::Error),
}

/// Deserialize YAML after interpolating environment variables.
///
/// ```
/// use rectifier_gateway::config::from_yaml_str;
/// use serde::Deserialize;
/// use std::env;
///
/// #[derive(Deserialize)]
/// struct Listen {
///     port: u16,
/// }
///
/// env::set_var("DOC_GATEWAY_PORT", "9000");
/// let listen: Listen = from_yaml_str("port: ${DOC_GATEWAY_PORT}").unwrap();
/// assert_eq!(listen.port, 9000);
/// ```
pub fn from_yaml_str<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    let interpolated = env_interpolation::interpolate(s)?;
    Ok(serde_yaml::from_str(&interpolated)?)
}

/// Deserialize JSON after interpolating environment variables.
pub fn from_json_str<T: DeserializeOwned>(s: &str) -> Result<T, ConfigError> {
    let interpolated = env_interpolation::interpolate(s)?;
    Ok(serde_json::from_str(&interpolated)?)
}

/// Load a [`GatewayServerConfig`] from a YAML or JSON file.
///
/// The file is interpolated, parsed as YAML (falling back to JSON), checked
/// for unknown fields and finally validated. Validation compiles the mapping
/// table, so a config that loads here will also start.
///
/// ```no_run
/// use rectifier_gateway::config::load_config_file;
///
/// let config = load_config_file("config/gateway.yaml").unwrap();
/// println!("Phase: {}", config.gateway.phase);
/// ```
pub fn load_config_file<P: AsRef<Path>>(path: P) -> Result<GatewayServerConfig, ConfigError> {
    let path_ref = path.as_ref();
    let content = fs::read_to_string(path_ref)?;

    let interpolated = env_interpolation::interpolate(&content)?;

    // JSON is a subset of YAML 1.2, but serde_yaml rejects some JSON inputs
    let value = match serde_yaml::from_str::<serde_yaml::Value>(&interpolated) {
        Ok(value) => value,
        Err(yaml_err) => match serde_json::from_str::<serde_yaml::Value>(&interpolated) {
            Ok(value) => value,
            Err(json_err) => {
                return Err(ConfigError::ParseError {
                    path: path_ref.display().to_string(),
                    yaml_err: yaml_err.to_string(),
                    json_err: json_err.to_string(),
                });
            }
        },
    };

    validation::validate_config(&value)?;

    // An empty file is a config with every default
    let config: GatewayServerConfig = if value.is_null() {
        GatewayServerConfig::default()
    } else {
        serde_yaml::from_value(value)?
    };

    config.validate()?;

    Ok(config)
}

/// Save a [`GatewayServerConfig`] as YAML.
///
/// Interpolated values are written, not the `${...}` references they came from.
pub fn save_config_file<P: AsRef<Path>>(
    config: &GatewayServerConfig,
    path: P,
) -> Result<(), ConfigError> {
    let content = serde_yaml::to_string(config)?;
    Ok(fs::write(path, content)?)
}
