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

//! Configuration management for the gateway.
//!
//! - Type-safe configuration structures
//! - Environment variable interpolation
//! - YAML and JSON file loading
//! - Unknown field detection and validation
//!
//! # Environment Variable Interpolation
//!
//! All config loading functions interpolate environment variables using
//! POSIX-style syntax:
//! - `${VAR_NAME}` - Required variable
//! - `${VAR_NAME:-default}` - Variable with default value
//!
//! Named capture references in mapping targets collide with this syntax and
//! must be written as `$${name}`.
//!
//! # Configuration File Example
//!
//! ```yaml
//! host: "${GATEWAY_HOST:-0.0.0.0}"
//! port: 8080
//! logLevel: info
//! gateway:
//!   phase: "${DEPRECATION_PHASE:-active-with-warning}"
//!   mappings:
//!     - pattern: "/v0/(?P<rest>.+)"
//!       target: "/api/v1/$${rest}"
//! ```

pub mod env_interpolation;
pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{from_json_str, from_yaml_str, load_config_file, save_config_file, ConfigError};
pub use types::{GatewayServerConfig, GatewaySettings, LOG_LEVELS};
