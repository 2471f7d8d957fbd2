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

//! API version definitions.
//!
//! The canonical path space of the service is `/api/<version>/...`. Route
//! mapping targets must live under the current version's prefix.

use std::fmt;

/// The version every legacy path is rewritten into.
pub const API_CURRENT_VERSION: ApiVersion = ApiVersion::V1;

/// Available API versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    V1,
}

impl ApiVersion {
    /// URL path prefix for this version, without trailing slash.
    pub fn path_prefix(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "/api/v1",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVersion::V1 => "v1",
        }
    }

    pub fn all() -> &'static [ApiVersion] {
        &[ApiVersion::V1]
    }

    pub fn all_strings() -> Vec<String> {
        Self::all().iter().map(|v| v.as_str().to_string()).collect()
    }

    /// Whether `path` is the version root or lies beneath it.
    ///
    /// `/api/v1` and `/api/v1/health` are owned by V1; `/api/v10/health`
    /// and `/api/health` are not.
    pub fn owns_path(&self, path: &str) -> bool {
        match path.strip_prefix(self.path_prefix()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing an [`ApiVersion`].
#[derive(Debug, thiserror::Error)]
#[error("Unknown API version: {0}")]
pub struct UnknownApiVersion(pub String);

impl std::str::FromStr for ApiVersion {
    type Err = UnknownApiVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "v1" | "1" => Ok(ApiVersion::V1),
            _ => Err(UnknownApiVersion(s.to_string())),
        }
    }
}
