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

//! Request and response bodies shared across API versions.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::gateway::{DeprecationPhase, RouteMappingConfig};

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status of the server
    pub status: String,
    /// Current server timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Response listing available API versions
#[derive(Serialize, ToSchema)]
pub struct ApiVersionsResponse {
    /// List of available API versions
    pub versions: Vec<String>,
    /// The current/latest API version
    pub current: String,
}

/// Active deprecation phase and the mapping table in evaluation order
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GatewayRoutesResponse {
    pub phase: DeprecationPhase,
    pub mappings: Vec<RouteMappingConfig>,
}

/// Model selection request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelSelectionRequest {
    /// Free-form task description, e.g. "rectification"
    pub task_type: String,
    /// Expected prompt tokens, used for the cost estimate
    #[serde(default)]
    pub input_tokens: Option<u64>,
    /// Expected completion tokens, used for the cost estimate
    #[serde(default)]
    pub output_tokens: Option<u64>,
}

/// Model selection result
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelSelectionResponse {
    pub task_type: String,
    pub model: String,
    /// Whether the preferred model was unavailable
    pub fallback_used: bool,
    /// Present when token counts were supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost_usd: Option<f64>,
}
