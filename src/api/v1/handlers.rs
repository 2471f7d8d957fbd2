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

//! API v1 handler functions with OpenAPI documentation.
//!
//! These wrap the shared handler implementations with v1 path annotations.

use axum::{extract::Extension, http::StatusCode, Json};
use std::sync::Arc;

use crate::ai::ModelRouter;
use crate::api::shared::handlers as shared;
use crate::api::shared::{
    ApiVersionsResponse, ErrorResponse, GatewayRoutesResponse, HealthResponse,
    ModelSelectionRequest, ModelSelectionResponse,
};
use crate::gateway::Gateway;

/// List available API versions
#[utoipa::path(
    get,
    path = "/api/versions",
    responses(
        (status = 200, description = "List of available API versions", body = ApiVersionsResponse),
    ),
    tag = "API"
)]
pub async fn list_api_versions() -> Json<ApiVersionsResponse> {
    shared::list_api_versions().await
}

/// Check server health
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Server is healthy", body = HealthResponse),
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    shared::health_check().await
}

/// Show the active deprecation phase and legacy route mappings
#[utoipa::path(
    get,
    path = "/api/v1/gateway/routes",
    responses(
        (status = 200, description = "Active phase and mapping table", body = GatewayRoutesResponse),
    ),
    tag = "Gateway"
)]
pub async fn list_gateway_routes(
    gateway: Extension<Arc<Gateway>>,
) -> Json<GatewayRoutesResponse> {
    shared::list_gateway_routes(gateway).await
}

/// Select a language model for a task
#[utoipa::path(
    post,
    path = "/api/v1/ai/model-selection",
    request_body = ModelSelectionRequest,
    responses(
        (status = 200, description = "Selected model", body = ModelSelectionResponse),
        (status = 400, description = "Invalid task type", body = ErrorResponse),
        (status = 503, description = "No model available", body = ErrorResponse),
    ),
    tag = "AI"
)]
pub async fn select_model(
    router: Extension<Arc<ModelRouter>>,
    request: Json<ModelSelectionRequest>,
) -> Result<Json<ModelSelectionResponse>, (StatusCode, Json<ErrorResponse>)> {
    shared::select_model(router, request).await
}
