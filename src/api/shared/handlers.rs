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

//! Handler implementations shared across API versions.

use axum::{extract::Extension, http::StatusCode, Json};
use log::warn;
use std::sync::Arc;

use super::error::ErrorResponse;
use super::responses::{
    ApiVersionsResponse, GatewayRoutesResponse, HealthResponse, ModelSelectionRequest,
    ModelSelectionResponse,
};
use crate::ai::ModelRouter;
use crate::api::version::{ApiVersion, API_CURRENT_VERSION};
use crate::gateway::{Gateway, RouteMapping};

/// List available API versions
pub async fn list_api_versions() -> Json<ApiVersionsResponse> {
    Json(ApiVersionsResponse {
        versions: ApiVersion::all_strings(),
        current: API_CURRENT_VERSION.to_string(),
    })
}

/// Check server health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Describe the active phase and the mapping table
pub async fn list_gateway_routes(
    Extension(gateway): Extension<Arc<Gateway>>,
) -> Json<GatewayRoutesResponse> {
    let mappings = gateway
        .rewriter()
        .table()
        .mappings()
        .iter()
        .map(RouteMapping::to_config)
        .collect();

    Json(GatewayRoutesResponse {
        phase: gateway.phase(),
        mappings,
    })
}

/// Pick a model for a task and estimate the cost of the call
pub async fn select_model(
    Extension(router): Extension<Arc<ModelRouter>>,
    Json(request): Json<ModelSelectionRequest>,
) -> Result<Json<ModelSelectionResponse>, (StatusCode, Json<ErrorResponse>)> {
    let selection = router.select(&request.task_type).map_err(|e| {
        warn!("Model selection failed for task '{}': {e}", request.task_type);
        ErrorResponse::from(e).with_status()
    })?;

    let estimated_cost_usd = match (request.input_tokens, request.output_tokens) {
        (None, None) => None,
        (input, output) => Some(
            selection
                .model
                .estimate_cost(input.unwrap_or(0), output.unwrap_or(0)),
        ),
    };

    Ok(Json(ModelSelectionResponse {
        task_type: request.task_type,
        model: selection.model.name.clone(),
        fallback_used: selection.fallback_used,
        estimated_cost_usd,
    }))
}
