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

//! OpenAPI documentation for API v1.
//!
//! The document is available at `/api/v1/openapi.json` and the Swagger UI
//! is served at `/api/v1/docs/`.

use utoipa::OpenApi;

use crate::api::shared::{
    ApiVersionsResponse, ErrorDetail, ErrorResponse, GatewayRoutesResponse, HealthResponse,
    ModelSelectionRequest, ModelSelectionResponse,
};
use crate::gateway::{DeprecationPhase, RouteMappingConfig};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::handlers::list_api_versions,
        super::handlers::health_check,
        super::handlers::list_gateway_routes,
        super::handlers::select_model,
    ),
    components(
        schemas(
            HealthResponse,
            ApiVersionsResponse,
            GatewayRoutesResponse,
            RouteMappingConfig,
            DeprecationPhase,
            ModelSelectionRequest,
            ModelSelectionResponse,
            ErrorResponse,
            ErrorDetail,
        )
    ),
    tags(
        (name = "API", description = "API version information"),
        (name = "Health", description = "Health check endpoints"),
        (name = "Gateway", description = "Legacy path rewriting and deprecation"),
        (name = "AI", description = "Language model routing"),
    ),
    info(
        title = "Birth Time Rectifier API",
        version = "1.0.0",
        description = "Birth Time Rectifier REST API v1.\n\n## API Versioning\n\nAll endpoints are prefixed with `/api/v1/`.\n\n## Legacy Paths\n\nUnprefixed paths (`/health`, `/chart/{id}`) and `/api`-prefixed paths (`/api/chart/generate`) are deprecated. Depending on the deployment phase they are served with an `X-Deprecation-Warning` header, redirected with `301 Moved Permanently`, or rejected with `410 Gone`.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0"
        )
    )
)]
pub struct ApiDocV1;
