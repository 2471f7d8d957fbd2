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

//! API v1 route definitions.
//!
//! All routes are designed to be nested under `/api/v1/`.

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use crate::ai::ModelRouter;
use crate::gateway::Gateway;

/// Build the v1 router.
///
/// `feature_routes` carries the endpoints owned by downstream services
/// (chart, geocode, questionnaire, ...). They are merged into the same
/// router so each endpoint is registered exactly once under `/api/v1`.
///
/// # Panics
///
/// Panics if `feature_routes` registers `GET /health`, `GET /gateway/routes`
/// or `POST /ai/model-selection`; axum rejects overlapping routes on merge.
pub fn build_v1_router(
    gateway: Arc<Gateway>,
    model_router: Arc<ModelRouter>,
    feature_routes: Option<Router>,
) -> Router {
    let service_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/gateway/routes", get(handlers::list_gateway_routes))
        .route("/ai/model-selection", post(handlers::select_model))
        .layer(Extension(gateway))
        .layer(Extension(model_router));

    match feature_routes {
        Some(routes) => service_routes.merge(routes),
        None => service_routes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ModelRoutingConfig;
    use crate::gateway::{DeprecationPhase, RouteMappingTable};

    fn parts() -> (Arc<Gateway>, Arc<ModelRouter>) {
        let gateway = Gateway::new(
            RouteMappingTable::default_table().unwrap(),
            DeprecationPhase::ActiveWithWarning,
        );
        let model_router = ModelRouter::new(ModelRoutingConfig::default()).unwrap();
        (Arc::new(gateway), Arc::new(model_router))
    }

    #[test]
    fn test_feature_routes_merged() {
        let (gateway, model_router) = parts();
        let features = Router::new().route("/chart/:id", get(|| async { "chart" }));
        let _ = build_v1_router(gateway, model_router, Some(features));
    }

    #[test]
    #[should_panic]
    fn test_feature_routes_cannot_shadow_health() {
        let (gateway, model_router) = parts();
        let features = Router::new().route("/health", get(|| async { "shadow" }));
        let _ = build_v1_router(gateway, model_router, Some(features));
    }
}
