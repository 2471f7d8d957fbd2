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

//! Shared helpers for integration tests.
//!
//! The chart, geocode and questionnaire services live outside the gateway;
//! [`feature_routes`] stands in for them with handlers that echo what they
//! received, so tests can see which canonical path was routed.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    extract::{Path, RawQuery},
    http::{Request, StatusCode},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use rectifier_gateway::{DeprecationPhase, GatewayServerBuilder};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Stub feature endpoints, relative to `/api/v1`.
pub fn feature_routes() -> Router {
    Router::new()
        .route("/chart/generate", post(generate_chart))
        .route("/chart/:id", get(get_chart))
        .route(
            "/questionnaire",
            get(|| async { Json(json!({"questions": []})) }),
        )
        .route(
            "/interpretation",
            get(|| async { Json(json!({"text": "ok"})) }),
        )
        .route("/geocode", get(geocode_unavailable))
}

async fn generate_chart() -> (StatusCode, Json<Value>) {
    (StatusCode::CREATED, Json(json!({"id": "generated"})))
}

async fn get_chart(Path(id): Path<String>, RawQuery(query): RawQuery) -> Json<Value> {
    Json(json!({"id": id, "query": query}))
}

async fn geocode_unavailable() -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_GATEWAY,
        Json(json!({"error": "geocoder offline"})),
    )
}

/// The complete application for `phase`, default mappings and stub features.
pub fn app(phase: DeprecationPhase) -> Router {
    GatewayServerBuilder::new()
        .with_phase(phase)
        .with_feature_routes(feature_routes())
        .build()
        .expect("default gateway configuration is valid")
        .router()
}

pub async fn send(app: Router, method: &str, uri: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn send_json(app: Router, method: &str, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
