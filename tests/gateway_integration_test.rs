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

//! Gateway Integration Tests
//!
//! These tests drive the fully assembled application (gateway, versioned
//! router and stub feature services) through each deprecation phase.

#![allow(clippy::unwrap_used)]

mod test_support;

use axum::http::{header, StatusCode};
use pretty_assertions::assert_eq;
use rectifier_gateway::gateway::DEPRECATION_WARNING_HEADER;
use rectifier_gateway::{DeprecationPhase, GatewayServerBuilder};
use serde_json::json;
use test_case::test_case;
use test_support::{app, body_json, feature_routes, send, send_json};

fn warning_header(response: &axum::response::Response) -> Option<String> {
    response
        .headers()
        .get(&DEPRECATION_WARNING_HEADER)
        .map(|v| v.to_str().unwrap().to_string())
}

#[tokio::test]
async fn test_legacy_health_served_with_warning() {
    let response = send(app(DeprecationPhase::ActiveWithWarning), "GET", "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("X-Deprecation-Warning")
            .unwrap()
            .to_str()
            .unwrap(),
        "The path '/health' is deprecated."
    );

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_legacy_api_prefixed_chart_generate_rewritten() {
    let response = send_json(
        app(DeprecationPhase::ActiveWithWarning),
        "POST",
        "/api/chart/generate",
        json!({"birthDate": "1990-01-01"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        warning_header(&response).as_deref(),
        Some("The path '/api/chart/generate' is deprecated.")
    );
    assert_eq!(body_json(response).await, json!({"id": "generated"}));
}

#[tokio::test]
async fn test_chart_revision_alias_rewritten() {
    let response = send(
        app(DeprecationPhase::ActiveWithWarning),
        "GET",
        "/api/chart/v2/42",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(warning_header(&response).is_some());
    assert_eq!(body_json(response).await["id"], "42");
}

#[tokio::test]
async fn test_rewrite_preserves_query_string() {
    let response = send(
        app(DeprecationPhase::ActiveWithWarning),
        "GET",
        "/chart/42?format=pdf",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"id": "42", "query": "format=pdf"})
    );
}

#[tokio::test]
async fn test_trailing_slash_is_normalized() {
    let response = send(app(DeprecationPhase::ActiveWithWarning), "GET", "/health/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        warning_header(&response).as_deref(),
        Some("The path '/health/' is deprecated.")
    );
}

#[tokio::test]
async fn test_legacy_chart_redirected() {
    let response = send(app(DeprecationPhase::Redirect), "GET", "/chart/42").await;

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/api/v1/chart/42"
    );
    assert!(warning_header(&response).is_none());
}

#[tokio::test]
async fn test_redirect_location_keeps_query() {
    let response = send(app(DeprecationPhase::Redirect), "GET", "/chart/42?lang=en").await;

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/api/v1/chart/42?lang=en"
    );
}

#[tokio::test]
async fn test_legacy_questionnaire_gone() {
    let response = send(app(DeprecationPhase::Gone), "GET", "/questionnaire").await;

    assert_eq!(response.status(), StatusCode::GONE);
    let body = body_json(response).await;
    assert_eq!(body["code"], "ENDPOINT_GONE");
    assert_eq!(body["details"]["path"], "/questionnaire");
    assert_eq!(body["details"]["replacement"], "/api/v1/questionnaire");
    assert_eq!(body["details"]["documentation"], "/api/v1/docs");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("/api/v1/questionnaire"));
}

#[test_case(DeprecationPhase::ActiveWithWarning ; "active with warning")]
#[test_case(DeprecationPhase::Redirect ; "redirect")]
#[test_case(DeprecationPhase::Gone ; "gone")]
#[tokio::test]
async fn test_canonical_path_untouched(phase: DeprecationPhase) {
    let response = send(app(phase), "GET", "/api/v1/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(warning_header(&response).is_none());
}

#[test_case(DeprecationPhase::ActiveWithWarning ; "active with warning")]
#[test_case(DeprecationPhase::Redirect ; "redirect")]
#[test_case(DeprecationPhase::Gone ; "gone")]
#[tokio::test]
async fn test_unknown_path_falls_through_to_not_found(phase: DeprecationPhase) {
    let response = send(app(phase), "GET", "/unknown/path").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(warning_header(&response).is_none());
}

#[tokio::test]
async fn test_downstream_error_passed_through_with_warning() {
    let response = send(app(DeprecationPhase::ActiveWithWarning), "GET", "/geocode").await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(warning_header(&response).is_some());
    assert_eq!(
        body_json(response).await,
        json!({"error": "geocoder offline"})
    );
}

#[tokio::test]
async fn test_gone_phase_still_serves_canonical_features() {
    let response = send(app(DeprecationPhase::Gone), "GET", "/api/v1/chart/7").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["id"], "7");
}

#[tokio::test]
async fn test_cors_headers_on_redirect() {
    let request = axum::http::Request::builder()
        .uri("/health")
        .header(header::ORIGIN, "https://example.org")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app(DeprecationPhase::Redirect), request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}

#[tokio::test]
async fn test_catch_all_mapping_never_touches_canonical_paths() {
    let app = GatewayServerBuilder::new()
        .with_phase(DeprecationPhase::Gone)
        .with_mapping("/(?P<rest>.+)", "/api/v1/${rest}")
        .with_feature_routes(feature_routes())
        .build()
        .unwrap()
        .router();

    let response = send(app.clone(), "GET", "/api/v1/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(warning_header(&response).is_none());

    let response = send(app, "GET", "/reports/7").await;
    assert_eq!(response.status(), StatusCode::GONE);
    assert_eq!(
        body_json(response).await["details"]["replacement"],
        "/api/v1/reports/7"
    );
}
