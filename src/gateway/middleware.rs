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

//! Axum middleware that applies the rewrite and deprecation policy.
//!
//! `Router::layer` runs after route matching, which is too late to change
//! the path a request is routed by. [`Gateway::wrap`] therefore wraps the
//! complete application router as a service, so the middleware sees every
//! request first and the router only ever sees canonical paths.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, uri::PathAndQuery, HeaderName, HeaderValue, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Json, Router,
};
use log::{debug, error, info, warn};
use tower::Layer;

use super::mapping::RouteMappingTable;
use super::policy::{decide, deprecation_warning, Action, DeprecationPhase, API_DOCS_PATH};
use super::rewriter::{PathRewriter, RewriteOutcome};
use crate::api::shared::error::{error_codes, ErrorDetail, ErrorResponse};

/// Header attached to responses served for a deprecated path.
pub static DEPRECATION_WARNING_HEADER: HeaderName = HeaderName::from_static("x-deprecation-warning");

/// Read-only gateway state shared by all requests.
#[derive(Debug, Clone)]
pub struct Gateway {
    rewriter: Arc<PathRewriter>,
    phase: DeprecationPhase,
}

impl Gateway {
    pub fn new(table: RouteMappingTable, phase: DeprecationPhase) -> Self {
        Self {
            rewriter: Arc::new(PathRewriter::new(table)),
            phase,
        }
    }

    pub fn phase(&self) -> DeprecationPhase {
        self.phase
    }

    pub fn rewriter(&self) -> &PathRewriter {
        &self.rewriter
    }

    /// Rewrite `path` and decide what to do with it under the active phase.
    pub fn evaluate(&self, path: &str) -> (RewriteOutcome, Action) {
        let outcome = self.rewriter.rewrite(path);
        let action = decide(self.phase, &outcome);
        (outcome, action)
    }

    /// Put the gateway in front of `app`, ahead of route matching and of
    /// every layer `app` already carries.
    pub fn wrap(self: Arc<Self>, app: Router) -> Router {
        let service = middleware::from_fn_with_state(self, rewrite_legacy_paths).layer(app);
        Router::new().fallback_service(service)
    }
}

/// Middleware entry point, see [`Gateway::wrap`].
pub async fn rewrite_legacy_paths(
    State(gateway): State<Arc<Gateway>>,
    mut request: Request,
    next: Next,
) -> Response {
    let original_path = request.uri().path().to_string();
    let (outcome, action) = gateway.evaluate(&original_path);

    match action {
        Action::PassThrough {
            path,
            attach_warning_header,
        } => {
            if outcome.matched {
                match replace_path(request.uri(), &path) {
                    Ok(uri) => {
                        debug!("Rewrote legacy path '{original_path}' to '{path}'");
                        *request.uri_mut() = uri;
                    }
                    Err(e) => {
                        error!("Cannot rewrite '{original_path}' to '{path}': {e}");
                        return next.run(request).await;
                    }
                }
            }

            let mut response = next.run(request).await;
            if attach_warning_header {
                match HeaderValue::from_str(&deprecation_warning(&original_path)) {
                    Ok(value) => {
                        response
                            .headers_mut()
                            .insert(DEPRECATION_WARNING_HEADER.clone(), value);
                    }
                    Err(e) => warn!("Cannot encode deprecation header for '{original_path}': {e}"),
                }
            }
            response
        }
        Action::Redirect { to, status } => {
            let location = match request.uri().query() {
                Some(query) => format!("{to}?{query}"),
                None => to,
            };
            info!("Redirecting legacy path '{original_path}' to '{location}'");
            (status, [(header::LOCATION, location)]).into_response()
        }
        Action::Reject { status, message } => {
            warn!("Rejected removed legacy path '{original_path}'");
            let body = ErrorResponse::new(error_codes::ENDPOINT_GONE, message).with_details(
                ErrorDetail {
                    path: Some(outcome.original_path),
                    replacement: Some(outcome.rewritten_path),
                    documentation: Some(API_DOCS_PATH.to_string()),
                },
            );
            (status, Json(body)).into_response()
        }
    }
}

/// Swap the path of `uri`, keeping scheme, authority and query.
fn replace_path(uri: &Uri, path: &str) -> Result<Uri, axum::http::Error> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_string(),
    };
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query.parse::<PathAndQuery>()?);
    Ok(Uri::from_parts(parts)?)
}
