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

//! Error body and error codes shared across API versions.

use axum::http::StatusCode;
use serde::Serialize;
use utoipa::ToSchema;

use crate::ai::ModelRoutingError;

/// Error codes for API responses
pub mod error_codes {
    pub const ENDPOINT_GONE: &str = "ENDPOINT_GONE";
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const MODEL_UNAVAILABLE: &str = "MODEL_UNAVAILABLE";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// API error response structure
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetail>,
}

/// Where a removed path went
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    /// The path that was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// The canonical path replacing it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replacement: Option<String>,
    /// Location of the API documentation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: ErrorDetail) -> Self {
        self.details = Some(details);
        self
    }

    /// Pair the response with the status its code maps to
    pub fn with_status(self) -> (StatusCode, axum::Json<Self>) {
        let status = status_from_code(&self.code);
        (status, axum::Json(self))
    }
}

fn status_from_code(code: &str) -> StatusCode {
    match code {
        error_codes::ENDPOINT_GONE => StatusCode::GONE,
        error_codes::INVALID_REQUEST => StatusCode::BAD_REQUEST,
        error_codes::MODEL_UNAVAILABLE => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<ModelRoutingError> for ErrorResponse {
    fn from(err: ModelRoutingError) -> Self {
        let code = match &err {
            ModelRoutingError::EmptyTaskType => error_codes::INVALID_REQUEST,
            ModelRoutingError::NoModelAvailable { .. } => error_codes::MODEL_UNAVAILABLE,
            ModelRoutingError::UnknownModel { .. } => error_codes::INTERNAL_ERROR,
        };
        ErrorResponse::new(code, err.to_string())
    }
}
