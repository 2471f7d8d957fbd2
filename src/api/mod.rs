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

//! REST API of the gateway.
//!
//! The API uses URL-based versioning; every endpoint lives under `/api/v1/`.
//!
//! ## API Structure
//!
//! ```text
//! /api/versions                 - List available API versions
//! /api/v1/health                - Health check
//! /api/v1/gateway/routes        - Deprecation phase and mapping table
//! /api/v1/ai/model-selection    - Model routing
//! /api/v1/docs                  - Swagger UI
//! /api/v1/openapi.json          - OpenAPI document
//! ```
//!
//! ## Module Organization
//!
//! - `shared` - Common types and handlers shared across API versions
//! - `v1` - API version 1 implementation
//! - `version` - Version constants and utilities

pub mod shared;
pub mod v1;
pub mod version;

pub use shared::error::*;
pub use shared::responses::*;

pub use v1::handlers::*;
pub use v1::openapi::ApiDocV1;
pub use v1::routes::build_v1_router;

pub use version::{ApiVersion, API_CURRENT_VERSION};
