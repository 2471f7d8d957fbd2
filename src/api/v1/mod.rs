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

//! API Version 1 (v1) implementation.
//!
//! ## Endpoint Structure
//!
//! - `GET /api/v1/health` - Health check
//! - `GET /api/v1/gateway/routes` - Deprecation phase and legacy route mappings
//! - `POST /api/v1/ai/model-selection` - Language model selection for a task
//!
//! Feature endpoints owned by downstream services (`/api/v1/chart/...`,
//! `/api/v1/geocode`, `/api/v1/questionnaire`, ...) are registered by the
//! embedding application through [`build_v1_router`].

pub mod handlers;
pub mod openapi;
pub mod routes;

pub use handlers::*;
pub use openapi::ApiDocV1;
pub use routes::build_v1_router;
