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

//! Legacy path rewriting and deprecation handling.
//!
//! ```text
//! request ─► Gateway middleware ─► PathRewriter ─► RouteMappingTable
//!                   │                    │
//!                   │              RewriteOutcome
//!                   ▼                    │
//!              decide(phase, outcome) ◄──┘
//!                   │
//!   PassThrough ─► versioned router (+ X-Deprecation-Warning)
//!   Redirect    ─► 301 Location: /api/v1/...
//!   Reject      ─► 410 Gone
//! ```
//!
//! - `mapping` - Ordered, immutable legacy-to-canonical rule table
//! - `rewriter` - Path normalization and rewriting
//! - `policy` - Deprecation phases and the pure `decide` function
//! - `middleware` - The axum middleware executing the decided action

pub mod error;
pub mod mapping;
pub mod middleware;
pub mod policy;
pub mod rewriter;

pub use error::GatewayError;
pub use mapping::{default_mappings, MappingMatch, RouteMapping, RouteMappingConfig, RouteMappingTable};
pub use middleware::{rewrite_legacy_paths, Gateway, DEPRECATION_WARNING_HEADER};
pub use policy::{decide, deprecation_warning, Action, DeprecationPhase, API_DOCS_PATH};
pub use rewriter::{normalize_path, PathRewriter, RewriteOutcome};
