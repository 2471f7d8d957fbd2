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

//! Errors raised while building the route mapping table.
//!
//! All of these are configuration errors: they are detected once at startup
//! and stop the server from starting. Request handling itself never fails.

/// Error constructing a [`RouteMappingTable`](super::RouteMappingTable).
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Route mapping #{index} has an invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        index: usize,
        pattern: String,
        source: regex::Error,
    },

    #[error("Route mapping #{index} targets '{target}', which is not under the canonical prefix '{prefix}'")]
    NonCanonicalTarget {
        index: usize,
        target: String,
        prefix: &'static str,
    },

    #[error("Route mapping #{index} target '{target}' is not a valid request path")]
    InvalidTarget { index: usize, target: String },

    #[error("Route mapping #{index} target '{target}' references capture group '{group}' which its pattern does not define")]
    UnknownCaptureGroup {
        index: usize,
        target: String,
        group: String,
    },

    #[error("Route mapping #{index} target '{target}' would be rewritten again by mapping #{matched_by}")]
    RewriteLoop {
        index: usize,
        target: String,
        matched_by: usize,
    },
}
