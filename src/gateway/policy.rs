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

//! Deprecation lifecycle for legacy paths.
//!
//! The lifecycle has three phases which are rolled out by redeploying the
//! service with a different configuration:
//!
//! 1. [`DeprecationPhase::ActiveWithWarning`] - legacy paths are served from
//!    their canonical handler and the response carries a deprecation header.
//! 2. [`DeprecationPhase::Redirect`] - legacy paths answer `301` pointing at
//!    the canonical path.
//! 3. [`DeprecationPhase::Gone`] - legacy paths answer `410`.
//!
//! [`decide`] maps a phase and a [`RewriteOutcome`] to the [`Action`] the
//! middleware has to carry out. It is pure so every combination can be
//! tested without a running server.

use std::fmt;
use std::str::FromStr;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::rewriter::RewriteOutcome;

/// Where callers are sent for the current API documentation.
pub const API_DOCS_PATH: &str = "/api/v1/docs";

/// Deployment-wide deprecation phase for legacy paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum DeprecationPhase {
    #[default]
    ActiveWithWarning,
    Redirect,
    Gone,
}

impl DeprecationPhase {
    pub fn all() -> &'static [DeprecationPhase] {
        &[
            DeprecationPhase::ActiveWithWarning,
            DeprecationPhase::Redirect,
            DeprecationPhase::Gone,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeprecationPhase::ActiveWithWarning => "active-with-warning",
            DeprecationPhase::Redirect => "redirect",
            DeprecationPhase::Gone => "gone",
        }
    }
}

impl fmt::Display for DeprecationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown deprecation phase '{0}' (expected one of: active-with-warning, redirect, gone)")]
pub struct UnknownPhase(pub String);

impl FromStr for DeprecationPhase {
    type Err = UnknownPhase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active-with-warning" | "active_with_warning" | "active" | "warn" | "warning" => {
                Ok(DeprecationPhase::ActiveWithWarning)
            }
            "redirect" | "301" => Ok(DeprecationPhase::Redirect),
            "gone" | "410" => Ok(DeprecationPhase::Gone),
            _ => Err(UnknownPhase(s.to_string())),
        }
    }
}

/// What the middleware does with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Dispatch to the router using `path`.
    PassThrough {
        path: String,
        attach_warning_header: bool,
    },
    /// Answer with a redirect to `to`; no handler runs.
    Redirect { to: String, status: StatusCode },
    /// Answer with an error; no handler runs.
    Reject { status: StatusCode, message: String },
}

/// Decide what to do with a request in the given phase.
pub fn decide(phase: DeprecationPhase, outcome: &RewriteOutcome) -> Action {
    match (phase, outcome.matched) {
        (_, false) => Action::PassThrough {
            path: outcome.rewritten_path.clone(),
            attach_warning_header: false,
        },
        (DeprecationPhase::ActiveWithWarning, true) => Action::PassThrough {
            path: outcome.rewritten_path.clone(),
            attach_warning_header: true,
        },
        (DeprecationPhase::Redirect, true) => Action::Redirect {
            to: outcome.rewritten_path.clone(),
            status: StatusCode::MOVED_PERMANENTLY,
        },
        (DeprecationPhase::Gone, true) => Action::Reject {
            status: StatusCode::GONE,
            message: gone_message(outcome),
        },
    }
}

/// Value of the `X-Deprecation-Warning` header.
pub fn deprecation_warning(original_path: &str) -> String {
    format!("The path '{original_path}' is deprecated.")
}

fn gone_message(outcome: &RewriteOutcome) -> String {
    format!(
        "The path '{}' has been removed. Use '{}' instead; see {API_DOCS_PATH} for the updated API documentation.",
        outcome.original_path, outcome.rewritten_path
    )
}
