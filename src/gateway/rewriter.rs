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

//! Request path rewriting.
//!
//! Paths are normalized before lookup by removing a single trailing `/`
//! (the root path `/` is left alone). The outcome always reports the path
//! exactly as it was received.
//!
//! Paths under the current version prefix are never looked up, whatever the
//! table holds. Every target is canonical, so a rewritten path never
//! matches a second time.

use serde::Serialize;

use super::mapping::RouteMappingTable;
use crate::api::version::API_CURRENT_VERSION;

/// Per-request result of running a path through the rewriter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteOutcome {
    pub original_path: String,
    /// Equal to `original_path` when nothing matched
    pub rewritten_path: String,
    pub matched: bool,
}

impl RewriteOutcome {
    fn unchanged(path: &str) -> Self {
        Self {
            original_path: path.to_string(),
            rewritten_path: path.to_string(),
            matched: false,
        }
    }
}

/// Strip one trailing slash, keeping `/` intact.
pub fn normalize_path(path: &str) -> &str {
    if path.len() > 1 {
        path.strip_suffix('/').unwrap_or(path)
    } else {
        path
    }
}

#[derive(Debug, Clone)]
pub struct PathRewriter {
    table: RouteMappingTable,
}

impl PathRewriter {
    pub fn new(table: RouteMappingTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RouteMappingTable {
        &self.table
    }

    pub fn rewrite(&self, path: &str) -> RewriteOutcome {
        let normalized = normalize_path(path);
        if normalized.is_empty() || API_CURRENT_VERSION.owns_path(normalized) {
            return RewriteOutcome::unchanged(path);
        }

        match self.table.match_path(normalized) {
            Some(found) => RewriteOutcome {
                original_path: path.to_string(),
                rewritten_path: found.rewritten,
                matched: true,
            },
            None => RewriteOutcome::unchanged(path),
        }
    }
}
