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

//! Ordered legacy-to-canonical route mapping table.
//!
//! Each mapping pairs a regular expression with a canonical target path.
//! Patterns are always anchored at both ends, so a pattern either matches the
//! whole (normalized) request path or does not match at all. Mappings are
//! evaluated in declaration order and the first match wins; overlapping
//! patterns are allowed and resolve by that order.
//!
//! Targets are either literal paths (`/api/v1/health`) or templates that
//! reference the pattern's capture groups by number (`$1`) or by name
//! (`${rest}`), using the `regex` crate's expansion rules.

use axum::http::uri::PathAndQuery;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::GatewayError;
use crate::api::version::API_CURRENT_VERSION;

lazy_static! {
    /// Capture-group references inside a target template: `${name}` or `$name`.
    static ref TEMPLATE_REFERENCE: Regex =
        Regex::new(r"\$(?:\{([^}]*)\}|([_0-9A-Za-z]+))").expect("Invalid regex pattern");
}

/// A route mapping as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteMappingConfig {
    /// Regular expression matched against the whole request path
    pub pattern: String,
    /// Canonical path or substitution template
    pub target: String,
}

impl RouteMappingConfig {
    pub fn new(pattern: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            target: target.into(),
        }
    }
}

/// The built-in mappings for the legacy Birth Time Rectifier path space.
///
/// Order matters: the chart revision aliases must be tried before the
/// generic `/api/...` rule, which would otherwise keep the `v2`/`v3`
/// segment in the rewritten path.
pub fn default_mappings() -> Vec<RouteMappingConfig> {
    vec![
        RouteMappingConfig::new(r"/api/chart/v[23](?P<rest>/.+)?", "/api/v1/chart${rest}"),
        RouteMappingConfig::new(
            r"/api/(?P<rest>(?:health|geocode|questionnaire|interpretation|chart)(?:/.+)?)",
            "/api/v1/${rest}",
        ),
        RouteMappingConfig::new(
            r"/(?P<rest>(?:health|geocode|questionnaire|chart)(?:/.+)?)",
            "/api/v1/${rest}",
        ),
    ]
}

/// A compiled route mapping.
#[derive(Debug, Clone)]
pub struct RouteMapping {
    pattern: String,
    target: String,
    regex: Regex,
}

impl RouteMapping {
    /// Compile a mapping. The pattern is anchored before compilation.
    pub fn compile(pattern: &str, target: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{pattern})$"))?;
        Ok(Self {
            pattern: pattern.to_string(),
            target: target.to_string(),
            regex,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Whether the target references capture groups.
    pub fn is_template(&self) -> bool {
        self.target.contains('$')
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Produce the canonical path for `path`, or `None` if the pattern does not match.
    pub fn apply(&self, path: &str) -> Option<String> {
        let captures = self.regex.captures(path)?;
        if !self.is_template() {
            return Some(self.target.clone());
        }
        let mut rewritten = String::with_capacity(self.target.len() + path.len());
        captures.expand(&self.target, &mut rewritten);
        Some(rewritten)
    }

    /// Names or indices referenced by the target that the pattern does not define.
    fn undefined_references(&self) -> Vec<String> {
        let escaped = self.target.replace("$$", "");
        TEMPLATE_REFERENCE
            .captures_iter(&escaped)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| m.as_str())
            .filter(|reference| !self.defines_group(reference))
            .map(str::to_string)
            .collect()
    }

    fn defines_group(&self, reference: &str) -> bool {
        match reference.parse::<usize>() {
            Ok(index) => index < self.regex.captures_len(),
            Err(_) => self
                .regex
                .capture_names()
                .flatten()
                .any(|name| name == reference),
        }
    }

    pub fn to_config(&self) -> RouteMappingConfig {
        RouteMappingConfig::new(&self.pattern, &self.target)
    }
}

/// Result of a successful table lookup.
#[derive(Debug, Clone)]
pub struct MappingMatch<'a> {
    /// Position of the matching mapping in the table
    pub index: usize,
    pub mapping: &'a RouteMapping,
    /// The target after capture-group substitution
    pub rewritten: String,
}

/// Immutable, ordered collection of compiled route mappings.
#[derive(Debug, Clone, Default)]
pub struct RouteMappingTable {
    mappings: Vec<RouteMapping>,
}

impl RouteMappingTable {
    /// Compile and validate a table.
    ///
    /// Every target must live under the current API version prefix and may
    /// only reference capture groups its pattern defines. A literal target
    /// that some mapping in the table would rewrite again is rejected.
    pub fn new<I>(configs: I) -> Result<Self, GatewayError>
    where
        I: IntoIterator<Item = RouteMappingConfig>,
    {
        let prefix = API_CURRENT_VERSION.path_prefix();
        let mut mappings = Vec::new();

        for (index, config) in configs.into_iter().enumerate() {
            let mapping = RouteMapping::compile(&config.pattern, &config.target).map_err(
                |source| GatewayError::InvalidPattern {
                    index,
                    pattern: config.pattern.clone(),
                    source,
                },
            )?;

            if !API_CURRENT_VERSION.owns_path(&config.target) {
                return Err(GatewayError::NonCanonicalTarget {
                    index,
                    target: config.target,
                    prefix,
                });
            }

            if !mapping.is_template() && config.target.parse::<PathAndQuery>().is_err() {
                return Err(GatewayError::InvalidTarget {
                    index,
                    target: config.target,
                });
            }

            if let Some(group) = mapping.undefined_references().into_iter().next() {
                return Err(GatewayError::UnknownCaptureGroup {
                    index,
                    target: config.target,
                    group,
                });
            }

            mappings.push(mapping);
        }

        let table = Self { mappings };
        table.check_literal_targets()?;
        Ok(table)
    }

    /// The built-in table, see [`default_mappings`].
    pub fn default_table() -> Result<Self, GatewayError> {
        Self::new(default_mappings())
    }

    fn check_literal_targets(&self) -> Result<(), GatewayError> {
        for (index, mapping) in self.mappings.iter().enumerate() {
            if mapping.is_template() {
                continue;
            }
            if let Some(matched_by) = self
                .mappings
                .iter()
                .position(|other| other.is_match(mapping.target()))
            {
                return Err(GatewayError::RewriteLoop {
                    index,
                    target: mapping.target().to_string(),
                    matched_by,
                });
            }
        }
        Ok(())
    }

    /// Return the first mapping matching `path`, in table order.
    pub fn match_path(&self, path: &str) -> Option<MappingMatch<'_>> {
        self.mappings
            .iter()
            .enumerate()
            .find_map(|(index, mapping)| {
                mapping.apply(path).map(|rewritten| MappingMatch {
                    index,
                    mapping,
                    rewritten,
                })
            })
    }

    pub fn mappings(&self) -> &[RouteMapping] {
        &self.mappings
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(entries: &[(&str, &str)]) -> Result<RouteMappingTable, GatewayError> {
        RouteMappingTable::new(
            entries
                .iter()
                .map(|(pattern, target)| RouteMappingConfig::new(*pattern, *target)),
        )
    }

    #[test]
    fn test_default_table_compiles() {
        let table = RouteMappingTable::default_table().unwrap();
        assert_eq!(table.len(), default_mappings().len());
    }

    #[test]
    fn test_literal_target() {
        let table = table(&[("/health", "/api/v1/health")]).unwrap();
        let found = table.match_path("/health").unwrap();
        assert_eq!(found.index, 0);
        assert_eq!(found.rewritten, "/api/v1/health");
    }

    #[test]
    fn test_patterns_are_anchored() {
        let table = table(&[("/health", "/api/v1/health")]).unwrap();
        assert!(table.match_path("/healthz").is_none());
        assert!(table.match_path("/x/health").is_none());
    }

    #[test]
    fn test_named_capture_substitution() {
        let table = table(&[(r"/chart/(?P<id>[^/]+)", "/api/v1/chart/${id}")]).unwrap();
        assert_eq!(table.match_path("/chart/42").unwrap().rewritten, "/api/v1/chart/42");
    }

    #[test]
    fn test_numbered_capture_substitution() {
        let table = table(&[(r"/old/([a-z]+)/(\d+)", "/api/v1/$1/${2}")]).unwrap();
        assert_eq!(
            table.match_path("/old/chart/7").unwrap().rewritten,
            "/api/v1/chart/7"
        );
    }

    #[test]
    fn test_first_match_wins() {
        let table = table(&[
            ("/chart/export", "/api/v1/chart/export"),
            (r"/chart/(?P<id>[^/]+)", "/api/v1/chart/${id}"),
        ])
        .unwrap();

        let found = table.match_path("/chart/export").unwrap();
        assert_eq!(found.index, 0);

        let found = table.match_path("/chart/99").unwrap();
        assert_eq!(found.index, 1);
        assert_eq!(found.rewritten, "/api/v1/chart/99");
    }

    #[test]
    fn test_declaration_order_changes_winner() {
        let entries = [
            (r"/chart/(?P<id>[^/]+)", "/api/v1/chart/by-id/${id}"),
            ("/chart/export", "/api/v1/chart/export"),
        ];
        let table = table(&entries).unwrap();
        assert_eq!(
            table.match_path("/chart/export").unwrap().rewritten,
            "/api/v1/chart/by-id/export"
        );
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = table(&[("/chart/(unclosed", "/api/v1/chart")]).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidPattern { index: 0, .. }));
    }

    #[test]
    fn test_non_canonical_target_rejected() {
        let err = table(&[("/health", "/api/health")]).unwrap_err();
        assert!(matches!(err, GatewayError::NonCanonicalTarget { .. }));

        let err = table(&[("/health", "/api/v10/health")]).unwrap_err();
        assert!(matches!(err, GatewayError::NonCanonicalTarget { .. }));
    }

    #[test]
    fn test_unknown_capture_group_rejected() {
        let err = table(&[(r"/chart/(?P<id>\d+)", "/api/v1/chart/${chart_id}")]).unwrap_err();
        match err {
            GatewayError::UnknownCaptureGroup { group, .. } => assert_eq!(group, "chart_id"),
            other => panic!("unexpected error: {other}"),
        }

        let err = table(&[(r"/chart/(\d+)", "/api/v1/chart/$2")]).unwrap_err();
        assert!(matches!(err, GatewayError::UnknownCaptureGroup { .. }));
    }

    #[test]
    fn test_literal_target_matched_by_table_rejected() {
        let err = table(&[
            ("/health", "/api/v1/health"),
            ("/api/v1/health", "/api/v1/status"),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            GatewayError::RewriteLoop {
                index: 0,
                matched_by: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_literal_target_rejected() {
        let err = table(&[("/health", "/api/v1/health check")]).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidTarget { .. }));
    }

    #[test]
    fn test_default_table_rewrites_chart_revisions() {
        let table = RouteMappingTable::default_table().unwrap();
        assert_eq!(
            table.match_path("/api/chart/v2/generate").unwrap().rewritten,
            "/api/v1/chart/generate"
        );
        assert_eq!(
            table.match_path("/api/chart/v3").unwrap().rewritten,
            "/api/v1/chart"
        );
        assert_eq!(table.match_path("/api/chart/v3").unwrap().index, 0);
    }

    #[test]
    fn test_to_config_round_trips_source_text() {
        let table = RouteMappingTable::default_table().unwrap();
        let configs: Vec<_> = table.mappings().iter().map(RouteMapping::to_config).collect();
        assert_eq!(configs, default_mappings());
    }
}
