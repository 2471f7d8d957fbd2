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

//! Configuration field validation.
//!
//! Every config struct uses serde defaults, so a misspelled key such as
//! `log_level` or `mapping` would be silently ignored. This module walks the
//! raw document before deserialization and reports every key it does not know.

use std::collections::HashSet;

use serde_yaml::{Mapping, Value};

/// Validation error for unknown configuration fields.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{0}")]
    UnknownField(String),

    #[error("Multiple validation errors:\n{}", .0.join("\n"))]
    Multiple(Vec<String>),
}

const SERVER_FIELDS: &[&str] = &["host", "port", "logLevel", "gateway", "modelRouting"];

const GATEWAY_FIELDS: &[&str] = &["phase", "useDefaultMappings", "mappings"];

const MAPPING_FIELDS: &[&str] = &["pattern", "target"];

const MODEL_ROUTING_FIELDS: &[&str] = &["defaultModel", "fallbackModel", "models", "rules"];

const MODEL_FIELDS: &[&str] = &[
    "name",
    "inputCostPerMillion",
    "outputCostPerMillion",
    "enabled",
];

const RULE_FIELDS: &[&str] = &["keywords", "model"];

/// Validate a parsed configuration document and report all unknown fields.
pub fn validate_config(value: &Value) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    if let Some(map) = value.as_mapping() {
        validate_fields(map, SERVER_FIELDS, "server configuration", &mut errors);

        if let Some(gateway) = map.get("gateway").and_then(Value::as_mapping) {
            validate_gateway(gateway, &mut errors);
        }

        if let Some(routing) = map.get("modelRouting").and_then(Value::as_mapping) {
            validate_model_routing(routing, &mut errors);
        }
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(ValidationError::UnknownField(errors.remove(0))),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

fn validate_fields(map: &Mapping, valid_fields: &[&str], context: &str, errors: &mut Vec<String>) {
    let valid_set: HashSet<&str> = valid_fields.iter().copied().collect();

    for key in map.keys() {
        if let Some(key_str) = key.as_str() {
            if !valid_set.contains(key_str) {
                errors.push(format!(
                    "Unknown field '{key_str}' in {context}. Valid fields: {valid_fields:?}"
                ));
            }
        }
    }
}

fn validate_gateway(gateway: &Mapping, errors: &mut Vec<String>) {
    validate_fields(gateway, GATEWAY_FIELDS, "gateway", errors);

    for (i, mapping) in sequence_of_maps(gateway.get("mappings")) {
        let pattern = mapping
            .get("pattern")
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        let context = format!("gateway.mappings[{i}] (pattern={pattern})");
        validate_fields(mapping, MAPPING_FIELDS, &context, errors);
    }
}

fn validate_model_routing(routing: &Mapping, errors: &mut Vec<String>) {
    validate_fields(routing, MODEL_ROUTING_FIELDS, "modelRouting", errors);

    for (i, model) in sequence_of_maps(routing.get("models")) {
        let name = model.get("name").and_then(Value::as_str).unwrap_or("unknown");
        let context = format!("modelRouting.models[{i}] (name={name})");
        validate_fields(model, MODEL_FIELDS, &context, errors);
    }

    for (i, rule) in sequence_of_maps(routing.get("rules")) {
        let context = format!("modelRouting.rules[{i}]");
        validate_fields(rule, RULE_FIELDS, &context, errors);
    }
}

fn sequence_of_maps(value: Option<&Value>) -> impl Iterator<Item = (usize, &Mapping)> {
    value
        .and_then(Value::as_sequence)
        .into_iter()
        .flatten()
        .enumerate()
        .filter_map(|(i, item)| item.as_mapping().map(|map| (i, map)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Value {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_valid_config_passes() {
        let value = parse(
            r#"
            host: 0.0.0.0
            port: 8080
            logLevel: info
            gateway:
              phase: redirect
              useDefaultMappings: true
              mappings:
                - pattern: "/v0/(.+)"
                  target: "/api/v1/$1"
            modelRouting:
              defaultModel: claude-3-sonnet
              fallbackModel: gpt-4-turbo
              models:
                - name: claude-3-sonnet
                  inputCostPerMillion: 3.0
                  outputCostPerMillion: 15.0
                  enabled: true
              rules:
                - keywords: [summary]
                  model: claude-3-sonnet
            "#,
        );
        assert!(validate_config(&value).is_ok());
    }

    #[test]
    fn test_empty_document_passes() {
        assert!(validate_config(&Value::Null).is_ok());
    }

    #[test]
    fn test_snake_case_log_level_rejected() {
        let value = parse("log_level: debug\n");
        let err = validate_config(&value).unwrap_err().to_string();
        assert!(err.contains("log_level"));
        assert!(err.contains("server configuration"));
    }

    #[test]
    fn test_unknown_gateway_field_rejected() {
        let value = parse(
            r#"
            gateway:
              phase: gone
              mapping: []
            "#,
        );
        let err = validate_config(&value).unwrap_err().to_string();
        assert!(err.contains("'mapping'"));
        assert!(err.contains("in gateway"));
    }

    #[test]
    fn test_unknown_mapping_field_names_pattern() {
        let value = parse(
            r#"
            gateway:
              mappings:
                - pattern: "/old"
                  destination: "/api/v1/new"
            "#,
        );
        let err = validate_config(&value).unwrap_err().to_string();
        assert!(err.contains("destination"));
        assert!(err.contains("gateway.mappings[0] (pattern=/old)"));
    }

    #[test]
    fn test_unknown_model_and_rule_fields_collected() {
        let value = parse(
            r#"
            modelRouting:
              models:
                - name: gpt-4-turbo
                  costPerToken: 1.0
              rules:
                - keyword: [explain]
                  model: gpt-4-turbo
            "#,
        );
        match validate_config(&value) {
            Err(ValidationError::Multiple(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].contains("costPerToken"));
                assert!(errors[1].contains("modelRouting.rules[0]"));
            }
            other => panic!("expected multiple errors, got {other:?}"),
        }
    }
}
