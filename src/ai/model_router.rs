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

//! Task-based language model selection.
//!
//! A task type (free text such as `"rectification"` or
//! `"chart explanation"`) is lower-cased and matched against an ordered list
//! of keyword rules; the first rule with a keyword contained in the task
//! type selects the model. Tasks no rule matches use the default model. If
//! the chosen model is disabled the fallback model is used instead.

use log::debug;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const TOKENS_PER_MILLION: f64 = 1_000_000.0;

/// Errors from model routing.
#[derive(Debug, thiserror::Error)]
pub enum ModelRoutingError {
    #[error("Task type must not be empty")]
    EmptyTaskType,

    #[error("{context} references unknown model '{model}'")]
    UnknownModel { model: String, context: String },

    #[error("No enabled model is available for task '{task_type}'")]
    NoModelAvailable { task_type: String },
}

/// A model and its per-million-token prices in USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelSpec {
    pub name: String,
    pub input_cost_per_million: f64,
    pub output_cost_per_million: f64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl ModelSpec {
    pub fn new(name: &str, input_cost_per_million: f64, output_cost_per_million: f64) -> Self {
        Self {
            name: name.to_string(),
            input_cost_per_million,
            output_cost_per_million,
            enabled: true,
        }
    }

    /// Cost in USD of a call with the given token counts.
    pub fn estimate_cost(&self, input_tokens: u64, output_tokens: u64) -> f64 {
        (input_tokens as f64 / TOKENS_PER_MILLION) * self.input_cost_per_million
            + (output_tokens as f64 / TOKENS_PER_MILLION) * self.output_cost_per_million
    }
}

/// Keywords routed to one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskRule {
    pub keywords: Vec<String>,
    pub model: String,
}

impl TaskRule {
    fn new(keywords: &[&str], model: &str) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            model: model.to_string(),
        }
    }

    fn applies_to(&self, task_type: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| task_type.contains(&keyword.to_lowercase()))
    }
}

/// Model routing configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelRoutingConfig {
    #[serde(default = "default_model_name")]
    pub default_model: String,
    #[serde(default = "default_fallback_model_name")]
    pub fallback_model: String,
    #[serde(default = "default_models")]
    pub models: Vec<ModelSpec>,
    #[serde(default = "default_rules")]
    pub rules: Vec<TaskRule>,
}

impl Default for ModelRoutingConfig {
    fn default() -> Self {
        Self {
            default_model: default_model_name(),
            fallback_model: default_fallback_model_name(),
            models: default_models(),
            rules: default_rules(),
        }
    }
}

fn default_model_name() -> String {
    "claude-3-sonnet".to_string()
}

fn default_fallback_model_name() -> String {
    "gpt-4-turbo".to_string()
}

fn default_models() -> Vec<ModelSpec> {
    vec![
        ModelSpec::new("o1-preview", 15.0, 60.0),
        ModelSpec::new("gpt-4-turbo", 10.0, 30.0),
        ModelSpec::new("claude-3-sonnet", 3.0, 15.0),
    ]
}

fn default_rules() -> Vec<TaskRule> {
    vec![
        TaskRule::new(&["rectification", "rectify", "astrological"], "o1-preview"),
        TaskRule::new(&["explanation", "interpretation", "explain"], "gpt-4-turbo"),
        TaskRule::new(&["auxiliary", "questionnaire", "summary"], "claude-3-sonnet"),
    ]
}

/// The model chosen for a task.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSelection<'a> {
    pub model: &'a ModelSpec,
    /// Index of the rule that matched, `None` for the default model
    pub rule: Option<usize>,
    pub fallback_used: bool,
}

/// Validated model routing table.
#[derive(Debug, Clone)]
pub struct ModelRouter {
    config: ModelRoutingConfig,
}

impl ModelRouter {
    /// Validate that every model referenced by the configuration exists.
    pub fn new(config: ModelRoutingConfig) -> Result<Self, ModelRoutingError> {
        let known = |name: &str| config.models.iter().any(|m| m.name == name);

        let mut references = vec![
            (config.default_model.as_str(), "defaultModel".to_string()),
            (config.fallback_model.as_str(), "fallbackModel".to_string()),
        ];
        for (i, rule) in config.rules.iter().enumerate() {
            references.push((rule.model.as_str(), format!("rules[{i}]")));
        }

        if let Some((model, context)) = references.into_iter().find(|(model, _)| !known(model)) {
            return Err(ModelRoutingError::UnknownModel {
                model: model.to_string(),
                context,
            });
        }

        Ok(Self { config })
    }

    pub fn config(&self) -> &ModelRoutingConfig {
        &self.config
    }

    pub fn models(&self) -> &[ModelSpec] {
        &self.config.models
    }

    fn model(&self, name: &str) -> Option<&ModelSpec> {
        self.config.models.iter().find(|m| m.name == name)
    }

    /// Select the model for `task_type`.
    pub fn select(&self, task_type: &str) -> Result<ModelSelection<'_>, ModelRoutingError> {
        let task = task_type.trim().to_lowercase();
        if task.is_empty() {
            return Err(ModelRoutingError::EmptyTaskType);
        }

        let (rule, preferred) = self
            .config
            .rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.applies_to(&task))
            .map(|(i, rule)| (Some(i), rule.model.as_str()))
            .unwrap_or((None, self.config.default_model.as_str()));

        if let Some(model) = self.model(preferred).filter(|m| m.enabled) {
            debug!("Task '{task}' routed to model '{}'", model.name);
            return Ok(ModelSelection {
                model,
                rule,
                fallback_used: false,
            });
        }

        match self.model(&self.config.fallback_model).filter(|m| m.enabled) {
            Some(model) => {
                debug!(
                    "Model '{preferred}' unavailable for task '{task}', falling back to '{}'",
                    model.name
                );
                Ok(ModelSelection {
                    model,
                    rule,
                    fallback_used: true,
                })
            }
            None => Err(ModelRoutingError::NoModelAvailable {
                task_type: task_type.to_string(),
            }),
        }
    }
}
