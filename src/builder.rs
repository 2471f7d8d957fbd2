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

use axum::Router;
use std::sync::Arc;

use crate::ai::{ModelRouter, ModelRoutingConfig};
use crate::config::GatewaySettings;
use crate::gateway::{DeprecationPhase, Gateway, RouteMappingConfig};
use crate::server::GatewayServer;

/// Builder for creating a GatewayServer programmatically
pub struct GatewayServerBuilder {
    settings: GatewaySettings,
    model_routing: ModelRoutingConfig,
    feature_routes: Option<Router>,
    port: u16,
    host: String,
}

impl Default for GatewayServerBuilder {
    fn default() -> Self {
        Self {
            settings: GatewaySettings::default(),
            model_routing: ModelRoutingConfig::default(),
            feature_routes: None,
            port: 8080,
            host: "127.0.0.1".to_string(),
        }
    }
}

impl GatewayServerBuilder {
    /// Create a new GatewayServerBuilder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_phase(mut self, phase: DeprecationPhase) -> Self {
        self.settings.phase = phase;
        self
    }

    /// Append a mapping, evaluated after the ones already added
    pub fn with_mapping(mut self, pattern: impl Into<String>, target: impl Into<String>) -> Self {
        self.settings
            .mappings
            .push(RouteMappingConfig::new(pattern, target));
        self
    }

    /// Disable the built-in legacy mappings so only added mappings apply
    pub fn without_default_mappings(mut self) -> Self {
        self.settings.use_default_mappings = false;
        self
    }

    pub fn with_model_routing(mut self, config: ModelRoutingConfig) -> Self {
        self.model_routing = config;
        self
    }

    /// Register feature endpoints under `/api/v1`
    ///
    /// See [`GatewayServer::with_feature_routes`] for the paths these must
    /// not overlap.
    pub fn with_feature_routes(mut self, routes: Router) -> Self {
        self.feature_routes = Some(match self.feature_routes.take() {
            Some(existing) => existing.merge(routes),
            None => routes,
        });
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Build the GatewayServer
    pub fn build(self) -> anyhow::Result<GatewayServer> {
        let table = self.settings.build_table()?;
        let gateway = Gateway::new(table, self.settings.phase);
        let model_router = ModelRouter::new(self.model_routing)?;

        let server = GatewayServer::from_parts(
            Arc::new(gateway),
            Arc::new(model_router),
            self.host,
            self.port,
            None,
        );

        Ok(match self.feature_routes {
            Some(routes) => server.with_feature_routes(routes),
            None => server,
        })
    }
}
