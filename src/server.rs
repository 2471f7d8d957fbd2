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

use anyhow::Result;
use axum::{routing::get, Router};
use log::{error, info};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::ai::ModelRouter;
use crate::api;
use crate::config::GatewayServerConfig;
use crate::gateway::{DeprecationPhase, Gateway};
use crate::load_config_file;

pub struct GatewayServer {
    gateway: Arc<Gateway>,
    model_router: Arc<ModelRouter>,
    feature_routes: Option<Router>,
    host: String,
    port: u16,
    config_file_path: Option<String>,
}

impl GatewayServer {
    /// Create a GatewayServer from a configuration file.
    ///
    /// `port` and `phase` override the values in the file when given.
    pub fn new(
        config_path: PathBuf,
        port: Option<u16>,
        phase: Option<DeprecationPhase>,
    ) -> Result<Self> {
        let mut config = load_config_file(&config_path)?;
        if let Some(port) = port {
            config.port = port;
        }
        if let Some(phase) = phase {
            config.gateway.phase = phase;
        }
        Self::from_config(config, Some(config_path.to_string_lossy().to_string()))
    }

    /// Create a GatewayServer from an already loaded configuration.
    pub fn from_config(
        config: GatewayServerConfig,
        config_file_path: Option<String>,
    ) -> Result<Self> {
        config.validate()?;

        let table = config.gateway.build_table()?;
        info!(
            "Loaded {} legacy route mapping(s), deprecation phase '{}'",
            table.len(),
            config.gateway.phase
        );
        let gateway = Gateway::new(table, config.gateway.phase);
        let model_router = ModelRouter::new(config.model_routing)?;

        Ok(Self::from_parts(
            Arc::new(gateway),
            Arc::new(model_router),
            config.host,
            config.port,
            config_file_path,
        ))
    }

    /// Create a GatewayServer from prepared components (for use with builder)
    pub fn from_parts(
        gateway: Arc<Gateway>,
        model_router: Arc<ModelRouter>,
        host: String,
        port: u16,
        config_file_path: Option<String>,
    ) -> Self {
        Self {
            gateway,
            model_router,
            feature_routes: None,
            host,
            port,
            config_file_path,
        }
    }

    /// Register feature endpoints under `/api/v1`.
    ///
    /// Routes are given relative to the version prefix, e.g. `/chart/:id`.
    ///
    /// # Panics
    ///
    /// [`GatewayServer::router`] panics if these routes register a method on
    /// a path the gateway already serves (`GET /health`, `GET /gateway/routes`,
    /// `POST /ai/model-selection`), as axum does for any overlapping merge.
    pub fn with_feature_routes(mut self, routes: Router) -> Self {
        self.feature_routes = Some(match self.feature_routes.take() {
            Some(existing) => existing.merge(routes),
            None => routes,
        });
        self
    }

    pub fn gateway(&self) -> &Arc<Gateway> {
        &self.gateway
    }

    pub fn model_router(&self) -> &Arc<ModelRouter> {
        &self.model_router
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// The complete application, gateway included.
    pub fn router(&self) -> Router {
        build_app(
            self.gateway.clone(),
            self.model_router.clone(),
            self.feature_routes.clone(),
        )
    }

    #[allow(clippy::print_stdout)]
    pub async fn run(self) -> Result<()> {
        println!("Starting Rectifier Gateway");
        if let Some(config_file) = &self.config_file_path {
            println!("  Config file: {config_file}");
        }
        println!("  API Port: {}", self.port);
        println!("  Deprecation phase: {}", self.gateway.phase());
        info!("Initializing Rectifier Gateway");

        let app = self.router();

        let addr = format!("{}:{}", self.host, self.port);
        info!("Starting web API on {addr}");
        info!("API v1 available at http://{addr}/api/v1/");
        info!("Swagger UI available at http://{addr}/api/v1/docs/");

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Rectifier Gateway stopped");
        Ok(())
    }
}

/// Build the application router with the gateway in front of it.
///
/// Request tracing sits inside the gateway and records the canonical path.
/// Redirects and `410` responses never reach it; the gateway logs those
/// itself. CORS sits outside so every response carries its headers.
pub fn build_app(
    gateway: Arc<Gateway>,
    model_router: Arc<ModelRouter>,
    feature_routes: Option<Router>,
) -> Router {
    let openapi_v1 = api::ApiDocV1::openapi();

    let v1_router = api::build_v1_router(gateway.clone(), model_router, feature_routes);

    let app = Router::new()
        .route("/api/versions", get(api::list_api_versions))
        .nest("/api/v1", v1_router)
        .merge(SwaggerUi::new("/api/v1/docs").url("/api/v1/openapi.json", openapi_v1))
        .layer(TraceLayer::new_for_http());

    gateway.wrap(app).layer(CorsLayer::permissive())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutting down Rectifier Gateway");
}
