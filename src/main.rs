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

// Allow println! in main.rs for CLI user-facing output (validate, rewrite commands)
#![allow(clippy::print_stdout)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use rectifier_gateway::gateway::{Action, DeprecationPhase, Gateway};
use rectifier_gateway::{
    load_config_file, save_config_file, GatewayServer, GatewayServerConfig,
};

#[derive(Parser)]
#[command(name = "rectifier-gateway")]
#[command(about = "API gateway that rewrites and retires legacy Birth Time Rectifier paths")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nrustc: ",
    env!("GATEWAY_RUSTC_VERSION"),
))]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the configuration file
    #[arg(short, long, default_value = "config/gateway.yaml", global = true)]
    config: PathBuf,

    /// Override the server port
    #[arg(short, long, global = true)]
    port: Option<u16>,

    /// Override the deprecation phase (active-with-warning, redirect, gone)
    #[arg(long, global = true)]
    phase: Option<DeprecationPhase>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the server (default if no subcommand specified)
    Run,

    /// Validate a configuration file without starting the server
    Validate {
        /// Show resolved configuration with environment variables expanded
        #[arg(long)]
        show_resolved: bool,
    },

    /// Show how a request path would be handled
    Rewrite {
        /// Request path, e.g. /chart/42
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Validate { show_resolved }) => validate_config(&cli.config, show_resolved),
        Some(Commands::Rewrite { path }) => explain_rewrite(&cli.config, cli.phase, &path),
        Some(Commands::Run) | None => run_server(cli.config, cli.port, cli.phase).await,
    }
}

/// Load `.env` from the directory of the config file, if present.
fn load_env_file(config_path: &Path) -> bool {
    let Some(config_dir) = config_path.parent() else {
        return false;
    };
    let env_file = config_dir.join(".env");
    if !env_file.exists() {
        return false;
    }
    match dotenvy::from_path(&env_file) {
        Ok(_) => true,
        Err(e) => {
            eprintln!("Warning: Failed to load .env file: {e}");
            false
        }
    }
}

/// Install the tracing subscriber. `RUST_LOG` takes precedence over `log_level`.
fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("Warning: Failed to initialize logging: {e}");
    }
}

/// Run the gateway server
async fn run_server(
    config_path: PathBuf,
    port_override: Option<u16>,
    phase_override: Option<DeprecationPhase>,
) -> Result<()> {
    let env_file_loaded = load_env_file(&config_path);

    // Check if config file exists, create default if it doesn't
    let config = if !config_path.exists() {
        init_logging("info");

        warn!(
            "Config file '{}' not found. Creating default configuration.",
            config_path.display()
        );

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut default_config = GatewayServerConfig::default();
        if let Some(port) = port_override {
            default_config.port = port;
            info!("Using command line port {port} in default configuration");
        }

        save_config_file(&default_config, &config_path)?;
        info!(
            "Default configuration created at: {}",
            config_path.display()
        );

        default_config
    } else {
        let config = load_config_file(&config_path)?;
        init_logging(&config.log_level);
        config
    };

    info!("Starting Rectifier Gateway");
    debug!("Debug logging is enabled");

    if env_file_loaded {
        info!("Loaded environment variables from .env file");
    }
    info!("Config file: {}", config_path.display());

    let mut config = config;
    if let Some(port) = port_override {
        config.port = port;
    }
    if let Some(phase) = phase_override {
        info!("Using command line deprecation phase '{phase}'");
        config.gateway.phase = phase;
    }
    info!("Port: {}", config.port);
    debug!("Server configuration: {config:?}");

    let server = GatewayServer::from_config(
        config,
        Some(config_path.to_string_lossy().to_string()),
    )?;
    server.run().await
}

/// Validate a configuration file
fn validate_config(config_path: &Path, show_resolved: bool) -> Result<()> {
    println!("Validating configuration: {}", config_path.display());
    println!();

    if !config_path.exists() {
        println!(
            "[ERROR] Configuration file not found: {}",
            config_path.display()
        );
        std::process::exit(1);
    }

    load_env_file(config_path);

    match load_config_file(config_path) {
        Ok(config) => {
            println!("[OK] Configuration file is valid");
            println!();

            let mappings = config.gateway.effective_mappings();
            println!("Summary:");
            println!("  Deprecation phase: {}", config.gateway.phase);
            println!("  Route mappings: {}", mappings.len());
            println!("  Models: {}", config.model_routing.models.len());

            if show_resolved {
                println!();
                println!("Resolved server settings:");
                println!("  Host: {}", config.host);
                println!("  Port: {}", config.port);
                println!("  Log Level: {}", config.log_level);
                println!();
                println!("Route mappings (in evaluation order):");
                for (i, mapping) in mappings.iter().enumerate() {
                    println!("  [{i}] {} -> {}", mapping.pattern, mapping.target);
                }
            }

            Ok(())
        }
        Err(e) => {
            println!("[ERROR] Configuration is invalid:");
            println!("  {e}");
            std::process::exit(1);
        }
    }
}

/// Print the rewrite outcome and the action taken for `path`
fn explain_rewrite(
    config_path: &Path,
    phase_override: Option<DeprecationPhase>,
    path: &str,
) -> Result<()> {
    let mut config = if config_path.exists() {
        load_env_file(config_path);
        load_config_file(config_path)?
    } else {
        GatewayServerConfig::default()
    };
    if let Some(phase) = phase_override {
        config.gateway.phase = phase;
    }

    let gateway = Gateway::new(config.gateway.build_table()?, config.gateway.phase);
    let (outcome, action) = gateway.evaluate(path);

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    println!();
    println!("Phase: {}", gateway.phase());
    match action {
        Action::PassThrough {
            path,
            attach_warning_header,
        } => {
            println!("Action: serve {path}");
            if attach_warning_header {
                println!("  with header X-Deprecation-Warning");
            }
        }
        Action::Redirect { to, status } => {
            println!("Action: redirect to {to} ({status})");
        }
        Action::Reject { status, message } => {
            println!("Action: reject ({status})");
            println!("  {message}");
        }
    }

    Ok(())
}
