#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Scheduler REST API server with Negotiate (SPNEGO/Kerberos) authentication.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::{Json, Router, routing::get};
use clap::Parser;
use tokio_util::sync::CancellationToken;

use api_gateway::ApiGateway;
use authn_sdk::SecurityRealm;
use sched_auth::Authenticated;
use sched_security::Subject;
use static_realm_plugin::StaticRealm;

use crate::config::{LoggingConfig, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "scheduler-api-server", version, about)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;

    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    init_logging(&config.logging, cli.json_logs);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_addr = %config.api_gateway.bind_addr,
        "Starting scheduler API server"
    );

    let gateway = build_gateway(&config)?;
    let router = gateway.build_router(api_routes())?;

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
        }
        on_signal.cancel();
    });

    gateway.serve(router, cancel).await
}

fn init_logging(config: &LoggingConfig, json_logs: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.filter));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json_logs || config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_gateway(config: &ServerConfig) -> Result<ApiGateway> {
    let realm = if config.api_gateway.auth_disabled {
        None
    } else {
        let realm: Arc<dyn SecurityRealm> =
            Arc::new(StaticRealm::from_config(&config.static_realm)?);
        Some(realm)
    };
    Ok(ApiGateway::new(config.api_gateway.clone(), realm))
}

fn api_routes() -> Router {
    Router::new().route("/api/whoami", get(whoami))
}

async fn whoami(Authenticated(subject): Authenticated) -> Json<Subject> {
    Json(subject)
}
