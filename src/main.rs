use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vendor_api_rust::config::AppConfig;
use vendor_api_rust::vault::AwsSecretsManager;
use vendor_api_rust::{app, AppState};

#[derive(Parser)]
#[command(name = "vendor-api-rust", about = "Vendor parts API server")]
struct Args {
    #[arg(long, help = "Interface to bind (overrides API_HOST)")]
    host: Option<String>,

    #[arg(long, help = "Port to listen on (overrides API_PORT / PORT)")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up AWS_* and VAULT_* settings
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = AppConfig::from_env();
    if let Some(host) = args.host {
        config.api.host = host;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }
    info!(
        environment = ?config.environment,
        secret.name = %config.vault.secret_name,
        region = %config.vault.region,
        propagate_errors = config.api.propagate_errors,
        "starting vendor API"
    );

    let vault = Arc::new(AwsSecretsManager::new(&config.vault).await);
    let bind_addr = config.api.bind_addr();
    let state = AppState::new(vault, config.database, config.api);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}
