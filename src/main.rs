use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use journal::router::init_router;
use journal::state::init_app_state;
use journal_config::AppConfig;
use journal_observability::init_tracing;

#[derive(Parser, Debug)]
#[command(name = "journal", about = "Academic records HTTP server", version)]
struct Args {
    /// Env-file loaded before reading the environment
    #[arg(short, long, env = "CONFIG_PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => {
            dotenvy::dotenv().ok();
            AppConfig::from_env()?
        }
    };

    let _log_guard = init_tracing(config.env, config.log_dir.as_deref())?;
    tracing::info!(env = %config.env, address = %config.http.address, "starting journal");
    tracing::debug!(?config, "loaded configuration");

    let state = init_app_state(&config).await?;
    let app = init_router(state);

    let listener = tokio::net::TcpListener::bind(&config.http.address)
        .await
        .with_context(|| format!("failed to bind {}", config.http.address))?;

    tracing::info!(
        "docs available at http://{}/scalar",
        config.http.address
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
