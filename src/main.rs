use std::net::SocketAddr;

use anyhow::Context;
use dotenvy::dotenv;
use officehub::router::init_router;
use officehub::state::init_app_state;
use officehub_config::AppConfig;
use officehub_observability::init_logging;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    // Dropping the guard stops the file writer, so hold it for the whole run.
    let _log_guard = match init_logging(&config.server) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Failed to initialise logging: {err:#}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(config).await {
        tracing::error!(error = ?err, "Server exited with error");
        std::process::exit(1);
    }
}

async fn run(config: AppConfig) -> anyhow::Result<()> {
    let state = init_app_state(&config).await?;
    let app = init_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        "Server listening; Swagger UI at /swagger-ui"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
