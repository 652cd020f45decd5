use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use newsdesk_runner::{AssistantSession, Config};

pub mod api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "newsdesk_web=debug,newsdesk_runner=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Newsdesk web server...");

    let config = Config::load()?;

    tracing::info!("Connecting to assistant service at {}", config.base_url);

    let session = AssistantSession::from_config(&config)
        .await
        .context("Failed to connect to the assistant service")?;

    if session.tools().is_empty() {
        tracing::warn!("NEWS_API_KEY not set; summaries will run without news lookups");
    }

    // Cancelled on shutdown so in-flight waits end promptly
    let shutdown = CancellationToken::new();
    let app = api::create_router(api::AppState::new(session, shutdown.clone()));

    // Get bind address
    let addr =
        std::env::var("NEWSDESK_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Shutting down");
            }
            shutdown.cancel();
        })
        .await
        .context("Failed to start server")?;

    Ok(())
}
