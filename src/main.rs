use std::sync::Arc;

use anyhow::{Context, Result};
use study_spark::{config::resolve_api_key, routes, AppState, Config, GeminiClient};
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    tracing::info!("Starting Study Spark...");

    let config = Config::from_env()?;

    // Nothing else can work without a model credential
    let api_key = match resolve_api_key(&config.secrets_file, |name| std::env::var(name).ok()) {
        Ok(key) => key,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e.into());
        }
    };

    let gemini = GeminiClient::new(api_key, &config.gateway).context("Failed to build model API client")?;
    tracing::info!(
        "Using model {} (timeout {}s)",
        config.gateway.model,
        config.gateway.timeout.as_secs()
    );

    let state = AppState::new(config.clone(), Arc::new(gemini));
    state
        .sessions
        .spawn_reaper(config.session.ttl, config.session.reap_interval);

    let app = routes::create_router(state).layer(
        ServiceBuilder::new().layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        ),
    );

    let addr = config.server_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "study_spark=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
