//! Dissertation Assistant HTTP server.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dissertation_assistant::adapters::ai::{OpenAIConfig, OpenAIImageGenerator, OpenAIProvider};
use dissertation_assistant::adapters::http::{app_router, PromptAppState};
use dissertation_assistant::adapters::storage::RedisKeyValueStore;
use dissertation_assistant::application::{
    ClearConversationHandler, SubmitPromptHandler, UserLocks,
};
use dissertation_assistant::config::{AppConfig, ConfigError, ValidationError};
use dissertation_assistant::ports::KeyValueStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate().map_err(ConfigError::from)?;

    let store: Arc<dyn KeyValueStore> =
        Arc::new(RedisKeyValueStore::connect(&config.redis.url, config.redis.timeout()).await?);
    tracing::info!(url = %config.redis.redacted_url(), "connected to redis");

    let api_key = config
        .ai
        .api_key()
        .ok_or(ValidationError::MissingRequired("AI__OPENAI_API_KEY"))?;
    let chat_config = OpenAIConfig::from_secret(api_key)
        .with_model(&config.ai.model)
        .with_base_url(&config.ai.base_url)
        .with_timeout(config.ai.timeout());

    let locks = Arc::new(UserLocks::new());
    let mut submit_prompt = SubmitPromptHandler::new(
        Arc::clone(&store),
        Arc::new(OpenAIProvider::new(chat_config.clone())?),
        Arc::clone(&locks),
    )
    .with_sampling(config.ai.sampling())
    .with_retention(config.conversation.retention());

    if config.image.enabled {
        let image_config = chat_config.with_model(&config.image.model);
        let generator = OpenAIImageGenerator::new(image_config, &config.image.size)?;
        submit_prompt = submit_prompt.with_image_generator(Arc::new(generator));
    }

    tracing::info!(
        model = %config.ai.model,
        images = config.image.enabled,
        max_history_turns = config.conversation.max_history_turns,
        "prompt handler ready"
    );

    let state = PromptAppState::new(
        submit_prompt,
        ClearConversationHandler::new(store, locks),
    );
    let app = app_router(state, &config.server.cors_origins_list());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "dissertation assistant listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` wins over
/// the configured level.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = wait_for_signal(tokio::signal::ctrl_c(), "ctrl-c");

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}

/// Resolves when `signal` fires. If the listener could not be installed the
/// failure is logged and this never resolves.
async fn wait_for_signal<F, E>(signal: F, name: &'static str)
where
    F: std::future::Future<Output = Result<(), E>>,
    E: std::fmt::Display,
{
    if let Err(e) = signal.await {
        tracing::error!(error = %e, signal = name, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
