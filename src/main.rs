//! Solace server binary.
//!
//! Loads [`AppConfig`] once, builds every component from it, and serves the
//! HTTP API until interrupted.

use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use solace::adapters::ai::{
    AnthropicConfig, AnthropicProvider, FailoverAIProvider, OpenAIConfig, OpenAIProvider,
};
use solace::adapters::crypto::{generate_key, parse_key_hex, TranscriptCipher};
use solace::adapters::http::{app_router, HttpSettings};
use solace::adapters::session_store::{spawn_reaper, InMemorySessionStore, RedisSessionStore};
use solace::application::{ConversationEngine, GeneratorSettings, ResponseGenerator};
use solace::config::{AiConfig, AiProvider, AppConfig, ConfigError, ServerConfig, StoreBackend};
use solace::ports::{AIError, AIProvider, CodecError, MessageCipher, SessionStore, StoreError};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Validation(#[from] solace::config::ValidationError),

    #[error("encryption setup failed: {0}")]
    Codec(#[from] CodecError),

    #[error("session store unavailable: {0}")]
    Store(#[from] StoreError),

    #[error("generation backend setup failed: {0}")]
    Ai(#[from] AIError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let cipher = build_cipher(&config)?;
    let store = build_store(&config).await?;
    let generator = build_generator(&config.ai)?;
    let has_backend = generator.has_backend();

    let engine = ConversationEngine::builder(store, cipher)
        .generator(generator)
        .contacts(config.crisis.contacts())
        .build();

    let app = app_router(
        &engine,
        &HttpSettings {
            request_timeout: config.server.request_timeout(),
            cors_origins: config.server.cors_origins_list(),
            verbose_errors: config.features.verbose_errors,
        },
    );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        store = engine.store_backend(),
        generation_backend = has_backend,
        "solace listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("solace stopped");
    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` overrides
/// the configured filter.
fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if server.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_cipher(config: &AppConfig) -> Result<Arc<dyn MessageCipher>, StartupError> {
    let key = match config.encryption.key_hex() {
        Some(hex_key) => parse_key_hex(hex_key)?,
        None => {
            tracing::warn!(
                "no encryption key configured, using an ephemeral key; \
                 stored transcripts will be unreadable after restart"
            );
            generate_key()?
        }
    };
    Ok(Arc::new(TranscriptCipher::new(config.encryption.key_version, &key)?))
}

async fn build_store(config: &AppConfig) -> Result<Arc<dyn SessionStore>, StartupError> {
    match config.session.store {
        StoreBackend::Memory => {
            let store = InMemorySessionStore::new(config.session.ttl());
            spawn_reaper(store.clone(), config.session.reaper_interval());
            tracing::info!(
                ttl_secs = config.session.ttl_secs,
                "using in-memory session store; transcripts are lost on restart"
            );
            Ok(Arc::new(store))
        }
        StoreBackend::Redis => {
            let store = RedisSessionStore::connect(
                &config.redis.url,
                config.session.ttl(),
                config.redis.timeout(),
            )
            .await?;
            tracing::info!(ttl_secs = config.session.ttl_secs, "using redis session store");
            Ok(Arc::new(store))
        }
    }
}

fn build_generator(ai: &AiConfig) -> Result<ResponseGenerator, StartupError> {
    let settings = GeneratorSettings {
        timeout: ai.reply_timeout(),
        ..GeneratorSettings::default()
    };

    // A primary without a key yields to whichever provider has one.
    let primary_kind = if ai.api_key(ai.primary_provider).is_some() {
        Some(ai.primary_provider)
    } else {
        [AiProvider::OpenAI, AiProvider::Anthropic]
            .into_iter()
            .find(|p| ai.api_key(*p).is_some())
    };

    let Some(primary_kind) = primary_kind else {
        tracing::warn!("no generation backend configured, replies use the local fallback");
        return Ok(ResponseGenerator::new(None, settings));
    };

    let mut provider = FailoverAIProvider::new(build_provider(ai, primary_kind)?);
    if let Some(fallback_kind) = ai.fallback_provider.filter(|p| *p != primary_kind) {
        provider = provider.with_fallback(build_provider(ai, fallback_kind)?);
    }
    tracing::info!(
        primary = ?primary_kind,
        failover = provider.has_fallback(),
        "generation backend configured"
    );

    Ok(ResponseGenerator::new(Some(Arc::new(provider)), settings))
}

fn build_provider(ai: &AiConfig, kind: AiProvider) -> Result<Arc<dyn AIProvider>, AIError> {
    let key = ai
        .api_key(kind)
        .ok_or_else(|| AIError::InvalidRequest(format!("no API key for {kind:?}")))?;

    match kind {
        AiProvider::OpenAI => {
            let mut config = OpenAIConfig::new(key)
                .with_timeout(ai.timeout())
                .with_max_retries(ai.max_retries);
            if let Some(model) = &ai.openai_model {
                config = config.with_model(model.clone());
            }
            Ok(Arc::new(OpenAIProvider::new(config)?))
        }
        AiProvider::Anthropic => {
            let mut config = AnthropicConfig::new(key)
                .with_timeout(ai.timeout())
                .with_max_retries(ai.max_retries);
            if let Some(model) = &ai.anthropic_model {
                config = config.with_model(model.clone());
            }
            Ok(Arc::new(AnthropicProvider::new(config)?))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
