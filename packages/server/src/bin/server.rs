//! Dashka translation relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin dashka-server
//! cargo run --bin dashka-server -- --host 0.0.0.0 --port 3000
//! OPENAI_API_KEY=sk-... cargo run --bin dashka-server
//! ```

use std::sync::Arc;

use clap::Parser;
use dashka_server::{
    config::ServerConfig,
    infrastructure::{
        cache::FifoTranslationCache,
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryConnectionRepository, InMemoryRoomRepository},
        translation::OpenAiTranslationProvider,
    },
    ui::{AppParts, AppState, Server},
};
use dashka_shared::{logger::setup_logger, time::SystemClock};

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Initialize dependencies in order:
    // 1. Repositories and cache
    // 2. MessagePusher
    // 3. Translation provider
    // 4. AppState (UseCases)
    // 5. Server
    let connections = Arc::new(InMemoryConnectionRepository::new());
    let rooms = Arc::new(InMemoryRoomRepository::new());
    let cache = Arc::new(FifoTranslationCache::new(config.cache_max_size));
    tracing::info!("Translation cache capacity: {}", cache.max_size());

    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    let provider = match OpenAiTranslationProvider::new(config.openai()) {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            tracing::error!("Failed to create translation provider: {}", e);
            std::process::exit(1);
        }
    };
    if config.openai().api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; /translate will answer 503");
    }

    let allow_origin = match config.allow_origin() {
        Ok(origin) => origin,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    let state = Arc::new(AppState::from_parts(AppParts {
        connections,
        rooms,
        message_pusher,
        cache,
        provider,
        clock: Arc::new(SystemClock),
    }));

    let server = Server::new(state, allow_origin);
    if let Err(e) = server.run(&config.bind_address()).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
