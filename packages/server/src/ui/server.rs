//! Server execution logic.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use super::{
    handler::{
        detect_language, health_check, languages, list_rooms, not_found, room_detail,
        service_descriptor, stats, translate, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Translation relay server
///
/// # Example
///
/// ```ignore
/// let state = Arc::new(AppState::from_parts(parts));
/// let server = Server::new(state, AllowOrigin::any());
/// server.run("127.0.0.1:8080").await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
    allow_origin: AllowOrigin,
}

impl Server {
    pub fn new(state: Arc<AppState>, allow_origin: AllowOrigin) -> Self {
        Self {
            state,
            allow_origin,
        }
    }

    /// Build the HTTP + WebSocket router
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(self.allow_origin.clone())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/", get(service_descriptor))
            .route("/health", get(health_check))
            .route("/stats", get(stats))
            .route("/translate", post(translate))
            .route("/languages", get(languages))
            .route("/detect-language", post(detect_language))
            .route("/api/rooms", get(list_rooms))
            .route("/api/rooms/{room_id}", get(room_detail))
            .fallback(not_found)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.state.clone())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown)
        .await
    }

    /// Bind `bind_address` and serve until Ctrl+C / SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, bind_address: &str) -> Result<(), Box<dyn std::error::Error>> {
        let listener = TcpListener::bind(bind_address).await?;

        tracing::info!("Translation relay listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_address);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}
