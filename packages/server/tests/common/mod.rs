//! Shared helpers for the server integration tests.
//!
//! The real router is served in-process on an ephemeral port; clients talk to
//! it over actual TCP with tokio-tungstenite and reqwest.

#![allow(dead_code)]

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashka_server::{
    domain::{LanguageCode, ProviderTranslation, TranslationError, TranslationProvider},
    infrastructure::{
        cache::FifoTranslationCache,
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryConnectionRepository, InMemoryRoomRepository},
    },
    ui::{AppParts, AppState, Server},
};
use dashka_shared::time::SystemClock;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};
use tower_http::cors::AllowOrigin;

pub const RECV_TIMEOUT: Duration = Duration::from_secs(3);
pub const SILENCE_WINDOW: Duration = Duration::from_millis(300);

/// Provider that answers locally and counts calls.
#[derive(Default)]
pub struct StubProvider {
    pub translate_calls: AtomicUsize,
}

#[async_trait]
impl TranslationProvider for StubProvider {
    async fn translate(
        &self,
        text: &str,
        _source: &LanguageCode,
        target: &LanguageCode,
    ) -> Result<ProviderTranslation, TranslationError> {
        self.translate_calls.fetch_add(1, Ordering::SeqCst);
        Ok(ProviderTranslation {
            translated_text: format!("[{}] {}", target, text),
            confidence: 0.95,
            provider: "stub".to_string(),
        })
    }

    async fn detect_language(&self, _text: &str) -> Result<String, TranslationError> {
        Ok("DE".to_string())
    }

    fn is_configured(&self) -> bool {
        true
    }
}

pub struct TestServer {
    pub port: u16,
    pub provider: Arc<StubProvider>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        let provider = Arc::new(StubProvider::default());
        let state = Arc::new(AppState::from_parts(AppParts {
            connections: Arc::new(InMemoryConnectionRepository::new()),
            rooms: Arc::new(InMemoryRoomRepository::new()),
            message_pusher: Arc::new(WebSocketMessagePusher::new()),
            cache: Arc::new(FifoTranslationCache::new(NonZeroUsize::new(100).unwrap())),
            provider: provider.clone(),
            clock: Arc::new(SystemClock),
        }));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let server = Server::new(state, AllowOrigin::any());
        tokio::spawn(async move {
            server
                .serve(listener, async {
                    let _ = shutdown_rx.await;
                })
                .await
                .unwrap();
        });

        Self {
            port,
            provider,
            shutdown: Some(shutdown_tx),
        }
    }

    pub fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}/ws", self.port)
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

pub struct TestClient {
    pub client_id: String,
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    /// Connect and consume the welcome message.
    pub async fn connect(server: &TestServer) -> Self {
        let (stream, _) = connect_async(server.ws_url()).await.unwrap();
        let mut client = Self {
            client_id: String::new(),
            stream,
        };
        let welcome = client.recv().await;
        assert_eq!(welcome["type"], "welcome");
        client.client_id = welcome["client_id"].as_str().unwrap().to_string();
        client
    }

    pub async fn send_json(&mut self, value: Value) {
        self.send_text(&value.to_string()).await;
    }

    pub async fn send_text(&mut self, text: &str) {
        self.stream.send(Message::text(text.to_string())).await.unwrap();
    }

    /// Next JSON message, failing the test after a timeout.
    pub async fn recv(&mut self) -> Value {
        loop {
            let frame = tokio::time::timeout(RECV_TIMEOUT, self.stream.next())
                .await
                .expect("timed out waiting for a message")
                .expect("stream ended")
                .unwrap();
            if let Message::Text(text) = frame {
                return serde_json::from_str(text.as_str()).unwrap();
            }
        }
    }

    /// Asserts nothing arrives within a short window.
    pub async fn expect_silence(&mut self) {
        if let Ok(Some(Ok(Message::Text(text)))) =
            tokio::time::timeout(SILENCE_WINDOW, self.stream.next()).await
        {
            panic!("unexpected message: {}", text.as_str());
        }
    }

    /// set_role → role_confirmed round trip; proves earlier frames were processed.
    pub async fn sync(&mut self, role: &str) {
        self.send_json(serde_json::json!({"type": "set_role", "role": role}))
            .await;
        let confirmed = self.recv().await;
        assert_eq!(confirmed["type"], "role_confirmed");
    }

    pub async fn close(mut self) {
        self.stream.close(None).await.unwrap();
    }
}
