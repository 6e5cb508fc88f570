//! WebSocket connection handler.
//!
//! Each connection runs two tasks: one reads frames and hands them to the
//! Message Router, the other drains the connection's pusher channel into the
//! socket. When either finishes the other is aborted and the connection is
//! purged from the registry and every room.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{
        ConnectInfo, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::ConnectionId,
    infrastructure::dto::websocket::ServerMessage,
    ui::{
        handler::dispatch::{announce_departures, dispatch_frame},
        state::AppState,
    },
};

const WELCOME_MESSAGE: &str = "Connected to Dashka translation relay";

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    ConnectInfo(remote_address): ConnectInfo<SocketAddr>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, remote_address))
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, remote_address: SocketAddr) {
    let (tx, rx) = mpsc::unbounded_channel();

    let connection = match state
        .connect_client_usecase
        .execute(Some(remote_address), tx)
        .await
    {
        Ok(connection) => connection,
        Err(e) => {
            tracing::error!("Rejecting connection from {}: {}", remote_address, e);
            return;
        }
    };
    let connection_id = connection.id;

    let (mut sender, receiver) = socket.split();

    // welcome goes out before any relayed traffic
    let welcome = ServerMessage::Welcome {
        client_id: connection_id.as_str().to_string(),
        message: WELCOME_MESSAGE.to_string(),
        timestamp: state.now_rfc3339(),
    };
    match welcome.to_json() {
        Ok(json) => {
            if let Err(e) = sender.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send welcome to {}: {}", connection_id, e);
                disconnect(&state, &connection_id).await;
                return;
            }
        }
        Err(e) => tracing::error!("Failed to encode welcome: {}", e),
    }

    let mut recv_task = receive_loop(receiver, state.clone(), connection_id.clone());
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    disconnect(&state, &connection_id).await;
}

async fn disconnect(state: &AppState, connection_id: &ConnectionId) {
    let left_rooms = state
        .disconnect_client_usecase
        .execute(connection_id)
        .await;
    announce_departures(state, &left_rooms).await;
}

/// Reads frames from the client and dispatches them until the socket closes.
fn receive_loop(
    mut receiver: SplitStream<WebSocket>,
    state: Arc<AppState>,
    connection_id: ConnectionId,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = receiver.next().await {
            let frame = match frame {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::warn!("WebSocket error on {}: {}", connection_id, e);
                    break;
                }
            };

            match frame {
                Message::Text(text) => {
                    tracing::debug!("Received from {}: {}", connection_id, text.as_str());
                    dispatch_frame(&state, &connection_id, text.as_str()).await;
                }
                Message::Binary(bytes) => match std::str::from_utf8(&bytes) {
                    Ok(text) => dispatch_frame(&state, &connection_id, text).await,
                    Err(_) => {
                        tracing::warn!("Dropping non-UTF-8 binary frame from {}", connection_id);
                    }
                },
                Message::Close(_) => {
                    tracing::info!("Client {} requested close", connection_id);
                    break;
                }
                // ping/pong is answered by the protocol layer
                Message::Ping(_) | Message::Pong(_) => {}
            }
        }
    })
}

/// Forwards messages queued for this client to its socket.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if sender.send(Message::Text(message.into())).await.is_err() {
                break;
            }
        }
    })
}
