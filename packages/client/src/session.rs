//! WebSocket client session management.

use futures_util::{Sink, SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, protocol::Message},
};

use dashka_server::infrastructure::dto::websocket::{ClientMessage, ServerMessage};

use crate::error::ClientError;

use super::{
    domain::{handshake_messages, translation_message},
    formatter::MessageFormatter,
    translator::Translator,
    ui::redisplay_prompt,
};

/// Everything one session needs to know about the user.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub ws_url: String,
    pub api_url: String,
    pub username: String,
    pub room: Option<String>,
    pub role: String,
    pub from: String,
    pub to: String,
}

/// Run one WebSocket session.
///
/// Returns `Ok(())` when the user closes input, an error when the connection
/// fails or drops.
pub async fn run_client_session(
    options: &SessionOptions,
    input_rx: &mut mpsc::UnboundedReceiver<String>,
) -> Result<(), ClientError> {
    let (ws_stream, _) = connect_async(options.ws_url.as_str())
        .await
        .map_err(|e| match e {
            tungstenite::Error::Http(response) => ClientError::HandshakeRejected {
                status: response.status().as_u16(),
            },
            other => ClientError::ConnectionError(other.to_string()),
        })?;

    tracing::info!("Connected to {}", options.ws_url);

    let (mut write, mut read) = ws_stream.split();

    for message in handshake_messages(options) {
        send(&mut write, &message).await?;
    }

    match &options.room {
        Some(room) => println!(
            "\nYou are '{}' in room '{}' ({} → {}). Type a line to translate and share it. Press Ctrl+C to exit.\n",
            options.username, room, options.from, options.to
        ),
        None => println!(
            "\nYou are '{}' ({} → {}). No room given: translations go to every connected client. Press Ctrl+C to exit.\n",
            options.username, options.from, options.to
        ),
    }

    let username = options.username.clone();
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<ServerMessage>(text.as_str()) {
                        Ok(message) => MessageFormatter::format_server_message(&message),
                        Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&username);
                }
                Ok(Message::Binary(data)) => {
                    print!("{}", MessageFormatter::format_binary_message(data.len()));
                    redisplay_prompt(&username);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => {}
            }
        }
    });

    let translator = Translator::new(&options.api_url, &options.from, &options.to)?;
    let write_loop = async {
        while let Some(line) = input_rx.recv().await {
            let response = match translator.translate(&line).await {
                Ok(response) => response,
                Err(e) => {
                    // The line is not shared; keep the session alive.
                    println!("{}", e);
                    redisplay_prompt(&options.username);
                    continue;
                }
            };

            print!("{}", MessageFormatter::format_own_translation(&response));
            send(&mut write, &translation_message(&response)).await?;
            redisplay_prompt(&options.username);
        }

        let _ = write.close().await;
        Ok::<(), ClientError>(())
    };

    // Whichever side finishes first ends the session.
    tokio::select! {
        _ = &mut read_task => {
            Err(ClientError::ConnectionError("Connection lost".to_string()))
        }
        result = write_loop => {
            read_task.abort();
            result
        }
    }
}

async fn send<S>(write: &mut S, message: &ClientMessage) -> Result<(), ClientError>
where
    S: Sink<Message, Error = tungstenite::Error> + Unpin,
{
    let json = serde_json::to_string(message)
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    write
        .send(Message::text(json))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))
}
