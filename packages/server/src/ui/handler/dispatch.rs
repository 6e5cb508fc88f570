//! Message Router: decodes inbound frames and dispatches them by `type`.
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - dispatch_frame() による set_role / join_room / translation / パススルーの振り分け
//! - 退出通知 announce_departures()
//!
//! ### なぜこのテストが必要か
//! - 送信者自身にメッセージが戻らないこと、ルーム外に漏れないことを保証
//! - 不正なメッセージが接続や他の接続に影響しないことを保証
//! - サーバー所有のキー（sender_id など）をクライアントが偽装できないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：FAMILY1 シナリオ（参加通知、ルーム内の翻訳中継）
//! - 異常系：不正な JSON、必須フィールド欠落、空のロール
//! - エッジケース：未知の type、ルーム移動時の退出通知

use serde_json::{Map, Value};

use crate::{
    domain::{ConnectionId, LeftRoom},
    infrastructure::dto::websocket::{
        ClientMessage, InboundMessage, RelayedTranslation, RoomPresence, ServerMessage,
        TranslationPayload, strip_server_owned_keys,
    },
    ui::state::AppState,
    usecase::{JoinOutcome, SenderProfile},
};

/// Handle one inbound text frame from `sender`.
///
/// Errors never escape: undecodable or invalid messages are logged and
/// dropped, and the connection stays open.
pub async fn dispatch_frame(state: &AppState, sender: &ConnectionId, text: &str) {
    let message = match InboundMessage::parse(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Dropping message from {}: {}", sender, e);
            return;
        }
    };

    match message {
        InboundMessage::Known(ClientMessage::SetRole { role }) => {
            handle_set_role(state, sender, role).await;
        }
        InboundMessage::Known(ClientMessage::JoinRoom { room, username }) => {
            handle_join_room(state, sender, room, username).await;
        }
        InboundMessage::Known(ClientMessage::Translation(payload)) => {
            relay_translation(state, sender, payload).await;
        }
        InboundMessage::Passthrough(object) => {
            relay_passthrough(state, sender, object).await;
        }
    }
}

async fn handle_set_role(state: &AppState, sender: &ConnectionId, role: String) {
    let role = match state.set_role_usecase.execute(sender, role).await {
        Ok(role) => role,
        Err(e) => {
            tracing::warn!("Dropping set_role from {}: {}", sender, e);
            return;
        }
    };

    let confirmed = ServerMessage::RoleConfirmed {
        role: role.as_str().to_string(),
        timestamp: state.now_rfc3339(),
    };
    if let Some(json) = encode(&confirmed) {
        state.broadcaster.send_to(sender, &json).await;
    }
}

async fn handle_join_room(state: &AppState, sender: &ConnectionId, room: String, username: String) {
    let outcome = match state.join_room_usecase.execute(sender, room, username).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!("Dropping join_room from {}: {}", sender, e);
            return;
        }
    };

    if let Some(left) = &outcome.left {
        announce_departure(state, left).await;
    }
    announce_arrival(state, outcome).await;
}

async fn announce_arrival(state: &AppState, outcome: JoinOutcome) {
    let joined = ServerMessage::UserJoined(RoomPresence {
        username: outcome.display_name.as_str().to_string(),
        room: outcome.room_id.as_str().to_string(),
        participants: outcome.participants,
        timestamp: state.now_rfc3339(),
    });
    if let Some(json) = encode(&joined) {
        state.broadcaster.send_to_many(outcome.others, &json).await;
    }
}

async fn announce_departure(state: &AppState, left: &LeftRoom) {
    if left.remaining.is_empty() {
        return;
    }

    let message = ServerMessage::UserLeft(RoomPresence {
        username: left.member.display_name.as_str().to_string(),
        room: left.room_id.as_str().to_string(),
        participants: left.remaining_count(),
        timestamp: state.now_rfc3339(),
    });
    if let Some(json) = encode(&message) {
        state
            .broadcaster
            .send_to_many(left.remaining.clone(), &json)
            .await;
    }
}

/// Notify the remaining members of every room a disconnected client left.
pub async fn announce_departures(state: &AppState, left_rooms: &[LeftRoom]) {
    for left in left_rooms {
        announce_departure(state, left).await;
    }
}

async fn relay_translation(state: &AppState, sender: &ConnectionId, payload: TranslationPayload) {
    let Some(profile) = sender_profile(state, sender).await else {
        return;
    };

    let relayed = ServerMessage::Translation(RelayedTranslation {
        original: payload.original,
        translation: payload.translation,
        from: payload.from,
        to: payload.to,
        username: profile.username().map(str::to_string),
        sender_id: profile.id.as_str().to_string(),
        sender_role: profile.role.as_str().to_string(),
        timestamp: state.now_rfc3339(),
        extra: strip_server_owned_keys(payload.extra),
    });

    if let Some(json) = encode(&relayed) {
        let receipt = state.relay_message_usecase.deliver(&profile, &json).await;
        tracing::debug!(
            "Translation from {} relayed to {} clients ({:?})",
            sender,
            receipt.delivered,
            receipt.scope
        );
    }
}

async fn relay_passthrough(state: &AppState, sender: &ConnectionId, mut object: Map<String, Value>) {
    let Some(profile) = sender_profile(state, sender).await else {
        return;
    };

    object.insert(
        "sender_id".to_string(),
        Value::String(profile.id.as_str().to_string()),
    );
    object.insert("timestamp".to_string(), Value::String(state.now_rfc3339()));

    match serde_json::to_string(&object) {
        Ok(json) => {
            let delivered = state.broadcaster.broadcast_to_others(sender, &json).await;
            tracing::debug!("Passthrough from {} relayed to {} clients", sender, delivered);
        }
        Err(e) => tracing::error!("Failed to encode passthrough from {}: {}", sender, e),
    }
}

async fn sender_profile(state: &AppState, sender: &ConnectionId) -> Option<SenderProfile> {
    let profile = state.relay_message_usecase.sender_profile(sender).await;
    if profile.is_none() {
        tracing::warn!("Dropping message from unregistered connection {}", sender);
    }
    profile
}

fn encode(message: &ServerMessage) -> Option<String> {
    message
        .to_json()
        .inspect_err(|e| tracing::error!("Failed to encode server message: {}", e))
        .ok()
}
