//! Message formatting utilities for client display.

use chrono::{DateTime, Local};
use dashka_server::infrastructure::dto::{
    http::TranslateResponse,
    websocket::{RelayedTranslation, RoomPresence, ServerMessage},
};

const RULE: &str = "------------------------------------------------------------";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Render any server event.
    pub fn format_server_message(message: &ServerMessage) -> String {
        match message {
            ServerMessage::Welcome {
                client_id,
                message,
                timestamp,
            } => Self::format_welcome(client_id, message, timestamp),
            ServerMessage::RoleConfirmed { role, .. } => Self::format_role_confirmed(role),
            ServerMessage::UserJoined(presence) => Self::format_user_joined(presence),
            ServerMessage::UserLeft(presence) => Self::format_user_left(presence),
            ServerMessage::Translation(translation) => Self::format_translation(translation),
        }
    }

    pub fn format_welcome(client_id: &str, message: &str, timestamp: &str) -> String {
        format!(
            "\n{} (id {}, {})\n",
            message,
            client_id,
            local_time(timestamp)
        )
    }

    pub fn format_role_confirmed(role: &str) -> String {
        format!("\nRole confirmed: {}\n", role)
    }

    pub fn format_user_joined(presence: &RoomPresence) -> String {
        format!(
            "\n+ {} joined {} at {} ({} in room)\n",
            presence.username,
            presence.room,
            local_time(&presence.timestamp),
            presence.participants
        )
    }

    pub fn format_user_left(presence: &RoomPresence) -> String {
        format!(
            "\n- {} left {} at {} ({} in room)\n",
            presence.username,
            presence.room,
            local_time(&presence.timestamp),
            presence.participants
        )
    }

    /// A translation relayed from another participant.
    pub fn format_translation(translation: &RelayedTranslation) -> String {
        let sender = translation
            .username
            .as_deref()
            .unwrap_or(&translation.sender_id);
        format!(
            "\n\n{RULE}\n@{} [{} → {}] at {}\n  {}\n  {}\n{RULE}\n",
            sender,
            translation.from,
            translation.to,
            local_time(&translation.timestamp),
            translation.original,
            translation.translation,
        )
    }

    /// Result of translating one of our own lines.
    pub fn format_own_translation(response: &TranslateResponse) -> String {
        let cache_note = if response.from_cache { ", cached" } else { "" };
        format!(
            "{} ({} → {}, {}ms{})\n",
            response.translated_text,
            response.source_language.to_ascii_uppercase(),
            response.target_language.to_ascii_uppercase(),
            response.processing_time,
            cache_note
        )
    }

    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}

/// `HH:MM:SS` in local time; unparseable input is shown as is.
fn local_time(timestamp: &str) -> String {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|_| timestamp.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn presence(participants: usize) -> RoomPresence {
        RoomPresence {
            username: "Kid".to_string(),
            room: "FAMILY1".to_string(),
            participants,
            timestamp: "2023-01-01T00:00:00.000Z".to_string(),
        }
    }

    fn relayed(username: Option<&str>) -> RelayedTranslation {
        RelayedTranslation {
            original: "Привет".to_string(),
            translation: "Hallo".to_string(),
            from: "RU".to_string(),
            to: "DE".to_string(),
            username: username.map(str::to_string),
            sender_id: "client_1672531200000_abcdef123".to_string(),
            sender_role: "user".to_string(),
            timestamp: "2023-01-01T00:00:00.000Z".to_string(),
            extra: Map::new(),
        }
    }

    #[test]
    fn test_format_user_joined() {
        // テスト項目: 参加通知に名前・ルーム・人数が含まれる
        // given (前提条件):
        let message = ServerMessage::UserJoined(presence(2));

        // when (操作):
        let result = MessageFormatter::format_server_message(&message);

        // then (期待する結果):
        assert!(result.contains("+ Kid joined FAMILY1"));
        assert!(result.contains("(2 in room)"));
    }

    #[test]
    fn test_format_user_left() {
        // テスト項目: 退出通知に名前と残り人数が含まれる
        let result = MessageFormatter::format_server_message(&ServerMessage::UserLeft(presence(1)));

        assert!(result.contains("- Kid left FAMILY1"));
        assert!(result.contains("(1 in room)"));
    }

    #[test]
    fn test_format_translation_uses_username() {
        // テスト項目: 中継された翻訳は送信者名・原文・訳文を表示する
        // when (操作):
        let result = MessageFormatter::format_translation(&relayed(Some("Dad")));

        // then (期待する結果):
        assert!(result.contains("@Dad [RU → DE]"));
        assert!(result.contains("Привет"));
        assert!(result.contains("Hallo"));
        assert!(result.contains(RULE));
    }

    #[test]
    fn test_format_translation_without_room_falls_back_to_sender_id() {
        // テスト項目: ルーム外の送信者は接続 ID で表示される
        let result = MessageFormatter::format_translation(&relayed(None));

        assert!(result.contains("@client_1672531200000_abcdef123"));
    }

    #[test]
    fn test_format_welcome() {
        // テスト項目: ウェルカムメッセージに接続 ID が含まれる
        let message = ServerMessage::Welcome {
            client_id: "client_1_abc".to_string(),
            message: "Connected to Dashka translation relay".to_string(),
            timestamp: "2023-01-01T00:00:00.000Z".to_string(),
        };

        let result = MessageFormatter::format_server_message(&message);

        assert!(result.contains("Connected to Dashka translation relay"));
        assert!(result.contains("id client_1_abc"));
    }

    #[test]
    fn test_format_role_confirmed() {
        // テスト項目: ロール確認が表示される
        let message = ServerMessage::RoleConfirmed {
            role: "speaker".to_string(),
            timestamp: "2023-01-01T00:00:00.000Z".to_string(),
        };

        assert!(MessageFormatter::format_server_message(&message).contains("Role confirmed: speaker"));
    }

    #[test]
    fn test_format_own_translation_marks_cache_hits() {
        // テスト項目: 自分の翻訳結果はキャッシュ由来かどうかを表示する
        // given (前提条件):
        let response = TranslateResponse {
            status: "success".to_string(),
            original_text: "Привет".to_string(),
            translated_text: "Hallo".to_string(),
            source_language: "ru".to_string(),
            target_language: "de".to_string(),
            confidence: 0.95,
            provider: "openai-gpt-4o-mini".to_string(),
            timestamp: "2023-01-01T00:00:00.000Z".to_string(),
            processing_time: 3,
            from_cache: true,
        };

        // when (操作):
        let result = MessageFormatter::format_own_translation(&response);

        // then (期待する結果):
        assert!(result.starts_with("Hallo (RU → DE, 3ms, cached)"));
    }

    #[test]
    fn test_local_time_keeps_unparseable_input() {
        // テスト項目: 解釈できないタイムスタンプはそのまま表示される
        assert_eq!(local_time("not a time"), "not a time");
        assert_eq!(local_time("2023-01-01T00:00:00.000Z").len(), 8);
    }

    #[test]
    fn test_format_raw_message() {
        // テスト項目: 解釈できないメッセージはそのまま表示される
        let result = MessageFormatter::format_raw_message("{\"type\":\"cursor\"}");

        assert!(result.contains("Received: {\"type\":\"cursor\"}"));
    }
}
