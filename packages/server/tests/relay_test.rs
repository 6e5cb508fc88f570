//! Realtime relay scenarios over real WebSocket connections.

mod common;

use common::{TestClient, TestServer};
use serde_json::json;

#[tokio::test]
async fn test_family_room_scenario() {
    // テスト項目: FAMILY1 の参加通知とルーム内の翻訳中継（送信者へのエコーなし）
    // given (前提条件):
    let server = TestServer::start().await;
    let mut c1 = TestClient::connect(&server).await;
    let mut c2 = TestClient::connect(&server).await;

    c1.send_json(json!({"type": "join_room", "room": "FAMILY1", "username": "Dad"}))
        .await;
    c1.sync("user").await;

    // when (操作): C2 が参加
    c2.send_json(json!({"type": "join_room", "room": "FAMILY1", "username": "Kid"}))
        .await;

    // then (期待する結果): C1 に人数 2 の参加通知
    let joined = c1.recv().await;
    assert_eq!(joined["type"], "user_joined");
    assert_eq!(joined["username"], "Kid");
    assert_eq!(joined["participants"], 2);

    // when (操作): C1 が翻訳を送信
    c1.send_json(json!({
        "type": "translation",
        "original": "hi",
        "translation": "привет",
        "from": "EN",
        "to": "RU"
    }))
    .await;

    // then (期待する結果): C2 が username "Dad" 付きで受信、C1 には戻らない
    let relayed = c2.recv().await;
    assert_eq!(relayed["type"], "translation");
    assert_eq!(relayed["username"], "Dad");
    assert_eq!(relayed["original"], "hi");
    assert_eq!(relayed["translation"], "привет");
    assert_eq!(relayed["from"], "EN");
    assert_eq!(relayed["to"], "RU");
    assert_eq!(relayed["sender_id"], c1.client_id.as_str());
    assert_eq!(relayed["sender_role"], "user");
    c1.expect_silence().await;
}

#[tokio::test]
async fn test_room_outsider_never_receives_room_traffic() {
    // テスト項目: ルーム外の接続はルーム内の翻訳を受信しない
    // given (前提条件):
    let server = TestServer::start().await;
    let mut c1 = TestClient::connect(&server).await;
    let mut c2 = TestClient::connect(&server).await;
    let mut outsider = TestClient::connect(&server).await;
    c1.send_json(json!({"type": "join_room", "room": "A", "username": "One"}))
        .await;
    c1.sync("user").await;
    c2.send_json(json!({"type": "join_room", "room": "A", "username": "Two"}))
        .await;
    c1.recv().await;

    // when (操作):
    c1.send_json(json!({"type": "translation", "original": "a", "translation": "b", "from": "EN", "to": "DE"}))
        .await;

    // then (期待する結果):
    assert_eq!(c2.recv().await["type"], "translation");
    outsider.expect_silence().await;
}

#[tokio::test]
async fn test_unknown_type_is_relayed_to_everyone_else() {
    // テスト項目: 未知の type は送信者 ID とタイムスタンプを付けて全体配信される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut c1 = TestClient::connect(&server).await;
    let mut c2 = TestClient::connect(&server).await;

    // when (操作):
    c1.send_json(json!({"type": "cursor", "x": 10})).await;

    // then (期待する結果):
    let relayed = c2.recv().await;
    assert_eq!(relayed["type"], "cursor");
    assert_eq!(relayed["x"], 10);
    assert_eq!(relayed["sender_id"], c1.client_id.as_str());
    assert!(relayed["timestamp"].is_string());
    c1.expect_silence().await;
}

#[tokio::test]
async fn test_malformed_frames_do_not_close_the_connection() {
    // テスト項目: 不正なフレームは破棄され、接続は維持される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut c1 = TestClient::connect(&server).await;
    let mut c2 = TestClient::connect(&server).await;

    // when (操作):
    c1.send_text("this is not json").await;
    c1.send_text("[1, 2, 3]").await;
    c1.send_json(json!({"type": "translation", "original": "missing fields"}))
        .await;

    // then (期待する結果):
    c1.sync("user").await;
    c2.expect_silence().await;
}

#[tokio::test]
async fn test_disconnect_notifies_remaining_members() {
    // テスト項目: 切断したメンバーの退出がルームの残りメンバーに通知される
    // given (前提条件):
    let server = TestServer::start().await;
    let mut c1 = TestClient::connect(&server).await;
    let mut c2 = TestClient::connect(&server).await;
    c1.send_json(json!({"type": "join_room", "room": "FAMILY1", "username": "Dad"}))
        .await;
    c1.sync("user").await;
    c2.send_json(json!({"type": "join_room", "room": "FAMILY1", "username": "Kid"}))
        .await;
    c1.recv().await;

    // when (操作):
    c2.close().await;

    // then (期待する結果):
    let left = c1.recv().await;
    assert_eq!(left["type"], "user_left");
    assert_eq!(left["username"], "Kid");
    assert_eq!(left["room"], "FAMILY1");
    assert_eq!(left["participants"], 1);
}

#[tokio::test]
async fn test_connection_ids_are_unique() {
    // テスト項目: 各接続には一意の ID が割り当てられる
    let server = TestServer::start().await;
    let c1 = TestClient::connect(&server).await;
    let c2 = TestClient::connect(&server).await;

    assert!(c1.client_id.starts_with("client_"));
    assert_ne!(c1.client_id, c2.client_id);
}
