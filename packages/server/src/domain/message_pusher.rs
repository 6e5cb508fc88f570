//! MessagePusher trait 定義
//!
//! 接続ごとの送信チャンネルを管理し、メッセージを届けるためのインターフェース。
//! 送信はベストエフォートで、ブロッキングしない。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError};

/// 接続ごとの送信チャンネル（シリアライズ済み JSON を運ぶ）
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// クライアントの送信チャンネルを登録
    async fn register_client(&self, client_id: ConnectionId, sender: PusherChannel);

    /// クライアントの送信チャンネルを登録解除（冪等）
    async fn unregister_client(&self, client_id: &ConnectionId);

    /// 特定のクライアントにメッセージを送信
    async fn push_to(&self, client_id: &ConnectionId, content: &str)
    -> Result<(), MessagePushError>;

    /// 複数のクライアントにメッセージを送信し、送信に成功した数を返す
    ///
    /// 個別の送信失敗はログに記録してスキップし、全体は失敗させない。
    async fn broadcast(&self, targets: Vec<ConnectionId>, content: &str) -> usize;
}
