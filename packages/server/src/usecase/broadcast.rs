//! UseCase: ブロードキャスト（配信先の選定と送信）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - Broadcaster::broadcast_to_others() / broadcast_to_room() / send_to()
//!
//! ### なぜこのテストが必要か
//! - 送信者自身にメッセージが戻らないこと（エコー防止）を保証
//! - ルーム外の接続にルーム内メッセージが漏れないことを保証
//! - 存在しないルームへの配信がエラーにならないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：全体配信、ルーム内配信
//! - エッジケース：存在しないルーム、送信者のみ接続、チャンネルが閉じた接続

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRepository, MessagePusher, RoomId, RoomRepository};

/// 配信先を決めてメッセージを送るサービス
///
/// 配信先 ID はロック下でスナップショットを取り、ロック解放後に送信する。
/// 個々の送信失敗はスキップされ、配信全体は失敗しない。
pub struct Broadcaster {
    connections: Arc<dyn ConnectionRepository>,
    rooms: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl Broadcaster {
    pub fn new(
        connections: Arc<dyn ConnectionRepository>,
        rooms: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            connections,
            rooms,
            message_pusher,
        }
    }

    /// 送信者以外の全接続に配信し、送信できた数を返す
    pub async fn broadcast_to_others(&self, sender: &ConnectionId, payload: &str) -> usize {
        let targets: Vec<ConnectionId> = self
            .connections
            .all_ids()
            .await
            .into_iter()
            .filter(|id| id != sender)
            .collect();

        let delivered = self.message_pusher.broadcast(targets, payload).await;
        tracing::debug!("Broadcast from '{}' to {} clients", sender, delivered);
        delivered
    }

    /// ルームの全メンバー（`exclude` を除く）に配信し、送信できた数を返す
    ///
    /// ルームが存在しない場合は何もせず 0 を返す。
    pub async fn broadcast_to_room(
        &self,
        room_id: &RoomId,
        payload: &str,
        exclude: Option<&ConnectionId>,
    ) -> usize {
        let Some(members) = self.rooms.member_ids(room_id).await else {
            tracing::debug!("Broadcast to unknown room '{}' skipped", room_id);
            return 0;
        };

        let targets: Vec<ConnectionId> = members
            .into_iter()
            .filter(|id| Some(id) != exclude)
            .collect();

        let delivered = self.message_pusher.broadcast(targets, payload).await;
        tracing::debug!("Broadcast to room '{}': {} clients", room_id, delivered);
        delivered
    }

    /// 事前に取得した配信先リストに配信する
    pub async fn send_to_many(&self, targets: Vec<ConnectionId>, payload: &str) -> usize {
        self.message_pusher.broadcast(targets, payload).await
    }

    /// 1 接続にのみ送信する。失敗はログに残して false を返す
    pub async fn send_to(&self, target: &ConnectionId, payload: &str) -> bool {
        match self.message_pusher.push_to(target, payload).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to send to '{}': {}", target, e);
                false
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! 複数のユースケースのテストで共有するヘルパー

    use std::sync::Arc;

    use tokio::sync::mpsc;

    use crate::domain::{
        Connection, ConnectionId, ConnectionRepository, MessagePusher, Timestamp,
    };
    use crate::infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryConnectionRepository, InMemoryRoomRepository},
    };

    pub struct TestWorld {
        pub connections: Arc<InMemoryConnectionRepository>,
        pub rooms: Arc<InMemoryRoomRepository>,
        pub pusher: Arc<WebSocketMessagePusher>,
    }

    impl TestWorld {
        pub fn new() -> Self {
            Self {
                connections: Arc::new(InMemoryConnectionRepository::new()),
                rooms: Arc::new(InMemoryRoomRepository::new()),
                pusher: Arc::new(WebSocketMessagePusher::new()),
            }
        }

        /// レジストリと pusher の両方に接続を登録し、受信側を返す
        pub async fn connect(&self, id: &str) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
            let id = ConnectionId::new(id.to_string()).unwrap();
            let (tx, rx) = mpsc::unbounded_channel();
            self.connections
                .register(Connection::new(id.clone(), Timestamp::new(1000), None))
                .await
                .unwrap();
            self.pusher.register_client(id.clone(), tx).await;
            (id, rx)
        }
    }

    /// 受信済みのメッセージを全て取り出す
    pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<String> {
        let mut messages = Vec::new();
        while let Ok(message) = rx.try_recv() {
            messages.push(message);
        }
        messages
    }
}
