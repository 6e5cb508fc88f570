//! UseCase: クライアント切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectClientUseCase::execute() メソッド
//! - pusher・レジストリ・全ルームからの削除
//!
//! ### なぜこのテストが必要か
//! - 切断後にルームに参照が残らないこと（ダングリング参照なし）を保証
//! - 残りのメンバーへの退出通知に必要な情報が返ることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルーム参加中の接続の切断
//! - エッジケース：同じ接続の二重切断、最後のメンバーの退出

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRepository, LeftRoom, MessagePusher, RoomRepository};

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    connections: Arc<dyn ConnectionRepository>,
    rooms: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
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

    /// 接続を全ての状態から取り除き、退出したルームを返す
    ///
    /// 既に取り除かれた接続に対しては何もしない（冪等）。
    pub async fn execute(&self, connection_id: &ConnectionId) -> Vec<LeftRoom> {
        self.message_pusher.unregister_client(connection_id).await;
        self.connections.unregister(connection_id).await;
        self.rooms.leave_all(connection_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, RoomId, RoomMember, Timestamp};
    use crate::usecase::broadcast::test_support::TestWorld;

    fn usecase(world: &TestWorld) -> DisconnectClientUseCase {
        DisconnectClientUseCase::new(
            world.connections.clone(),
            world.rooms.clone(),
            world.pusher.clone(),
        )
    }

    async fn join(world: &TestWorld, room: &str, id: &ConnectionId, name: &str) {
        world
            .rooms
            .join(
                RoomId::new(room.to_string()).unwrap(),
                RoomMember {
                    connection_id: id.clone(),
                    display_name: DisplayName::new(name.to_string()).unwrap(),
                    joined_at: Timestamp::new(1000),
                },
                Timestamp::new(1000),
            )
            .await;
    }

    #[tokio::test]
    async fn test_disconnect_purges_registry_and_rooms() {
        // テスト項目: 切断でレジストリとルームの両方から削除される
        // given (前提条件):
        let world = TestWorld::new();
        let (c1, _c1_rx) = world.connect("c1").await;
        let (c2, _c2_rx) = world.connect("c2").await;
        join(&world, "FAMILY1", &c1, "Dad").await;
        join(&world, "FAMILY1", &c2, "Kid").await;

        // when (操作):
        let left = usecase(&world).execute(&c1).await;

        // then (期待する結果):
        assert!(world.connections.get(&c1).await.is_none());
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].room_id.as_str(), "FAMILY1");
        assert_eq!(left[0].member.display_name.as_str(), "Dad");
        assert_eq!(left[0].remaining, vec![c2.clone()]);

        let members = world
            .rooms
            .member_ids(&RoomId::new("FAMILY1".to_string()).unwrap())
            .await
            .unwrap();
        assert_eq!(members, vec![c2]);
        assert!(world.pusher.push_to(&c1, "x").await.is_err());
    }

    #[tokio::test]
    async fn test_disconnect_last_member_removes_room() {
        // テスト項目: 最後のメンバーが切断するとルーム自体が削除される
        // given (前提条件):
        let world = TestWorld::new();
        let (c1, _c1_rx) = world.connect("c1").await;
        join(&world, "SOLO", &c1, "Only").await;

        // when (操作):
        let left = usecase(&world).execute(&c1).await;

        // then (期待する結果):
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].remaining_count(), 0);
        assert_eq!(world.rooms.count_rooms().await, 0);
    }

    #[tokio::test]
    async fn test_disconnect_twice_is_a_no_op() {
        // テスト項目: 二重切断はエラーにならず、2 回目は何も返さない
        // given (前提条件):
        let world = TestWorld::new();
        let (c1, _c1_rx) = world.connect("c1").await;
        let usecase = usecase(&world);

        // when (操作):
        usecase.execute(&c1).await;
        let second = usecase.execute(&c1).await;

        // then (期待する結果):
        assert!(second.is_empty());
        assert_eq!(world.connections.count().await, 0);
    }
}
