//! UseCase: メッセージ中継（翻訳メッセージ・パススルー）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayMessageUseCase::sender_profile() / deliver()
//! - 送信者がルームに居ればルーム内配信、居なければ全体配信にフォールバック
//!
//! ### なぜこのテストが必要か
//! - 送信者自身にメッセージが戻らないこと（エコー防止）を保証
//! - ルーム外の接続にルーム内のメッセージが漏れないことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルーム内中継、ルーム未参加時の全体中継
//! - エッジケース：未登録の送信者

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRepository, Role, RoomId, RoomMembership};

use super::broadcast::Broadcaster;

/// 中継メッセージに付与する送信者情報
#[derive(Debug, Clone, PartialEq)]
pub struct SenderProfile {
    pub id: ConnectionId,
    pub role: Role,
    pub room: Option<RoomMembership>,
}

impl SenderProfile {
    pub fn username(&self) -> Option<&str> {
        self.room.as_ref().map(|m| m.display_name.as_str())
    }
}

/// 配信範囲
#[derive(Debug, Clone, PartialEq)]
pub enum RelayScope {
    Room(RoomId),
    Global,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelayReceipt {
    pub scope: RelayScope,
    pub delivered: usize,
}

pub struct RelayMessageUseCase {
    connections: Arc<dyn ConnectionRepository>,
    broadcaster: Arc<Broadcaster>,
}

impl RelayMessageUseCase {
    pub fn new(connections: Arc<dyn ConnectionRepository>, broadcaster: Arc<Broadcaster>) -> Self {
        Self {
            connections,
            broadcaster,
        }
    }

    /// 送信者の現在のロールとルームを取得する（未登録なら None）
    pub async fn sender_profile(&self, sender: &ConnectionId) -> Option<SenderProfile> {
        let connection = self.connections.get(sender).await?;
        Some(SenderProfile {
            id: connection.id,
            role: connection.role,
            room: connection.room,
        })
    }

    /// 送信者を除いてメッセージを配信する
    ///
    /// ルーム参加中ならそのルーム内、そうでなければ全接続が対象。
    pub async fn deliver(&self, sender: &SenderProfile, payload: &str) -> RelayReceipt {
        match &sender.room {
            Some(membership) => {
                let delivered = self
                    .broadcaster
                    .broadcast_to_room(&membership.room_id, payload, Some(&sender.id))
                    .await;
                RelayReceipt {
                    scope: RelayScope::Room(membership.room_id.clone()),
                    delivered,
                }
            }
            None => {
                let delivered = self
                    .broadcaster
                    .broadcast_to_others(&sender.id, payload)
                    .await;
                RelayReceipt {
                    scope: RelayScope::Global,
                    delivered,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::JoinRoomUseCase;
    use crate::usecase::broadcast::test_support::{TestWorld, drain};
    use dashka_shared::time::FixedClock;

    fn usecases(world: &TestWorld) -> (RelayMessageUseCase, JoinRoomUseCase) {
        let broadcaster = Arc::new(Broadcaster::new(
            world.connections.clone(),
            world.rooms.clone(),
            world.pusher.clone(),
        ));
        (
            RelayMessageUseCase::new(world.connections.clone(), broadcaster),
            JoinRoomUseCase::new(
                world.connections.clone(),
                world.rooms.clone(),
                Arc::new(FixedClock::new(1000)),
            ),
        )
    }

    #[tokio::test]
    async fn test_relay_within_room_excludes_sender_and_outsiders() {
        // テスト項目: ルーム参加中の送信はルームの他メンバーのみに届く
        // given (前提条件):
        let world = TestWorld::new();
        let (c1, mut c1_rx) = world.connect("c1").await;
        let (c2, mut c2_rx) = world.connect("c2").await;
        let (_c3, mut c3_rx) = world.connect("c3").await;
        let (relay, join) = usecases(&world);
        join.execute(&c1, "A".to_string(), "Dad".to_string()).await.unwrap();
        join.execute(&c2, "A".to_string(), "Kid".to_string()).await.unwrap();

        // when (操作):
        let profile = relay.sender_profile(&c1).await.unwrap();
        let receipt = relay.deliver(&profile, "msg").await;

        // then (期待する結果):
        assert_eq!(profile.username(), Some("Dad"));
        assert_eq!(
            receipt,
            RelayReceipt {
                scope: RelayScope::Room(RoomId::new("A".to_string()).unwrap()),
                delivered: 1
            }
        );
        assert!(drain(&mut c1_rx).is_empty());
        assert_eq!(drain(&mut c2_rx), vec!["msg"]);
        assert!(drain(&mut c3_rx).is_empty());
    }

    #[tokio::test]
    async fn test_relay_without_room_falls_back_to_global() {
        // テスト項目: ルーム未参加の送信は送信者以外の全接続に届く
        // given (前提条件):
        let world = TestWorld::new();
        let (c1, mut c1_rx) = world.connect("c1").await;
        let (c2, mut c2_rx) = world.connect("c2").await;
        let (_c3, mut c3_rx) = world.connect("c3").await;
        let (relay, join) = usecases(&world);
        join.execute(&c2, "A".to_string(), "Kid".to_string()).await.unwrap();

        // when (操作):
        let profile = relay.sender_profile(&c1).await.unwrap();
        let receipt = relay.deliver(&profile, "msg").await;

        // then (期待する結果):
        assert_eq!(profile.username(), None);
        assert_eq!(profile.role.as_str(), "unknown");
        assert_eq!(receipt.scope, RelayScope::Global);
        assert_eq!(receipt.delivered, 2);
        assert!(drain(&mut c1_rx).is_empty());
        assert_eq!(drain(&mut c2_rx), vec!["msg"]);
        assert_eq!(drain(&mut c3_rx), vec!["msg"]);
    }

    #[tokio::test]
    async fn test_unknown_sender_has_no_profile() {
        // テスト項目: 未登録の送信者はプロフィールを持たない
        let world = TestWorld::new();
        let (relay, _) = usecases(&world);
        let ghost = ConnectionId::new("ghost".to_string()).unwrap();

        assert!(relay.sender_profile(&ghost).await.is_none());
    }
}
