//! UseCase: ルーム参加
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - ルームの遅延生成、参加人数、既存メンバーへの通知対象の算出
//! - 別ルームへの再参加時の退出処理
//!
//! ### なぜこのテストが必要か
//! - 参加通知が参加者本人を含まない「他のメンバー」に届くことを保証
//! - 再参加で旧ルームに参照が残らないこと（leave → join）を保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：1 人目・2 人目の参加
//! - 異常系：空の表示名、未登録の接続
//! - エッジケース：同じルームへの再参加（表示名の更新）、別ルームへの移動

use std::sync::Arc;

use dashka_shared::time::Clock;

use crate::domain::{
    ConnectionId, ConnectionRepository, DisplayName, LeftRoom, RoomId, RoomMember,
    RoomMembership, RoomRepository, Timestamp,
};

use super::error::JoinRoomError;

/// ルーム参加の結果
#[derive(Debug, Clone, PartialEq)]
pub struct JoinOutcome {
    pub room_id: RoomId,
    pub display_name: DisplayName,
    /// 参加後のメンバー数
    pub participants: usize,
    /// 参加通知を送る既存メンバー（本人を除く）
    pub others: Vec<ConnectionId>,
    /// 別のルームから移動した場合、その退出結果
    pub left: Option<LeftRoom>,
}

pub struct JoinRoomUseCase {
    connections: Arc<dyn ConnectionRepository>,
    rooms: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    pub fn new(
        connections: Arc<dyn ConnectionRepository>,
        rooms: Arc<dyn RoomRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            connections,
            rooms,
            clock,
        }
    }

    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room: String,
        username: String,
    ) -> Result<JoinOutcome, JoinRoomError> {
        let room_id = RoomId::new(room)?;
        let display_name = DisplayName::new(username)?;

        let connection = self
            .connections
            .get(connection_id)
            .await
            .ok_or_else(|| JoinRoomError::UnknownConnection(connection_id.as_str().to_string()))?;

        // leave → join
        let left = match connection.room_id() {
            Some(previous) if previous != &room_id => {
                self.rooms.leave(previous, connection_id).await
            }
            _ => None,
        };

        let now = Timestamp::new(self.clock.now_millis());
        let member = RoomMember {
            connection_id: connection_id.clone(),
            display_name: display_name.clone(),
            joined_at: now,
        };
        let participants = self.rooms.join(room_id.clone(), member, now).await;

        let membership = RoomMembership {
            room_id: room_id.clone(),
            display_name: display_name.clone(),
        };
        if let Err(e) = self
            .connections
            .set_room(connection_id, Some(membership))
            .await
        {
            // 並行して切断された接続をルームに残さない
            self.rooms.leave(&room_id, connection_id).await;
            tracing::warn!("Join aborted for '{}': {}", connection_id, e);
            return Err(JoinRoomError::UnknownConnection(
                connection_id.as_str().to_string(),
            ));
        }

        let others = self
            .rooms
            .member_ids(&room_id)
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|id| id != connection_id)
            .collect();

        tracing::info!(
            "{} joined room {} ({} participants)",
            display_name.as_str(),
            room_id,
            participants
        );

        Ok(JoinOutcome {
            room_id,
            display_name,
            participants,
            others,
            left,
        })
    }
}
