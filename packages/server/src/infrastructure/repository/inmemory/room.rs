//! InMemory Room Repository 実装（Room Directory）
//!
//! ルーム ID → Room の HashMap を Mutex で保護します。
//! ルームは最初の参加時に作成され、最後のメンバーが抜けると削除されます。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, LeftRoom, Room, RoomId, RoomMember, RoomRepository, Timestamp,
};

/// インメモリ Room Repository 実装
#[derive(Default)]
pub struct InMemoryRoomRepository {
    rooms: Mutex<HashMap<RoomId, Room>>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

/// ルームからメンバーを削除し、空になったルームを片付ける
fn remove_from_room(
    rooms: &mut HashMap<RoomId, Room>,
    room_id: &RoomId,
    connection_id: &ConnectionId,
) -> Option<LeftRoom> {
    let room = rooms.get_mut(room_id)?;
    let member = room.remove_member(connection_id)?;
    let remaining = room.member_ids();

    if room.is_empty() {
        rooms.remove(room_id);
        tracing::debug!("Room '{}' is empty and was removed", room_id);
    }

    Some(LeftRoom {
        room_id: room_id.clone(),
        member,
        remaining,
    })
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn join(&self, room_id: RoomId, member: RoomMember, now: Timestamp) -> usize {
        let mut rooms = self.rooms.lock().await;
        let room = rooms.entry(room_id.clone()).or_insert_with(|| {
            tracing::info!("Room '{}' created", room_id);
            Room::new(room_id.clone(), now)
        });
        room.add_member(member);
        room.member_count()
    }

    async fn leave(&self, room_id: &RoomId, connection_id: &ConnectionId) -> Option<LeftRoom> {
        let mut rooms = self.rooms.lock().await;
        remove_from_room(&mut rooms, room_id, connection_id)
    }

    async fn leave_all(&self, connection_id: &ConnectionId) -> Vec<LeftRoom> {
        let mut rooms = self.rooms.lock().await;
        let containing: Vec<RoomId> = rooms
            .values()
            .filter(|room| room.contains(connection_id))
            .map(|room| room.id.clone())
            .collect();

        containing
            .iter()
            .filter_map(|room_id| remove_from_room(&mut rooms, room_id, connection_id))
            .collect()
    }

    async fn member_ids(&self, room_id: &RoomId) -> Option<Vec<ConnectionId>> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).map(Room::member_ids)
    }

    async fn get_room(&self, room_id: &RoomId) -> Option<Room> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).cloned()
    }

    async fn list_rooms(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        let mut list: Vec<Room> = rooms.values().cloned().collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        list
    }

    async fn count_rooms(&self) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.len()
    }
}
