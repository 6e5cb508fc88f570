//! UseCase: ルーム一覧・ルーム詳細の取得（読み取り専用）

use std::sync::Arc;

use crate::domain::{Room, RoomId, RoomRepository};

use super::error::RoomQueryError;

pub struct GetRoomsUseCase {
    rooms: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    /// ルーム ID 順の一覧
    pub async fn execute(&self) -> Vec<Room> {
        self.rooms.list_rooms().await
    }
}

pub struct GetRoomDetailUseCase {
    rooms: Arc<dyn RoomRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    pub async fn execute(&self, room_id: String) -> Result<Room, RoomQueryError> {
        let room_id = RoomId::new(room_id)?;
        self.rooms
            .get_room(&room_id)
            .await
            .ok_or_else(|| RoomQueryError::NotFound(room_id.into_string()))
    }
}
