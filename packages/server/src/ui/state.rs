//! Shared application state.

use std::sync::Arc;

use dashka_shared::time::{Clock, timestamp_to_rfc3339};

use crate::domain::{
    ConnectionRepository, MessagePusher, RoomRepository, TranslationCache, TranslationProvider,
};
use crate::usecase::{
    Broadcaster, ConnectClientUseCase, DetectLanguageUseCase, DisconnectClientUseCase,
    GetRoomDetailUseCase, GetRoomsUseCase, GetStatsUseCase, JoinRoomUseCase, RelayMessageUseCase,
    SetRoleUseCase, TranslateTextUseCase,
};
use crate::ui::error::{ApiError, ApiFailure};

/// Ports the application is assembled from.
pub struct AppParts {
    pub connections: Arc<dyn ConnectionRepository>,
    pub rooms: Arc<dyn RoomRepository>,
    pub message_pusher: Arc<dyn MessagePusher>,
    pub cache: Arc<dyn TranslationCache>,
    pub provider: Arc<dyn TranslationProvider>,
    pub clock: Arc<dyn Clock>,
}

/// Use cases shared by every handler.
pub struct AppState {
    /// ConnectClientUseCase（接続のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DisconnectClientUseCase（切断のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    pub set_role_usecase: Arc<SetRoleUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub relay_message_usecase: Arc<RelayMessageUseCase>,
    /// 配信先の選定と送信
    pub broadcaster: Arc<Broadcaster>,
    pub translate_text_usecase: Arc<TranslateTextUseCase>,
    pub detect_language_usecase: Arc<DetectLanguageUseCase>,
    pub get_stats_usecase: Arc<GetStatsUseCase>,
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn from_parts(parts: AppParts) -> Self {
        let AppParts {
            connections,
            rooms,
            message_pusher,
            cache,
            provider,
            clock,
        } = parts;

        let broadcaster = Arc::new(Broadcaster::new(
            connections.clone(),
            rooms.clone(),
            message_pusher.clone(),
        ));

        Self {
            connect_client_usecase: Arc::new(ConnectClientUseCase::new(
                connections.clone(),
                message_pusher.clone(),
                clock.clone(),
            )),
            disconnect_client_usecase: Arc::new(DisconnectClientUseCase::new(
                connections.clone(),
                rooms.clone(),
                message_pusher,
            )),
            set_role_usecase: Arc::new(SetRoleUseCase::new(connections.clone())),
            join_room_usecase: Arc::new(JoinRoomUseCase::new(
                connections.clone(),
                rooms.clone(),
                clock.clone(),
            )),
            relay_message_usecase: Arc::new(RelayMessageUseCase::new(
                connections.clone(),
                broadcaster.clone(),
            )),
            broadcaster,
            translate_text_usecase: Arc::new(TranslateTextUseCase::new(
                cache.clone(),
                provider.clone(),
                clock.clone(),
            )),
            detect_language_usecase: Arc::new(DetectLanguageUseCase::new(provider.clone())),
            get_stats_usecase: Arc::new(GetStatsUseCase::new(
                connections,
                rooms.clone(),
                cache,
                provider,
                clock.clone(),
            )),
            get_rooms_usecase: Arc::new(GetRoomsUseCase::new(rooms.clone())),
            get_room_detail_usecase: Arc::new(GetRoomDetailUseCase::new(rooms)),
            clock,
        }
    }

    /// Current time in wire format.
    pub fn now_rfc3339(&self) -> String {
        timestamp_to_rfc3339(self.clock.now_millis())
    }

    /// Turn a handler error into a response stamped with the current time.
    pub fn reject(&self, error: impl Into<ApiError>) -> ApiFailure {
        error.into().at(self.now_rfc3339())
    }
}
