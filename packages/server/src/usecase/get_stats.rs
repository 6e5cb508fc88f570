//! UseCase: ヘルスチェック・統計情報の取得（読み取り専用）

use std::sync::Arc;

use dashka_shared::time::Clock;

use crate::domain::{ConnectionRepository, RoomRepository, TranslationCache, TranslationProvider};

/// サーバーの現在の状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerStats {
    pub websocket_clients: usize,
    pub cache_size: usize,
    pub rooms: usize,
    pub translation_configured: bool,
    pub uptime_secs: u64,
}

pub struct GetStatsUseCase {
    connections: Arc<dyn ConnectionRepository>,
    rooms: Arc<dyn RoomRepository>,
    cache: Arc<dyn TranslationCache>,
    provider: Arc<dyn TranslationProvider>,
    clock: Arc<dyn Clock>,
    /// 起動時刻（Unix ミリ秒）
    started_at: i64,
}

impl GetStatsUseCase {
    pub fn new(
        connections: Arc<dyn ConnectionRepository>,
        rooms: Arc<dyn RoomRepository>,
        cache: Arc<dyn TranslationCache>,
        provider: Arc<dyn TranslationProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let started_at = clock.now_millis();
        Self {
            connections,
            rooms,
            cache,
            provider,
            clock,
            started_at,
        }
    }

    pub async fn execute(&self) -> ServerStats {
        let uptime_millis = (self.clock.now_millis() - self.started_at).max(0);
        ServerStats {
            websocket_clients: self.connections.count().await,
            cache_size: self.cache.size().await,
            rooms: self.rooms.count_rooms().await,
            translation_configured: self.provider.is_configured(),
            uptime_secs: u64::try_from(uptime_millis / 1000).unwrap_or_default(),
        }
    }
}
