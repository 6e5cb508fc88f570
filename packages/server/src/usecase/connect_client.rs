//! UseCase: クライアント接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//! - 接続 ID の採番、レジストリと pusher への登録
//!
//! ### なぜこのテストが必要か
//! - 採番された ID がプロセス内で一意であることを保証
//! - 登録直後の接続が既定ロール "unknown" を持つことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規接続
//! - エッジケース：多数の連続接続でも ID が衝突しない

use std::net::SocketAddr;
use std::sync::Arc;

use dashka_shared::time::Clock;

use crate::domain::{
    Connection, ConnectionIdFactory, ConnectionRepository, MessagePusher, PusherChannel,
    RepositoryError, Timestamp,
};

use super::error::ConnectError;

/// 採番の最大試行回数
const MAX_ID_ATTEMPTS: usize = 3;

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    connections: Arc<dyn ConnectionRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl ConnectClientUseCase {
    pub fn new(
        connections: Arc<dyn ConnectionRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            connections,
            message_pusher,
            clock,
        }
    }

    /// 接続を登録し、採番された接続レコードを返す
    ///
    /// # Arguments
    ///
    /// * `remote_address` - 接続元アドレス（取得できた場合）
    /// * `sender` - この接続への送信チャンネル
    pub async fn execute(
        &self,
        remote_address: Option<SocketAddr>,
        sender: PusherChannel,
    ) -> Result<Connection, ConnectError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let now = self.clock.now_millis();
            let connection = Connection::new(
                ConnectionIdFactory::generate(now),
                Timestamp::new(now),
                remote_address,
            );

            match self.connections.register(connection.clone()).await {
                Ok(()) => {
                    self.message_pusher
                        .register_client(connection.id.clone(), sender)
                        .await;
                    return Ok(connection);
                }
                Err(RepositoryError::DuplicateConnection(id)) => {
                    tracing::warn!("Connection id collision on '{}', regenerating", id);
                }
                Err(e) => {
                    tracing::warn!("Failed to register connection: {}", e);
                }
            }
        }

        Err(ConnectError::IdExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::broadcast::test_support::TestWorld;
    use dashka_shared::time::FixedClock;
    use std::collections::HashSet;
    use tokio::sync::mpsc;

    fn usecase(world: &TestWorld) -> ConnectClientUseCase {
        ConnectClientUseCase::new(
            world.connections.clone(),
            world.pusher.clone(),
            Arc::new(FixedClock::new(1672531200000)),
        )
    }

    #[tokio::test]
    async fn test_connect_registers_with_default_role() {
        // テスト項目: 接続はレジストリに既定ロールで登録され、pusher 経由で届く
        // given (前提条件):
        let world = TestWorld::new();
        let usecase = usecase(&world);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let address: SocketAddr = "127.0.0.1:50000".parse().unwrap();

        // when (操作):
        let connection = usecase.execute(Some(address), tx).await.unwrap();

        // then (期待する結果):
        let stored = world.connections.get(&connection.id).await.unwrap();
        assert_eq!(stored.role.as_str(), "unknown");
        assert_eq!(stored.remote_address, Some(address));
        assert_eq!(stored.connected_at, Timestamp::new(1672531200000));
        assert!(connection.id.as_str().starts_with("client_1672531200000_"));

        world.pusher.push_to(&connection.id, "ping").await.unwrap();
        assert_eq!(rx.recv().await.as_deref(), Some("ping"));
    }

    #[tokio::test]
    async fn test_connect_ids_are_unique() {
        // テスト項目: 同一時刻に多数接続しても ID は全て一意
        // given (前提条件):
        let world = TestWorld::new();
        let usecase = usecase(&world);
        let mut ids = HashSet::new();

        // when (操作):
        for _ in 0..200 {
            let (tx, _rx) = mpsc::unbounded_channel();
            let connection = usecase.execute(None, tx).await.unwrap();
            ids.insert(connection.id);
        }

        // then (期待する結果):
        assert_eq!(ids.len(), 200);
        assert_eq!(world.connections.count().await, 200);
    }
}
