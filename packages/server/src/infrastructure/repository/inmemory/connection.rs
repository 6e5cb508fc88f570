//! InMemory Connection Repository 実装（Client Registry）
//!
//! ドメイン層が定義する ConnectionRepository trait の具体的な実装。
//! 接続 ID → 接続レコードの HashMap を Mutex で保護します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Connection, ConnectionId, ConnectionRepository, RepositoryError, Role, RoomMembership,
};

/// インメモリ Connection Repository 実装
#[derive(Default)]
pub struct InMemoryConnectionRepository {
    connections: Mutex<HashMap<ConnectionId, Connection>>,
}

impl InMemoryConnectionRepository {
    /// 新しい InMemoryConnectionRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRepository for InMemoryConnectionRepository {
    async fn register(&self, connection: Connection) -> Result<(), RepositoryError> {
        let mut connections = self.connections.lock().await;
        if connections.contains_key(&connection.id) {
            return Err(RepositoryError::DuplicateConnection(
                connection.id.as_str().to_string(),
            ));
        }
        let id = connection.id.clone();
        connections.insert(id.clone(), connection);
        tracing::info!(
            "WebSocket connected: {} (total: {})",
            id,
            connections.len()
        );
        Ok(())
    }

    async fn unregister(&self, id: &ConnectionId) -> Option<Connection> {
        let mut connections = self.connections.lock().await;
        let removed = connections.remove(id);
        if removed.is_some() {
            tracing::info!(
                "WebSocket disconnected: {} (remaining: {})",
                id,
                connections.len()
            );
        }
        removed
    }

    async fn get(&self, id: &ConnectionId) -> Option<Connection> {
        let connections = self.connections.lock().await;
        connections.get(id).cloned()
    }

    async fn set_role(&self, id: &ConnectionId, role: Role) -> bool {
        let mut connections = self.connections.lock().await;
        match connections.get_mut(id) {
            Some(connection) => {
                tracing::info!("Client {} role set to: {}", id, role.as_str());
                connection.role = role;
                true
            }
            None => false,
        }
    }

    async fn set_room(
        &self,
        id: &ConnectionId,
        membership: Option<RoomMembership>,
    ) -> Result<Option<RoomMembership>, RepositoryError> {
        let mut connections = self.connections.lock().await;
        let connection = connections
            .get_mut(id)
            .ok_or_else(|| RepositoryError::ConnectionNotFound(id.as_str().to_string()))?;
        Ok(std::mem::replace(&mut connection.room, membership))
    }

    async fn all_ids(&self) -> Vec<ConnectionId> {
        let connections = self.connections.lock().await;
        connections.keys().cloned().collect()
    }

    async fn count(&self) -> usize {
        let connections = self.connections.lock().await;
        connections.len()
    }
}
