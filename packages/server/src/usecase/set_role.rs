//! UseCase: ロール設定
//!
//! ロールは表示用のメタデータで、アクセス制御には使わない。

use std::sync::Arc;

use crate::domain::{ConnectionId, ConnectionRepository, Role};

use super::error::SetRoleError;

pub struct SetRoleUseCase {
    connections: Arc<dyn ConnectionRepository>,
}

impl SetRoleUseCase {
    pub fn new(connections: Arc<dyn ConnectionRepository>) -> Self {
        Self { connections }
    }

    /// ロールを検証して設定し、設定後のロールを返す
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        role: String,
    ) -> Result<Role, SetRoleError> {
        let role = Role::new(role)?;

        if !self.connections.set_role(connection_id, role.clone()).await {
            return Err(SetRoleError::UnknownConnection(
                connection_id.as_str().to_string(),
            ));
        }

        tracing::info!("Client {} set role: {}", connection_id, role.as_str());
        Ok(role)
    }
}
