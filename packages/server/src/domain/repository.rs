//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! - `ConnectionRepository`: Client Registry（接続 ID → 接続レコード）
//! - `RoomRepository`: Room Directory（ルーム ID → メンバー集合）
//!
//! どちらもプロセス内の揮発性ストアで、再起動時に空から再構築されます。

use async_trait::async_trait;

use super::{
    Connection, ConnectionId, LeftRoom, RepositoryError, Role, Room, RoomId, RoomMember,
    RoomMembership, Timestamp,
};

/// Client Registry
///
/// 接続レコードを排他的に所有する。ルームはこのレコードへの非所有参照
/// （接続 ID と参加時メタデータ）のみを保持する。
#[async_trait]
pub trait ConnectionRepository: Send + Sync {
    /// 接続を登録する。同じ ID が既に存在する場合はエラー
    async fn register(&self, connection: Connection) -> Result<(), RepositoryError>;

    /// 接続を削除する（冪等）。削除されたレコードを返す
    async fn unregister(&self, id: &ConnectionId) -> Option<Connection>;

    /// 接続レコードを取得
    async fn get(&self, id: &ConnectionId) -> Option<Connection>;

    /// role を更新する。接続が存在した場合のみ `true`
    async fn set_role(&self, id: &ConnectionId, role: Role) -> bool;

    /// ルーム所属を更新し、以前の所属を返す
    async fn set_room(
        &self,
        id: &ConnectionId,
        membership: Option<RoomMembership>,
    ) -> Result<Option<RoomMembership>, RepositoryError>;

    /// 接続中の全ての接続 ID を取得（スナップショット）
    async fn all_ids(&self) -> Vec<ConnectionId>;

    /// 接続数を取得
    async fn count(&self) -> usize;
}

/// Room Directory
///
/// ルームは最初の参加時に暗黙的に作成され、最後のメンバーが抜けた時点で削除される。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// メンバーをルームに追加し、参加後のメンバー数を返す
    async fn join(&self, room_id: RoomId, member: RoomMember, now: Timestamp) -> usize;

    /// 指定ルームからメンバーを削除する。メンバーでなければ `None`
    async fn leave(&self, room_id: &RoomId, connection_id: &ConnectionId) -> Option<LeftRoom>;

    /// 全てのルームからメンバーを削除する（切断時の後始末）
    async fn leave_all(&self, connection_id: &ConnectionId) -> Vec<LeftRoom>;

    /// ルームのメンバー ID を取得（スナップショット）。ルームが無ければ `None`
    async fn member_ids(&self, room_id: &RoomId) -> Option<Vec<ConnectionId>>;

    /// ルームを取得
    async fn get_room(&self, room_id: &RoomId) -> Option<Room>;

    /// 全てのルームを取得（ルーム ID 順）
    async fn list_rooms(&self) -> Vec<Room>;

    /// ルーム数を取得
    async fn count_rooms(&self) -> usize;
}
