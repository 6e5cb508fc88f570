//! UseCase 層
//!
//! ドメインのポート（Repository / MessagePusher / TranslationCache /
//! TranslationProvider）を組み合わせてアプリケーションの操作を実装する。
//! ワイヤーフォーマット（JSON）は UI 層で組み立て、ここでは配信先の選定と
//! 状態の変更のみを扱う。

pub mod broadcast;
pub mod connect_client;
pub mod detect_language;
pub mod disconnect_client;
pub mod error;
pub mod get_rooms;
pub mod get_stats;
pub mod join_room;
pub mod relay_message;
pub mod set_role;
pub mod translate_text;

pub use broadcast::Broadcaster;
pub use connect_client::ConnectClientUseCase;
pub use detect_language::DetectLanguageUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{
    ConnectError, DetectLanguageError, JoinRoomError, RoomQueryError, SetRoleError,
    TranslateError,
};
pub use get_rooms::{GetRoomDetailUseCase, GetRoomsUseCase};
pub use get_stats::{GetStatsUseCase, ServerStats};
pub use join_room::{JoinOutcome, JoinRoomUseCase};
pub use relay_message::{RelayMessageUseCase, RelayReceipt, RelayScope, SenderProfile};
pub use set_role::SetRoleUseCase;
pub use translate_text::{TranslateCommand, TranslateTextUseCase, TranslationOutcome};
