//! Domain layer: value objects, entities and the ports the use cases depend on.

pub mod cache;
pub mod entity;
pub mod error;
pub mod language;
pub mod message_pusher;
pub mod repository;
pub mod translation;
pub mod value_object;

pub use cache::{CacheKey, TranslationCache};
pub use entity::{Connection, LeftRoom, Room, RoomMember, RoomMembership};
pub use error::{MessagePushError, RepositoryError, TranslationError, ValueObjectError};
pub use language::{SUPPORTED_LANGUAGES, SupportedLanguage};
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{ConnectionRepository, RoomRepository};
pub use translation::{DetectedLanguage, ProviderTranslation, TranslationProvider, TranslationResult};
#[cfg(test)]
pub use translation::MockTranslationProvider;
pub use value_object::{
    ConnectionId, ConnectionIdFactory, DisplayName, LanguageCode, Role, RoomId, Timestamp,
    TranslationText,
};
