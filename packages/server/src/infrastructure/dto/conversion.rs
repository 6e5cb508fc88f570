//! Conversion from domain types to wire DTOs.

use dashka_shared::time::timestamp_to_rfc3339;

use crate::domain::{
    DetectedLanguage, Room, RoomMember, SupportedLanguage, TranslationResult,
};
use crate::infrastructure::dto::http as dto;

// ========================================
// Domain → HTTP DTO
// ========================================

impl dto::TranslateResponse {
    pub fn from_result(result: TranslationResult, from_cache: bool) -> Self {
        Self {
            status: dto::STATUS_SUCCESS.to_string(),
            original_text: result.original_text,
            translated_text: result.translated_text,
            source_language: result.source.to_lowercase(),
            target_language: result.target.to_lowercase(),
            confidence: result.confidence,
            provider: result.provider,
            timestamp: timestamp_to_rfc3339(result.translated_at.value()),
            processing_time: result.processing_time_ms,
            from_cache,
        }
    }
}

impl From<DetectedLanguage> for dto::DetectLanguageResponse {
    fn from(model: DetectedLanguage) -> Self {
        Self {
            status: dto::STATUS_SUCCESS.to_string(),
            detected_language: model.code.as_str().to_string(),
            confidence: model.confidence,
            provider: model.provider,
        }
    }
}

impl From<&SupportedLanguage> for dto::LanguageInfo {
    fn from(model: &SupportedLanguage) -> Self {
        Self {
            code: model.code.to_string(),
            name: model.name.to_string(),
            flag: model.flag.to_string(),
        }
    }
}

impl From<Room> for dto::RoomSummary {
    fn from(model: Room) -> Self {
        Self {
            participants: model.member_count(),
            members: model
                .members
                .iter()
                .map(|m| m.display_name.as_str().to_string())
                .collect(),
            id: model.id.into_string(),
            created_at: timestamp_to_rfc3339(model.created_at.value()),
        }
    }
}

impl From<RoomMember> for dto::RoomMemberInfo {
    fn from(model: RoomMember) -> Self {
        Self {
            client_id: model.connection_id.into_string(),
            username: model.display_name.as_str().to_string(),
            joined_at: timestamp_to_rfc3339(model.joined_at.value()),
        }
    }
}

impl From<Room> for dto::RoomDetailResponse {
    fn from(model: Room) -> Self {
        Self {
            status: dto::STATUS_SUCCESS.to_string(),
            participants: model.member_count(),
            id: model.id.into_string(),
            created_at: timestamp_to_rfc3339(model.created_at.value()),
            members: model.members.into_iter().map(Into::into).collect(),
        }
    }
}
