//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

pub const STATUS_SUCCESS: &str = "success";

/// `POST /translate` body.
///
/// Language codes may come under any of the names older clients used. When
/// several are present the canonical name wins, then the camelCase one, then
/// the short one.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
    #[serde(default, rename = "fromLang", skip_serializing_if = "Option::is_none")]
    pub from_lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
    #[serde(default, rename = "toLang", skip_serializing_if = "Option::is_none")]
    pub to_lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

impl TranslateRequest {
    /// `source_language`, else `fromLang`, else `from`.
    pub fn resolved_source(&self) -> Option<String> {
        self.source_language
            .clone()
            .or_else(|| self.from_lang.clone())
            .or_else(|| self.from.clone())
    }

    /// `target_language`, else `toLang`, else `to`.
    pub fn resolved_target(&self) -> Option<String> {
        self.target_language
            .clone()
            .or_else(|| self.to_lang.clone())
            .or_else(|| self.to.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub status: String,
    pub original_text: String,
    pub translated_text: String,
    /// Lower-case ISO code.
    pub source_language: String,
    pub target_language: String,
    pub confidence: f64,
    pub provider: String,
    pub timestamp: String,
    /// Milliseconds.
    pub processing_time: u64,
    pub from_cache: bool,
}

/// `POST /detect-language` body.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DetectLanguageRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectLanguageResponse {
    pub status: String,
    pub detected_language: String,
    pub confidence: f64,
    pub provider: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub code: String,
    pub name: String,
    pub flag: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguagesResponse {
    pub status: String,
    pub count: usize,
    pub languages: Vec<LanguageInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub websocket_clients: usize,
    pub cache_size: usize,
    pub rooms: usize,
    pub translation_configured: bool,
    pub uptime_secs: u64,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub status: String,
    pub stats: StatsBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsBody {
    pub cache_size: usize,
    pub websocket_clients: usize,
    pub rooms: usize,
    pub uptime_secs: u64,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub name: String,
    pub version: String,
    pub status: String,
    pub endpoints: Vec<String>,
    pub websocket: String,
}

/// Room list entry for `GET /api/rooms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub id: String,
    pub participants: usize,
    pub members: Vec<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomListResponse {
    pub status: String,
    pub count: usize,
    pub rooms: Vec<RoomSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomMemberInfo {
    pub client_id: String,
    pub username: String,
    pub joined_at: String,
}

/// `GET /api/rooms/{room_id}` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDetailResponse {
    pub status: String,
    pub id: String,
    pub participants: usize,
    pub members: Vec<RoomMemberInfo>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_endpoints: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_request_accepts_legacy_field_names() {
        // テスト項目: fromLang / toLang と from / to の別名を受け付ける
        // when (操作):
        let camel: TranslateRequest =
            serde_json::from_str(r#"{"text":"hi","fromLang":"en","toLang":"ru"}"#).unwrap();
        let short: TranslateRequest =
            serde_json::from_str(r#"{"text":"hi","from":"de","to":"fr"}"#).unwrap();

        // then (期待する結果):
        assert_eq!(camel.resolved_source().as_deref(), Some("en"));
        assert_eq!(camel.resolved_target().as_deref(), Some("ru"));
        assert_eq!(short.resolved_source().as_deref(), Some("de"));
        assert_eq!(short.resolved_target().as_deref(), Some("fr"));
    }

    #[test]
    fn test_translate_request_with_several_names_prefers_canonical() {
        // テスト項目: 正式名と別名が同時に来てもデコードでき、正式名 → camelCase → 短縮名の順に採用される
        // given (前提条件):
        let body = r#"{"text":"hi","source_language":"EN","from":"DE","target_language":"RU","to":"FR"}"#;
        let camel_and_short = r#"{"text":"hi","fromLang":"ES","from":"DE","toLang":"PL","to":"FR"}"#;

        // when (操作):
        let canonical: TranslateRequest = serde_json::from_str(body).unwrap();
        let legacy: TranslateRequest = serde_json::from_str(camel_and_short).unwrap();

        // then (期待する結果):
        assert_eq!(canonical.resolved_source().as_deref(), Some("EN"));
        assert_eq!(canonical.resolved_target().as_deref(), Some("RU"));
        assert_eq!(legacy.resolved_source().as_deref(), Some("ES"));
        assert_eq!(legacy.resolved_target().as_deref(), Some("PL"));
    }

    #[test]
    fn test_translate_request_fields_are_optional() {
        // テスト項目: 空オブジェクトもデコードでき、検証はハンドラー側で行う
        let request: TranslateRequest = serde_json::from_str("{}").unwrap();

        assert!(request.text.is_none());
        assert!(request.resolved_source().is_none());
        assert!(request.resolved_target().is_none());
    }

    #[test]
    fn test_error_response_omits_endpoint_list_when_absent() {
        // テスト項目: available_endpoints が無い場合はキー自体を出力しない
        let response = ErrorResponse {
            status: "error".to_string(),
            message: "boom".to_string(),
            timestamp: "t".to_string(),
            available_endpoints: None,
        };

        let value = serde_json::to_value(&response).unwrap();

        assert!(value.get("available_endpoints").is_none());
    }
}
