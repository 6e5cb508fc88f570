//! UseCase: 言語判定
//!
//! プロバイダーの応答をサポート言語表と照合する。プロバイダー障害は
//! エラーにせず、低信頼度の英語判定にフォールバックする。

use std::sync::Arc;

use crate::domain::{
    DetectedLanguage, TranslationProvider,
    language::{detection_error_fallback, match_detection_reply},
};

use super::error::DetectLanguageError;

pub struct DetectLanguageUseCase {
    provider: Arc<dyn TranslationProvider>,
}

impl DetectLanguageUseCase {
    pub fn new(provider: Arc<dyn TranslationProvider>) -> Self {
        Self { provider }
    }

    pub async fn execute(&self, text: &str) -> Result<DetectedLanguage, DetectLanguageError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DetectLanguageError::EmptyText);
        }

        match self.provider.detect_language(text).await {
            Ok(reply) => Ok(match_detection_reply(&reply)),
            Err(e) => {
                tracing::warn!("Language detection failed, using fallback: {}", e);
                Ok(detection_error_fallback())
            }
        }
    }
}
