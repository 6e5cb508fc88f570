//! Translation results and the external provider port.

use async_trait::async_trait;

use super::{LanguageCode, Timestamp, TranslationError};

/// What the external provider returns for one translation request.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderTranslation {
    pub translated_text: String,
    pub confidence: f64,
    pub provider: String,
}

/// A completed translation, as stored in the cache and returned to callers.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationResult {
    pub original_text: String,
    pub translated_text: String,
    pub source: LanguageCode,
    pub target: LanguageCode,
    pub confidence: f64,
    pub provider: String,
    pub translated_at: Timestamp,
    /// Time the provider call took, in milliseconds.
    pub processing_time_ms: u64,
}

/// Outcome of language detection.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedLanguage {
    pub code: LanguageCode,
    pub confidence: f64,
    pub provider: String,
}

/// External translation service (opaque request/response contract).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate `text` from `source` to `target`.
    async fn translate(
        &self,
        text: &str,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> Result<ProviderTranslation, TranslationError>;

    /// Ask the provider which supported language `text` is written in.
    ///
    /// Returns the provider's raw reply; matching it against the supported
    /// table is done by the caller.
    async fn detect_language(&self, text: &str) -> Result<String, TranslationError>;

    /// Whether the provider has the credentials it needs.
    fn is_configured(&self) -> bool;
}
