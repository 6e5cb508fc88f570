//! Translation result cache port.

use async_trait::async_trait;

use super::TranslationResult;

/// Composite cache key: trimmed text plus source and target codes.
///
/// Codes are taken as given; case normalization is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    text: String,
    source: String,
    target: String,
}

impl CacheKey {
    pub fn new(text: &str, source: &str, target: &str) -> Self {
        Self {
            text: text.trim().to_string(),
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    /// Short form for log lines.
    pub fn preview(&self) -> String {
        let text: String = self.text.chars().take(40).collect();
        format!("{}_{}_{}", text, self.source, self.target)
    }
}

/// Bounded store of previously computed translations.
///
/// Never fails: a miss is `None`, and capacity pressure evicts instead of
/// rejecting.
#[async_trait]
pub trait TranslationCache: Send + Sync {
    async fn get(&self, text: &str, source: &str, target: &str) -> Option<TranslationResult>;

    async fn set(&self, text: &str, source: &str, target: &str, result: TranslationResult);

    async fn clear(&self);

    async fn size(&self) -> usize;
}
