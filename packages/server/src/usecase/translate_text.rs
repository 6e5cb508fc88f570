//! UseCase: テキスト翻訳（キャッシュ → 外部プロバイダー）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - TranslateTextUseCase::execute() メソッド
//! - キャッシュ参照 → プロバイダー呼び出し → キャッシュ保存の順序
//!
//! ### なぜこのテストが必要か
//! - キャッシュヒット時にプロバイダーを呼ばないことを保証
//! - キャッシュキーが (トリム済みテキスト, 大文字コード, 大文字コード) で
//!   あることを確認（正規化は境界で行い、キャッシュ内部では行わない）
//! - プロバイダー障害がキャッシュを汚さないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：キャッシュミス、キャッシュヒット
//! - 異常系：空テキスト、未対応の言語ペア、プロバイダー障害、未設定
//! - エッジケース：小文字コード・前後空白付きテキスト

use std::sync::Arc;
use std::time::Instant;

use dashka_shared::time::Clock;

use crate::domain::{
    LanguageCode, Timestamp, TranslationCache, TranslationProvider, TranslationResult,
    TranslationText, language::is_supported,
};

use super::error::TranslateError;

pub const DEFAULT_SOURCE_LANGUAGE: &str = "RU";
pub const DEFAULT_TARGET_LANGUAGE: &str = "DE";

/// 翻訳リクエスト（境界で受け取ったままの値）
#[derive(Debug, Clone, Default)]
pub struct TranslateCommand {
    pub text: String,
    pub source: Option<String>,
    pub target: Option<String>,
}

/// 翻訳結果とキャッシュ由来かどうか
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationOutcome {
    pub result: TranslationResult,
    pub from_cache: bool,
}

pub struct TranslateTextUseCase {
    cache: Arc<dyn TranslationCache>,
    provider: Arc<dyn TranslationProvider>,
    clock: Arc<dyn Clock>,
}

impl TranslateTextUseCase {
    pub fn new(
        cache: Arc<dyn TranslationCache>,
        provider: Arc<dyn TranslationProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cache,
            provider,
            clock,
        }
    }

    pub async fn execute(
        &self,
        command: TranslateCommand,
    ) -> Result<TranslationOutcome, TranslateError> {
        let started = Instant::now();

        let text = TranslationText::new(command.text)?;
        let source = parse_code(command.source.as_deref(), DEFAULT_SOURCE_LANGUAGE)?;
        let target = parse_code(command.target.as_deref(), DEFAULT_TARGET_LANGUAGE)?;

        if !is_supported(&source) || !is_supported(&target) {
            return Err(TranslateError::UnsupportedPair {
                from: source.as_str().to_string(),
                to: target.as_str().to_string(),
            });
        }

        let trimmed = text.trimmed();

        if let Some(mut cached) = self
            .cache
            .get(trimmed, source.as_str(), target.as_str())
            .await
        {
            cached.processing_time_ms = elapsed_millis(started);
            return Ok(TranslationOutcome {
                result: cached,
                from_cache: true,
            });
        }

        let translation = self
            .provider
            .translate(trimmed, &source, &target)
            .await
            .inspect_err(|e| tracing::error!("Translation {} → {} failed: {}", source, target, e))?;

        let result = TranslationResult {
            original_text: trimmed.to_string(),
            translated_text: translation.translated_text,
            source: source.clone(),
            target: target.clone(),
            confidence: translation.confidence,
            provider: translation.provider,
            translated_at: Timestamp::new(self.clock.now_millis()),
            processing_time_ms: elapsed_millis(started),
        };

        self.cache
            .set(trimmed, source.as_str(), target.as_str(), result.clone())
            .await;

        tracing::info!(
            "Translated {} chars {} → {} in {}ms",
            trimmed.chars().count(),
            source,
            target,
            result.processing_time_ms
        );

        Ok(TranslationOutcome {
            result,
            from_cache: false,
        })
    }
}

fn parse_code(value: Option<&str>, default: &str) -> Result<LanguageCode, TranslateError> {
    let value = value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(default);
    Ok(LanguageCode::parse(value)?)
}

fn elapsed_millis(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
