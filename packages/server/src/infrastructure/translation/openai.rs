//! Chat-completions based translation provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    LanguageCode, ProviderTranslation, TranslationError, TranslationProvider,
    language::find_language,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const TRANSLATION_TEMPERATURE: f32 = 0.3;
const TRANSLATION_MAX_TOKENS_CAP: usize = 4000;
const TRANSLATION_CONFIDENCE: f64 = 0.95;
const DETECTION_INPUT_CHARS: usize = 500;
const DETECTION_MAX_TOKENS: usize = 5;

const DETECTION_PROMPT: &str = "You are a language detection expert. Analyze the text and \
respond with ONLY the ISO language code from this list: EN, RU, DE, FR, ES, CS, PL, LT, LV, NO.\n\n\
Examples:\n\
\"Hello world\" → EN\n\
\"Bonjour le monde\" → FR\n\
\"Привет мир\" → RU\n\
\"Guten Tag\" → DE\n\n\
Respond with ONLY the 2-letter code, nothing else.";

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// `None` leaves the provider unconfigured; every call then fails fast.
    pub api_key: Option<String>,
    /// e.g. "https://api.openai.com/v1"
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct OpenAiTranslationProvider {
    client: Client,
    config: OpenAiConfig,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: usize,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl OpenAiTranslationProvider {
    pub fn new(config: OpenAiConfig) -> Result<Self, TranslationError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TranslationError::Request(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn provider_label(&self) -> String {
        format!("openai-{}", self.config.model)
    }

    async fn complete(
        &self,
        system_prompt: &str,
        user_content: &str,
        max_tokens: usize,
        temperature: f32,
    ) -> Result<String, TranslationError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(TranslationError::NotConfigured)?;

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_content,
                },
            ],
            max_tokens,
            temperature,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TranslationError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TranslationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::Request(e.to_string()))?;

        first_choice_content(body).ok_or(TranslationError::EmptyResponse)
    }
}

#[async_trait]
impl TranslationProvider for OpenAiTranslationProvider {
    async fn translate(
        &self,
        text: &str,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> Result<ProviderTranslation, TranslationError> {
        if source == target {
            return Ok(ProviderTranslation {
                translated_text: text.to_string(),
                confidence: 1.0,
                provider: "same-language".to_string(),
            });
        }

        let prompt = translation_prompt(source, target);
        let translated_text = self
            .complete(
                &prompt,
                text,
                translation_max_tokens(text),
                TRANSLATION_TEMPERATURE,
            )
            .await?;

        tracing::debug!(
            "Provider translated {} chars {} → {}",
            text.chars().count(),
            source,
            target
        );

        Ok(ProviderTranslation {
            translated_text,
            confidence: TRANSLATION_CONFIDENCE,
            provider: self.provider_label(),
        })
    }

    async fn detect_language(&self, text: &str) -> Result<String, TranslationError> {
        let sample: String = text.chars().take(DETECTION_INPUT_CHARS).collect();
        self.complete(DETECTION_PROMPT, &sample, DETECTION_MAX_TOKENS, 0.0)
            .await
    }

    fn is_configured(&self) -> bool {
        self.config
            .api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

fn language_name(code: &LanguageCode) -> &str {
    find_language(code).map_or(code.as_str(), |l| l.name)
}

fn translation_prompt(source: &LanguageCode, target: &LanguageCode) -> String {
    format!(
        "You are a professional translator. Translate the following text from {} to {}.\n\n\
RULES:\n\
- Provide ONLY the translation, no explanations\n\
- Maintain the original tone and style\n\
- Keep formatting if any",
        language_name(source),
        language_name(target)
    )
}

fn translation_max_tokens(text: &str) -> usize {
    (text.chars().count() * 3).clamp(1, TRANSLATION_MAX_TOKENS_CAP)
}

/// Trimmed content of the first choice, `None` when missing or blank.
fn first_choice_content(body: ChatResponse) -> Option<String> {
    body.choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(api_key: Option<&str>) -> OpenAiTranslationProvider {
        OpenAiTranslationProvider::new(OpenAiConfig {
            api_key: api_key.map(str::to_string),
            base_url: "http://127.0.0.1:9".to_string(),
            model: "gpt-4o-mini".to_string(),
        })
        .unwrap()
    }

    fn code(value: &str) -> LanguageCode {
        LanguageCode::parse(value).unwrap()
    }

    #[tokio::test]
    async fn test_same_language_short_circuits() {
        // テスト項目: 同一言語ペアは外部呼び出しなしで原文を返す
        // given (前提条件):
        let provider = provider(None);

        // when (操作):
        let result = provider
            .translate("Hallo", &code("DE"), &code("DE"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(result.translated_text, "Hallo");
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.provider, "same-language");
    }

    #[tokio::test]
    async fn test_missing_api_key_is_not_configured() {
        // テスト項目: API キー未設定時は NotConfigured エラー
        // given (前提条件):
        let provider = provider(None);

        // when (操作):
        let result = provider.translate("hi", &code("EN"), &code("RU")).await;

        // then (期待する結果):
        assert!(!provider.is_configured());
        assert!(matches!(result, Err(TranslationError::NotConfigured)));
    }

    #[test]
    fn test_blank_api_key_is_not_configured() {
        // テスト項目: 空白のみの API キーは未設定扱い
        assert!(!provider(Some("  ")).is_configured());
        assert!(provider(Some("sk-test")).is_configured());
    }

    #[test]
    fn test_translation_max_tokens_is_capped() {
        // テスト項目: max_tokens は文字数の 3 倍、上限 4000
        assert_eq!(translation_max_tokens("abc"), 9);
        assert_eq!(translation_max_tokens(&"a".repeat(5000)), 4000);
    }

    #[test]
    fn test_translation_prompt_uses_language_names() {
        // テスト項目: プロンプトには言語名が埋め込まれる
        let prompt = translation_prompt(&code("RU"), &code("DE"));

        assert!(prompt.contains("from Русский to Deutsch"));
    }

    #[test]
    fn test_first_choice_content_is_trimmed() {
        // テスト項目: 最初の choice の内容がトリムされて返る
        // given (前提条件):
        let body: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  Guten Morgen\n"}}]}"#,
        )
        .unwrap();

        // then (期待する結果):
        assert_eq!(first_choice_content(body), Some("Guten Morgen".to_string()));
    }

    #[test]
    fn test_first_choice_content_empty_cases() {
        // テスト項目: choice が無い・内容が空の場合は None
        let no_choices: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        let blank: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":"   "}}]}"#).unwrap();
        let null_content: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();

        assert_eq!(first_choice_content(no_choices), None);
        assert_eq!(first_choice_content(blank), None);
        assert_eq!(first_choice_content(null_content), None);
    }
}
