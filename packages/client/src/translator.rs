//! HTTP client for the server's `/translate` endpoint.

use std::time::Duration;

use dashka_server::infrastructure::dto::http::{
    ErrorResponse, TranslateRequest, TranslateResponse,
};

use crate::error::ClientError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct Translator {
    http: reqwest::Client,
    endpoint: String,
    from: String,
    to: String,
}

impl Translator {
    pub fn new(api_url: &str, from: &str, to: &str) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ClientError::TranslateError(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: format!("{}/translate", api_url.trim_end_matches('/')),
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    pub async fn translate(&self, text: &str) -> Result<TranslateResponse, ClientError> {
        let request = TranslateRequest {
            text: Some(text.to_string()),
            source_language: Some(self.from.clone()),
            target_language: Some(self.to.clone()),
            ..TranslateRequest::default()
        };

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClientError::TranslateError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClientError::TranslateError(e.to_string()))?;

        if !status.is_success() {
            return Err(ClientError::TranslateError(error_message(
                status.as_u16(),
                &body,
            )));
        }

        serde_json::from_str(&body).map_err(|e| ClientError::TranslateError(e.to_string()))
    }
}

/// The server's error `message` when the body carries one.
fn error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(error) => format!("{} (HTTP {})", error.message, status),
        Err(_) => format!("HTTP {}", status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_api_body() {
        // テスト項目: サーバーのエラー本文からメッセージを取り出す
        // given (前提条件):
        let body = r#"{"status":"error","message":"Unsupported language pair: EN → JA","timestamp":"2023-01-01T00:00:00.000Z"}"#;

        // when (操作):
        let message = error_message(400, body);

        // then (期待する結果):
        assert_eq!(message, "Unsupported language pair: EN → JA (HTTP 400)");
    }

    #[test]
    fn test_error_message_without_body() {
        // テスト項目: 本文が JSON でない場合はステータスのみ
        assert_eq!(error_message(502, "Bad Gateway"), "HTTP 502");
    }

    #[test]
    fn test_endpoint_ignores_trailing_slash() {
        // テスト項目: API URL の末尾スラッシュは無視される
        let translator = Translator::new("http://127.0.0.1:8080/", "RU", "DE").unwrap();

        assert_eq!(translator.endpoint, "http://127.0.0.1:8080/translate");
    }
}
