//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{TranslationError, ValueObjectError};

/// 接続処理のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("could not allocate a unique connection id after {attempts} attempts")]
    IdExhausted { attempts: usize },
}

/// ロール設定のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetRoleError {
    #[error("invalid role: {0}")]
    InvalidRole(#[from] ValueObjectError),

    #[error("connection '{0}' is not registered")]
    UnknownConnection(String),
}

/// ルーム参加のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    #[error("invalid join request: {0}")]
    InvalidInput(#[from] ValueObjectError),

    #[error("connection '{0}' is not registered")]
    UnknownConnection(String),
}

/// 翻訳処理のエラー
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("{0}")]
    InvalidInput(#[from] ValueObjectError),

    #[error("unsupported language pair: {from} → {to}")]
    UnsupportedPair { from: String, to: String },

    #[error("translation service is not configured")]
    NotConfigured,

    #[error("translation failed: {0}")]
    Provider(TranslationError),
}

impl From<TranslationError> for TranslateError {
    fn from(error: TranslationError) -> Self {
        match error {
            TranslationError::NotConfigured => TranslateError::NotConfigured,
            other => TranslateError::Provider(other),
        }
    }
}

/// 言語判定のエラー（入力不正のみ。プロバイダー障害はフォールバックで吸収する）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectLanguageError {
    #[error("text must not be empty")]
    EmptyText,
}

/// ルーム参照のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomQueryError {
    #[error("invalid room id: {0}")]
    InvalidRoomId(#[from] ValueObjectError),

    #[error("room '{0}' not found")]
    NotFound(String),
}
