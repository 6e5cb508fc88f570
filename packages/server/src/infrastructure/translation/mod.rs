//! External translation provider adapters.

mod openai;

pub use openai::{OpenAiConfig, OpenAiTranslationProvider};
