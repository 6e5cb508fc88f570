//! Supported language table and detection-reply matching.

use super::{DetectedLanguage, LanguageCode};

/// A language the relay can translate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedLanguage {
    /// Upper-case two-letter code used on the wire.
    pub code: &'static str,
    pub name: &'static str,
    pub flag: &'static str,
    /// Lower-case ISO 639-1 code.
    pub iso: &'static str,
}

pub const SUPPORTED_LANGUAGES: &[SupportedLanguage] = &[
    SupportedLanguage { code: "EN", name: "English", flag: "🇺🇸", iso: "en" },
    SupportedLanguage { code: "RU", name: "Русский", flag: "🇷🇺", iso: "ru" },
    SupportedLanguage { code: "DE", name: "Deutsch", flag: "🇩🇪", iso: "de" },
    SupportedLanguage { code: "FR", name: "Français", flag: "🇫🇷", iso: "fr" },
    SupportedLanguage { code: "ES", name: "Español", flag: "🇪🇸", iso: "es" },
    SupportedLanguage { code: "CS", name: "Čeština", flag: "🇨🇿", iso: "cs" },
    SupportedLanguage { code: "PL", name: "Polski", flag: "🇵🇱", iso: "pl" },
    SupportedLanguage { code: "LT", name: "Lietuvių", flag: "🇱🇹", iso: "lt" },
    SupportedLanguage { code: "LV", name: "Latviešu", flag: "🇱🇻", iso: "lv" },
    SupportedLanguage { code: "NO", name: "Norsk", flag: "🇳🇴", iso: "no" },
];

/// Fallback when detection cannot decide.
pub const FALLBACK_LANGUAGE: &str = "EN";

pub fn find_language(code: &LanguageCode) -> Option<&'static SupportedLanguage> {
    SUPPORTED_LANGUAGES.iter().find(|l| l.code == code.as_str())
}

pub fn is_supported(code: &LanguageCode) -> bool {
    find_language(code).is_some()
}

/// Interpret the provider's raw detection reply.
///
/// - exact supported code → confidence 0.95
/// - reply with a supported code as a standalone word → confidence 0.8
/// - anything else → English, confidence 0.5
///
/// Codes are only matched as whole alphabetic tokens, so "unknown" or
/// "not sure" never read as Norwegian.
pub fn match_detection_reply(reply: &str) -> DetectedLanguage {
    let normalized = reply.trim().to_ascii_uppercase();

    if let Some(language) = SUPPORTED_LANGUAGES.iter().find(|l| l.code == normalized) {
        return detected(language.code, 0.95, "openai-detection");
    }

    let token_match = normalized
        .split(|c: char| !c.is_alphabetic())
        .find_map(|token| SUPPORTED_LANGUAGES.iter().find(|l| l.code == token));
    if let Some(language) = token_match {
        return detected(language.code, 0.8, "openai-detection-fuzzy");
    }

    detected(FALLBACK_LANGUAGE, 0.5, "fallback")
}

/// Result used when the provider call itself failed.
pub fn detection_error_fallback() -> DetectedLanguage {
    detected(FALLBACK_LANGUAGE, 0.3, "error-fallback")
}

fn detected(code: &'static str, confidence: f64, provider: &str) -> DetectedLanguage {
    DetectedLanguage {
        code: LanguageCode::from_table(code),
        confidence,
        provider: provider.to_string(),
    }
}
