//! Value objects for the relay domain.
//!
//! Every constructor validates its input so that the rest of the crate can
//! rely on the invariants below without re-checking them.

use std::fmt;

use uuid::Uuid;

use super::ValueObjectError;

/// Maximum length of a role tag.
pub const ROLE_MAX_LEN: usize = 64;
/// Maximum length of a room identifier.
pub const ROOM_ID_MAX_LEN: usize = 64;
/// Maximum length of a display name (after trimming).
pub const DISPLAY_NAME_MAX_LEN: usize = 50;
/// Maximum length of a text submitted for translation (in characters).
pub const TRANSLATION_TEXT_MAX_LEN: usize = 5000;

/// Role assigned to every connection until it sends `set_role`.
pub const DEFAULT_ROLE: &str = "unknown";

// ========================================
// ConnectionId
// ========================================

/// Opaque identifier of one live connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::ConnectionIdEmpty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generates connection ids of the form `client_<unix-millis>_<9 hex chars>`.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    const SUFFIX_LEN: usize = 9;

    pub fn generate(now_millis: i64) -> ConnectionId {
        let random = Uuid::new_v4().simple().to_string();
        ConnectionId(format!(
            "client_{}_{}",
            now_millis,
            &random[..Self::SUFFIX_LEN]
        ))
    }
}

// ========================================
// Role
// ========================================

/// Free-form role tag. Advisory metadata only, never an access boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Role(String);

impl Role {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::RoleEmpty);
        }
        let len = value.chars().count();
        if len > ROLE_MAX_LEN {
            return Err(ValueObjectError::RoleTooLong {
                max: ROLE_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Role {
    fn default() -> Self {
        Self(DEFAULT_ROLE.to_string())
    }
}

impl TryFrom<String> for Role {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

// ========================================
// RoomId
// ========================================

/// Client-supplied, case-sensitive room token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::RoomIdEmpty);
        }
        let len = value.chars().count();
        if len > ROOM_ID_MAX_LEN {
            return Err(ValueObjectError::RoomIdTooLong {
                max: ROOM_ID_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ========================================
// DisplayName
// ========================================

/// Name a member shows to the rest of its room. Stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::DisplayNameEmpty);
        }
        let len = trimmed.chars().count();
        if len > DISPLAY_NAME_MAX_LEN {
            return Err(ValueObjectError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

// ========================================
// LanguageCode
// ========================================

/// Two-letter language code, normalized to upper case.
///
/// Normalization happens here, at the boundary; the cache and the provider
/// only ever see upper-case codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LanguageCode(String);

impl LanguageCode {
    pub fn parse(value: &str) -> Result<Self, ValueObjectError> {
        let value = value.trim();
        if value.chars().count() != 2 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValueObjectError::InvalidLanguageCode(value.to_string()));
        }
        Ok(Self(value.to_ascii_uppercase()))
    }

    /// Build a code from the supported-language table, which holds only
    /// valid upper-case codes.
    pub(super) fn from_table(code: &'static str) -> Self {
        Self(code.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lower-case form used in HTTP responses.
    pub fn to_lowercase(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ========================================
// TranslationText
// ========================================

/// Text submitted for translation or detection: 1..=5000 characters.
///
/// The original (untrimmed) text is kept; trimming is applied where the
/// provider or the cache key needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationText(String);

impl TranslationText {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::TextEmpty);
        }
        let len = value.chars().count();
        if len > TRANSLATION_TEXT_MAX_LEN {
            return Err(ValueObjectError::TextTooLong {
                max: TRANSLATION_TEXT_MAX_LEN,
                actual: len,
            });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn trimmed(&self) -> &str {
        self.0.trim()
    }
}

// ========================================
// Timestamp
// ========================================

/// Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}
