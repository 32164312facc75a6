//! Error codes and failure payloads for railway-oriented pipelines.
//!
//! `ErrorCode` is the canonical failure identity: a plain numeric code plus
//! a static category string. Codes below [`ErrorCode::CUSTOM_BASE`] are
//! reserved for the built-in set; everything at or above it belongs to the
//! caller. Identity is the number alone - two codes with the same number
//! compare equal regardless of category.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable, zero-allocation failure identifier.
///
/// Copy-cheap and safe to share across threads. Serializes as its numeric
/// code only; the category is descriptive metadata, not part of identity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct ErrorCode {
    code: u32,
    #[serde(skip)]
    category: &'static str,
}

impl ErrorCode {
    /// First numeric code available to callers. Everything below is reserved.
    pub const CUSTOM_BASE: u32 = 1000;

    /// Success sentinel. Never placed on a failure.
    pub const NONE: Self = Self::builtin(0, "success");
    /// Generic fault with no better classification.
    pub const UNKNOWN: Self = Self::builtin(1, "general");

    pub const NOT_FOUND: Self = Self::builtin(100, "validation");
    pub const INVALID_INPUT: Self = Self::builtin(101, "validation");
    pub const VALIDATION_FAILED: Self = Self::builtin(102, "validation");
    pub const UNAUTHORIZED: Self = Self::builtin(103, "validation");
    pub const ALREADY_EXISTS: Self = Self::builtin(104, "validation");
    pub const INSUFFICIENT_RESOURCES: Self = Self::builtin(105, "validation");
    pub const CAPACITY: Self = Self::builtin(106, "validation");
    pub const FORBIDDEN: Self = Self::builtin(107, "validation");
    pub const INVALID_OPERATION: Self = Self::builtin(108, "validation");

    pub const DATABASE_ERROR: Self = Self::builtin(200, "io");
    pub const NETWORK_ERROR: Self = Self::builtin(201, "io");
    pub const FILE_ERROR: Self = Self::builtin(202, "io");
    pub const TIMEOUT: Self = Self::builtin(203, "io");
    pub const CANCELLED: Self = Self::builtin(204, "io");

    pub const OUT_OF_MEMORY: Self = Self::builtin(300, "runtime");
    pub const NULL_REFERENCE: Self = Self::builtin(301, "runtime");
    pub const INDEX_OUT_OF_RANGE: Self = Self::builtin(302, "runtime");

    const fn builtin(code: u32, category: &'static str) -> Self {
        Self { code, category }
    }

    /// Create a caller-defined code.
    ///
    /// # Panics
    ///
    /// Panics when `code` falls inside the reserved built-in range. Reserved
    /// collisions are a programmer error, not a recoverable failure.
    #[must_use]
    pub const fn custom(code: u32, category: &'static str) -> Self {
        assert!(
            code >= Self::CUSTOM_BASE,
            "custom error codes start at ErrorCode::CUSTOM_BASE (1000)"
        );
        Self { code, category }
    }

    /// Numeric identity of this code.
    #[must_use]
    pub const fn code(&self) -> u32 {
        self.code
    }

    /// Descriptive category. Metadata only, never compared.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        self.category
    }

    /// Whether this is the success sentinel.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.code == 0
    }

    #[must_use]
    pub const fn is_builtin(&self) -> bool {
        self.code < Self::CUSTOM_BASE
    }

    #[must_use]
    pub const fn is_custom(&self) -> bool {
        self.code >= Self::CUSTOM_BASE
    }

    /// Stable symbolic name for built-in codes; `"custom"` otherwise.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self.code {
            0 => "none",
            1 => "unknown",
            100 => "not_found",
            101 => "invalid_input",
            102 => "validation_failed",
            103 => "unauthorized",
            104 => "already_exists",
            105 => "insufficient_resources",
            106 => "capacity",
            107 => "forbidden",
            108 => "invalid_operation",
            200 => "database_error",
            201 => "network_error",
            202 => "file_error",
            203 => "timeout",
            204 => "cancelled",
            300 => "out_of_memory",
            301 => "null_reference",
            302 => "index_out_of_range",
            _ => "custom",
        }
    }
}

impl PartialEq for ErrorCode {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for ErrorCode {}

impl Hash for ErrorCode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl PartialOrd for ErrorCode {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ErrorCode {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.code.cmp(&other.code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_builtin() {
            f.write_str(self.name())
        } else {
            write!(f, "custom({})", self.code)
        }
    }
}

impl From<u32> for ErrorCode {
    fn from(code: u32) -> Self {
        match code {
            0 => Self::NONE,
            1 => Self::UNKNOWN,
            100 => Self::NOT_FOUND,
            101 => Self::INVALID_INPUT,
            102 => Self::VALIDATION_FAILED,
            103 => Self::UNAUTHORIZED,
            104 => Self::ALREADY_EXISTS,
            105 => Self::INSUFFICIENT_RESOURCES,
            106 => Self::CAPACITY,
            107 => Self::FORBIDDEN,
            108 => Self::INVALID_OPERATION,
            200 => Self::DATABASE_ERROR,
            201 => Self::NETWORK_ERROR,
            202 => Self::FILE_ERROR,
            203 => Self::TIMEOUT,
            204 => Self::CANCELLED,
            300 => Self::OUT_OF_MEMORY,
            301 => Self::NULL_REFERENCE,
            302 => Self::INDEX_OUT_OF_RANGE,
            _ => Self {
                code,
                category: "custom",
            },
        }
    }
}

impl From<ErrorCode> for u32 {
    fn from(code: ErrorCode) -> Self {
        code.code
    }
}

fn message_suffix(message: &Option<Cow<'static, str>>) -> String {
    match message {
        Some(text) => format!(": {text}"),
        None => String::new(),
    }
}

/// Failure payload carried by an unsuccessful outcome.
///
/// The code is the single source of truth; the message is an optional,
/// non-semantic debug annotation. Two failures with the same code but
/// different messages mean the same error to any dispatching logic.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code}{}", message_suffix(.message))]
pub struct Failure {
    pub code: ErrorCode,
    pub message: Option<Cow<'static, str>>,
}

impl Failure {
    /// Bare failure. Allocation-free.
    #[track_caller]
    #[must_use]
    pub fn new(code: ErrorCode) -> Self {
        debug_assert!(
            !code.is_none(),
            "ErrorCode::NONE is the success sentinel and cannot be a failure"
        );
        Self {
            code,
            message: None,
        }
    }

    /// Failure with a debug annotation.
    #[track_caller]
    #[must_use]
    pub fn with_message(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> Self {
        let mut failure = Self::new(code);
        failure.message = Some(message.into());
        failure
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl From<ErrorCode> for Failure {
    #[track_caller]
    fn from(code: ErrorCode) -> Self {
        Self::new(code)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn identity_is_numeric_only() {
        let a = ErrorCode::custom(1500, "inventory");
        let b = ErrorCode::custom(1500, "billing");
        assert_eq!(a, b);
        assert_ne!(a, ErrorCode::custom(1501, "inventory"));
    }

    #[test]
    fn builtin_codes_keep_reserved_values() {
        assert_eq!(ErrorCode::NONE.code(), 0);
        assert_eq!(ErrorCode::UNKNOWN.code(), 1);
        assert_eq!(ErrorCode::NOT_FOUND.code(), 100);
        assert_eq!(ErrorCode::CANCELLED.code(), 204);
        assert_eq!(ErrorCode::INDEX_OUT_OF_RANGE.code(), 302);
        assert!(ErrorCode::NOT_FOUND.is_builtin());
        assert!(ErrorCode::custom(1000, "app").is_custom());
    }

    #[test]
    fn serializes_as_numeric_code() {
        let json = serde_json::to_string(&ErrorCode::NOT_FOUND).unwrap();
        assert_eq!(json, "100");

        let back: ErrorCode = serde_json::from_str("100").unwrap();
        assert_eq!(back, ErrorCode::NOT_FOUND);
        assert_eq!(back.category(), "validation");
    }

    #[test]
    fn custom_code_roundtrips_by_number() {
        let code = ErrorCode::custom(2200, "matchmaking");
        let json = serde_json::to_string(&code).unwrap();
        let back: ErrorCode = serde_json::from_str(&json).unwrap();
        // Category is metadata and is not carried across the wire.
        assert_eq!(back, code);
        assert_eq!(back.category(), "custom");
    }

    #[test]
    fn display_uses_symbolic_names() {
        assert_eq!(ErrorCode::TIMEOUT.to_string(), "timeout");
        assert_eq!(ErrorCode::custom(1234, "app").to_string(), "custom(1234)");
    }

    #[test]
    fn failure_display_includes_optional_message() {
        assert_eq!(Failure::new(ErrorCode::NOT_FOUND).to_string(), "not_found");
        assert_eq!(
            Failure::with_message(ErrorCode::NOT_FOUND, "user 42").to_string(),
            "not_found: user 42"
        );
    }

    #[test]
    fn failure_is_a_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&Failure::new(ErrorCode::DATABASE_ERROR));
    }
}
