//! The two-track outcome type at the heart of every pipeline.
//!
//! An [`Outcome`] is either `Success(value)` or `Failure(payload)`. Both
//! variants are public: `match` is the primary, exhaustive way to look
//! inside, with the named predicates and accessors layered on top. Values
//! are immutable once constructed - every combinator produces a new
//! outcome rather than mutating in place, so outcomes are safe to share
//! and copy across concurrent contexts whenever `T` is.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, Failure};

/// Success-with-value or failure-with-code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome<T> {
    Success(T),
    Failure(Failure),
}

impl<T> Outcome<T> {
    /// Wrap a value on the success track.
    pub fn success(value: T) -> Self {
        Self::Success(value)
    }

    /// Bare failure with a code. Allocation-free.
    #[track_caller]
    pub fn failure(code: ErrorCode) -> Self {
        Self::Failure(Failure::new(code))
    }

    /// Failure with a debug annotation layered over the code.
    #[track_caller]
    pub fn failure_with(code: ErrorCode, message: impl Into<Cow<'static, str>>) -> Self {
        Self::Failure(Failure::with_message(code, message))
    }

    /// `Success(value)` when `condition` holds, otherwise `failure(code)`.
    #[track_caller]
    pub fn success_if(condition: bool, value: T, code: ErrorCode) -> Self {
        if condition {
            Self::Success(value)
        } else {
            Self::failure(code)
        }
    }

    /// `failure(code)` when `condition` holds, otherwise `Success(value)`.
    #[track_caller]
    pub fn failure_if(condition: bool, value: T, code: ErrorCode) -> Self {
        Self::success_if(!condition, value, code)
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Consume the outcome and return the success value.
    ///
    /// # Panics
    ///
    /// Panics when called on a failure. Reading the value of a failure is a
    /// precondition violation - a programmer error surfaced immediately,
    /// never silently defaulted.
    #[track_caller]
    #[allow(clippy::panic)]
    pub fn value(self) -> T {
        match self {
            Self::Success(value) => value,
            Self::Failure(failure) => {
                panic!("Outcome::value called on a failure ({failure})")
            }
        }
    }

    /// Success value, or `default` on failure.
    pub fn value_or(self, default: T) -> T {
        match self {
            Self::Success(value) => value,
            Self::Failure(_) => default,
        }
    }

    /// Success value, or the result of `fallback` applied to the failure.
    pub fn value_or_else(self, fallback: impl FnOnce(Failure) -> T) -> T {
        match self {
            Self::Success(value) => value,
            Self::Failure(failure) => fallback(failure),
        }
    }

    /// The failure code, or [`ErrorCode::NONE`] on success.
    #[must_use]
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::Success(_) => ErrorCode::NONE,
            Self::Failure(failure) => failure.code,
        }
    }

    /// The debug annotation, if this is an annotated failure.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => failure.message(),
        }
    }

    /// Success value as a std `Option`, discarding any failure.
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Failure payload as a std `Option`, discarding any success.
    pub fn err(self) -> Option<Failure> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }

    /// Borrowing view, for inspecting without consuming.
    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Self::Success(value) => Outcome::Success(value),
            Self::Failure(failure) => Outcome::Failure(failure.clone()),
        }
    }

    /// Dispatch exhaustively to exactly one branch.
    pub fn match_with<R>(
        self,
        on_success: impl FnOnce(T) -> R,
        on_failure: impl FnOnce(Failure) -> R,
    ) -> R {
        match self {
            Self::Success(value) => on_success(value),
            Self::Failure(failure) => on_failure(failure),
        }
    }

    /// Convert into a std `Result` for `?`-style interop.
    pub fn into_result(self) -> Result<T, Failure> {
        self.into()
    }
}

impl<T> From<Failure> for Outcome<T> {
    fn from(failure: Failure) -> Self {
        Self::Failure(failure)
    }
}

impl<T> From<Outcome<T>> for Result<T, Failure> {
    fn from(outcome: Outcome<T>) -> Self {
        match outcome {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(failure) => Err(failure),
        }
    }
}

impl<T> From<Result<T, Failure>> for Outcome<T> {
    fn from(result: Result<T, Failure>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(failure) => Self::Failure(failure),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn success_holds_its_value() {
        let outcome = Outcome::success(42);
        assert!(outcome.is_success());
        assert!(!outcome.is_failure());
        assert_eq!(outcome.error_code(), ErrorCode::NONE);
        assert_eq!(outcome.value(), 42);
    }

    #[test]
    fn failure_holds_its_code() {
        let outcome: Outcome<i32> = Outcome::failure(ErrorCode::NOT_FOUND);
        assert!(outcome.is_failure());
        assert_eq!(outcome.error_code(), ErrorCode::NOT_FOUND);
        assert_eq!(outcome.message(), None);
    }

    #[test]
    fn failure_message_is_optional_annotation() {
        let outcome: Outcome<i32> =
            Outcome::failure_with(ErrorCode::DATABASE_ERROR, "connection refused");
        assert_eq!(outcome.error_code(), ErrorCode::DATABASE_ERROR);
        assert_eq!(outcome.message(), Some("connection refused"));
    }

    #[test]
    #[should_panic(expected = "value called on a failure")]
    fn reading_value_of_failure_is_fatal() {
        let outcome: Outcome<i32> = Outcome::failure(ErrorCode::NOT_FOUND);
        let _ = outcome.value();
    }

    #[test]
    fn success_if_truth_table() {
        assert_eq!(
            Outcome::success_if(true, 7, ErrorCode::VALIDATION_FAILED).ok(),
            Some(7)
        );
        assert_eq!(
            Outcome::success_if(false, 7, ErrorCode::VALIDATION_FAILED).error_code(),
            ErrorCode::VALIDATION_FAILED
        );
        assert_eq!(
            Outcome::failure_if(true, 7, ErrorCode::CAPACITY).error_code(),
            ErrorCode::CAPACITY
        );
        assert_eq!(Outcome::failure_if(false, 7, ErrorCode::CAPACITY).ok(), Some(7));
    }

    #[test]
    fn value_or_takes_the_fallback_lane() {
        let outcome: Outcome<i32> = Outcome::failure(ErrorCode::TIMEOUT);
        assert_eq!(outcome.value_or(0), 0);

        let outcome: Outcome<i32> = Outcome::failure(ErrorCode::TIMEOUT);
        assert_eq!(outcome.value_or_else(|f| f.code.code() as i32), 203);
    }

    #[test]
    fn match_with_dispatches_to_exactly_one_branch() {
        let label = Outcome::success(10).match_with(|v| format!("ok {v}"), |f| format!("err {f}"));
        assert_eq!(label, "ok 10");

        let label: String = Outcome::<i32>::failure(ErrorCode::NOT_FOUND)
            .match_with(|v| format!("ok {v}"), |f| format!("err {f}"));
        assert_eq!(label, "err not_found");
    }

    #[test]
    fn std_result_interop_roundtrips() {
        let ok: Result<i32, Failure> = Outcome::success(3).into_result();
        assert_eq!(ok, Ok(3));

        let outcome = Outcome::from(Err::<i32, _>(Failure::new(ErrorCode::CAPACITY)));
        assert_eq!(outcome.error_code(), ErrorCode::CAPACITY);
    }

    #[test]
    fn serializes_with_structural_tags() {
        let json = serde_json::to_string(&Outcome::success(5)).unwrap();
        assert_eq!(json, r#"{"Success":5}"#);

        let outcome: Outcome<i32> = serde_json::from_str(
            r#"{"Failure":{"code":100,"message":null}}"#,
        )
        .unwrap();
        assert_eq!(outcome.error_code(), ErrorCode::NOT_FOUND);
    }
}
