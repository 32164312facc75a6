//! Companion optional type for values that may be absent.
//!
//! Same contract as [`Outcome`](crate::Outcome): immutable, public
//! variants, combinators that produce new values. Converts losslessly to
//! and from `std::option::Option` at the crate boundary; absence carries
//! no code, so turning a `None` into a failure goes through
//! [`Optional::to_outcome`] with an explicit code.

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;
use crate::outcome::Outcome;

/// Presence or absence of a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Optional<T> {
    Some(T),
    None,
}

impl<T> Default for Optional<T> {
    fn default() -> Self {
        Self::None
    }
}

impl<T> Optional<T> {
    pub fn some(value: T) -> Self {
        Self::Some(value)
    }

    #[must_use]
    pub const fn none() -> Self {
        Self::None
    }

    #[must_use]
    pub const fn is_some(&self) -> bool {
        matches!(self, Self::Some(_))
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Consume and return the contained value.
    ///
    /// # Panics
    ///
    /// Panics when called on `None`. Reading the value of an absent
    /// optional is a precondition violation, surfaced immediately.
    #[track_caller]
    #[allow(clippy::panic)]
    pub fn value(self) -> T {
        match self {
            Self::Some(value) => value,
            Self::None => panic!("Optional::value called on None"),
        }
    }

    pub fn value_or(self, default: T) -> T {
        match self {
            Self::Some(value) => value,
            Self::None => default,
        }
    }

    pub fn value_or_else(self, fallback: impl FnOnce() -> T) -> T {
        match self {
            Self::Some(value) => value,
            Self::None => fallback(),
        }
    }

    /// Transform the present value. `f` is not invoked on `None`.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Optional<U> {
        match self {
            Self::Some(value) => Optional::Some(f(value)),
            Self::None => Optional::None,
        }
    }

    /// Chain a step that may itself come up empty.
    pub fn bind<U>(self, f: impl FnOnce(T) -> Optional<U>) -> Optional<U> {
        match self {
            Self::Some(value) => f(value),
            Self::None => Optional::None,
        }
    }

    /// Keep the value only when `predicate` holds.
    pub fn filter(self, predicate: impl FnOnce(&T) -> bool) -> Self {
        match self {
            Self::Some(value) if predicate(&value) => Self::Some(value),
            _ => Self::None,
        }
    }

    /// Dispatch exhaustively to exactly one branch.
    pub fn match_with<R>(self, on_some: impl FnOnce(T) -> R, on_none: impl FnOnce() -> R) -> R {
        match self {
            Self::Some(value) => on_some(value),
            Self::None => on_none(),
        }
    }

    /// Observe the present value without altering the optional.
    pub fn on_some(self, f: impl FnOnce(&T)) -> Self {
        if let Self::Some(ref value) = self {
            f(value);
        }
        self
    }

    /// Observe absence without altering the optional.
    pub fn on_none(self, f: impl FnOnce()) -> Self {
        if self.is_none() {
            f();
        }
        self
    }

    /// Lift into an outcome, treating absence as the given failure code.
    #[track_caller]
    pub fn to_outcome(self, code: ErrorCode) -> Outcome<T> {
        match self {
            Self::Some(value) => Outcome::Success(value),
            Self::None => Outcome::failure(code),
        }
    }

    /// Lift into an outcome, treating absence as a valid default.
    pub fn to_outcome_or(self, default: T) -> Outcome<T> {
        Outcome::Success(self.value_or(default))
    }

    /// Lift into an outcome, producing the default lazily on absence.
    pub fn to_outcome_or_else(self, default: impl FnOnce() -> T) -> Outcome<T> {
        Outcome::Success(self.value_or_else(default))
    }

    pub fn into_option(self) -> Option<T> {
        self.into()
    }
}

impl<T> From<Option<T>> for Optional<T> {
    fn from(option: Option<T>) -> Self {
        match option {
            Some(value) => Self::Some(value),
            None => Self::None,
        }
    }
}

impl<T> From<Optional<T>> for Option<T> {
    fn from(optional: Optional<T>) -> Self {
        match optional {
            Optional::Some(value) => Some(value),
            Optional::None => None,
        }
    }
}
