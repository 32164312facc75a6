//! Railway combinators over [`Outcome`].
//!
//! Every combinator is strictly left-to-right and fail-fast: the first
//! failure short-circuits everything after it, and the short-circuited
//! failure's code travels through unchanged unless a recovery step
//! (`recover`, `if_failed`, `catch`) explicitly transforms it. User
//! functions are never invoked on the track they do not belong to.

use crate::error::{ErrorCode, Failure};
use crate::outcome::Outcome;
use crate::safe;

impl<T> Outcome<T> {
    /// Transform the success value. `f` is not invoked on failure.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::Failure(failure) => Outcome::Failure(failure),
        }
    }

    /// Chain a fallible step. `f` is not invoked on failure.
    pub fn then<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self {
            Self::Success(value) => f(value),
            Self::Failure(failure) => Outcome::Failure(failure),
        }
    }

    /// Keep the success only when `predicate` holds; otherwise fail with
    /// `code`. An incoming failure passes through untouched.
    #[track_caller]
    pub fn filter(self, predicate: impl FnOnce(&T) -> bool, code: ErrorCode) -> Self {
        match self {
            Self::Success(value) => {
                if predicate(&value) {
                    Self::Success(value)
                } else {
                    Self::failure(code)
                }
            }
            failure => failure,
        }
    }

    /// Turn a failure back into a success. `fallback` is not invoked on
    /// success.
    pub fn recover(self, fallback: impl FnOnce(ErrorCode) -> T) -> Self {
        match self {
            Self::Failure(failure) => Self::Success(fallback(failure.code)),
            success => success,
        }
    }

    /// Replace a failure with an already-computed alternative.
    pub fn if_failed(self, alternative: Self) -> Self {
        match self {
            Self::Failure(_) => alternative,
            success => success,
        }
    }

    /// Replace a failure with a lazily-evaluated alternative. The closure
    /// is not evaluated on success.
    pub fn if_failed_with(self, alternative: impl FnOnce() -> Self) -> Self {
        match self {
            Self::Failure(_) => alternative(),
            success => success,
        }
    }

    /// Handle failures matching `predicate`; everything else passes
    /// through. The predicate sees the whole payload, code and annotation.
    pub fn catch(
        self,
        predicate: impl FnOnce(&Failure) -> bool,
        handler: impl FnOnce(Failure) -> Self,
    ) -> Self {
        match self {
            Self::Failure(failure) if predicate(&failure) => handler(failure),
            other => other,
        }
    }

    /// Observe the success value without altering the outcome.
    pub fn tap(self, f: impl FnOnce(&T)) -> Self {
        if let Self::Success(ref value) = self {
            f(value);
        }
        self
    }

    /// Observe the failure payload without altering the outcome.
    pub fn tap_failure(self, f: impl FnOnce(&Failure)) -> Self {
        if let Self::Failure(ref failure) = self {
            f(failure);
        }
        self
    }

    /// Side effect that must itself succeed; its failure fails the
    /// pipeline.
    pub fn tap_strict(self, f: impl FnOnce(&T) -> Outcome<()>) -> Self {
        match self {
            Self::Success(value) => match f(&value) {
                Outcome::Success(()) => Self::Success(value),
                Outcome::Failure(failure) => Self::Failure(failure),
            },
            failure => failure,
        }
    }

    /// Chain `f` only when `condition` holds on the success value;
    /// otherwise pass the success through unchanged.
    pub fn then_if(
        self,
        condition: impl FnOnce(&T) -> bool,
        f: impl FnOnce(T) -> Self,
    ) -> Self {
        match self {
            Self::Success(value) => {
                if condition(&value) {
                    f(value)
                } else {
                    Self::Success(value)
                }
            }
            failure => failure,
        }
    }

    /// Map only when `condition` holds on the success value.
    pub fn map_if(self, condition: impl FnOnce(&T) -> bool, f: impl FnOnce(T) -> T) -> Self {
        match self {
            Self::Success(value) => {
                if condition(&value) {
                    Self::Success(f(value))
                } else {
                    Self::Success(value)
                }
            }
            failure => failure,
        }
    }

    /// Observe the final outcome, success or failure, and pass it through.
    pub fn finally(self, f: impl FnOnce(&Self)) -> Self {
        f(&self);
        self
    }

    /// Terminal fold over the whole outcome, whichever track it is on.
    pub fn finish<R>(self, f: impl FnOnce(Self) -> R) -> R {
        f(self)
    }

    /// [`Outcome::then`], with the user function evaluated inside the
    /// fault boundary: a panic in `f` becomes a failure instead of
    /// unwinding through the pipeline.
    #[track_caller]
    pub fn then_safe<U>(self, f: impl FnOnce(T) -> Outcome<U>) -> Outcome<U> {
        match self {
            Self::Success(value) => safe::run(move || f(value)),
            Self::Failure(failure) => Outcome::Failure(failure),
        }
    }

    /// [`Outcome::map`], with the user function evaluated inside the
    /// fault boundary.
    #[track_caller]
    pub fn map_safe<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(value) => safe::value(move || f(value)),
            Self::Failure(failure) => Outcome::Failure(failure),
        }
    }

    /// [`Outcome::tap`], with the observer evaluated inside the fault
    /// boundary; a panicking observer fails the pipeline.
    #[track_caller]
    pub fn tap_safe(self, f: impl FnOnce(&T)) -> Self {
        match self {
            Self::Success(value) => match safe::value(|| f(&value)) {
                Outcome::Success(()) => Self::Success(value),
                Outcome::Failure(failure) => Self::Failure(failure),
            },
            failure => failure,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use std::cell::Cell;

    use super::*;

    #[test]
    fn map_transforms_success() {
        assert_eq!(Outcome::success(42).map(|x| x * 2), Outcome::success(84));
    }

    #[test]
    fn map_never_invokes_f_on_failure() {
        let calls = Cell::new(0);
        let outcome: Outcome<i32> = Outcome::failure(ErrorCode::NOT_FOUND);
        let mapped = outcome.map(|x| {
            calls.set(calls.get() + 1);
            x * 2
        });
        assert_eq!(calls.get(), 0);
        assert_eq!(mapped.error_code(), ErrorCode::NOT_FOUND);
    }

    #[test]
    fn then_satisfies_left_identity() {
        let f = |x: i32| Outcome::success(x + 1);
        assert_eq!(Outcome::success(5).then(f), f(5));
    }

    #[test]
    fn then_is_associative() {
        let f = |x: i32| Outcome::success(x + 1);
        let g = |x: i32| Outcome::success(x * 3);

        let left = Outcome::success(4).then(f).then(g);
        let right = Outcome::success(4).then(|x| f(x).then(g));
        assert_eq!(left, right);
    }

    #[test]
    fn then_short_circuits_and_preserves_payload() {
        let calls = Cell::new(0);
        let outcome: Outcome<i32> =
            Outcome::failure_with(ErrorCode::DATABASE_ERROR, "primary down");
        let chained = outcome.then(|x| {
            calls.set(calls.get() + 1);
            Outcome::success(x)
        });
        assert_eq!(calls.get(), 0);
        assert_eq!(chained.error_code(), ErrorCode::DATABASE_ERROR);
        assert_eq!(chained.message(), Some("primary down"));
    }

    #[test]
    fn filter_keeps_or_replaces() {
        assert_eq!(
            Outcome::success(4).filter(|x| x % 2 == 0, ErrorCode::VALIDATION_FAILED),
            Outcome::success(4)
        );
        assert_eq!(
            Outcome::success(3)
                .filter(|x| x % 2 == 0, ErrorCode::VALIDATION_FAILED)
                .error_code(),
            ErrorCode::VALIDATION_FAILED
        );
        // An incoming failure keeps its own code, not the filter's.
        assert_eq!(
            Outcome::<i32>::failure(ErrorCode::NOT_FOUND)
                .filter(|_| true, ErrorCode::VALIDATION_FAILED)
                .error_code(),
            ErrorCode::NOT_FOUND
        );
    }

    #[test]
    fn recover_rejoins_the_success_track() {
        let outcome: Outcome<i32> = Outcome::failure(ErrorCode::NOT_FOUND);
        assert_eq!(outcome.recover(|_| 0), Outcome::success(0));

        let calls = Cell::new(0);
        let kept = Outcome::success(9).recover(|_| {
            calls.set(calls.get() + 1);
            0
        });
        assert_eq!(calls.get(), 0);
        assert_eq!(kept, Outcome::success(9));
    }

    #[test]
    fn if_failed_is_lazy_only_when_asked() {
        let evaluated = Cell::new(false);
        let kept = Outcome::success(1).if_failed_with(|| {
            evaluated.set(true);
            Outcome::success(2)
        });
        assert!(!evaluated.get());
        assert_eq!(kept, Outcome::success(1));

        let swapped: Outcome<i32> =
            Outcome::failure(ErrorCode::TIMEOUT).if_failed(Outcome::success(2));
        assert_eq!(swapped, Outcome::success(2));
    }

    #[test]
    fn catch_only_fires_on_matching_failures() {
        let handled: Outcome<i32> = Outcome::failure_with(ErrorCode::NETWORK_ERROR, "dns")
            .catch(
                |f| f.message() == Some("dns"),
                |_| Outcome::success(0),
            );
        assert_eq!(handled, Outcome::success(0));

        let untouched: Outcome<i32> = Outcome::failure(ErrorCode::NETWORK_ERROR)
            .catch(|f| f.code == ErrorCode::TIMEOUT, |_| Outcome::success(0));
        assert_eq!(untouched.error_code(), ErrorCode::NETWORK_ERROR);
    }

    #[test]
    fn taps_fire_only_for_their_track() {
        let seen = Cell::new(0);
        let _ = Outcome::success(5)
            .tap(|v| seen.set(*v))
            .tap_failure(|_| seen.set(-1));
        assert_eq!(seen.get(), 5);

        let code = Cell::new(ErrorCode::NONE);
        let _ = Outcome::<i32>::failure(ErrorCode::CAPACITY)
            .tap(|_| code.set(ErrorCode::UNKNOWN))
            .tap_failure(|f| code.set(f.code));
        assert_eq!(code.get(), ErrorCode::CAPACITY);
    }

    #[test]
    fn tap_strict_fails_the_pipeline() {
        let outcome = Outcome::success(5).tap_strict(|_| Outcome::failure(ErrorCode::FILE_ERROR));
        assert_eq!(outcome.error_code(), ErrorCode::FILE_ERROR);

        let outcome = Outcome::success(5).tap_strict(|_| Outcome::success(()));
        assert_eq!(outcome, Outcome::success(5));
    }

    #[test]
    fn conditional_steps_pass_through_when_condition_fails() {
        let doubled = Outcome::success(10).map_if(|v| *v > 5, |v| v * 2);
        assert_eq!(doubled, Outcome::success(20));

        let kept = Outcome::success(3).map_if(|v| *v > 5, |v| v * 2);
        assert_eq!(kept, Outcome::success(3));

        let bound = Outcome::success(10).then_if(|v| *v > 5, |v| Outcome::success(v + 1));
        assert_eq!(bound, Outcome::success(11));
    }

    #[test]
    fn finally_observes_both_tracks() {
        let observed = Cell::new(false);
        let outcome = Outcome::<i32>::failure(ErrorCode::TIMEOUT)
            .finally(|o| observed.set(o.is_failure()));
        assert!(observed.get());
        assert_eq!(outcome.error_code(), ErrorCode::TIMEOUT);

        let summary = Outcome::success(2).finish(|o| if o.is_success() { "ok" } else { "err" });
        assert_eq!(summary, "ok");
    }

    #[test]
    fn safe_variants_convert_panics_into_failures() {
        let outcome: Outcome<i32> = Outcome::success(1).map_safe(|_| panic!("boom"));
        assert_eq!(outcome.error_code(), ErrorCode::UNKNOWN);

        let outcome: Outcome<i32> = Outcome::success(1).then_safe(|_| panic!("boom"));
        assert_eq!(outcome.error_code(), ErrorCode::UNKNOWN);

        let outcome = Outcome::success(1).tap_safe(|_| panic!("boom"));
        assert_eq!(outcome.error_code(), ErrorCode::UNKNOWN);

        // The failure track never evaluates the user function at all.
        let outcome: Outcome<i32> =
            Outcome::<i32>::failure(ErrorCode::NOT_FOUND).then_safe(|_| panic!("boom"));
        assert_eq!(outcome.error_code(), ErrorCode::NOT_FOUND);
    }
}
