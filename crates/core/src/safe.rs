//! The fault boundary between uncontrolled panics and the outcome algebra.
//!
//! Caller-supplied code runs inside [`run`] or [`value`]; any panic it
//! raises is intercepted here, exactly once, and converted into a failure.
//! A payload of the [`Cancelled`] marker becomes `failure(CANCELLED)`;
//! every other panic becomes `failure(UNKNOWN)`. Nothing unwinds past this
//! module into the combinators above it.
//!
//! With the `diagnostics` feature enabled the boundary attaches the call
//! site and the panic payload text to the failure message and logs the
//! fault via `tracing`. In the default build the capture path allocates
//! nothing and produces the bare code.

use std::any::Any;
use std::panic::{AssertUnwindSafe, Location, catch_unwind};

use crate::error::{ErrorCode, Failure};
use crate::outcome::Outcome;

/// Panic payload marking deliberate cancellation of the running operation.
///
/// Raised inside a wrapped operation, it surfaces as `failure(CANCELLED)`
/// instead of the generic `failure(UNKNOWN)` - cancellation is never
/// swallowed as a success and never reported as a generic fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cancelled;

impl Cancelled {
    /// Abort the current wrapped operation as cancelled.
    pub fn raise() -> ! {
        std::panic::panic_any(Cancelled)
    }
}

/// Evaluate an outcome-producing operation inside the fault boundary.
#[track_caller]
pub fn run<T>(operation: impl FnOnce() -> Outcome<T>) -> Outcome<T> {
    let site = Location::caller();
    match catch_unwind(AssertUnwindSafe(operation)) {
        Ok(outcome) => outcome,
        Err(payload) => Outcome::Failure(annotate(failure_from_panic(payload), site)),
    }
}

/// Evaluate a plain value-producing closure inside the fault boundary.
#[track_caller]
pub fn value<T>(producer: impl FnOnce() -> T) -> Outcome<T> {
    let site = Location::caller();
    match catch_unwind(AssertUnwindSafe(producer)) {
        Ok(value) => Outcome::Success(value),
        Err(payload) => Outcome::Failure(annotate(failure_from_panic(payload), site)),
    }
}

/// Classify a captured panic payload into a failure.
///
/// Shared with the asynchronous boundary, which catches its own unwinds
/// but classifies them identically.
#[must_use]
pub fn failure_from_panic(payload: Box<dyn Any + Send>) -> Failure {
    if payload.downcast_ref::<Cancelled>().is_some() {
        return Failure::new(ErrorCode::CANCELLED);
    }
    unknown_fault(payload.as_ref())
}

#[cfg(feature = "diagnostics")]
fn unknown_fault(payload: &(dyn Any + Send)) -> Failure {
    Failure::with_message(ErrorCode::UNKNOWN, panic_text(payload).to_owned())
}

#[cfg(not(feature = "diagnostics"))]
fn unknown_fault(_payload: &(dyn Any + Send)) -> Failure {
    Failure::new(ErrorCode::UNKNOWN)
}

#[cfg(feature = "diagnostics")]
fn panic_text(payload: &(dyn Any + Send)) -> &str {
    if let Some(text) = payload.downcast_ref::<&'static str>() {
        text
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text
    } else {
        "non-string panic payload"
    }
}

#[cfg(feature = "diagnostics")]
fn annotate(mut failure: Failure, site: &Location<'_>) -> Failure {
    tracing::error!(
        target: "shunt",
        code = failure.code.code(),
        %site,
        "fault captured at safe-execution boundary"
    );
    failure.message = Some(match failure.message.take() {
        Some(text) => format!("{site}: {text}").into(),
        None => site.to_string().into(),
    });
    failure
}

#[cfg(not(feature = "diagnostics"))]
fn annotate(failure: Failure, _site: &Location<'_>) -> Failure {
    failure
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use std::cell::Cell;

    use super::*;

    #[test]
    fn faults_become_unknown_failures() {
        let outcome: Outcome<i32> = run(|| panic!("exploded"));
        assert!(outcome.is_failure());
        assert_eq!(outcome.error_code(), ErrorCode::UNKNOWN);
    }

    #[test]
    fn cancellation_is_classified_distinctly() {
        let outcome: Outcome<i32> = run(|| Cancelled::raise());
        assert_eq!(outcome.error_code(), ErrorCode::CANCELLED);
    }

    #[test]
    fn clean_operations_pass_through_untouched() {
        let outcome = run(|| Outcome::success(5));
        assert_eq!(outcome, Outcome::success(5));

        let outcome: Outcome<i32> = run(|| Outcome::failure(ErrorCode::NOT_FOUND));
        assert_eq!(outcome.error_code(), ErrorCode::NOT_FOUND);
    }

    #[test]
    fn value_wraps_a_plain_producer() {
        assert_eq!(value(|| 3), Outcome::success(3));

        let outcome: Outcome<i32> = value(|| panic!("no"));
        assert_eq!(outcome.error_code(), ErrorCode::UNKNOWN);
    }

    #[test]
    fn the_boundary_is_crossed_exactly_once() {
        // A fault in the inner operation is converted exactly at the inner
        // boundary; the outer wrap sees an ordinary failure outcome, not a
        // second fault.
        let conversions = Cell::new(0);
        let outcome: Outcome<i32> = run(|| {
            let inner: Outcome<i32> = run(|| panic!("inner"));
            conversions.set(conversions.get() + 1);
            inner
        });
        assert_eq!(conversions.get(), 1);
        assert_eq!(outcome.error_code(), ErrorCode::UNKNOWN);
    }

    #[cfg(feature = "diagnostics")]
    #[test]
    fn diagnostics_mode_attaches_call_site_provenance() {
        let outcome: Outcome<i32> = run(|| panic!("exploded"));
        let message = outcome.message().unwrap_or_default().to_owned();
        assert!(message.contains("exploded"));
        assert!(message.contains("safe.rs"));
    }
}
