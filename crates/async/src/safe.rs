//! Fault boundary for asynchronous operations.
//!
//! The async twin of `shunt_core::safe`: both the closure call that builds
//! the future and every poll of the future itself run under the boundary,
//! so a panic at any point surfaces as a failure instead of unwinding into
//! the caller. Classification is shared with the sync boundary - a
//! [`Cancelled`](shunt_core::safe::Cancelled) payload becomes
//! `failure(CANCELLED)`, anything else `failure(UNKNOWN)`.

use std::future::Future;
use std::panic::{AssertUnwindSafe, catch_unwind};

use futures::FutureExt;

use shunt_core::safe::failure_from_panic;
use shunt_core::{ErrorCode, Outcome};

use crate::cancel::CancelToken;

/// Evaluate an async outcome-producing operation inside the fault
/// boundary.
pub async fn run_async<T, F, Fut>(operation: F) -> Outcome<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Outcome<T>>,
{
    // The operation may panic while constructing the future, before the
    // first poll.
    let future = match catch_unwind(AssertUnwindSafe(operation)) {
        Ok(future) => future,
        Err(payload) => return Outcome::Failure(failure_from_panic(payload)),
    };
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(payload) => Outcome::Failure(failure_from_panic(payload)),
    }
}

/// [`run_async`], raced against a cancellation token.
///
/// A token latched before or during the operation yields
/// `failure(CANCELLED)`; the operation's own outcome is returned only when
/// it finishes first.
pub async fn run_cancellable<T, F, Fut>(token: &CancelToken, operation: F) -> Outcome<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Outcome<T>>,
{
    if token.is_cancelled() {
        return Outcome::failure(ErrorCode::CANCELLED);
    }
    tokio::select! {
        biased;
        () = token.cancelled() => Outcome::failure(ErrorCode::CANCELLED),
        outcome = run_async(operation) => outcome,
    }
}
