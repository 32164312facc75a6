//! Async railway combinators for [`Outcome`].
//!
//! Single-threaded cooperative suspension: the only await points are
//! around the caller-supplied future, and within one chain each step
//! completes (or short-circuits) strictly before the next begins. Nothing
//! here spawns threads or reorders steps.

use std::future::Future;

use shunt_core::{ErrorCode, Outcome};

/// Async extensions over a synchronous outcome.
///
/// Chains read left to right with an `.await` per step:
///
/// ```
/// # async fn demo() {
/// use shunt_async::AsyncOutcomeExt;
/// use shunt_core::Outcome;
///
/// let outcome = Outcome::success(2)
///     .map_async(|x| async move { x * 10 })
///     .await
///     .then_async(|x| async move { Outcome::success(x + 1) })
///     .await;
/// assert_eq!(outcome, Outcome::success(21));
/// # }
/// ```
pub trait AsyncOutcomeExt<T> {
    /// Chain an async fallible step. The binder is not invoked on failure.
    fn then_async<U, F, Fut>(self, binder: F) -> impl Future<Output = Outcome<U>>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Outcome<U>>;

    /// Transform the success value asynchronously.
    fn map_async<U, F, Fut>(self, mapper: F) -> impl Future<Output = Outcome<U>>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = U>;

    /// Keep the success only when the async predicate holds; otherwise
    /// fail with `code`. The predicate future must own its captures.
    fn filter_async<F, Fut>(self, predicate: F, code: ErrorCode) -> impl Future<Output = Outcome<T>>
    where
        F: FnOnce(&T) -> Fut,
        Fut: Future<Output = bool>;

    /// Turn a failure back into a success asynchronously.
    fn recover_async<F, Fut>(self, fallback: F) -> impl Future<Output = Outcome<T>>
    where
        F: FnOnce(ErrorCode) -> Fut,
        Fut: Future<Output = T>;
}

impl<T> AsyncOutcomeExt<T> for Outcome<T> {
    async fn then_async<U, F, Fut>(self, binder: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Outcome<U>>,
    {
        match self {
            Outcome::Success(value) => binder(value).await,
            Outcome::Failure(failure) => Outcome::Failure(failure),
        }
    }

    async fn map_async<U, F, Fut>(self, mapper: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = U>,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(mapper(value).await),
            Outcome::Failure(failure) => Outcome::Failure(failure),
        }
    }

    async fn filter_async<F, Fut>(self, predicate: F, code: ErrorCode) -> Outcome<T>
    where
        F: FnOnce(&T) -> Fut,
        Fut: Future<Output = bool>,
    {
        match self {
            Outcome::Success(value) => {
                if predicate(&value).await {
                    Outcome::Success(value)
                } else {
                    Outcome::failure(code)
                }
            }
            failure => failure,
        }
    }

    async fn recover_async<F, Fut>(self, fallback: F) -> Outcome<T>
    where
        F: FnOnce(ErrorCode) -> Fut,
        Fut: Future<Output = T>,
    {
        match self {
            Outcome::Failure(failure) => Outcome::Success(fallback(failure.code).await),
            success => success,
        }
    }
}
