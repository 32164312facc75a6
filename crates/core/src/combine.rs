//! Conjunction and disjunction over several outcomes.
//!
//! `combine*` is all-or-nothing: inputs are scanned positionally left to
//! right and the first failing input's payload is returned verbatim; only
//! a fully successful row yields the tuple of values in input order.
//! `first_success` is the dual: first success wins, and when every input
//! fails the last input's failure is returned exactly as produced.

use crate::error::ErrorCode;
use crate::outcome::Outcome;

/// Conjunction of two outcomes.
pub fn combine2<A, B>(a: Outcome<A>, b: Outcome<B>) -> Outcome<(A, B)> {
    match (a, b) {
        (Outcome::Success(a), Outcome::Success(b)) => Outcome::Success((a, b)),
        (Outcome::Failure(failure), _) | (_, Outcome::Failure(failure)) => {
            Outcome::Failure(failure)
        }
    }
}

/// Conjunction of three outcomes.
pub fn combine3<A, B, C>(a: Outcome<A>, b: Outcome<B>, c: Outcome<C>) -> Outcome<(A, B, C)> {
    combine2(combine2(a, b), c).map(|((a, b), c)| (a, b, c))
}

/// Conjunction of four outcomes.
pub fn combine4<A, B, C, D>(
    a: Outcome<A>,
    b: Outcome<B>,
    c: Outcome<C>,
    d: Outcome<D>,
) -> Outcome<(A, B, C, D)> {
    combine2(combine3(a, b, c), d).map(|((a, b, c), d)| (a, b, c, d))
}

/// First success wins, scanning left to right.
///
/// When every input fails, the last input's failure is returned verbatim -
/// no synthesized aggregate. An empty input yields the canonical sentinel
/// `failure(INVALID_INPUT)`.
#[track_caller]
pub fn first_success<T>(results: impl IntoIterator<Item = Outcome<T>>) -> Outcome<T> {
    let mut last_failure = None;
    for result in results {
        match result {
            success @ Outcome::Success(_) => return success,
            Outcome::Failure(failure) => last_failure = Some(failure),
        }
    }
    match last_failure {
        Some(failure) => Outcome::Failure(failure),
        None => Outcome::failure(ErrorCode::INVALID_INPUT),
    }
}

impl<T> Outcome<T> {
    /// Combine with another outcome and transform the pair.
    pub fn zip<U, R>(self, other: Outcome<U>, f: impl FnOnce(T, U) -> R) -> Outcome<R> {
        combine2(self, other).map(|(a, b)| f(a, b))
    }

    /// Combine with two more outcomes and transform the triple.
    pub fn zip3<U, V, R>(
        self,
        second: Outcome<U>,
        third: Outcome<V>,
        f: impl FnOnce(T, U, V) -> R,
    ) -> Outcome<R> {
        combine3(self, second, third).map(|(a, b, c)| f(a, b, c))
    }
}
