//! Lifting sequences of outcomes (or outcome-producing selectors) into a
//! single outcome.
//!
//! Everything here scans in source order. The converting operations stop
//! at the first failure - the selector or folder is never invoked past
//! that point. [`OutcomeIterator::partition_outcomes`] is the one
//! operation that never short-circuits: it drains the whole sequence into
//! order-preserving success and failure lists.

use itertools::{Either, Itertools};

use crate::error::ErrorCode;
use crate::outcome::Outcome;

/// Map each element through a fallible selector, collecting the values in
/// input order. Stops at the first selector failure; the selector is not
/// invoked for any later element.
pub fn select_outcomes<S, T>(
    source: impl IntoIterator<Item = S>,
    mut selector: impl FnMut(S) -> Outcome<T>,
) -> Outcome<Vec<T>> {
    let iter = source.into_iter();
    let mut values = Vec::with_capacity(iter.size_hint().0);
    for item in iter {
        match selector(item) {
            Outcome::Success(value) => values.push(value),
            Outcome::Failure(failure) => return Outcome::Failure(failure),
        }
    }
    Outcome::Success(values)
}

/// Keep the elements whose fallible predicate answers `true`. The first
/// failing predicate call fails the whole operation.
pub fn filter_outcomes<S>(
    source: impl IntoIterator<Item = S>,
    mut predicate: impl FnMut(&S) -> Outcome<bool>,
) -> Outcome<Vec<S>> {
    let mut kept = Vec::new();
    for item in source {
        match predicate(&item) {
            Outcome::Success(true) => kept.push(item),
            Outcome::Success(false) => {}
            Outcome::Failure(failure) => return Outcome::Failure(failure),
        }
    }
    Outcome::Success(kept)
}

/// Sequential left fold with a fallible folder. Stops at the first
/// failure, otherwise yields the final accumulator.
pub fn fold_outcomes<S, A>(
    source: impl IntoIterator<Item = S>,
    seed: A,
    mut folder: impl FnMut(A, S) -> Outcome<A>,
) -> Outcome<A> {
    let mut accumulator = seed;
    for item in source {
        match folder(accumulator, item) {
            Outcome::Success(next) => accumulator = next,
            Outcome::Failure(failure) => return Outcome::Failure(failure),
        }
    }
    Outcome::Success(accumulator)
}

/// Collection-level operations over iterators of outcomes.
pub trait OutcomeIterator<T>: Iterator<Item = Outcome<T>> + Sized {
    /// Collect every success in order; the first failure aborts and is
    /// returned verbatim.
    fn combine_all(self) -> Outcome<Vec<T>> {
        select_outcomes(self, |outcome| outcome)
    }

    /// Split into success values and failure codes, both preserving the
    /// relative order of the source. Never short-circuits.
    fn partition_outcomes(self) -> (Vec<T>, Vec<ErrorCode>) {
        self.partition_map(|outcome| match outcome {
            Outcome::Success(value) => Either::Left(value),
            Outcome::Failure(failure) => Either::Right(failure.code),
        })
    }

    /// Pairwise-combine success values left to right. Stops at the first
    /// failing element; an empty input yields the canonical sentinel
    /// `failure(INVALID_INPUT)`.
    #[track_caller]
    fn aggregate_outcomes(mut self, mut combiner: impl FnMut(T, T) -> T) -> Outcome<T> {
        let mut accumulator = match self.next() {
            None => return Outcome::failure(ErrorCode::INVALID_INPUT),
            Some(Outcome::Failure(failure)) => return Outcome::Failure(failure),
            Some(Outcome::Success(value)) => value,
        };
        for outcome in self {
            match outcome {
                Outcome::Success(value) => accumulator = combiner(accumulator, value),
                Outcome::Failure(failure) => return Outcome::Failure(failure),
            }
        }
        Outcome::Success(accumulator)
    }

    /// Lazy projection of the success values.
    fn successes(self) -> impl Iterator<Item = T> {
        self.filter_map(Outcome::ok)
    }

    /// Lazy projection of the failure codes.
    fn failures(self) -> impl Iterator<Item = ErrorCode> {
        self.filter_map(|outcome| outcome.err().map(|failure| failure.code))
    }
}

impl<I, T> OutcomeIterator<T> for I where I: Iterator<Item = Outcome<T>> {}
