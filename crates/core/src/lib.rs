//! # shunt-core
//!
//! Railway-oriented outcome types and combinators.
//!
//! A pipeline starts from a factory ([`Outcome::success`],
//! [`Outcome::failure`], [`Optional::some`], [`Optional::none`]) and
//! chains pure combinators; the first failure short-circuits every
//! following step while preserving its [`ErrorCode`] identity. Uncontrolled
//! panics from caller-supplied code are converted into failures at the
//! [`safe`] boundary and nowhere else.
//!
//! ```
//! use shunt_core::{ErrorCode, Outcome};
//!
//! let outcome = Outcome::success(21)
//!     .map(|x| x * 2)
//!     .filter(|x| *x < 100, ErrorCode::VALIDATION_FAILED);
//! assert_eq!(outcome, Outcome::success(42));
//! ```

pub mod collect;
pub mod combine;
mod combinators;
pub mod error;
pub mod optional;
pub mod outcome;
pub mod pool;
pub mod safe;

pub use collect::{OutcomeIterator, filter_outcomes, fold_outcomes, select_outcomes};
pub use combine::{combine2, combine3, combine4, first_success};
pub use error::{ErrorCode, Failure};
pub use optional::Optional;
pub use outcome::Outcome;
pub use pool::{Scratch, ScratchPool};
