//! # shunt-async
//!
//! Asynchronous layer over [`shunt_core`]: async railway combinators, the
//! async fault boundary, cooperative cancellation, and bounded retry with
//! backoff.
//!
//! Execution follows single-threaded cooperative suspension - the only
//! await points sit around caller-supplied futures, and the crate never
//! spawns threads of its own. Resumption happens on whatever scheduler
//! the host tokio runtime uses.

pub mod cancel;
pub mod ext;
pub mod retry;
pub mod safe;

pub use cancel::CancelToken;
pub use ext::AsyncOutcomeExt;
pub use retry::{RetryPolicy, retry, retry_with_backoff};
