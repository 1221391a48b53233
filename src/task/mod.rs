//! Deferred asynchronous effects.
//!
//! A [`Task`] is a description of an asynchronous computation: nothing
//! runs until [`run`](Task::run) is called, and the returned future
//! settles when the computation completes. Re-running requires building
//! a new description - there is no memoization and no sharing of
//! in-flight work.
//!
//! Sequencing guarantees match the lazy stack: within a
//! [`then`](TaskExt::then) or [`and_then`](FallibleTaskExt::and_then)
//! chain, step N+1 does not start before step N has settled. The only
//! combinator with weaker ordering is [`zip`](TaskExt::zip), which starts
//! both operands eagerly and combines when both settle;
//! [`zip_seq`](TaskExt::zip_seq) is the left-to-right sequential variant.
//!
//! There is no cancellation surface: once run, a task settles on its own
//! schedule (dropping the future stops polling it, as with any future,
//! but the library offers no abort handle). The only timing combinator is
//! `TaskExt::delay` (feature `async`), which adds minimum latency, never
//! a bound on maximum latency.
//!
//! ```rust
//! use millrace::task::{self, FallibleTaskExt, Task};
//! use millrace::Outcome;
//!
//! # futures::executor::block_on(async {
//! let chained = task::succeed::<String, _>(2).and_then(|x| task::succeed(x + 3));
//! assert_eq!(chained.run().await, Outcome::success(5));
//! # });
//! ```

use std::future::Future;

pub mod bracket;
pub mod callback;
pub mod constructors;
pub mod ext;
pub mod fallible;

pub use bracket::{bracket, Bracket};
pub use callback::{from_callback, Completion, FromCallback};
pub use constructors::{
    fail, from_async, from_thunk, pure, succeed, try_catch, FromAsync, FromThunk, Pure, TryCatch,
};
pub use ext::{BoxedTask, Lift, Map, Then, Zip, ZipSeq, TaskExt};
pub use fallible::FallibleTaskExt;

#[cfg(feature = "async")]
pub use ext::Delay;

/// The minimal capability of a deferred effect: it can be run, producing
/// its value asynchronously.
///
/// This trio - [`pure`](constructors::pure), [`map`](TaskExt::map),
/// [`then`](TaskExt::then) - is the complete base-effect interface the
/// failure-aware layer consumes; any type implementing `Task` gains the
/// whole vocabulary.
pub trait Task: Sized + Send {
    /// The value the task settles with.
    type Output: Send;

    /// Start the deferred computation. Latency (timers, I/O) is paid
    /// here, not at construction time.
    fn run(self) -> impl Future<Output = Self::Output> + Send;
}
