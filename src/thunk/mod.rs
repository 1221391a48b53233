//! Lazy synchronous effects.
//!
//! A [`Thunk`] is a deferred synchronous computation: a description of
//! work that runs only when [`force`](Thunk::force) is called, and runs
//! entirely to completion before `force` returns - there is no suspension
//! point anywhere in a thunk composition.
//!
//! This module follows the crate-wide pattern (shared with [`task`] and
//! [`effect`]): a minimal capability trait, zero-cost combinator structs,
//! and extension traits supplying the method vocabulary. Any user type
//! implementing `Thunk` - not just the constructors in this module -
//! gains the full vocabulary, including the failure-aware layer in
//! [`fallible`] once its output is an [`Outcome`].
//!
//! [`task`]: crate::task
//! [`effect`]: crate::effect
//! [`Outcome`]: crate::Outcome
//!
//! # Deferral
//!
//! ```rust
//! use millrace::thunk::{self, Thunk, ThunkExt};
//! use std::cell::Cell;
//!
//! let ran = Cell::new(false);
//! let thunk = thunk::from_fn(|| {
//!     ran.set(true);
//!     21
//! })
//! .map(|x| x * 2);
//!
//! assert!(!ran.get()); // nothing has run yet
//! assert_eq!(thunk.force(), 42);
//! assert!(ran.get());
//! ```
//!
//! # Two method layers
//!
//! Naming follows the `futures` convention: the base layer (any output)
//! provides [`map`](ThunkExt::map) and [`then`](ThunkExt::then); the
//! failure-aware layer (output is `Outcome<E, A>`) provides `and_then`,
//! `or_else`, `map_success` and friends, the way `FutureExt` and
//! `TryFutureExt` split the same vocabulary. Both extension traits can be
//! in scope at once without ambiguity.

pub mod bracket;
pub mod constructors;
pub mod ext;
pub mod fallible;

pub use bracket::{bracket, Bracket};
pub use constructors::{
    fail, from_fn, panic_message, pure, succeed, try_catch, FromFn, Pure, TryCatch,
};
pub use ext::{BoxedThunk, Lift, Map, Then, ThunkExt};
pub use fallible::FallibleThunkExt;

/// The minimal capability of a lazy effect: it can be forced.
///
/// Together with [`pure`](constructors::pure) and the combinators built on
/// top, this is the complete base-effect interface the composition layers
/// consume - implement it for your own type and every combinator in this
/// module applies to it.
///
/// Thunks are consumed by value: forcing runs the description exactly
/// once. To run a computation again, build a new description.
pub trait Thunk: Sized {
    /// The value produced when the thunk is forced.
    type Output;

    /// Run the deferred computation to completion.
    fn force(self) -> Self::Output;
}
