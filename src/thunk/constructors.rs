//! Leaf constructors for lazy effects.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::outcome::Outcome;
use crate::thunk::Thunk;

/// A pure value wrapped as a thunk. Forcing has no observable side effect.
#[derive(Debug, Clone)]
pub struct Pure<A> {
    value: A,
}

impl<A> Thunk for Pure<A> {
    type Output = A;

    fn force(self) -> A {
        self.value
    }
}

/// A thunk that always produces `value`.
///
/// ```rust
/// use millrace::thunk::{self, Thunk};
///
/// assert_eq!(thunk::pure(42).force(), 42);
/// ```
pub fn pure<A>(value: A) -> Pure<A> {
    Pure { value }
}

/// A fallible thunk that always succeeds with `value`.
///
/// Shorthand for `pure(Outcome::success(value))`.
pub fn succeed<E, A>(value: A) -> Pure<Outcome<E, A>> {
    pure(Outcome::success(value))
}

/// A fallible thunk that always fails with `error`.
pub fn fail<E, A>(error: E) -> Pure<Outcome<E, A>> {
    pure(Outcome::failure(error))
}

/// A thunk from a closure.
///
/// The closure captures whatever external state it reads; it is not
/// invoked until the thunk is forced.
pub struct FromFn<F> {
    f: F,
}

impl<F> std::fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromFn").field("f", &"<function>").finish()
    }
}

impl<F, A> Thunk for FromFn<F>
where
    F: FnOnce() -> A,
{
    type Output = A;

    fn force(self) -> A {
        (self.f)()
    }
}

/// Defer a closure as a thunk.
///
/// ```rust
/// use millrace::thunk::{self, Thunk};
///
/// let thunk = thunk::from_fn(|| 10 + 20);
/// assert_eq!(thunk.force(), 30);
/// ```
pub fn from_fn<F, A>(f: F) -> FromFn<F>
where
    F: FnOnce() -> A,
{
    FromFn { f }
}

/// Boundary conversion for computations that may panic.
///
/// Runs the closure under `catch_unwind`; a panic payload is mapped to the
/// failure channel instead of escaping. See [`try_catch`].
pub struct TryCatch<F, H> {
    f: F,
    on_panic: H,
}

impl<F, H> std::fmt::Debug for TryCatch<F, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TryCatch").finish()
    }
}

impl<F, H, A, E> Thunk for TryCatch<F, H>
where
    F: FnOnce() -> A,
    H: FnOnce(Box<dyn Any + Send>) -> E,
{
    type Output = Outcome<E, A>;

    fn force(self) -> Outcome<E, A> {
        match catch_unwind(AssertUnwindSafe(self.f)) {
            Ok(value) => Outcome::Success(value),
            Err(payload) => Outcome::Failure((self.on_panic)(payload)),
        }
    }
}

/// Capture a computation that may panic, demoting the panic to a
/// `Failure` built by `on_panic`.
///
/// This is the sole place (together with [`bracket`]'s use phase) where
/// the composition machinery touches panics; everywhere else a panic from
/// user code propagates out of `force` untouched.
///
/// [`bracket`]: crate::thunk::bracket
///
/// ```rust
/// use millrace::thunk::{self, Thunk};
/// use millrace::Outcome;
///
/// let caught = thunk::try_catch(|| panic!("kaboom"), |p| thunk::panic_message(&*p));
/// assert_eq!(caught.force(), Outcome::failure("kaboom".to_string()));
///
/// let fine = thunk::try_catch(|| 42, |p| thunk::panic_message(&*p));
/// assert_eq!(fine.force(), Outcome::success(42));
/// ```
pub fn try_catch<F, H, A, E>(f: F, on_panic: H) -> TryCatch<F, H>
where
    F: FnOnce() -> A,
    H: FnOnce(Box<dyn Any + Send>) -> E,
{
    TryCatch { f, on_panic }
}

/// Extract a readable message from a panic payload.
///
/// Panic payloads are `&str` or `String` for the common `panic!` forms;
/// anything else yields a placeholder.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
