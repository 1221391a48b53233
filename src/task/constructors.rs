//! Leaf constructors for deferred effects.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;

use crate::outcome::Outcome;
use crate::task::Task;
use crate::thunk::Thunk;

/// A pure value wrapped as a task; settles immediately when run.
#[derive(Debug, Clone)]
pub struct Pure<A> {
    value: A,
}

impl<A: Send> Task for Pure<A> {
    type Output = A;

    async fn run(self) -> A {
        self.value
    }
}

/// A task that always settles with `value`.
pub fn pure<A: Send>(value: A) -> Pure<A> {
    Pure { value }
}

/// A fallible task that always succeeds with `value`.
pub fn succeed<E: Send, A: Send>(value: A) -> Pure<Outcome<E, A>> {
    pure(Outcome::success(value))
}

/// A fallible task that always fails with `error`.
pub fn fail<E: Send, A: Send>(error: E) -> Pure<Outcome<E, A>> {
    pure(Outcome::failure(error))
}

/// A task built from a deferred future.
///
/// The closure is the deferral point: the future does not exist (and so
/// cannot have started) until the task is run.
pub struct FromAsync<F> {
    f: F,
}

impl<F> std::fmt::Debug for FromAsync<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromAsync").finish()
    }
}

impl<F, Fut> Task for FromAsync<F>
where
    F: FnOnce() -> Fut + Send,
    Fut: Future + Send,
    Fut::Output: Send,
{
    type Output = Fut::Output;

    async fn run(self) -> Fut::Output {
        (self.f)().await
    }
}

/// Defer an async computation as a task.
///
/// ```rust
/// use millrace::task::{self, Task};
///
/// # futures::executor::block_on(async {
/// let task = task::from_async(|| async { 21 * 2 });
/// assert_eq!(task.run().await, 42);
/// # });
/// ```
pub fn from_async<F, Fut>(f: F) -> FromAsync<F>
where
    F: FnOnce() -> Fut + Send,
    Fut: Future + Send,
    Fut::Output: Send,
{
    FromAsync { f }
}

/// A lazy effect lifted into the deferred stack; it runs synchronously
/// inside the task's future.
pub struct FromThunk<T> {
    thunk: T,
}

impl<T> std::fmt::Debug for FromThunk<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromThunk").finish()
    }
}

impl<T> Task for FromThunk<T>
where
    T: Thunk + Send,
    T::Output: Send,
{
    type Output = T::Output;

    async fn run(self) -> T::Output {
        self.thunk.force()
    }
}

/// Lift a lazy effect into the deferred stack.
pub fn from_thunk<T>(thunk: T) -> FromThunk<T>
where
    T: Thunk + Send,
    T::Output: Send,
{
    FromThunk { thunk }
}

/// Boundary conversion for async computations that may panic. See
/// [`try_catch`].
pub struct TryCatch<F, H> {
    f: F,
    on_panic: H,
}

impl<F, H> std::fmt::Debug for TryCatch<F, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TryCatch").finish()
    }
}

impl<F, H, Fut, A, E> Task for TryCatch<F, H>
where
    F: FnOnce() -> Fut + Send,
    Fut: Future<Output = A> + Send,
    H: FnOnce(Box<dyn Any + Send>) -> E + Send,
    A: Send,
    E: Send,
{
    type Output = Outcome<E, A>;

    async fn run(self) -> Outcome<E, A> {
        let f = self.f;
        match AssertUnwindSafe(async move { f().await }).catch_unwind().await {
            Ok(value) => Outcome::Success(value),
            Err(payload) => Outcome::Failure((self.on_panic)(payload)),
        }
    }
}

/// Capture an async computation that may panic, demoting the panic to a
/// `Failure` built by `on_panic`. The raw panic never escapes the task.
///
/// ```rust
/// use millrace::task::{self, Task};
/// use millrace::thunk::panic_message;
/// use millrace::Outcome;
///
/// # futures::executor::block_on(async {
/// let caught = task::try_catch(|| async { panic!("kaboom") }, |p| panic_message(&*p));
/// assert_eq!(caught.run().await, Outcome::<String, ()>::failure("kaboom".to_string()));
/// # });
/// ```
pub fn try_catch<F, H, Fut, A, E>(f: F, on_panic: H) -> TryCatch<F, H>
where
    F: FnOnce() -> Fut + Send,
    Fut: Future<Output = A> + Send,
    H: FnOnce(Box<dyn Any + Send>) -> E + Send,
    A: Send,
    E: Send,
{
    TryCatch { f, on_panic }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::thunk;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn from_async_defers_until_run() {
        let started = Arc::new(AtomicBool::new(false));
        let probe = started.clone();
        let task = from_async(move || {
            let probe = probe.clone();
            async move {
                probe.store(true, Ordering::SeqCst);
                42
            }
        });
        assert!(!started.load(Ordering::SeqCst));
        assert_eq!(task.run().await, 42);
        assert!(started.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn from_thunk_runs_the_lazy_effect() {
        let task = from_thunk(thunk::from_fn(|| 5));
        assert_eq!(task.run().await, 5);
    }

    #[tokio::test]
    async fn try_catch_demotes_async_panics() {
        let outcome: Outcome<String, i32> =
            try_catch(|| async { panic!("late") }, |p| thunk::panic_message(&*p))
                .run()
                .await;
        assert_eq!(outcome, Outcome::failure("late".to_string()));
    }

    #[tokio::test]
    async fn try_catch_passes_success_through() {
        let outcome: Outcome<String, i32> =
            try_catch(|| async { 3 }, |p| thunk::panic_message(&*p)).run().await;
        assert_eq!(outcome, Outcome::success(3));
    }
}
