//! Bridge from callback-style APIs into the deferred stack.

use std::marker::PhantomData;

use futures::channel::oneshot;

use crate::outcome::Outcome;
use crate::task::Task;

/// One-shot completion handle handed to the registration closure of
/// [`from_callback`].
///
/// Every completing method consumes the handle, so the task can be
/// settled at most once; competing callback invocations are ruled out at
/// the type level rather than by a runtime flag.
#[derive(Debug)]
pub struct Completion<E, A> {
    sender: oneshot::Sender<Outcome<E, A>>,
}

impl<E, A> Completion<E, A> {
    /// Settle the task with a success.
    pub fn succeed(self, value: A) {
        self.complete(Outcome::Success(value));
    }

    /// Settle the task with a failure.
    pub fn fail(self, error: E) {
        self.complete(Outcome::Failure(error));
    }

    /// Settle the task with an already-built outcome.
    pub fn complete(self, outcome: Outcome<E, A>) {
        // The receiver only disappears if the task future was dropped;
        // there is no one left to notify, so the outcome is discarded.
        let _ = self.sender.send(outcome);
    }
}

/// A task settled by an external callback. Built by [`from_callback`].
pub struct FromCallback<F, E, A> {
    register: F,
    _phantom: PhantomData<fn() -> Outcome<E, A>>,
}

impl<F, E, A> std::fmt::Debug for FromCallback<F, E, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromCallback").finish()
    }
}

impl<F, E, A> Task for FromCallback<F, E, A>
where
    F: FnOnce(Completion<E, A>) + Send,
    E: Send,
    A: Send,
{
    type Output = Outcome<E, A>;

    async fn run(self) -> Outcome<E, A> {
        let (sender, receiver) = oneshot::channel();
        (self.register)(Completion { sender });
        match receiver.await {
            Ok(outcome) => outcome,
            Err(oneshot::Canceled) => {
                panic!("completion handle dropped without settling the task")
            }
        }
    }
}

/// Adapt a callback-style API into a task.
///
/// When the task runs, `register` is invoked with a [`Completion`] handle;
/// the task settles when (and only when) the handle is used. Dropping the
/// handle without settling is a contract violation and panics the task.
///
/// ```rust
/// use millrace::task::{self, Task};
/// use millrace::Outcome;
///
/// # futures::executor::block_on(async {
/// let task = task::from_callback(|done: task::Completion<String, i32>| {
///     done.succeed(42);
/// });
/// assert_eq!(task.run().await, Outcome::success(42));
/// # });
/// ```
pub fn from_callback<F, E, A>(register: F) -> FromCallback<F, E, A>
where
    F: FnOnce(Completion<E, A>) + Send,
    E: Send,
    A: Send,
{
    FromCallback {
        register,
        _phantom: PhantomData,
    }
}
